pub(crate) mod chart;
pub(crate) mod expenses;
pub(crate) mod stats;
