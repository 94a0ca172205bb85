use rust_decimal::Decimal;
use serde::Deserialize;

use super::Category;

/// Response of `GET /analytics/total`. The server sends `null` when
/// there are no expenses yet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TotalStat {
    pub total_amount: Option<Decimal>,
}

impl TotalStat {
    /// Amount formatted to two decimals, `"0.00"` when absent.
    pub fn display(&self) -> String {
        format!("{:.2}", self.total_amount.unwrap_or(Decimal::ZERO))
    }
}

/// One row of `GET /analytics/summary`: a per-category aggregate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummaryEntry {
    pub category: Category,
    pub total_amount: Decimal,
    #[serde(default)]
    pub count: i64,
}

/// Joined product of the three concurrent analytics fetches. `count`
/// comes from a fresh list fetch, not the list already on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total: TotalStat,
    pub summary: Vec<SummaryEntry>,
    pub count: usize,
}

/// Response of `GET /analytics/report`: a pre-rendered CSV document.
#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    pub csv: String,
    pub filename: String,
}
