mod category;
mod expense;
mod stats;

pub use category::Category;
pub use expense::{Expense, NewExpense};
pub use stats::{Report, Stats, SummaryEntry, TotalStat};
