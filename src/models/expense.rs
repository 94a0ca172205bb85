use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

/// An expense as returned by the server. The client never mutates one;
/// it holds a snapshot that is discarded on the next fetch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub amount: Decimal,
    pub category: Category,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Expense {
    /// Date in uk-UA convention, e.g. `15.01.2024`.
    pub fn date_uk(&self) -> String {
        self.date.format("%d.%m.%Y").to_string()
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Body of `POST /expenses/`. Description may be empty; the server
/// treats it as optional.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpense {
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
}
