//! Typed client for the Expense Tracker HTTP/JSON API (`/api/v1`).

mod error;
mod worker;

pub use error::{ApiError, Result};
pub use worker::{spawn_dispatcher, ApiRequest, ApiResponse};

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::models::{Category, Expense, NewExpense, Report, Stats, SummaryEntry, TotalStat};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client, cheap to clone (the inner connection pool is
/// shared), so each in-flight request can run on its own thread.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Connection)?;
        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn list_expenses(&self) -> Result<Vec<Expense>> {
        self.get_json("/expenses/")
    }

    pub fn expenses_by_category(&self, category: &Category) -> Result<Vec<Expense>> {
        self.get_json(&format!("/expenses/category/{}", category.as_str()))
    }

    pub fn create_expense(&self, expense: &NewExpense) -> Result<Expense> {
        let url = format!("{}/expenses/", self.base);
        tracing::debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .json(expense)
            .send()
            .map_err(ApiError::Connection)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
            });
        }
        response.json().map_err(ApiError::Decode)
    }

    pub fn delete_expense(&self, id: i64) -> Result<()> {
        let url = format!("{}/expenses/{id}", self.base);
        tracing::debug!(%url, "DELETE");
        let response = self.http.delete(&url).send().map_err(ApiError::Connection)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    pub fn total_spent(&self) -> Result<TotalStat> {
        self.get_json("/analytics/total")
    }

    pub fn summary(&self) -> Result<Vec<SummaryEntry>> {
        self.get_json("/analytics/summary")
    }

    pub fn report(&self) -> Result<Report> {
        self.get_json("/analytics/report")
    }

    /// Fetches the total, the per-category summary, and a fresh expense
    /// list concurrently, joining all three before building `Stats`.
    /// The count comes from the fresh list, never from whatever the UI
    /// currently shows, so a concurrent mutation cannot skew it.
    pub fn fetch_stats(&self) -> Result<Stats> {
        thread::scope(|scope| {
            let total = scope.spawn(|| self.total_spent());
            let summary = scope.spawn(|| self.summary());
            let expenses = scope.spawn(|| self.list_expenses());

            let total = total.join().map_err(|_| ApiError::Join)??;
            let summary = summary.join().map_err(|_| ApiError::Join)??;
            let expenses = expenses.join().map_err(|_| ApiError::Join)??;

            Ok(Stats {
                total,
                summary,
                count: expenses.len(),
            })
        })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base);
        tracing::debug!(%url, "GET");
        let response = self.http.get(&url).send().map_err(ApiError::Connection)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
            });
        }
        response.json().map_err(ApiError::Decode)
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
