use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::models::{Category, Expense, NewExpense, Stats};

use super::{ApiClient, ApiError};

/// A unit of work the UI hands off to the network side.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    FetchExpenses,
    FetchByCategory(Category),
    FetchStats,
    CreateExpense(NewExpense),
    DeleteExpense(i64),
    ExportReport(PathBuf),
}

/// Completion of an [`ApiRequest`], delivered back to the UI loop.
#[derive(Debug)]
pub enum ApiResponse {
    Expenses(Result<Vec<Expense>, ApiError>),
    Stats(Result<Stats, ApiError>),
    Created(Result<Expense, ApiError>),
    Deleted(Result<(), ApiError>),
    ReportSaved(Result<PathBuf, ApiError>),
}

/// Runs requests off the UI thread, one thread per request, so every
/// request is independently in flight. A hung request stalls only its
/// own response; the dispatcher keeps accepting new work.
pub fn spawn_dispatcher(
    client: ApiClient,
    requests: Receiver<ApiRequest>,
    responses: Sender<ApiResponse>,
) {
    thread::spawn(move || {
        while let Ok(request) = requests.recv() {
            let client = client.clone();
            let responses = responses.clone();
            thread::spawn(move || {
                let response = execute(&client, request);
                // The UI may already be gone during shutdown.
                let _ = responses.send(response);
            });
        }
    });
}

fn execute(client: &ApiClient, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::FetchExpenses => ApiResponse::Expenses(client.list_expenses()),
        ApiRequest::FetchByCategory(category) => {
            ApiResponse::Expenses(client.expenses_by_category(&category))
        }
        ApiRequest::FetchStats => ApiResponse::Stats(client.fetch_stats()),
        ApiRequest::CreateExpense(expense) => ApiResponse::Created(client.create_expense(&expense)),
        ApiRequest::DeleteExpense(id) => ApiResponse::Deleted(client.delete_expense(id)),
        ApiRequest::ExportReport(path) => ApiResponse::ReportSaved(save_report(client, path)),
    }
}

/// Fetches the pre-rendered CSV report and writes it to `path`. An
/// empty path falls back to the server-suggested filename in the
/// current directory.
fn save_report(client: &ApiClient, path: PathBuf) -> Result<PathBuf, ApiError> {
    let report = client.report()?;
    let path = if path.as_os_str().is_empty() {
        PathBuf::from(report.filename)
    } else {
        path
    };
    std::fs::write(&path, report.csv)?;
    Ok(path)
}
