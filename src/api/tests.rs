#![allow(clippy::unwrap_used, clippy::panic)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use rust_decimal_macros::dec;

use super::*;
use crate::models::Category;

/// Minimal canned-response HTTP server for exercising the client
/// without a live backend. Serves `connections` requests, routing by
/// exact request path, then exits.
fn spawn_server(
    routes: Vec<(&'static str, &'static str, &'static str)>,
    connections: usize,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for _ in 0..connections {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut buf = [0u8; 8192];
            let n = stream.read(&mut buf).unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]).into_owned();
            let path = request
                .split_whitespace()
                .nth(1)
                .unwrap_or_default()
                .to_string();
            let (status, body) = routes
                .iter()
                .find(|(route, _, _)| *route == path)
                .map(|(_, status, body)| (*status, *body))
                .unwrap_or(("404 Not Found", "{\"detail\":\"Not Found\"}"));
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}/api/v1")
}

const EXPENSES_JSON: &str = r#"[
    {"id": 1, "amount": 120.5, "category": "food", "description": "обід",
     "date": "2024-01-15T12:30:00", "created_at": "2024-01-15T12:30:00"},
    {"id": 2, "amount": 40, "category": "transport", "description": null,
     "date": "2024-01-16T08:00:00", "created_at": "2024-01-16T08:00:00"}
]"#;

#[test]
fn test_list_expenses_parses_response() {
    let base = spawn_server(vec![("/api/v1/expenses/", "200 OK", EXPENSES_JSON)], 1);
    let client = ApiClient::new(&base).unwrap();

    let expenses = client.list_expenses().unwrap();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].amount, dec!(120.5));
    assert_eq!(expenses[1].category, Category::Transport);
    assert!(expenses[1].description.is_none());
}

#[test]
fn test_server_error_maps_to_rejected() {
    let base = spawn_server(
        vec![("/api/v1/expenses/", "500 Internal Server Error", "{}")],
        1,
    );
    let client = ApiClient::new(&base).unwrap();

    let error = client.list_expenses().unwrap_err();
    assert!(matches!(error, ApiError::Rejected { status: 500 }));
    assert!(!error.is_connection());
}

#[test]
fn test_connection_refused_maps_to_connection() {
    // Grab a free port, then close the listener before connecting.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{addr}/api/v1")).unwrap();
    let error = client.list_expenses().unwrap_err();
    assert!(error.is_connection());
}

#[test]
fn test_malformed_body_maps_to_decode() {
    let base = spawn_server(vec![("/api/v1/analytics/total", "200 OK", "not json")], 1);
    let client = ApiClient::new(&base).unwrap();

    let error = client.total_spent().unwrap_err();
    assert!(matches!(error, ApiError::Decode(_)));
}

#[test]
fn test_delete_expense_ok_and_not_found() {
    let base = spawn_server(
        vec![(
            "/api/v1/expenses/7",
            "200 OK",
            "{\"message\": \"Expense deleted successfully\"}",
        )],
        2,
    );
    let client = ApiClient::new(&base).unwrap();

    client.delete_expense(7).unwrap();
    let error = client.delete_expense(999).unwrap_err();
    assert!(matches!(error, ApiError::Rejected { status: 404 }));
}

#[test]
fn test_create_expense_returns_created_row() {
    let base = spawn_server(
        vec![(
            "/api/v1/expenses/",
            "200 OK",
            r#"{"id": 10, "amount": 55.25, "category": "health", "description": "ліки",
                "date": "2024-02-02T10:00:00", "created_at": "2024-02-02T10:00:00"}"#,
        )],
        1,
    );
    let client = ApiClient::new(&base).unwrap();

    let body = NewExpense {
        amount: dec!(55.25),
        category: Category::Health,
        description: "ліки".into(),
    };
    let created = client.create_expense(&body).unwrap();
    assert_eq!(created.id, 10);
    assert_eq!(created.category, Category::Health);
}

#[test]
fn test_fetch_stats_joins_all_three_requests() {
    let base = spawn_server(
        vec![
            (
                "/api/v1/analytics/total",
                "200 OK",
                r#"{"total_amount": 160.5}"#,
            ),
            (
                "/api/v1/analytics/summary",
                "200 OK",
                r#"[{"category": "food", "total_amount": 120.5, "count": 1},
                    {"category": "transport", "total_amount": 40, "count": 1}]"#,
            ),
            ("/api/v1/expenses/", "200 OK", EXPENSES_JSON),
        ],
        3,
    );
    let client = ApiClient::new(&base).unwrap();

    let stats = client.fetch_stats().unwrap();
    assert_eq!(stats.total.display(), "160.50");
    assert_eq!(stats.summary.len(), 2);
    // Count derives from the freshly fetched list, not the summary.
    assert_eq!(stats.count, 2);
}

#[test]
fn test_fetch_stats_fails_when_any_leg_fails() {
    let base = spawn_server(
        vec![
            (
                "/api/v1/analytics/total",
                "200 OK",
                r#"{"total_amount": null}"#,
            ),
            (
                "/api/v1/analytics/summary",
                "500 Internal Server Error",
                "{}",
            ),
            ("/api/v1/expenses/", "200 OK", "[]"),
        ],
        3,
    );
    let client = ApiClient::new(&base).unwrap();

    assert!(client.fetch_stats().is_err());
}

#[test]
fn test_export_report_written_to_disk() {
    let base = spawn_server(
        vec![(
            "/api/v1/analytics/report",
            "200 OK",
            r#"{"csv": "category,total\nfood,120.50\n", "filename": "expense_report.csv"}"#,
        )],
        1,
    );
    let client = ApiClient::new(&base).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zvit.csv");

    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    spawn_dispatcher(client, request_rx, response_tx);

    request_tx
        .send(ApiRequest::ExportReport(path.clone()))
        .unwrap();
    let response = response_rx
        .recv_timeout(std::time::Duration::from_secs(5))
        .unwrap();

    match response {
        ApiResponse::ReportSaved(Ok(saved)) => assert_eq!(saved, path),
        other => panic!("unexpected response: {other:?}"),
    }
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("food,120.50"));
}
