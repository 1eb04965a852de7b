//! Drives `HttpForecastService` against a one-shot HTTP server on localhost.

use std::path::Path;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use twin_core::{
    ExpenseBreakdown, ForecastRequest, ForecastService, MalformedResponse, ServiceError,
};
use twin_http::HttpForecastService;

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).expect("fixture should exist")
}

fn request() -> ForecastRequest {
    let mut expenses = ExpenseBreakdown::new();
    expenses.insert("rent", dec!(1000)).unwrap();
    expenses.insert("food", dec!(800)).unwrap();
    ForecastRequest {
        salary: dec!(5000),
        expenses,
    }
}

/// Serves one canned reply and hands back the request body it received.
async fn serve_once(
    status_line: &'static str,
    body: String,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/forecast", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut received = Vec::new();
        let mut buf = [0u8; 1024];
        let header_end = loop {
            let n = socket.read(&mut buf).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            received.extend_from_slice(&buf[..n]);
            if let Some(pos) = received.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let headers = String::from_utf8_lossy(&received[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .map(|v| v.trim().parse::<usize>().unwrap())
            .unwrap_or(0);
        while received.len() < header_end + content_length {
            let n = socket.read(&mut buf).await.unwrap();
            assert!(n > 0, "client closed before sending body");
            received.extend_from_slice(&buf[..n]);
        }

        let reply = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(reply.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        String::from_utf8(received[header_end..header_end + content_length].to_vec()).unwrap()
    });

    (endpoint, handle)
}

fn service(endpoint: &str) -> HttpForecastService {
    HttpForecastService::new(endpoint, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn posts_request_and_decodes_forecast() {
    let (endpoint, server) = serve_once("200 OK", fixture("forecast_response.json")).await;

    let response = service(&endpoint).forecast(&request()).await.unwrap();
    let sent: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();

    assert_eq!(
        sent,
        serde_json::json!({ "salary": 5000.0, "expenses": { "rent": 1000.0, "food": 800.0 } })
    );
    assert_eq!(response.scenarios.months(), Ok(5));
    assert_eq!(response.scenarios.base[4], dec!(16000));
    assert_eq!(response.summary.monthly, dec!(3200));
}

#[tokio::test]
async fn non_success_status_keeps_body() {
    let (endpoint, server) =
        serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#.to_string()).await;

    let err = service(&endpoint).forecast(&request()).await.unwrap_err();
    server.await.unwrap();

    match err {
        ServiceError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, r#"{"detail":"boom"}"#);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn ragged_series_are_rejected() {
    let body = r#"{
        "summary": { "monthly": 1, "yearly": 12, "2_years": 24, "5_years": 60 },
        "scenarios": { "base": [1, 2, 3], "optimistic": [1, 2, 3], "conservative": [1, 2] },
        "recommendation": ""
    }"#;
    let (endpoint, server) = serve_once("200 OK", body.to_string()).await;

    let err = service(&endpoint).forecast(&request()).await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(
        err,
        ServiceError::Malformed(MalformedResponse::LengthMismatch { conservative: 2, .. })
    ));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    // Bind then drop so the port is known to be closed.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = service(&format!("http://{addr}/forecast"))
        .forecast(&request())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Transport(_)), "{err:?}");
}
