// Test helpers are intentionally partially used
#![allow(dead_code)]

use enterprise_demo::domain::RuntimeInfo;
use enterprise_demo::{build_router, create_noop_metrics, create_prom_metrics, AppState};
use reqwest::Client;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

pub const TEST_VERSION: &str = "v1.0.0-test";
pub const TEST_APP: &str = "enterprise-demo-app";

// ============================================================================
// Test Setup
// ============================================================================

/// State backed by a fresh Prometheus registry, so each test starts from zero.
pub fn prom_state(version: &str) -> AppState {
    // ---
    let metrics = create_prom_metrics(TEST_APP, version, Duration::from_secs(1))
        .expect("Should be able to create prometheus metrics");
    AppState::new(metrics, RuntimeInfo::new(version), "demo.example")
}

pub fn noop_state() -> AppState {
    // ---
    let metrics = create_noop_metrics().expect("Should be able to create noop metrics");
    AppState::new(metrics, RuntimeInfo::new(TEST_VERSION), "demo.example")
}

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---
    pub async fn new() -> Self {
        Self::with_state(prom_state(TEST_VERSION)).await
    }

    pub async fn with_state(state: AppState) -> Self {
        // --

        let app = build_router(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        // ---
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn metrics_text(&self) -> String {
        // ---
        self.get("/metrics")
            .await
            .text()
            .await
            .expect("Failed to read metrics body")
    }
}

// ============================================================================
// Exposition parsing
// ============================================================================

/// Value of the first sample named `name` whose label set contains every
/// `key="value"` pair in `labels`. Zero when no such sample exists.
pub fn sample_value(text: &str, name: &str, labels: &[(&str, &str)]) -> f64 {
    // ---
    let prefix = format!("{name}{{");
    text.lines()
        .filter(|line| line.starts_with(&prefix))
        .find(|line| {
            labels
                .iter()
                .all(|(k, v)| line.contains(&format!(r#"{k}="{v}""#)))
        })
        .and_then(|line| line.rsplit(' ').next())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0.0)
}

pub fn request_count(text: &str, method: &str, route: &str, status: &str) -> f64 {
    sample_value(
        text,
        "http_requests_total",
        &[("method", method), ("route", route), ("status_code", status)],
    )
}

pub fn duration_count(text: &str, method: &str, route: &str) -> f64 {
    sample_value(
        text,
        "http_request_duration_seconds_count",
        &[("method", method), ("route", route)],
    )
}
