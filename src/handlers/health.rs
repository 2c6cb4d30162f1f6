use crate::app_state::AppState;
use crate::handlers::shared_types::timestamp;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: String,
    timestamp: String,
    hostname: String,
    /// Seconds since start, fractional.
    uptime: f64,
}

/// Responds with the health status of the server.
///
/// There are no backends to probe, so if the process can answer it is
/// healthy.
///
/// # Responses
/// - `200 OK` with `{ "status": "healthy", "version", "timestamp", "hostname", "uptime" }`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // ---
    let runtime = state.runtime();
    Json(HealthResponse {
        status: "healthy",
        version: runtime.version.clone(),
        timestamp: timestamp(),
        hostname: runtime.hostname.clone(),
        uptime: runtime.uptime(),
    })
}
