use crate::app_state::AppState;
use crate::handlers::shared_types::AppError;
use axum::{extract::State, http::header, http::StatusCode, response::IntoResponse};

/// Handler for the `/metrics` endpoint.
///
/// Returns metrics in the text exposition format for scraping.
/// Uses the metrics implementation from AppState, which could be
/// either Prometheus or no-op depending on configuration.
pub async fn metrics_handler(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    // ---
    let metrics = app_state.metrics();
    let metrics_text = metrics
        .render()
        .map_err(|e| AppError::Internal(format!("metrics export failed: {e}")))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, metrics.content_type())],
        metrics_text,
    ))
}
