use crate::handlers::shared_types::AppError;
use axum::{
    body::Bytes,
    http::{header, HeaderMap},
    Json,
};
use serde_json::{json, Value};

fn is_json(headers: &HeaderMap) -> bool {
    // ---
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim().to_ascii_lowercase().starts_with("application/json"))
}

/// Analytics sink (POST /analytics).
///
/// Accepts any payload, logs it and throws it away. Nothing is validated or
/// stored. An empty JSON body reads as `{}`, and a body without a JSON
/// content type is logged unparsed. Only a JSON-typed body that fails to
/// parse is answered with `400`.
pub async fn analytics_handler(
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    // ---
    if !is_json(&headers) {
        tracing::info!(bytes = body.len(), "Analytics data (not JSON)");
        return Ok(Json(json!({ "received": true })));
    }

    let data: Value = if body.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?
    };

    tracing::info!(analytics = %data, "Analytics data");

    Ok(Json(json!({ "received": true })))
}
