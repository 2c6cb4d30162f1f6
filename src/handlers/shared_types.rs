use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Current wall-clock time as RFC 3339 with millisecond precision, e.g.
/// `2026-10-14T09:30:00.123Z`.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub timestamp: String,
}

/// Handler-boundary error, converted into an HTTP error response.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound,
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        // ---
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status();
        let error = match self {
            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {msg}");
                msg
            }
            AppError::NotFound => "Not Found".to_string(),
            AppError::Internal(msg) => {
                tracing::error!("Request failed: {msg}");
                msg
            }
        };

        let body = ErrorBody {
            error,
            timestamp: timestamp(),
        };
        (status, Json(body)).into_response()
    }
}
