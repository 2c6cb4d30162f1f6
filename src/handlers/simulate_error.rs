use crate::handlers::shared_types::AppError;

pub const SIMULATED_ERROR: &str = "Simulated error for testing";

/// Always fails with `500 {error, timestamp}` so dashboards and alerts can
/// be exercised on demand.
pub async fn simulate_error() -> AppError {
    AppError::Internal(SIMULATED_ERROR.to_string())
}
