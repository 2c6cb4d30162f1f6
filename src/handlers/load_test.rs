use crate::app_state::AppState;
use crate::handlers::shared_types::{timestamp, AppError};
use axum::{
    extract::{Query, State},
    Json,
};
use rand::Rng;
use serde::Serialize;

pub const DEFAULT_ITERATIONS: u64 = 1000;

/// Upper bound on a single request's busy loop.
pub const MAX_ITERATIONS: u64 = 10_000_000;

#[derive(Debug, Serialize)]
pub struct LoadTestResponse {
    result: f64,
    iterations: u64,
    version: String,
    hostname: String,
    timestamp: String,
}

/// Parse the `iterations` query value from its leading digits, so `2.5`
/// reads as 2 and `12abc` as 12. Missing, negative or digit-free input means
/// [`DEFAULT_ITERATIONS`]; `0` is honoured.
pub fn parse_iterations(raw: Option<&str>) -> u64 {
    // ---
    let Some(value) = raw.map(str::trim) else {
        return DEFAULT_ITERATIONS;
    };

    let digits = value
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(value, |(end, _)| &value[..end]);
    if digits.is_empty() {
        return DEFAULT_ITERATIONS;
    }

    // All digits, so parsing only fails on overflow.
    digits.parse::<u64>().unwrap_or(MAX_ITERATIONS).min(MAX_ITERATIONS)
}

/// Sum `iterations` uniform samples from `[0, 1)`.
fn busy_sum(iterations: u64) -> f64 {
    // ---
    let mut rng = rand::thread_rng();
    (0..iterations).map(|_| rng.gen::<f64>()).sum()
}

/// Synthetic CPU load (GET /load-test?iterations=N).
///
/// The loop runs on the blocking pool so it does not stall other requests.
#[tracing::instrument(skip(state, params))]
pub async fn load_test(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<LoadTestResponse>, AppError> {
    // ---
    // First occurrence wins; repeated keys are not an error.
    let raw = params
        .iter()
        .find(|(key, _)| key == "iterations")
        .map(|(_, value)| value.as_str());
    let iterations = parse_iterations(raw);

    let result = tokio::task::spawn_blocking(move || busy_sum(iterations))
        .await
        .map_err(|e| AppError::Internal(format!("load generator failed: {e}")))?;

    let runtime = state.runtime();
    Ok(Json(LoadTestResponse {
        result,
        iterations,
        version: runtime.version.clone(),
        hostname: runtime.hostname.clone(),
        timestamp: timestamp(),
    }))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn iterations_default_when_missing_or_invalid() {
        // ---
        assert_eq!(parse_iterations(None), DEFAULT_ITERATIONS);
        assert_eq!(parse_iterations(Some("")), DEFAULT_ITERATIONS);
        assert_eq!(parse_iterations(Some("lots")), DEFAULT_ITERATIONS);
        assert_eq!(parse_iterations(Some("-5")), DEFAULT_ITERATIONS);
        assert_eq!(parse_iterations(Some(".5")), DEFAULT_ITERATIONS);
    }

    #[test]
    fn iterations_use_leading_digits() {
        // ---
        assert_eq!(parse_iterations(Some("2.5")), 2);
        assert_eq!(parse_iterations(Some("12abc")), 12);
        assert_eq!(parse_iterations(Some(" 7 ")), 7);
    }

    #[test]
    fn iterations_parsed_and_capped() {
        // ---
        assert_eq!(parse_iterations(Some("0")), 0);
        assert_eq!(parse_iterations(Some("42")), 42);
        assert_eq!(parse_iterations(Some("99999999999")), MAX_ITERATIONS);
        assert_eq!(
            parse_iterations(Some("999999999999999999999999")),
            MAX_ITERATIONS
        );
    }

    #[test]
    fn busy_sum_is_bounded_by_iterations() {
        // ---
        assert_eq!(busy_sum(0), 0.0);

        let sum = busy_sum(500);
        assert!((0.0..500.0).contains(&sum), "sum was {sum}");
    }
}
