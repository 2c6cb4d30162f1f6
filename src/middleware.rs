//! Request instrumentation.
//!
//! [`track_metrics`] wraps every route, including the 404 fallback. It opens
//! a [`RequestRecord`] before the handler runs and folds it into the metrics
//! backend after the handler has produced a response, so each completed
//! request is counted exactly once.
//!
//! If the client disconnects before the handler returns, hyper drops this
//! future and the pending record with it; nothing is recorded for that
//! request. That gap is accepted.

use crate::app_state::AppState;
use crate::domain::RequestRecord;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

/// Route label for a request: the matched route template when routing
/// resolved one, else the raw path.
pub fn route_label(req: &Request) -> String {
    // ---
    req.extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string())
}

pub async fn track_metrics(State(state): State<AppState>, req: Request, next: Next) -> Response {
    // ---
    let record = RequestRecord::start(req.method().as_str(), route_label(&req));

    let response = next.run(req).await;

    let completed = record.finish(response.status().as_u16());
    tracing::debug!(
        method = %completed.method,
        route = %completed.route,
        status = completed.status,
        elapsed_secs = completed.elapsed_secs,
        "Request completed"
    );
    state.metrics().record_http_request(&completed);

    response
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::domain::{MetricsPtr, RuntimeInfo};
    use crate::infrastructure::metrics::prom::PrometheusMetrics;
    use axum::{body::Body, http::StatusCode, middleware::from_fn_with_state, routing::get, Router};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn instrumented(router: Router<AppState>) -> (Router, Arc<PrometheusMetrics>) {
        // ---
        let prom = Arc::new(PrometheusMetrics::new("demo", "v1.0.0").unwrap());
        let metrics: MetricsPtr = prom.clone();
        let state = AppState::new(metrics, RuntimeInfo::new("v1.0.0"), "demo.example");

        let app = router
            .fallback(|| async { StatusCode::NOT_FOUND })
            .layer(from_fn_with_state(state.clone(), track_metrics))
            .with_state(state);
        (app, prom)
    }

    fn request(method: &str, uri: &str) -> Request {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn route_template_is_used_as_label() {
        // ---
        let (app, prom) = instrumented(Router::new().route("/items/{id}", get(|| async { "ok" })));

        let response = app.oneshot(request("GET", "/items/42")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        assert_eq!(prom.request_count("GET", "/items/{id}", 200), 1);
        assert_eq!(prom.request_count("GET", "/items/42", 200), 0);
        assert_eq!(prom.observation_count("GET", "/items/{id}"), 1);
    }

    #[tokio::test]
    async fn wrong_method_keeps_route_label() {
        // ---
        let (app, prom) = instrumented(Router::new().route("/health", get(|| async { "ok" })));

        let response = app.oneshot(request("DELETE", "/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        assert_eq!(prom.request_count("DELETE", "/health", 405), 1);
    }

    #[tokio::test]
    async fn unmatched_request_uses_raw_path() {
        // ---
        let (app, prom) = instrumented(Router::new());

        let response = app.oneshot(request("GET", "/nowhere")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        assert_eq!(prom.request_count("GET", "/nowhere", 404), 1);
    }

    #[tokio::test]
    async fn abandoned_request_is_not_recorded() {
        // ---
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                "late"
            }),
        );
        let (app, prom) = instrumented(slow);

        let outcome =
            tokio::time::timeout(Duration::from_millis(50), app.oneshot(request("GET", "/slow")))
                .await;
        assert!(outcome.is_err(), "request should have been abandoned");

        assert_eq!(prom.request_count("GET", "/slow", 200), 0);
        assert_eq!(prom.observation_count("GET", "/slow"), 0);
    }
}
