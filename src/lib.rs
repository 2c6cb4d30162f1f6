// src/lib.rs
use anyhow::Result;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use handlers::{
    analytics_handler, health_check, load_test, metrics_handler, not_found, root_handler,
    simulate_error,
};

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;
mod middleware;

pub use app_state::AppState;
pub use config::*;

// Publicly expose the infrastructure creation functions
pub use infrastructure::metrics::prom::{
    collect_defaults, MetricKind, MetricsRegistry, PrometheusMetrics,
};
pub use infrastructure::{
    create_noop_metrics, // ---
    create_prom_metrics,
};

/// Initialize the global tracing subscriber.
///
/// Honours `RUST_LOG`, defaulting to `info`. Safe to call more than once;
/// later calls are ignored.
pub fn init_tracing() {
    // ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .ok(); // Ignores if already initialized
}

/// Build application state from configuration.
pub fn create_app_state(config: &AppConfig) -> Result<AppState> {
    // ---
    let metrics = match config.metrics.backend {
        MetricsBackend::Prometheus => create_prom_metrics(
            &config.app_name,
            &config.version,
            config.metrics.defaults_interval,
        )?,
        MetricsBackend::Noop => create_noop_metrics()?,
    };

    let runtime = domain::RuntimeInfo::new(config.version.clone());

    Ok(AppState::new(metrics, runtime, config.deploy_domain.as_str()))
}

/// Build the HTTP router with configuration loaded from environment variables.
pub fn create_router() -> Result<Router> {
    // ---
    let config = AppConfig::from_env()?;
    init_tracing();

    Ok(build_router(create_app_state(&config)?))
}

/// Build the HTTP router around an already constructed state.
///
/// Every route and the 404 fallback pass through the metrics middleware.
pub fn build_router(app_state: AppState) -> Router {
    // ---
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/analytics", post(analytics_handler))
        .route("/load-test", get(load_test))
        .route("/error", get(simulate_error))
        .fallback(not_found)
        .layer(from_fn_with_state(app_state.clone(), middleware::track_metrics))
        .with_state(app_state)
}
