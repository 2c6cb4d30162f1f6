//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers and the metrics middleware via the `State` extractor. It
//! is cheaply cloneable (`Arc` internally) so each request gets its own
//! handle without copying the registry.

use crate::domain::{MetricsPtr, RuntimeInfo};
use std::sync::Arc;

/// Shared application state passed to all Axum handlers.
///
/// This struct serves as the Dependency Injection container for the
/// application. The metrics backend is the only shared mutable resource,
/// and it synchronizes internally.
///
/// # Lifecycle
///
/// 1. Created once in `create_router()` during application startup
/// 2. Attached to the Axum router via `.with_state(app_state)`
/// 3. Cloned automatically by Axum for each incoming HTTP request
#[derive(Clone)]
pub struct AppState {
    /// Metrics implementation for recording request metrics.
    ///
    /// Either Prometheus-backed (default) or no-op.
    metrics: MetricsPtr,

    /// Version, hostname and uptime source for the page and health handlers.
    runtime: Arc<RuntimeInfo>,

    /// Shown on the landing page banner.
    deploy_domain: Arc<str>,
}

impl AppState {
    // ---

    pub fn new(
        metrics: MetricsPtr,
        runtime: RuntimeInfo,
        deploy_domain: impl Into<Arc<str>>,
    ) -> Self {
        // ---
        AppState {
            metrics,
            runtime: Arc::new(runtime),
            deploy_domain: deploy_domain.into(),
        }
    }

    /// Get a reference to the metrics implementation.
    pub fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Get a reference to the process facts.
    pub fn runtime(&self) -> &RuntimeInfo {
        // ---
        &self.runtime
    }

    pub fn deploy_domain(&self) -> &str {
        &self.deploy_domain
    }
}
