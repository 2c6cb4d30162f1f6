//! Prometheus metrics implementation.
//!
//! Provides the concrete `Metrics` backend: an explicitly constructed
//! [`MetricsRegistry`] owning the HTTP request counter and duration
//! histogram. The instance is injected through `AppState`; nothing here is a
//! process-global singleton, so tests can build as many as they like.

use super::registry::MetricsRegistry;
use crate::domain::{CompletedRequest, Metrics, MetricsError};
use prometheus::{HistogramVec, IntCounterVec};
use std::collections::HashMap;

pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const REQUEST_DURATION: &str = "http_request_duration_seconds";

/// Content type for the text exposition format, version 0.0.4.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Prometheus-based metrics implementation.
pub struct PrometheusMetrics {
    registry: MetricsRegistry,
    requests_total: IntCounterVec,
    request_duration: HistogramVec,
}

impl PrometheusMetrics {
    // ---
    /// Build the registry with `app`/`version` default labels and register
    /// the HTTP request metrics.
    pub fn new(app_name: &str, version: &str) -> Result<Self, MetricsError> {
        // ---
        tracing::info!("Creating Prometheus metrics");

        let default_labels = HashMap::from([
            ("app".to_string(), app_name.to_string()),
            ("version".to_string(), version.to_string()),
        ]);
        let registry = MetricsRegistry::new(default_labels)?;

        let requests_total = registry.counter_vec(
            REQUESTS_TOTAL,
            "Total number of HTTP requests",
            &["method", "route", "status_code"],
        )?;
        let request_duration = registry.histogram_vec(
            REQUEST_DURATION,
            "Duration of HTTP requests in seconds",
            &["method", "route"],
        )?;

        Ok(PrometheusMetrics {
            registry,
            requests_total,
            request_duration,
        })
    }

    pub fn registry(&self) -> &MetricsRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub(crate) fn request_count(&self, method: &str, route: &str, status: u16) -> u64 {
        let status = status.to_string();
        self.requests_total
            .with_label_values(&[method, route, status.as_str()])
            .get()
    }

    #[cfg(test)]
    pub(crate) fn observation_count(&self, method: &str, route: &str) -> u64 {
        self.request_duration
            .with_label_values(&[method, route])
            .get_sample_count()
    }
}

impl Metrics for PrometheusMetrics {
    // ---
    fn render(&self) -> Result<String, MetricsError> {
        self.registry.export()
    }

    fn content_type(&self) -> &'static str {
        EXPOSITION_CONTENT_TYPE
    }

    fn record_http_request(&self, request: &CompletedRequest) {
        // ---
        let status = request.status.to_string();
        self.requests_total
            .with_label_values(&[request.method.as_str(), request.route.as_str(), status.as_str()])
            .inc();
        self.request_duration
            .with_label_values(&[request.method.as_str(), request.route.as_str()])
            .observe(request.elapsed_secs);
    }
}
