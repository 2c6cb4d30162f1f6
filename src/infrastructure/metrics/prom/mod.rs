mod defaults;
mod prometheus_metrics;
mod registry;

pub use defaults::collect_defaults;
pub use prometheus_metrics::PrometheusMetrics;
pub use registry::{MetricKind, MetricsRegistry};

use std::sync::Arc;
use std::time::Duration;

/// Creates a new Prometheus metrics implementation.
///
/// Registers the HTTP request metrics, then the default runtime metrics,
/// and starts their refresh task when a tokio runtime is available.
///
/// Returns a fully initialized metrics instance ready for use.
pub fn create(
    app_name: &str,
    version: &str,
    defaults_interval: Duration,
) -> anyhow::Result<crate::domain::MetricsPtr> {
    // ---
    tracing::info!("Initializing Prometheus metrics");
    let metrics = PrometheusMetrics::new(app_name, version)?;
    collect_defaults(metrics.registry(), defaults_interval)?;

    Ok(Arc::new(metrics))
}
