use super::{CompletedRequest, MetricsError};
use std::sync::Arc;

/// Abstraction for application metrics (counters, histograms).
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics in the text exposition format.
    fn render(&self) -> Result<String, MetricsError>;

    /// Content type the scraper expects for [`Metrics::render`] output.
    fn content_type(&self) -> &'static str;

    /// Fold one completed HTTP request into the request counter and
    /// duration histogram.
    fn record_http_request(&self, request: &CompletedRequest);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
