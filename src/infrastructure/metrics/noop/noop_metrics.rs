use crate::domain::{CompletedRequest, Metrics, MetricsError};

/// No-op metrics implementation for testing.
pub struct NoopMetrics;

impl NoopMetrics {
    pub fn new() -> Self {
        NoopMetrics
    }
}

impl Metrics for NoopMetrics {
    // ---
    fn render(&self) -> Result<String, MetricsError> {
        Ok(String::new())
    }
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }
    fn record_http_request(&self, _: &CompletedRequest) {}
}
