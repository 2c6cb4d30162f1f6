use thiserror::Error;

/// Errors raised by a metrics backend.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// A metric with this name is already registered.
    #[error("metric already registered: {0}")]
    DuplicateName(String),

    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("encoding error: {0}")]
    Encode(String),
}
