mod errors;
mod metrics;
mod request_record;
mod runtime_info;

// Publicly expose the Metrics abstraction
pub use errors::MetricsError;
pub use metrics::{Metrics, MetricsPtr};

// Per-request bookkeeping folded into the metrics backend
pub use request_record::{CompletedRequest, RequestRecord};

// Process facts rendered by the page and health handlers
pub use runtime_info::RuntimeInfo;
