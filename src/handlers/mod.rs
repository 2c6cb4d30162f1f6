// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod analytics;
mod health;
mod load_test;
mod metrics;
mod root;
mod shared_types;
mod simulate_error;

// Core handlers
pub use health::health_check;
pub use metrics::metrics_handler;
pub use root::root_handler;

// Demo traffic handlers
pub use analytics::analytics_handler;
pub use load_test::load_test;
pub use simulate_error::simulate_error;

pub use shared_types::AppError;

/// Fallback for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
