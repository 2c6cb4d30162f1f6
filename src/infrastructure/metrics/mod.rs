pub mod noop;
pub mod prom;

// Re-export the factory functions for easy access
pub use noop::create as create_noop_metrics;
pub use prom::create as create_prom_metrics;
