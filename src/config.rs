// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Every setting has a default; a value that is present but cannot be
//! parsed falls back to that default rather than failing startup.

use anyhow::Result;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads an optional environment variable, falling back to a default string.
macro_rules! optional_env {
    // ---
    ($key:literal, $default:expr) => {
        std::env::var($key)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| $default.to_string())
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used. This macro is appropriate for non-critical
/// tuning parameters where fallback behavior is acceptable.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

// ============================================================
// Public configuration facade
// ============================================================

/// How the process was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
    /// Router is built but no listener is bound.
    Test,
}

impl RunMode {
    /// Parse a run-mode string; unknown values mean development.
    pub fn parse(value: &str) -> Self {
        // ---
        match value.trim().to_ascii_lowercase().as_str() {
            "test" => RunMode::Test,
            "production" | "prod" => RunMode::Production,
            _ => RunMode::Development,
        }
    }
}

/// Which metrics backend to wire into the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsBackend {
    Prometheus,
    Noop,
}

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Deployed version, exported as the `version` default label. Defaults to `v1.0.0`.
    pub version: String,

    /// Exported as the `app` default label. Defaults to `enterprise-demo-app`.
    pub app_name: String,

    pub run_mode: RunMode,

    /// Listener address. Defaults to `0.0.0.0:3000`.
    pub bind_addr: String,

    pub metrics: MetricsConfig,

    /// Domain shown on the landing page banner.
    pub deploy_domain: String,
}

/// Metrics-related configuration.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Defaults to Prometheus; `APP_METRICS_BACKEND=noop` disables recording.
    pub backend: MetricsBackend,

    /// Refresh period of the default runtime gauges. Defaults to 10 seconds.
    pub defaults_interval: Duration,
}

impl AppConfig {
    /// Loads application configuration from the environment.
    ///
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        let run_mode = std::env::var("APP_ENV")
            .or_else(|_| std::env::var("NODE_ENV"))
            .map(|v| RunMode::parse(&v))
            .unwrap_or(RunMode::Development);

        Ok(Self {
            version: optional_env!("APP_VERSION", "v1.0.0"),
            app_name: optional_env!("APP_NAME", "enterprise-demo-app"),
            run_mode,
            bind_addr: optional_env!("API_BIND_ADDR", "0.0.0.0:3000"),
            metrics: MetricsConfig::from_env(),
            deploy_domain: optional_env!("APP_DEPLOY_DOMAIN", "init0xff.com"),
        })
    }

    /// Whether the binary should bind a network listener. False in test mode.
    pub fn binds_listener(&self) -> bool {
        self.run_mode != RunMode::Test
    }
}

impl MetricsConfig {
    // ---
    fn from_env() -> Self {
        // ---
        let backend = match optional_env!("APP_METRICS_BACKEND", "prom").as_str() {
            "noop" => MetricsBackend::Noop,
            _ => MetricsBackend::Prometheus,
        };
        let interval_secs = optional_env_parse!("APP_DEFAULT_METRICS_INTERVAL_SEC", u64, 10);

        Self {
            backend,
            defaults_interval: Duration::from_secs(interval_secs.max(1)),
        }
    }
}

// ============================================================
// Tests
// ============================================================
