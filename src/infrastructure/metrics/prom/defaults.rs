//! Default runtime metrics: process memory/CPU plus self-updating gauges.

use super::MetricsRegistry;
use crate::domain::MetricsError;
use prometheus::Gauge;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Register the default runtime metrics and start refreshing them.
///
/// - `process_*` from the prometheus process collector (Linux only), read at
///   scrape time.
/// - `process_uptime_seconds` and `runtime_scheduler_lag_seconds`, refreshed
///   every `interval` by a background task. Scheduler lag is how late a tick
///   ran relative to its deadline.
///
/// Returns the refresh task, or `None` when called outside a tokio runtime
/// (the gauges are then registered but keep their initial values).
pub fn collect_defaults(
    registry: &MetricsRegistry,
    interval: Duration,
) -> Result<Option<JoinHandle<()>>, MetricsError> {
    // ---
    register_process_collector(registry)?;

    let started = Instant::now();
    let uptime = registry.gauge(
        "process_uptime_seconds",
        "Seconds since the process started serving.",
    )?;
    let lag = registry.gauge(
        "runtime_scheduler_lag_seconds",
        "Delay between a scheduled runtime tick and when it actually ran.",
    )?;
    uptime.set(0.0);
    lag.set(0.0);

    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        tracing::warn!("No tokio runtime; default metrics will not refresh");
        return Ok(None);
    };

    let interval = interval.max(Duration::from_millis(10));
    Ok(Some(runtime.spawn(refresh_loop(interval, started, uptime, lag))))
}

async fn refresh_loop(interval: Duration, started: Instant, uptime: Gauge, lag: Gauge) {
    // ---
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let deadline = ticker.tick().await;
        let late = tokio::time::Instant::now().saturating_duration_since(deadline);

        lag.set(late.as_secs_f64());
        uptime.set(started.elapsed().as_secs_f64());
    }
}

#[cfg(target_os = "linux")]
fn register_process_collector(registry: &MetricsRegistry) -> Result<(), MetricsError> {
    // ---
    let collector = prometheus::process_collector::ProcessCollector::for_self();
    registry.register(Box::new(collector))
}

#[cfg(not(target_os = "linux"))]
fn register_process_collector(_registry: &MetricsRegistry) -> Result<(), MetricsError> {
    tracing::debug!("Process collector unavailable on this platform");
    Ok(())
}
