//! Process-wide metrics registry.
//!
//! Wraps a `prometheus::Registry` and adds the two guarantees the scrape
//! endpoint relies on: metric families are exported in the order they were
//! registered, and every typed metric gets its `HELP`/`TYPE` header even
//! before its first observation (`Registry::gather` drops empty families).

use crate::domain::MetricsError;
use parking_lot::RwLock;
use prometheus::core::Collector;
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, Gauge, HistogramOpts, HistogramVec, IntCounterVec, Opts, TextEncoder};
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

/// Exposition type written on the `# TYPE` line of an empty family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

impl MetricKind {
    fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

/// One registered collector, remembered in registration order.
struct Registration {
    /// `(name, help)` for every family the collector exports.
    families: Vec<(String, String)>,
    kind: Option<MetricKind>,
}

pub struct MetricsRegistry {
    inner: prometheus::Registry,
    registrations: RwLock<Vec<Registration>>,
}

impl MetricsRegistry {
    // ---
    /// Create a registry whose default labels are merged into every series.
    pub fn new(default_labels: HashMap<String, String>) -> Result<Self, MetricsError> {
        // ---
        let labels = (!default_labels.is_empty()).then_some(default_labels);
        Ok(MetricsRegistry {
            inner: prometheus::Registry::new_custom(None, labels)?,
            registrations: RwLock::new(Vec::new()),
        })
    }

    /// Register a collector whose type is not known up front (e.g. the
    /// process collector). Its families only appear once they have samples.
    ///
    /// # Errors
    /// [`MetricsError::DuplicateName`] if any of its metric names is taken.
    pub fn register(&self, collector: Box<dyn Collector>) -> Result<(), MetricsError> {
        self.register_inner(collector, None)
    }

    /// Register a collector of a known type. The family is exported with its
    /// `HELP`/`TYPE` header even when it has no observations yet.
    pub fn register_typed(
        &self,
        kind: MetricKind,
        collector: Box<dyn Collector>,
    ) -> Result<(), MetricsError> {
        self.register_inner(collector, Some(kind))
    }

    /// Create and register a labeled integer counter.
    pub fn counter_vec(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<IntCounterVec, MetricsError> {
        // ---
        let counter = IntCounterVec::new(Opts::new(name, help), label_names)?;
        self.register_typed(MetricKind::Counter, Box::new(counter.clone()))?;
        Ok(counter)
    }

    /// Create and register a labeled histogram with the default buckets.
    pub fn histogram_vec(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<HistogramVec, MetricsError> {
        // ---
        let histogram = HistogramVec::new(HistogramOpts::new(name, help), label_names)?;
        self.register_typed(MetricKind::Histogram, Box::new(histogram.clone()))?;
        Ok(histogram)
    }

    /// Create and register an unlabeled gauge.
    pub fn gauge(&self, name: &str, help: &str) -> Result<Gauge, MetricsError> {
        // ---
        let gauge = Gauge::with_opts(Opts::new(name, help))?;
        self.register_typed(MetricKind::Gauge, Box::new(gauge.clone()))?;
        Ok(gauge)
    }

    /// Names of all registered metric families, in registration order.
    #[cfg(test)]
    pub(crate) fn names(&self) -> Vec<String> {
        // ---
        self.registrations
            .read()
            .iter()
            .flat_map(|r| r.families.iter().map(|(name, _)| name.clone()))
            .collect()
    }

    /// Snapshot every registered metric in the text exposition format.
    ///
    /// Each series is read atomically; the snapshot as a whole is not, so
    /// two series may reflect slightly different moments.
    pub fn export(&self) -> Result<String, MetricsError> {
        // ---
        let mut gathered: HashMap<String, MetricFamily> = self
            .inner
            .gather()
            .into_iter()
            .map(|mf| (mf.name().to_string(), mf))
            .collect();

        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        let mut headers = String::new();

        for registration in self.registrations.read().iter() {
            for (name, help) in &registration.families {
                if let Some(mf) = gathered.remove(name) {
                    encoder
                        .encode(std::slice::from_ref(&mf), &mut buffer)
                        .map_err(|e| MetricsError::Encode(e.to_string()))?;
                } else if let Some(kind) = registration.kind {
                    headers.clear();
                    let _ = writeln!(headers, "# HELP {} {}", name, escape_help(help));
                    let _ = writeln!(headers, "# TYPE {} {}", name, kind.as_str());
                    buffer.extend_from_slice(headers.as_bytes());
                }
            }
        }

        String::from_utf8(buffer).map_err(|e| MetricsError::Encode(e.to_string()))
    }

    fn register_inner(
        &self,
        collector: Box<dyn Collector>,
        kind: Option<MetricKind>,
    ) -> Result<(), MetricsError> {
        // ---
        let families: Vec<(String, String)> = collector
            .desc()
            .iter()
            .map(|d| (d.fq_name.clone(), d.help.clone()))
            .collect();

        let mut registrations = self.registrations.write();

        let taken: HashSet<&str> = registrations
            .iter()
            .flat_map(|r| r.families.iter().map(|(name, _)| name.as_str()))
            .collect();
        if let Some((name, _)) = families
            .iter()
            .find(|(name, _)| taken.contains(name.as_str()))
        {
            return Err(MetricsError::DuplicateName(name.clone()));
        }

        self.inner.register(collector).map_err(|err| match err {
            prometheus::Error::AlreadyReg => MetricsError::DuplicateName(
                families.first().map(|(n, _)| n.clone()).unwrap_or_default(),
            ),
            other => MetricsError::Prometheus(other),
        })?;

        tracing::debug!(
            metrics = ?families.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
            "Registered metric"
        );
        registrations.push(Registration { families, kind });
        Ok(())
    }
}

/// Escape `HELP` text the same way the text encoder does.
fn escape_help(help: &str) -> String {
    help.replace('\\', r"\\").replace('\n', r"\n")
}
