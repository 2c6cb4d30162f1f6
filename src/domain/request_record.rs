//! Ephemeral per-request record.
//!
//! A [`RequestRecord`] is opened when the middleware first sees a request and
//! is consumed by [`RequestRecord::finish`] once the handler has produced a
//! status. Consuming `self` means a record can be completed at most once. A
//! record that is dropped without being finished (the client went away before
//! a response existed) never reaches the metrics backend.

use std::time::Instant;

/// A request that has started but not yet produced a response.
#[derive(Debug)]
pub struct RequestRecord {
    method: String,
    route: String,
    started: Instant,
}

/// A request that has finished, ready to be folded into metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedRequest {
    pub method: String,
    pub route: String,
    pub status: u16,
    pub elapsed_secs: f64,
}

impl RequestRecord {
    // ---
    pub fn start(method: impl Into<String>, route: impl Into<String>) -> Self {
        Self::started_at(method, route, Instant::now())
    }

    pub fn started_at(
        method: impl Into<String>,
        route: impl Into<String>,
        started: Instant,
    ) -> Self {
        // ---
        RequestRecord {
            method: method.into(),
            route: route.into(),
            started,
        }
    }

    /// Close the record with the final status code.
    pub fn finish(self, status: u16) -> CompletedRequest {
        // ---
        CompletedRequest {
            elapsed_secs: self.started.elapsed().as_secs_f64(),
            method: self.method,
            route: self.route,
            status,
        }
    }
}
