//! Request counters for the dashboard panel
//!
//! Process-lifetime aggregates only; submitted text is never retained.

use parking_lot::RwLock;
use serde::Serialize;
use spamsift_core::{Error, SpamLabel};

/// Collects per-request outcomes
pub struct RequestStats {
    inner: RwLock<StatsInner>,
}

#[derive(Default)]
struct StatsInner {
    total: u64,
    spam: u64,
    ham: u64,
    rejected: u64,
    failed: u64,
}

/// Point-in-time view of the counters
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub total: u64,
    pub spam: u64,
    pub ham: u64,
    pub rejected: u64,
    pub failed: u64,
}

impl RequestStats {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StatsInner::default()),
        }
    }

    /// Record a completed prediction
    pub fn record_prediction(&self, label: SpamLabel) {
        let mut inner = self.inner.write();
        inner.total += 1;
        match label {
            SpamLabel::Spam => inner.spam += 1,
            SpamLabel::Ham => inner.ham += 1,
        }
    }

    /// Record a request that failed before or during prediction
    pub fn record_error(&self, error: &Error) {
        let mut inner = self.inner.write();
        inner.total += 1;
        match error {
            Error::Validation(_) => inner.rejected += 1,
            _ => inner.failed += 1,
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let inner = self.inner.read();
        StatsSnapshot {
            total: inner.total,
            spam: inner.spam,
            ham: inner.ham,
            rejected: inner.rejected,
            failed: inner.failed,
        }
    }
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::new()
    }
}
