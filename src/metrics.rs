//! Request Counters
//!
//! Lock-free counters reported by the `/stats` and `/metrics` endpoints.
//!
//! Only searches that pass parameter validation are counted; health, stats and
//! metrics calls are not.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RequestMetrics {
    total_requests: AtomicU64,
    search_requests: AtomicU64,
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a validated search call, which is also a served request.
    pub fn record_search(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.search_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    pub fn search_requests(&self) -> u64 {
        self.search_requests.load(Ordering::Relaxed)
    }
}
