//! In-process counters for registry interactions

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    devices_added: AtomicU64,
    add_failures: AtomicU64,
    devices_deleted: AtomicU64,
    delete_failures: AtomicU64,
    details_loaded: AtomicU64,
    detail_failures: AtomicU64,
    lists_loaded: AtomicU64,
    requests_refused: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device_added(&self) {
        self.devices_added.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "devices_added", "Metric incremented");
    }

    pub fn add_failed(&self) {
        self.add_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "add_failures", "Metric incremented");
    }

    pub fn device_deleted(&self) {
        self.devices_deleted.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "devices_deleted", "Metric incremented");
    }

    pub fn delete_failed(&self) {
        self.delete_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "delete_failures", "Metric incremented");
    }

    pub fn details_loaded(&self) {
        self.details_loaded.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "details_loaded", "Metric incremented");
    }

    pub fn detail_failed(&self) {
        self.detail_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "detail_failures", "Metric incremented");
    }

    pub fn list_loaded(&self) {
        self.lists_loaded.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "lists_loaded", "Metric incremented");
    }

    /// A request turned away because the same action was still in flight
    pub fn request_refused(&self) {
        self.requests_refused.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "requests_refused", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            devices_added: self.devices_added.load(Ordering::Relaxed),
            add_failures: self.add_failures.load(Ordering::Relaxed),
            devices_deleted: self.devices_deleted.load(Ordering::Relaxed),
            delete_failures: self.delete_failures.load(Ordering::Relaxed),
            details_loaded: self.details_loaded.load(Ordering::Relaxed),
            detail_failures: self.detail_failures.load(Ordering::Relaxed),
            lists_loaded: self.lists_loaded.load(Ordering::Relaxed),
            requests_refused: self.requests_refused.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub devices_added: u64,
    pub add_failures: u64,
    pub devices_deleted: u64,
    pub delete_failures: u64,
    pub details_loaded: u64,
    pub detail_failures: u64,
    pub lists_loaded: u64,
    pub requests_refused: u64,
}
