//! Sink metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counters for a slot store
#[derive(Debug, Default)]
pub struct SinkMetrics {
    /// Total successful appends
    append_count: AtomicU64,
    /// Total bytes appended (payload + separator)
    bytes_written: AtomicU64,
    /// Appends refused because every slot was retired
    capacity_rejections: AtomicU64,
    /// Appends the filesystem rejected
    write_failures: AtomicU64,
}

impl SinkMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total append count
    pub fn append_count(&self) -> u64 {
        self.append_count.load(Ordering::Relaxed)
    }

    /// Record a successful append of `bytes`
    pub fn record_append(&self, bytes: u64) {
        self.append_count.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Get total bytes written
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    /// Get capacity rejection count
    pub fn capacity_rejections(&self) -> u64 {
        self.capacity_rejections.load(Ordering::Relaxed)
    }

    /// Increment capacity rejection count
    pub fn inc_capacity_rejections(&self) {
        self.capacity_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Get write failure count
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Increment write failure count
    pub fn inc_write_failures(&self) {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            append_count: self.append_count(),
            bytes_written: self.bytes_written(),
            capacity_rejections: self.capacity_rejections(),
            write_failures: self.write_failures(),
        }
    }
}

/// Snapshot of sink metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub append_count: u64,
    pub bytes_written: u64,
    pub capacity_rejections: u64,
    pub write_failures: u64,
}
