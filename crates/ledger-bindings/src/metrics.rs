//! Metrics hooks for codec operations
//!
//! Counts what the codec service encodes, decodes and rejects.
//!
//! ## Usage
//!
//! ```ignore
//! use ledger_bindings::metrics::{Metrics, MetricsRecorder};
//!
//! let metrics = Metrics::new();
//! metrics.record_filter_decoded(3, start.elapsed());
//! let snapshot = metrics.snapshot();
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for codec operations
///
/// Thread-safe counters; all updates use relaxed ordering.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Filters encoded
    pub filters_encoded: AtomicU64,
    /// Parties across all encoded filters
    pub parties_encoded: AtomicU64,
    /// Filters decoded successfully
    pub filters_decoded: AtomicU64,
    /// Parties across all decoded filters
    pub parties_decoded: AtomicU64,
    /// Disclosed contracts encoded
    pub disclosures_encoded: AtomicU64,
    /// Disclosed contracts decoded successfully
    pub disclosures_decoded: AtomicU64,
    /// Decode calls that returned an error
    pub decode_rejections: AtomicU64,
    /// Filter merges attempted
    pub merges: AtomicU64,
    /// Filter merges that failed on a conflicting policy
    pub merge_conflicts: AtomicU64,
    /// Cumulative successful filter decode time in nanoseconds
    pub decode_time_ns: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_filter_encoded(&self, parties: usize) {
        self.filters_encoded.fetch_add(1, Ordering::Relaxed);
        self.parties_encoded.fetch_add(parties as u64, Ordering::Relaxed);
    }

    /// Record a successful filter decode
    ///
    /// # Arguments
    /// * `parties` - Parties in the decoded filter
    /// * `duration` - Time spent decoding
    pub fn record_filter_decoded(&self, parties: usize, duration: Duration) {
        self.filters_decoded.fetch_add(1, Ordering::Relaxed);
        self.parties_decoded.fetch_add(parties as u64, Ordering::Relaxed);
        self.decode_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    pub fn record_disclosures_encoded(&self, count: usize) {
        self.disclosures_encoded.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_disclosures_decoded(&self, count: usize) {
        self.disclosures_decoded.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_decode_rejected(&self) {
        self.decode_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a merge attempt
    ///
    /// # Arguments
    /// * `conflict` - Whether the merge failed on a conflicting policy
    pub fn record_merge(&self, conflict: bool) {
        self.merges.fetch_add(1, Ordering::Relaxed);
        if conflict {
            self.merge_conflicts.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_encoded: self.filters_encoded.load(Ordering::Relaxed),
            parties_encoded: self.parties_encoded.load(Ordering::Relaxed),
            filters_decoded: self.filters_decoded.load(Ordering::Relaxed),
            parties_decoded: self.parties_decoded.load(Ordering::Relaxed),
            disclosures_encoded: self.disclosures_encoded.load(Ordering::Relaxed),
            disclosures_decoded: self.disclosures_decoded.load(Ordering::Relaxed),
            decode_rejections: self.decode_rejections.load(Ordering::Relaxed),
            merges: self.merges.load(Ordering::Relaxed),
            merge_conflicts: self.merge_conflicts.load(Ordering::Relaxed),
            avg_decode_ns: self.avg_decode_time_ns(),
        }
    }

    /// Average successful filter decode time in nanoseconds
    pub fn avg_decode_time_ns(&self) -> u64 {
        let total = self.decode_time_ns.load(Ordering::Relaxed);
        let count = self.filters_decoded.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.filters_encoded.store(0, Ordering::Relaxed);
        self.parties_encoded.store(0, Ordering::Relaxed);
        self.filters_decoded.store(0, Ordering::Relaxed);
        self.parties_decoded.store(0, Ordering::Relaxed);
        self.disclosures_encoded.store(0, Ordering::Relaxed);
        self.disclosures_decoded.store(0, Ordering::Relaxed);
        self.decode_rejections.store(0, Ordering::Relaxed);
        self.merges.store(0, Ordering::Relaxed);
        self.merge_conflicts.store(0, Ordering::Relaxed);
        self.decode_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_encoded: u64,
    pub parties_encoded: u64,
    pub filters_decoded: u64,
    pub parties_decoded: u64,
    pub disclosures_encoded: u64,
    pub disclosures_decoded: u64,
    pub decode_rejections: u64,
    pub merges: u64,
    pub merge_conflicts: u64,
    pub avg_decode_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to forward counts to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    fn record_filter_encoded(&self, parties: usize);

    fn record_filter_decoded(&self, parties: usize, duration: Duration);

    fn record_disclosures_encoded(&self, count: usize);

    fn record_disclosures_decoded(&self, count: usize);

    fn record_decode_rejected(&self);

    fn record_merge(&self, conflict: bool);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Debug, Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_encoded(&self, _: usize) {}
    fn record_filter_decoded(&self, _: usize, _: Duration) {}
    fn record_disclosures_encoded(&self, _: usize) {}
    fn record_disclosures_decoded(&self, _: usize) {}
    fn record_decode_rejected(&self) {}
    fn record_merge(&self, _: bool) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_encoded(&self, parties: usize) {
        Metrics::record_filter_encoded(self, parties);
    }

    fn record_filter_decoded(&self, parties: usize, duration: Duration) {
        Metrics::record_filter_decoded(self, parties, duration);
    }

    fn record_disclosures_encoded(&self, count: usize) {
        Metrics::record_disclosures_encoded(self, count);
    }

    fn record_disclosures_decoded(&self, count: usize) {
        Metrics::record_disclosures_decoded(self, count);
    }

    fn record_decode_rejected(&self) {
        Metrics::record_decode_rejected(self);
    }

    fn record_merge(&self, conflict: bool) {
        Metrics::record_merge(self, conflict);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initialization() {
        let snapshot = Metrics::new().snapshot();
        assert_eq!(snapshot, MetricsSnapshot::default());
    }

    #[test]
    fn test_record_filter_decoded() {
        let metrics = Metrics::new();

        metrics.record_filter_decoded(2, Duration::from_nanos(100));
        metrics.record_filter_decoded(3, Duration::from_nanos(300));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.filters_decoded, 2);
        assert_eq!(snapshot.parties_decoded, 5);
        assert_eq!(snapshot.avg_decode_ns, 200);
    }

    #[test]
    fn test_record_filter_encoded_counts_parties() {
        let metrics = Metrics::new();

        metrics.record_filter_encoded(2);
        metrics.record_filter_encoded(0);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.filters_encoded, 2);
        assert_eq!(snapshot.parties_encoded, 2);
    }

    #[test]
    fn test_record_merge_counts_conflicts() {
        let metrics = Metrics::new();

        metrics.record_merge(false);
        metrics.record_merge(true);
        metrics.record_merge(false);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.merges, 3);
        assert_eq!(snapshot.merge_conflicts, 1);
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();

        metrics.record_filter_encoded(1);
        metrics.record_decode_rejected();
        metrics.record_disclosures_decoded(4);

        metrics.reset();

        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_noop_metrics() {
        let metrics = NoOpMetrics;
        metrics.record_filter_encoded(1);
        metrics.record_filter_decoded(1, Duration::from_nanos(10));
        metrics.record_disclosures_encoded(1);
        metrics.record_disclosures_decoded(1);
        metrics.record_decode_rejected();
        metrics.record_merge(true);
    }
}
