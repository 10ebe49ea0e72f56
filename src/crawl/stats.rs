// src/crawl/stats.rs
// Counters shared by all workers, and the summary printed when the crawl ends.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

use crate::error::FailureKind;

#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_processed: AtomicUsize,
    fetch_failures: AtomicUsize,
    parse_failures: AtomicUsize,
    persist_failures: AtomicUsize,
    unexpected_failures: AtomicUsize,
}

impl CrawlStats {
    pub fn page_processed(&self) {
        self.pages_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self, kind: FailureKind) {
        let counter = match kind {
            FailureKind::Fetch => &self.fetch_failures,
            FailureKind::Parse => &self.parse_failures,
            FailureKind::Persist => &self.persist_failures,
            FailureKind::Unexpected => &self.unexpected_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn pages_processed(&self) -> usize {
        self.pages_processed.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> FailureCounts {
        FailureCounts {
            fetch: self.fetch_failures.load(Ordering::Relaxed),
            parse: self.parse_failures.load(Ordering::Relaxed),
            persist: self.persist_failures.load(Ordering::Relaxed),
            unexpected: self.unexpected_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FailureCounts {
    pub fetch: usize,
    pub parse: usize,
    pub persist: usize,
    pub unexpected: usize,
}

impl FailureCounts {
    pub fn total(&self) -> usize {
        self.fetch + self.parse + self.persist + self.unexpected
    }
}

/// What the crawl achieved before its budget ran out
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    pub pages_processed: usize,
    pub visited: usize,
    pub seen: usize,
    /// URLs still queued when the crawl stopped (abandoned)
    pub pending: usize,
    pub emails: usize,
    pub failures: FailureCounts,
    pub elapsed_secs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_counted_per_kind() {
        let stats = CrawlStats::default();
        stats.record_failure(FailureKind::Fetch);
        stats.record_failure(FailureKind::Fetch);
        stats.record_failure(FailureKind::Persist);

        let failures = stats.failures();
        assert_eq!(failures.fetch, 2);
        assert_eq!(failures.persist, 1);
        assert_eq!(failures.parse, 0);
        assert_eq!(failures.total(), 3);
    }
}
