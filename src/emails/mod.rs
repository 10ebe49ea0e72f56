// src/emails/mod.rs
// =============================================================================
// Email extraction and aggregation.
//
// Submodules:
// - extract: finds email-like strings in a page's visible text
// - store: persists the aggregate set (emails.json)
//
// The EmailAggregator keeps two views of what has been found:
// - by URL: the emails found on each page (a later record for the same page
//   replaces the earlier one)
// - all: the deduplicated union across every page, which only ever grows
//
// Every record() saves the full union through the store. The save happens
// while the aggregator lock is held, so snapshots reach the store in the same
// order the in-memory state changed and the last write is always the latest.
// Rewriting the whole file is O(n) per discovery; fine for a crawl's worth
// of addresses.
// =============================================================================

mod extract;
mod store;

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use crate::error::PersistError;

pub use extract::extract_emails;
pub use store::{EmailStore, JsonFileStore, MemoryStore};

#[derive(Debug, Default)]
struct Inner {
    by_url: HashMap<String, BTreeSet<String>>,
    all: BTreeSet<String>,
}

pub struct EmailAggregator {
    inner: Mutex<Inner>,
    store: Box<dyn EmailStore>,
}

impl EmailAggregator {
    pub fn new(store: Box<dyn EmailStore>) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            store,
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records the emails found on `url` and persists the new aggregate.
    ///
    /// In-memory state is updated even if persisting fails.
    pub fn record(&self, url: &str, emails: BTreeSet<String>) -> Result<(), PersistError> {
        let mut inner = self.inner();
        inner.all.extend(emails.iter().cloned());
        inner.by_url.insert(url.to_string(), emails);
        self.store.save(&inner.all)
    }

    pub fn all_emails(&self) -> BTreeSet<String> {
        self.inner().all.clone()
    }

    pub fn email_count(&self) -> usize {
        self.inner().all.len()
    }

    pub fn by_url(&self) -> HashMap<String, BTreeSet<String>> {
        self.inner().by_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    struct FailingStore;

    impl EmailStore for FailingStore {
        fn save(&self, _emails: &BTreeSet<String>) -> Result<(), PersistError> {
            Err(PersistError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    #[test]
    fn test_aggregate_is_deduplicated_union() {
        let store = Arc::new(MemoryStore::new());
        let aggregator = EmailAggregator::new(Box::new(Arc::clone(&store)));

        aggregator
            .record("http://a.test/", set(&["x@y.com", "a@b.com"]))
            .unwrap();
        aggregator
            .record("http://b.test/", set(&["a@b.com", "c@d.com"]))
            .unwrap();

        let expected = set(&["x@y.com", "a@b.com", "c@d.com"]);
        assert_eq!(aggregator.all_emails(), expected);
        assert_eq!(aggregator.email_count(), 3);
        assert_eq!(store.snapshots().len(), 2);
        assert_eq!(store.last(), Some(expected));
    }

    #[test]
    fn test_persisted_file_matches_aggregate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emails.json");
        let aggregator = EmailAggregator::new(Box::new(JsonFileStore::new(&path)));

        aggregator
            .record("http://a.test/", set(&["x@y.com", "a@b.com"]))
            .unwrap();
        aggregator
            .record("http://b.test/", set(&["a@b.com", "c@d.com"]))
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let keys: BTreeSet<String> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, aggregator.all_emails());
    }

    #[test]
    fn test_record_replaces_per_url_set() {
        let aggregator = EmailAggregator::new(Box::new(MemoryStore::new()));
        aggregator.record("http://a.test/", set(&["old@a.com"])).unwrap();
        aggregator.record("http://a.test/", set(&["new@a.com"])).unwrap();

        assert_eq!(aggregator.by_url()["http://a.test/"], set(&["new@a.com"]));
        // the union never shrinks
        assert_eq!(aggregator.all_emails(), set(&["old@a.com", "new@a.com"]));
    }

    #[test]
    fn test_persist_failure_keeps_memory_state() {
        let aggregator = EmailAggregator::new(Box::new(FailingStore));
        let result = aggregator.record("http://a.test/", set(&["a@b.com"]));

        assert!(matches!(result, Err(PersistError::Io(_))));
        assert_eq!(aggregator.all_emails(), set(&["a@b.com"]));
    }
}
