// src/frontier/mod.rs
// =============================================================================
// The frontier: everything the crawler knows about which URLs to fetch.
//
// It plays three roles at once:
// - Visited registry: mark_visited(), is_visited(), visited()
// - Frontier filter:  offer(), seen()
// - Frontier queue:   pop_timeout(), task_done(), pending()
//
// offer() is the only way into the queue. It checks the URL's state and
// pushes it while holding the state lock, so two workers discovering the
// same link at the same moment still enqueue it once.
//
// URLs are compared as plain strings. "http://a.test" and "http://a.test/"
// are two different URLs here.
// =============================================================================

mod queue;
mod state;

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

pub use queue::FrontierQueue;
pub use state::UrlState;
use state::StateTable;

#[derive(Debug)]
pub struct Frontier {
    states: Mutex<StateTable>,
    queue: FrontierQueue,
}

impl Frontier {
    pub fn new(allow_revisit: bool) -> Self {
        Self {
            states: Mutex::new(StateTable::new(allow_revisit)),
            queue: FrontierQueue::new(),
        }
    }

    fn states(&self) -> MutexGuard<'_, StateTable> {
        self.states.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Admits `url` into the queue unless it was admitted before.
    ///
    /// Returns true when the URL was pushed.
    pub fn offer(&self, url: &str) -> bool {
        let mut states = self.states();
        let admitted = states.admit(url);
        if admitted {
            self.queue.push(url.to_string());
        }
        admitted
    }

    /// Every URL ever admitted or visited
    pub fn seen(&self) -> HashSet<String> {
        self.states().seen()
    }

    pub fn seen_count(&self) -> usize {
        self.states().seen_count()
    }

    /// Idempotent. Empty URLs are ignored.
    pub fn mark_visited(&self, url: &str) {
        self.states().mark_visited(url);
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.states()
            .get(url)
            .map(UrlState::is_visited)
            .unwrap_or(false)
    }

    /// Snapshot of the visited set (diagnostics only)
    pub fn visited(&self) -> HashSet<String> {
        self.states().visited()
    }

    pub fn visited_count(&self) -> usize {
        self.states().visited_count()
    }

    pub async fn pop_timeout(&self, wait: Duration) -> Option<String> {
        self.queue.pop_timeout(wait).await
    }

    pub fn task_done(&self) {
        self.queue.task_done();
    }

    pub fn pending(&self) -> usize {
        self.queue.pending()
    }

    pub fn is_drained(&self) -> bool {
        self.queue.is_drained()
    }
}
