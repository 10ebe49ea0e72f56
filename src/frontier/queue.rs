// src/frontier/queue.rs
// =============================================================================
// The Frontier Queue: an unbounded FIFO of URLs waiting to be fetched.
//
// How it works:
// - push() appends to the tail and wakes one waiting worker
// - try_pop() takes the head if there is one, never waits
// - pop_timeout() waits for a push, but only up to a bounded duration, so a
//   worker gets control back often enough to check its time budget
// - task_done() tells the queue a popped URL is finished; once every pushed
//   URL is finished the queue reports itself drained
//
// The queue does no deduplication. Whatever is pushed gets popped exactly once.
// Uniqueness is decided upstream, in Frontier::offer().
//
// Rust concepts:
// - Mutex<VecDeque>: safe shared access from many tasks
// - tokio::sync::Notify: wake-up signal without busy polling
// =============================================================================

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::{timeout_at, Instant};

#[derive(Debug, Default)]
struct Inner {
    items: VecDeque<String>,
    // pushed but not yet task_done()
    unfinished: usize,
}

#[derive(Debug, Default)]
pub struct FrontierQueue {
    inner: Mutex<Inner>,
    notify: Notify,
}

impl FrontierQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means another worker panicked mid-operation.
    // The deque is still structurally valid, so keep going with it.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Appends a URL to the tail. Never blocks.
    pub fn push(&self, url: String) {
        {
            let mut inner = self.lock();
            inner.items.push_back(url);
            inner.unfinished += 1;
        }
        self.notify.notify_one();
    }

    /// Removes and returns the head, or None if the queue is empty
    pub fn try_pop(&self) -> Option<String> {
        self.lock().items.pop_front()
    }

    /// Waits at most `wait` for a URL to become available.
    ///
    /// Returns None when the wait elapses with the queue still empty.
    pub async fn pop_timeout(&self, wait: Duration) -> Option<String> {
        let deadline = Instant::now() + wait;

        loop {
            // Register interest before checking, so a push that lands between
            // the check and the await still wakes us.
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(url) = self.try_pop() {
                return Some(url);
            }

            if timeout_at(deadline, notified).await.is_err() {
                return self.try_pop();
            }
        }
    }

    /// Marks one popped URL as finished, whatever its outcome
    pub fn task_done(&self) {
        let mut inner = self.lock();
        inner.unfinished = inner.unfinished.saturating_sub(1);
    }

    /// Number of URLs currently waiting
    pub fn pending(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// True when nothing is queued and nothing popped is still being processed
    pub fn is_drained(&self) -> bool {
        self.lock().unfinished == 0
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why std::sync::Mutex and not tokio::sync::Mutex?
//    - The lock is only held for a push_back/pop_front, never across .await
//    - A std Mutex is cheaper for such short critical sections
//
// 2. What does Notify do?
//    - notify_one() wakes one task waiting on notified()
//    - If nobody is waiting, it stores a permit for the next waiter
//    - enable() registers the waiter before we look at the queue, so a push
//      that happens in between is never missed
//
// 3. Why a bounded wait instead of waiting forever?
//    - The crawl has a wall-clock budget
//    - A worker parked forever on an empty queue could never notice it
// -----------------------------------------------------------------------------
