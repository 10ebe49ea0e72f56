// src/frontier/state.rs
// =============================================================================
// Per-URL crawl state.
//
// A URL is in exactly one of these states:
//   Unseen  -> not in the map at all
//   Queued  -> admitted by the filter, waiting in (or popped from) the queue
//   Visited -> a worker finished fetching it
//
// With revisits allowed, a Visited URL can be queued again. It then sits in
// Requeued, which still counts as visited: visited membership never shrinks.
//
// One map holds both the "filter has seen it" and the "already visited"
// answers, so they can never disagree with each other.
// =============================================================================

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlState {
    Queued,
    Visited,
    Requeued,
}

impl UrlState {
    pub fn is_visited(self) -> bool {
        matches!(self, UrlState::Visited | UrlState::Requeued)
    }
}

#[derive(Debug, Default)]
pub struct StateTable {
    states: HashMap<String, UrlState>,
    allow_revisit: bool,
}

impl StateTable {
    pub fn new(allow_revisit: bool) -> Self {
        Self {
            states: HashMap::new(),
            allow_revisit,
        }
    }

    pub fn get(&self, url: &str) -> Option<UrlState> {
        self.states.get(url).copied()
    }

    /// Moves `url` to Queued if it may be admitted, and reports whether it was.
    ///
    /// Unseen URLs are always admitted. Visited URLs are admitted again only
    /// when revisits are allowed. Queued URLs never are.
    pub fn admit(&mut self, url: &str) -> bool {
        let next = match self.get(url) {
            None => UrlState::Queued,
            Some(UrlState::Visited) if self.allow_revisit => UrlState::Requeued,
            Some(_) => return false,
        };
        self.states.insert(url.to_string(), next);
        true
    }

    pub fn mark_visited(&mut self, url: &str) {
        if url.is_empty() {
            return;
        }
        match self.states.get_mut(url) {
            Some(state) => *state = UrlState::Visited,
            None => {
                self.states.insert(url.to_string(), UrlState::Visited);
            }
        }
    }

    pub fn visited(&self) -> HashSet<String> {
        self.states
            .iter()
            .filter(|(_, state)| state.is_visited())
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn visited_count(&self) -> usize {
        self.states
            .values()
            .filter(|state| state.is_visited())
            .count()
    }

    /// Every URL the filter has ever accepted or a worker has visited
    pub fn seen(&self) -> HashSet<String> {
        self.states.keys().cloned().collect()
    }

    pub fn seen_count(&self) -> usize {
        self.states.len()
    }
}
