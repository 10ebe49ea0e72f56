// src/lib.rs
// =============================================================================
// mailcrawl: a time-bounded, concurrent crawler that collects email addresses.
//
// Modules:
// - cli / config: command-line flags and the validated settings built from them
// - frontier: which URLs are queued, which are visited
// - fetch: downloading pages
// - links: finding and resolving anchors
// - emails: finding, aggregating and saving email addresses
// - crawl: the per-URL pipeline, the workers and the pool
// - error: typed failures for each stage
// =============================================================================

pub mod cli;
pub mod config;
pub mod crawl;
pub mod emails;
pub mod error;
pub mod fetch;
pub mod frontier;
pub mod links;
