// src/crawl/mod.rs
// =============================================================================
// The crawl itself: shared context, per-URL pipeline, workers and the pool.
//
// Flow:
//   seeds -> frontier.offer() -> queue
//   worker pops a URL -> fetch -> mark visited -> links -> frontier.offer()
//                                              -> emails -> aggregator
//
// Workers never reach for globals. Everything they touch lives in a
// CrawlContext handed to them when they are spawned, so tests can run the
// same pipeline against fake fetchers and extractors.
// =============================================================================

mod pipeline;
mod pool;
mod stats;
mod worker;

use std::sync::Arc;

use crate::config::CrawlConfig;
use crate::emails::{EmailAggregator, EmailStore};
use crate::fetch::Fetcher;
use crate::frontier::Frontier;
use crate::links::LinkExtractor;

pub use pool::WorkerPool;
pub use stats::{CrawlStats, CrawlSummary};
pub use worker::WorkerSettings;

/// Shared state and collaborators, cloned into every worker
#[derive(Clone)]
pub struct CrawlContext {
    pub frontier: Arc<Frontier>,
    pub emails: Arc<EmailAggregator>,
    pub fetcher: Arc<dyn Fetcher>,
    pub links: Arc<dyn LinkExtractor>,
    pub stats: Arc<CrawlStats>,
}

impl CrawlContext {
    pub fn new(
        frontier: Frontier,
        emails: EmailAggregator,
        fetcher: Arc<dyn Fetcher>,
        links: Arc<dyn LinkExtractor>,
    ) -> Self {
        Self {
            frontier: Arc::new(frontier),
            emails: Arc::new(emails),
            fetcher,
            links,
            stats: Arc::new(CrawlStats::default()),
        }
    }
}

/// Runs a full crawl: seeds the frontier, then drives the pool until the budget runs out.
pub async fn run_crawl(
    config: &CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
    links: Arc<dyn LinkExtractor>,
    store: Box<dyn EmailStore>,
) -> CrawlSummary {
    let ctx = CrawlContext::new(
        Frontier::new(config.allow_revisit),
        EmailAggregator::new(store),
        fetcher,
        links,
    );

    for seed in &config.seeds {
        ctx.frontier.offer(seed);
    }

    let settings = WorkerSettings {
        poll_interval: config.poll_interval,
        exit_when_idle: config.exit_when_idle,
    };

    WorkerPool::new(ctx, config.workers, config.duration, settings)
        .run()
        .await
}

// Fakes shared by the crawl tests
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::CrawlContext;
    use crate::emails::{EmailAggregator, MemoryStore};
    use crate::error::{FetchError, ParseError};
    use crate::fetch::Fetcher;
    use crate::frontier::Frontier;
    use crate::links::{HtmlLinkExtractor, LinkExtractor};

    /// Serves canned pages; unknown URLs fail with a 404
    #[derive(Clone, Default)]
    pub struct FakeFetcher {
        pages: HashMap<String, String>,
        failing: HashSet<String>,
        panicking: HashSet<String>,
        latency: Option<Duration>,
        calls: Arc<Mutex<HashMap<String, usize>>>,
    }

    impl FakeFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        pub fn failing(mut self, url: &str) -> Self {
            self.failing.insert(url.to_string());
            self
        }

        pub fn panicking(mut self, url: &str) -> Self {
            self.panicking.insert(url.to_string());
            self
        }

        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = Some(latency);
            self
        }

        pub fn fetch_count(&self, url: &str) -> usize {
            self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
        }
    }

    #[async_trait]
    impl Fetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            *self.calls.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;

            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            if self.panicking.contains(url) {
                panic!("fake fetcher told to panic on {}", url);
            }
            if self.failing.contains(url) {
                return Err(FetchError::Connect("fake connection refused".to_string()));
            }
            self.pages
                .get(url)
                .cloned()
                .ok_or(FetchError::Status(404))
        }
    }

    pub struct BrokenExtractor;

    impl LinkExtractor for BrokenExtractor {
        fn extract_links(&self, _body: &str) -> Result<Vec<String>, ParseError> {
            Err(ParseError("fake extractor always fails".to_string()))
        }
    }

    pub fn context(fetcher: FakeFetcher) -> CrawlContext {
        CrawlContext::new(
            Frontier::new(false),
            EmailAggregator::new(Box::new(MemoryStore::new())),
            Arc::new(fetcher),
            Arc::new(HtmlLinkExtractor::new()),
        )
    }
}
