// src/crawl/pool.rs
// =============================================================================
// The worker pool: N workers sharing one CrawlContext.
//
// All workers get the same deadline, computed once when the pool starts.
// run() returns when every worker has stopped. URLs still queued at that
// point are abandoned; they show up as `pending` in the summary.
// =============================================================================

use std::time::Duration;

use futures::future::join_all;
use tokio::time::Instant;
use tracing::{error, info, info_span, Instrument};

use super::stats::CrawlSummary;
use super::worker::{run_worker, WorkerSettings};
use super::CrawlContext;

// Stand-in deadline for budgets too large to add to the clock (30 years).
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

pub struct WorkerPool {
    ctx: CrawlContext,
    workers: usize,
    duration: Duration,
    settings: WorkerSettings,
}

impl WorkerPool {
    pub fn new(
        ctx: CrawlContext,
        workers: usize,
        duration: Duration,
        settings: WorkerSettings,
    ) -> Self {
        Self {
            ctx,
            workers,
            duration,
            settings,
        }
    }

    pub async fn run(self) -> CrawlSummary {
        let started = Instant::now();
        let deadline = started
            .checked_add(self.duration)
            .unwrap_or_else(|| started + FAR_FUTURE);

        info!(
            workers = self.workers,
            budget_secs = self.duration.as_secs(),
            pending = self.ctx.frontier.pending(),
            "starting crawl"
        );

        let handles = (0..self.workers).map(|id| {
            let span = info_span!("worker", id);
            tokio::spawn(run_worker(self.ctx.clone(), deadline, self.settings).instrument(span))
        });

        for (id, result) in join_all(handles).await.into_iter().enumerate() {
            if let Err(err) = result {
                error!(worker = id, error = %err, "worker task ended abnormally");
            }
        }

        let summary = CrawlSummary {
            pages_processed: self.ctx.stats.pages_processed(),
            visited: self.ctx.frontier.visited_count(),
            seen: self.ctx.frontier.seen_count(),
            pending: self.ctx.frontier.pending(),
            emails: self.ctx.emails.email_count(),
            failures: self.ctx.stats.failures(),
            elapsed_secs: started.elapsed().as_secs_f64(),
        };

        info!(
            pages = summary.pages_processed,
            visited = summary.visited,
            pending = summary.pending,
            emails = summary.emails,
            "crawl finished"
        );

        summary
    }
}
