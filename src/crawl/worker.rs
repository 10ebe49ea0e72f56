// src/crawl/worker.rs
// =============================================================================
// One worker's loop.
//
// States:
// - IDLE:    waiting on the queue, at most `poll_interval` at a time
// - RUNNING: processing the URL it just popped
// - STOPPED: the deadline passed (or, with exit_when_idle, the frontier is
//            drained) and the loop has returned
//
// The deadline is checked before every pop. A fetch already in flight when
// the deadline passes is allowed to finish; its length is bounded by the
// fetcher's timeout.
//
// Nothing that happens to a single URL stops the worker. Typed failures are
// logged and counted; a panic inside the pipeline is caught and counted as
// Unexpected.
// =============================================================================

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use super::pipeline::process_url;
use super::CrawlContext;
use crate::error::{CrawlError, FailureKind};

#[derive(Debug, Clone, Copy)]
pub struct WorkerSettings {
    pub poll_interval: Duration,
    pub exit_when_idle: bool,
}

pub async fn run_worker(ctx: CrawlContext, deadline: Instant, settings: WorkerSettings) {
    loop {
        let now = Instant::now();
        if now >= deadline {
            debug!("time budget elapsed, stopping");
            break;
        }

        let wait = settings.poll_interval.min(deadline - now);
        let Some(url) = ctx.frontier.pop_timeout(wait).await else {
            if settings.exit_when_idle && ctx.frontier.is_drained() {
                debug!("frontier drained, stopping");
                break;
            }
            continue;
        };

        debug!(url = %url, pending = ctx.frontier.pending(), "getting url");

        handle_url(&ctx, &url).await;
        ctx.frontier.task_done();
        ctx.stats.page_processed();

        debug!(
            emails = ctx.emails.email_count(),
            visited = ctx.frontier.visited_count(),
            "processed url"
        );
        debug!(emails = ?ctx.emails.all_emails(), "aggregate email set");
    }
}

async fn handle_url(ctx: &CrawlContext, url: &str) {
    let outcome = AssertUnwindSafe(process_url(ctx, url))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| {
            Err(CrawlError::Unexpected {
                url: url.to_string(),
                message: panic_message(panic.as_ref()),
            })
        });

    match outcome {
        Ok(report) => {
            if let Some(err) = &report.link_error {
                ctx.stats.record_failure(err.kind());
                warn!(error = %err, "no links extracted");
            }
            debug!(
                url = %report.url,
                links = report.links_found,
                admitted = report.links_admitted,
                emails = report.emails_found,
                "page done"
            );
        }
        Err(err) => {
            ctx.stats.record_failure(err.kind());
            match err.kind() {
                FailureKind::Fetch | FailureKind::Parse => warn!(error = %err, "url failed"),
                FailureKind::Persist | FailureKind::Unexpected => error!(error = %err, "url failed"),
            }
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::testing::{context, FakeFetcher};

    fn settings() -> WorkerSettings {
        WorkerSettings {
            poll_interval: Duration::from_millis(10),
            exit_when_idle: true,
        }
    }

    #[tokio::test]
    async fn test_worker_survives_fetch_failure() {
        let fetcher = FakeFetcher::new()
            .failing("http://u.test/")
            .page("http://v.test/", "<p>hello</p>");
        let ctx = context(fetcher);
        ctx.frontier.offer("http://u.test/");
        ctx.frontier.offer("http://v.test/");

        let deadline = Instant::now() + Duration::from_secs(5);
        run_worker(ctx.clone(), deadline, settings()).await;

        assert!(ctx.frontier.is_visited("http://u.test/"));
        assert!(ctx.frontier.is_visited("http://v.test/"));
        assert_eq!(ctx.stats.pages_processed(), 2);
        assert_eq!(ctx.stats.failures().fetch, 1);
    }

    #[tokio::test]
    async fn test_worker_survives_panic() {
        let fetcher = FakeFetcher::new()
            .panicking("http://boom.test/")
            .page("http://fine.test/", "<p>x@y.com</p>");
        let ctx = context(fetcher);
        ctx.frontier.offer("http://boom.test/");
        ctx.frontier.offer("http://fine.test/");

        let deadline = Instant::now() + Duration::from_secs(5);
        run_worker(ctx.clone(), deadline, settings()).await;

        assert_eq!(ctx.stats.failures().unexpected, 1);
        assert_eq!(ctx.stats.pages_processed(), 2);
        assert_eq!(ctx.emails.email_count(), 1);
        assert!(ctx.frontier.is_drained());
    }

    #[tokio::test]
    async fn test_expired_deadline_pops_nothing() {
        let ctx = context(FakeFetcher::new().page("http://a.test/", ""));
        ctx.frontier.offer("http://a.test/");

        run_worker(ctx.clone(), Instant::now(), settings()).await;

        assert_eq!(ctx.frontier.pending(), 1);
        assert_eq!(ctx.stats.pages_processed(), 0);
    }

    #[tokio::test]
    async fn test_idle_worker_stops_at_deadline() {
        let ctx = context(FakeFetcher::new());
        let settings = WorkerSettings {
            poll_interval: Duration::from_millis(10),
            exit_when_idle: false,
        };

        let started = std::time::Instant::now();
        run_worker(ctx, Instant::now() + Duration::from_millis(50), settings).await;
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed < Duration::from_secs(2));
    }

    #[test]
    fn test_panic_message_from_str_and_string() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("static message");
        assert_eq!(panic_message(boxed.as_ref()), "static message");

        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
    }
}
