// src/error.rs
// =============================================================================
// Typed failures for the crawl pipeline.
//
// Every way a single URL can go wrong has its own type:
// - FetchError: the page could not be downloaded
// - ParseError: the body could not be turned into a link list
// - PersistError: emails.json could not be rewritten
// - anything else (a panic somewhere in the pipeline) is Unexpected
//
// CrawlError wraps them all so the worker can log one value, and tests can
// still ask "which kind of failure was it?" through kind().
//
// None of these are fatal. The worker logs them and moves on to the next URL.
// =============================================================================

use serde::Serialize;
use thiserror::Error;

/// Why a page could not be downloaded
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(u16),
    /// Request took longer than the fetch timeout
    #[error("request timed out")]
    Timeout,
    /// Could not connect (DNS, refused, unreachable)
    #[error("connection failed: {0}")]
    Connect(String),
    /// Anything else reqwest reports (invalid URL, body decode, ...)
    #[error("request failed: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
#[error("could not extract links: {0}")]
pub struct ParseError(pub String);

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A failure while processing one URL
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("parse failed for {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: ParseError,
    },
    #[error("could not persist emails found on {url}: {source}")]
    Persist {
        url: String,
        #[source]
        source: PersistError,
    },
    #[error("unexpected failure on {url}: {message}")]
    Unexpected { url: String, message: String },
}

/// Failure category, used for counting and for assertions in tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Fetch,
    Parse,
    Persist,
    Unexpected,
}

impl CrawlError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CrawlError::Fetch { .. } => FailureKind::Fetch,
            CrawlError::Parse { .. } => FailureKind::Parse,
            CrawlError::Persist { .. } => FailureKind::Persist,
            CrawlError::Unexpected { .. } => FailureKind::Unexpected,
        }
    }

    /// The URL that was being processed when the failure happened
    pub fn url(&self) -> &str {
        match self {
            CrawlError::Fetch { url, .. }
            | CrawlError::Parse { url, .. }
            | CrawlError::Persist { url, .. }
            | CrawlError::Unexpected { url, .. } => url,
        }
    }
}
