// src/fetch/mod.rs
// =============================================================================
// The fetch capability: turn a URL into a page body.
//
// Workers only see the Fetcher trait, never reqwest directly. The real crawl
// uses ReqwestFetcher; tests plug in a fake that serves canned pages.
// =============================================================================

mod http;

use async_trait::async_trait;

use crate::error::FetchError;

pub use http::ReqwestFetcher;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Downloads `url` and returns its body as text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
