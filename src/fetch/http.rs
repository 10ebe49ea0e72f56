// src/fetch/http.rs
// =============================================================================
// Fetches pages over HTTP with reqwest.
//
// Key points:
// - One Client for the whole crawl (connection pooling across workers)
// - Every request is bounded by a timeout, so a slow server cannot hold a
//   worker far past the crawl's time budget
// - Non-2xx responses count as failures
// - reqwest errors are sorted into FetchError categories
// - No retries: a failed URL is never attempted again
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::Fetcher;
use crate::error::FetchError;

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(categorize_error)
    }
}

// Sorts a reqwest error into one of our failure categories
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else if let Some(status) = error.status() {
        FetchError::Status(status.as_u16())
    } else {
        FetchError::Request(error.to_string())
    }
}
