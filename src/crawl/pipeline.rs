// src/crawl/pipeline.rs
// =============================================================================
// Processing one URL, start to finish.
//
// Steps:
// 1. Fetch the body
// 2. Mark the URL visited (even when the fetch failed, so it is never retried)
// 3. Extract anchors, resolve root-relative ones, offer each to the frontier
// 4. Extract emails from the visible text and record them
//
// A failed fetch ends processing after step 2. A failed link extraction is
// not fatal: the page simply contributes no links, and emails are still
// collected. A failed save of emails.json is reported after the in-memory
// aggregate has already been updated.
// =============================================================================

use crate::emails::extract_emails;
use crate::error::CrawlError;
use crate::links::resolve_link;

use super::CrawlContext;

/// What processing one page produced
#[derive(Debug)]
pub struct PageReport {
    pub url: String,
    pub links_found: usize,
    /// Links the frontier accepted as new
    pub links_admitted: usize,
    pub emails_found: usize,
    /// Set when link extraction failed; the page then contributes no links
    pub link_error: Option<CrawlError>,
}

pub async fn process_url(ctx: &CrawlContext, url: &str) -> Result<PageReport, CrawlError> {
    let fetched = ctx.fetcher.fetch(url).await;
    ctx.frontier.mark_visited(url);

    let body = fetched.map_err(|source| CrawlError::Fetch {
        url: url.to_string(),
        source,
    })?;

    let mut report = PageReport {
        url: url.to_string(),
        links_found: 0,
        links_admitted: 0,
        emails_found: 0,
        link_error: None,
    };

    match ctx.links.extract_links(&body) {
        Ok(links) => {
            report.links_found = links.len();
            for href in links {
                if ctx.frontier.offer(&resolve_link(url, &href)) {
                    report.links_admitted += 1;
                }
            }
        }
        Err(source) => {
            report.link_error = Some(CrawlError::Parse {
                url: url.to_string(),
                source,
            });
        }
    }

    let emails = extract_emails(&body);
    report.emails_found = emails.len();
    if !emails.is_empty() {
        ctx.emails
            .record(url, emails)
            .map_err(|source| CrawlError::Persist {
                url: url.to_string(),
                source,
            })?;
    }

    Ok(report)
}
