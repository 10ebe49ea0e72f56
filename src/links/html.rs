// src/links/html.rs
// =============================================================================
// Extracts anchor targets from HTML with the `scraper` crate.
//
// Only <a href="..."> elements are considered. Hrefs come back raw (no
// resolution, no trimming, no scheme filtering) and in document order. Empty
// and whitespace-only hrefs are dropped since they can never name another page.
//
// html5ever recovers from any malformed markup, so parsing itself does not
// fail. The Result in the trait is there for extractors that can.
// =============================================================================

use scraper::{Html, Selector};

use super::LinkExtractor;
use crate::error::ParseError;

#[derive(Debug, Clone)]
pub struct HtmlLinkExtractor {
    anchors: Selector,
}

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        // "a[href]" is a constant selector, it always parses
        let anchors = Selector::parse("a[href]").unwrap();
        Self { anchors }
    }
}

impl Default for HtmlLinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, body: &str) -> Result<Vec<String>, ParseError> {
        let document = Html::parse_document(body);

        let links = document
            .select(&self.anchors)
            .filter_map(|element| element.value().attr("href"))
            .filter(|href| !href.trim().is_empty())
            .map(str::to_string)
            .collect();

        Ok(links)
    }
}
