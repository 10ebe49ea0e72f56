// src/links/mod.rs
// =============================================================================
// The link-extraction capability and link resolution.
//
// An extractor returns raw anchor targets, exactly as written in the page.
// resolve_link() then turns root-relative targets ("/about") into absolute
// URLs using the page they were found on.
//
// Resolution is deliberately narrow:
// - "/path"            -> source's "scheme://authority" + "/path", spliced
//                         as text (host case, port and spaces kept as written)
// - "//host/path"      -> source's scheme + ":" + "//host/path"
// - "https://x/y"      -> passed through untouched (no normalization)
// - "page.html", "../" -> passed through untouched as well
//
// The last case produces URL strings that will usually fail to fetch. They
// still count as distinct URLs and get queued and marked visited like any other.
// =============================================================================

mod html;

use url::Url;

use crate::error::ParseError;

pub use html::HtmlLinkExtractor;

pub trait LinkExtractor: Send + Sync {
    /// Returns every anchor target in `body`, unresolved
    fn extract_links(&self, body: &str) -> Result<Vec<String>, ParseError>;
}

/// Resolves a root-relative `href` against `source`; anything else is returned unchanged.
///
/// The source prefix is copied verbatim rather than re-serialized, so the
/// result differs from `source` only where `href` replaces it.
pub fn resolve_link(source: &str, href: &str) -> String {
    if !href.starts_with('/') {
        return href.to_string();
    }

    // Only hierarchical URLs with a host have an origin to splice.
    match Url::parse(source) {
        Ok(base) if base.has_host() && !base.cannot_be_a_base() => {}
        _ => return href.to_string(),
    }

    let Some((scheme, rest)) = source.split_once("://") else {
        return href.to_string();
    };

    if href.starts_with("//") {
        return format!("{}:{}", scheme, href);
    }

    let authority_end = rest
        .find(|c| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    format!("{}://{}{}", scheme, &rest[..authority_end], href)
}
