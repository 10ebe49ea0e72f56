// src/emails/extract.rs
// =============================================================================
// Finds email-like strings in a page's visible text.
//
// The page is parsed with scraper and only its text nodes are searched, so
// addresses that appear only inside attributes (e.g. href="mailto:...") are
// not picked up. Separate text nodes are joined with a space, so text from two
// cells of a table row stays apart. Markup the HTML parser discards (a stray
// <td> outside any <table>, for instance) leaves its text in a single node.
//
// Pattern (case-insensitive):  local@domain.tld
//   local, domain: letters, digits, '.', '-', '+', '_'
//   tld:           letters only
// =============================================================================

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Constant pattern, always compiles
    Regex::new(r"(?i)[a-z0-9.\-+_]+@[a-z0-9.\-+_]+\.[a-z]+").unwrap()
});

/// Returns the visible text of an HTML document
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document.root_element().text().collect::<Vec<_>>().join(" ")
}

/// Every distinct email-like match in `text`, as written
pub fn find_emails(text: &str) -> BTreeSet<String> {
    EMAIL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extracts emails from the visible text of an HTML page
pub fn extract_emails(html: &str) -> BTreeSet<String> {
    find_emails(&visible_text(html))
}
