//! Page analysis: the scraper boundary of the crawl core
//!
//! A fetch worker hands each fetched page to [`scrape`], which marks the page
//! visited, extracts outbound link candidates, and filters them through the
//! validity policy. Word statistics are recorded as a side effect of
//! extraction, exactly once per successfully analyzed page.

mod extractor;
mod tokenizer;

pub use extractor::extract_links;
pub use tokenizer::{count_words, is_countable, tokenize};

use crate::policy::is_valid;
use crate::stats::CrawlStats;
use crate::url::normalize_url;
use crate::{UrlError, UrlResult};
use scraper::Html;

/// A fetched page as delivered by the fetch layer
///
/// Consumed read-only by the analysis core. A 200 status implies `body` may
/// be absent only when the page was genuinely empty; non-200 responses carry
/// the upstream failure in `error`.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// The URL the response was served from (after redirects)
    pub url: String,

    /// HTTP status code; 0 when the request never completed
    pub status: u16,

    /// Upstream error description for failed fetches
    pub error: Option<String>,

    /// Raw response body
    pub body: Option<Vec<u8>>,

    /// Content-Type header value, if the server sent one
    pub content_type: Option<String>,
}

/// Analyzes a fetched page and returns the links worth enqueueing
///
/// This is the boundary the frontier calls once per fetched page. It
/// defragments `url` and, for a 200 response, marks it visited; extracts the
/// outbound candidate links; and returns only those the validity policy
/// accepts.
///
/// Calling `scrape` twice for the same defragmented URL marks it visited
/// once (the visited set is idempotent), though word frequencies are
/// re-counted (the global table is cumulative by design).
///
/// # Errors
///
/// Only a structurally malformed URL value propagates, per the crawl error
/// taxonomy; every content-level problem resolves to an empty result.
pub fn scrape(url: &str, response: &PageResponse, stats: &CrawlStats) -> UrlResult<Vec<String>> {
    let page_url = match normalize_url(url) {
        Ok(parsed) => parsed,
        Err(UrlError::Parse(reason)) => {
            // Fetch layer handed us a scheme-less or host-less URL; nothing
            // to analyze, but not fatal
            tracing::warn!(url, %reason, "skipping unanalyzable page URL");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    if response.status == 200 {
        stats.mark_visited(&page_url);
    }

    let candidates = extract_links(&page_url, response, stats);

    let mut accepted = Vec::new();
    for candidate in candidates {
        if is_valid(&candidate, stats)? {
            accepted.push(candidate);
        }
    }

    tracing::debug!(
        url = %page_url,
        accepted = accepted.len(),
        "page analyzed"
    );
    Ok(accepted)
}

/// Decodes a response body into text, if there is any to analyze
///
/// Returns `None` for an absent, empty, or whitespace-only body, and for
/// bytes that are not valid UTF-8: the tolerated per-page parse failure
/// path. Such pages contribute zero links and zero word statistics.
pub(crate) fn decode_body(response: &PageResponse) -> Option<&str> {
    let body = response.body.as_deref()?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    std::str::from_utf8(body).ok()
}

/// Collects the visible text of a parsed document
pub(crate) fn page_text(document: &Html) -> String {
    document.root_element().text().collect::<Vec<_>>().join(" ")
}
