//! Link extraction from fetched HTML
//!
//! Produces the unfiltered candidate list for a page: every anchor href,
//! resolved against the page URL and defragmented. Filtering through the
//! validity policy is the caller's responsibility: the extractor emits
//! candidates, the policy decides acceptance.

use crate::analysis::{count_words, decode_body, page_text, PageResponse};
use crate::stats::CrawlStats;
use scraper::{Html, Selector};
use url::Url;

/// Pages with fewer visible words than this are boilerplate, not content
const MIN_CONTENT_WORDS: usize = 100;

/// Extracts outbound link candidates from a fetched page
///
/// # Contract
///
/// - Non-200 response: the upstream error is logged and no links come back.
/// - Absent, whitespace-only, or undecodable body: no links (a tolerated
///   per-page failure, never an error).
/// - Word statistics are recorded for the page before the content gate, so
///   short pages still contribute their text to the frequency table.
/// - Pages with fewer than [`MIN_CONTENT_WORDS`] visible words are treated
///   as low-value and yield no links.
/// - Otherwise every `<a href>` is resolved against the page URL,
///   defragmented, and returned **unfiltered**.
///
/// Each call re-parses the body; the sequence is finite and eagerly
/// materialized.
pub fn extract_links(page_url: &Url, response: &PageResponse, stats: &CrawlStats) -> Vec<String> {
    if response.status != 200 {
        match &response.error {
            Some(error) => {
                tracing::warn!(url = %response.url, status = response.status, %error, "fetch failed")
            }
            None => tracing::debug!(url = %response.url, status = response.status, "non-200 response"),
        }
        return Vec::new();
    }

    // Word accounting happens exactly once per successful page, before the
    // content-quality gate
    count_words(page_url, response, stats);

    let Some(text) = decode_body(response) else {
        tracing::debug!(url = %response.url, "no parseable body");
        return Vec::new();
    };

    let document = Html::parse_document(text);

    let word_count = page_text(&document).split_whitespace().count();
    if word_count < MIN_CONTENT_WORDS {
        tracing::debug!(url = %response.url, word_count, "content gate: low-value page");
        return Vec::new();
    }

    collect_hrefs(&document, page_url)
}

/// Collects every anchor href as an absolute, defragmented URL string
fn collect_hrefs(document: &Html, page_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if let Some(resolved) = resolve_href(href, page_url) {
            links.push(resolved);
        }
    }

    links
}

/// Resolves an href against the page URL and strips its fragment
///
/// Returns `None` for empty hrefs and values that cannot resolve to a URL;
/// scheme and domain judgments are left to the validity policy.
fn resolve_href(href: &str, page_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    match page_url.join(href) {
        Ok(mut resolved) => {
            resolved.set_fragment(None);
            Some(resolved.to_string())
        }
        Err(_) => None,
    }
}
