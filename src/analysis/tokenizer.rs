//! Tokenization and word accounting
//!
//! Page text is reduced to maximal runs of ASCII alphanumeric characters;
//! everything else is a separator. Word statistics only admit tokens that are
//! at least two characters, purely alphabetic, and not stop words.

use crate::analysis::{decode_body, page_text, PageResponse};
use crate::stats::CrawlStats;
use scraper::Html;
use url::Url;

/// Function words excluded from content word-frequency statistics
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "with", "would", "you", "your", "yours", "yourself", "yourselves",
];

/// Splits text into lowercase alphanumeric tokens
///
/// Scans character by character, accumulating maximal runs of ASCII
/// alphanumeric characters and emitting a token at every boundary. Separator
/// characters are discarded; no token is ever empty.
///
/// # Examples
///
/// ```
/// use ics_scout::analysis::tokenize;
///
/// let tokens = tokenize("Hello, World! 2023...");
/// assert_eq!(tokens, vec!["hello", "world", "2023"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            current.push(ch.to_ascii_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Whether a token participates in word-frequency statistics
///
/// Counted tokens are at least two characters, entirely ASCII alphabetic,
/// and not stop words. Tokens containing digits remain single tokens at the
/// tokenizer level but are never counted.
pub fn is_countable(token: &str) -> bool {
    token.len() >= 2
        && token.bytes().all(|b| b.is_ascii_alphabetic())
        && !STOP_WORDS.contains(&token)
}

/// Records word statistics for one fetched page
///
/// No-op unless the response carries a 200 status and a decodable,
/// non-whitespace body. The rendered text (tags stripped, lowercased) is
/// tokenized, countable tokens feed the global frequency table, and the
/// page's countable-token total is recorded under the page URL, overwriting
/// any prior total for that exact URL, so refetches do not accumulate.
pub fn count_words(page_url: &Url, response: &PageResponse, stats: &CrawlStats) {
    if response.status != 200 {
        return;
    }
    let Some(raw) = decode_body(response) else {
        return;
    };

    let document = Html::parse_document(raw);
    let text = page_text(&document).to_lowercase();
    if text.trim().is_empty() {
        return;
    }

    let tokens = tokenize(&text);
    let countable = tokens.iter().map(String::as_str).filter(|t| is_countable(t));
    stats.record_page_words(page_url.as_str(), countable);
}
