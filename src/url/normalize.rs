use crate::UrlError;
use url::{ParseError, Url};

/// Normalizes a URL string for crawling
///
/// # Normalization Steps
///
/// 1. Parse the URL; scheme and host are lowercased by the parser and an
///    empty path becomes `/`
/// 2. Remove the fragment (everything after `#`); fragments never affect
///    page identity or validity
///
/// Normalization is idempotent: normalizing an already-normalized URL yields
/// the same value.
///
/// # Errors
///
/// Structurally incomplete values (missing scheme, missing host) return
/// [`UrlError::Parse`]; the validity policy treats these as rejected, not
/// fatal. Any other parse failure returns [`UrlError::Malformed`], which
/// signals an upstream contract violation and must propagate.
///
/// # Examples
///
/// ```
/// use ics_scout::url::normalize_url;
///
/// let url = normalize_url("https://www.ics.uci.edu/about#staff").unwrap();
/// assert_eq!(url.as_str(), "https://www.ics.uci.edu/about");
/// ```
pub fn normalize_url(raw: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| match e {
        ParseError::RelativeUrlWithoutBase | ParseError::EmptyHost => {
            UrlError::Parse(e.to_string())
        }
        other => UrlError::Malformed(format!("{}: {}", raw, other)),
    })?;

    url.set_fragment(None);

    Ok(url)
}

/// Derives the deduplication key for a URL: `scheme://host[:port]/path`
///
/// Two URLs are the same page for visited-set purposes iff their keys match.
/// The query is deliberately excluded: it does not change page identity for
/// dedup, though it still participates in trap checks. The fragment never
/// reaches this function because [`normalize_url`] strips it.
pub fn dedup_key(url: &Url) -> String {
    let host = url.host_str().unwrap_or("");
    match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, url.path()),
        None => format!("{}://{}{}", url.scheme(), host, url.path()),
    }
}
