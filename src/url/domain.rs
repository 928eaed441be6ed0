use url::Url;

/// Extracts the host from a URL, lowercased
///
/// Subdomain statistics group on this value, so it must be consistent for
/// every entry in the visited set. The `url` crate already lowercases hosts
/// during parsing; the extra lowercase here keeps the guarantee local.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use ics_scout::url::extract_host;
///
/// let url = Url::parse("https://vision.ics.uci.edu/papers").unwrap();
/// assert_eq!(extract_host(&url), Some("vision.ics.uci.edu".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
