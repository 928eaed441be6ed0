//! Crawl validity policy
//!
//! Decides, from a normalized URL, whether it should ever be enqueued for
//! fetching. The policy is a fixed sequence of checks evaluated in order with
//! the first match winning: scheme, allowed domains, login walls, calendar
//! traps, deep pagination, the visited set, stale date-indexed archives, and
//! a binary/media extension denylist. The cheap visited-set and date checks
//! deliberately run before the extension scan.

mod extensions;

use crate::stats::CrawlStats;
use crate::url::{dedup_key, normalize_url};
use crate::UrlError;
use url::Url;

pub use extensions::has_denied_extension;

/// Domain suffixes the crawler is allowed to wander within
const ALLOWED_SUFFIXES: &[&str] = &[
    ".ics.uci.edu",
    ".cs.uci.edu",
    ".informatics.uci.edu",
    ".stat.uci.edu",
];

/// The one host outside the suffix set that is partially allowed
const TODAY_HOST: &str = "today.uci.edu";

/// The only path prefix crawlable on [`TODAY_HOST`]
const TODAY_PATH_PREFIX: &str = "/department/information_computer_sciences/";

/// Pages below a year this old are date-indexed archive churn, not content
const STALE_YEAR_CUTOFF: u32 = 2010;

/// Why a URL was rejected by the policy
///
/// Checks run in the order of these variants; the reason reported is always
/// the first one that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Scheme is not http or https
    Scheme,
    /// Host falls outside the allowed academic subdomains
    OutsideAllowedDomains,
    /// Path or query mentions a login page (auth wall)
    LoginWall,
    /// Calendar-generator URL (near-infinite date pagination)
    CalendarTrap,
    /// Path nests deeper than any real content on these sites
    DeepPath,
    /// The page was already analyzed this crawl
    AlreadyVisited,
    /// Date-suffixed archive path from before the cutoff year
    StaleArchive,
    /// Path ends in a denylisted binary/media extension
    DeniedExtension,
}

/// Evaluates the crawl policy against a normalized URL
///
/// Returns `None` if the URL is worth fetching, or the first matching
/// [`RejectReason`] otherwise. Check order is part of the contract: the
/// visited-set lookup (check 6) reflects concurrent insertions on a
/// best-effort basis; see [`CrawlStats::is_visited`].
pub fn evaluate(url: &Url, stats: &CrawlStats) -> Option<RejectReason> {
    // Check 1: scheme
    if url.scheme() != "http" && url.scheme() != "https" {
        return Some(RejectReason::Scheme);
    }

    let host = url.host_str().unwrap_or("").to_lowercase();
    let path = url.path().to_lowercase();
    let query = url.query().unwrap_or("").to_lowercase();

    // Check 2: allowed domain set
    let allowed = ALLOWED_SUFFIXES.iter().any(|suffix| host.ends_with(suffix))
        || (host == TODAY_HOST && path.starts_with(TODAY_PATH_PREFIX));
    if !allowed {
        return Some(RejectReason::OutsideAllowedDomains);
    }

    // Check 3: auth walls
    if path.contains("login") || query.contains("login") {
        return Some(RejectReason::LoginWall);
    }

    // Check 4: calendar generators
    if path.contains("/day/") || query.contains("ical") || query.contains("tribe-bar-date") {
        return Some(RejectReason::CalendarTrap);
    }

    // Check 5: deep pagination / faceted navigation
    if path.matches('/').count() > 6 {
        return Some(RejectReason::DeepPath);
    }

    // Check 6: already analyzed
    if stats.is_visited(&dedup_key(url)) {
        return Some(RejectReason::AlreadyVisited);
    }

    // Check 7: stale date-indexed archives
    if has_stale_date_suffix(&path) {
        return Some(RejectReason::StaleArchive);
    }

    // Check 8: non-HTML payloads
    if has_denied_extension(&path) {
        return Some(RejectReason::DeniedExtension);
    }

    None
}

/// Decides whether a URL should ever be enqueued for fetching
///
/// Parses and normalizes `raw`, then runs [`evaluate`]. Structurally
/// incomplete URLs (no scheme, no host) are rejected with `Ok(false)`, while a
/// URL the parser cannot make sense of at all propagates
/// [`UrlError::Malformed`], since such a value reaching the policy layer is
/// an invariant violation upstream.
///
/// # Examples
///
/// ```
/// use ics_scout::policy::is_valid;
/// use ics_scout::stats::CrawlStats;
///
/// let stats = CrawlStats::new();
/// assert!(is_valid("https://www.ics.uci.edu/about", &stats).unwrap());
/// assert!(!is_valid("ftp://www.ics.uci.edu/about", &stats).unwrap());
/// ```
pub fn is_valid(raw: &str, stats: &CrawlStats) -> Result<bool, UrlError> {
    let url = match normalize_url(raw) {
        Ok(url) => url,
        Err(UrlError::Parse(_)) => return Ok(false),
        Err(e) => return Err(e),
    };
    Ok(evaluate(&url, stats).is_none())
}

/// Checks for a trailing `YYYY-DD` date suffix with a year before the cutoff
///
/// The suffix is exactly 7 characters: four digits, a dash, two digits.
/// `/archive/2005-06` matches; `/archive/2015-06` has a recent enough year
/// and passes.
fn has_stale_date_suffix(path: &str) -> bool {
    let bytes = path.as_bytes();
    if bytes.len() < 7 {
        return false;
    }
    let suffix = &bytes[bytes.len() - 7..];
    let shape_matches = suffix[..4].iter().all(u8::is_ascii_digit)
        && suffix[4] == b'-'
        && suffix[5..].iter().all(u8::is_ascii_digit);
    if !shape_matches {
        return false;
    }
    match path[path.len() - 7..path.len() - 3].parse::<u32>() {
        Ok(year) => year < STALE_YEAR_CUTOFF,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(url: &str) -> Option<RejectReason> {
        let stats = CrawlStats::new();
        evaluate(&normalize_url(url).unwrap(), &stats)
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        assert_eq!(check("ftp://www.ics.uci.edu/"), Some(RejectReason::Scheme));
        assert_eq!(
            check("mailto:someone@ics.uci.edu"),
            Some(RejectReason::Scheme)
        );
        assert_eq!(check("file:///etc/passwd"), Some(RejectReason::Scheme));
    }

    #[test]
    fn test_baseline_acceptance_for_allowed_subdomains() {
        assert_eq!(check("https://www.ics.uci.edu/about"), None);
        assert_eq!(check("http://vision.ics.uci.edu/"), None);
        assert_eq!(check("https://www.cs.uci.edu/people"), None);
        assert_eq!(check("https://www.informatics.uci.edu/"), None);
        assert_eq!(check("https://www.stat.uci.edu/seminars"), None);
    }

    #[test]
    fn test_rejects_hosts_outside_allowed_set() {
        assert_eq!(
            check("https://www.eng.uci.edu/"),
            Some(RejectReason::OutsideAllowedDomains)
        );
        assert_eq!(
            check("https://example.com/"),
            Some(RejectReason::OutsideAllowedDomains)
        );
        // Bare apex does not match the dotted suffix
        assert_eq!(
            check("https://ics.uci.edu/"),
            Some(RejectReason::OutsideAllowedDomains)
        );
        // A lookalike host must not suffix-match
        assert_eq!(
            check("https://notics.uci.edu/"),
            Some(RejectReason::OutsideAllowedDomains)
        );
    }

    #[test]
    fn test_today_uci_edu_path_carveout() {
        assert_eq!(
            check("https://today.uci.edu/department/information_computer_sciences/news"),
            None
        );
        assert_eq!(
            check("https://today.uci.edu/department/arts/news"),
            Some(RejectReason::OutsideAllowedDomains)
        );
        assert_eq!(
            check("https://today.uci.edu/"),
            Some(RejectReason::OutsideAllowedDomains)
        );
    }

    #[test]
    fn test_login_trap() {
        assert_eq!(
            check("https://support.ics.uci.edu/login?next=/x"),
            Some(RejectReason::LoginWall)
        );
        assert_eq!(
            check("https://www.ics.uci.edu/portal?page=LOGIN"),
            Some(RejectReason::LoginWall)
        );
    }

    #[test]
    fn test_calendar_traps() {
        assert_eq!(
            check("https://www.ics.uci.edu/events/?ical=1"),
            Some(RejectReason::CalendarTrap)
        );
        assert_eq!(
            check("https://www.ics.uci.edu/events/day/2020-01-01"),
            Some(RejectReason::CalendarTrap)
        );
        assert_eq!(
            check("https://www.ics.uci.edu/events/?tribe-bar-date=2020-01"),
            Some(RejectReason::CalendarTrap)
        );
    }

    #[test]
    fn test_deep_path_trap() {
        // Six separators: still acceptable
        assert_eq!(check("https://www.ics.uci.edu/a/b/c/d/e/f"), None);
        // Seven separators: rejected
        assert_eq!(
            check("https://www.ics.uci.edu/a/b/c/d/e/f/g"),
            Some(RejectReason::DeepPath)
        );
    }

    #[test]
    fn test_visited_urls_are_rejected() {
        let stats = CrawlStats::new();
        let url = normalize_url("https://www.ics.uci.edu/page").unwrap();
        assert_eq!(evaluate(&url, &stats), None);

        stats.mark_visited(&url);
        assert_eq!(evaluate(&url, &stats), Some(RejectReason::AlreadyVisited));

        // The query is not part of page identity for dedup
        let with_query = normalize_url("https://www.ics.uci.edu/page?tab=2").unwrap();
        assert_eq!(
            evaluate(&with_query, &stats),
            Some(RejectReason::AlreadyVisited)
        );
    }

    #[test]
    fn test_stale_archive_dates() {
        assert_eq!(
            check("https://www.ics.uci.edu/archive/2005-06"),
            Some(RejectReason::StaleArchive)
        );
        assert_eq!(check("https://www.ics.uci.edu/archive/2015-06"), None);
        // Cutoff year itself is recent enough
        assert_eq!(check("https://www.ics.uci.edu/archive/2010-01"), None);
        // Not a date shape
        assert_eq!(check("https://www.ics.uci.edu/archive/notdate"), None);
    }

    #[test]
    fn test_extension_denylist() {
        assert_eq!(
            check("https://www.ics.uci.edu/papers/thesis.pdf"),
            Some(RejectReason::DeniedExtension)
        );
        assert_eq!(
            check("https://www.ics.uci.edu/img/Logo.PNG"),
            Some(RejectReason::DeniedExtension)
        );
        assert_eq!(check("https://www.ics.uci.edu/index.html"), None);
    }

    #[test]
    fn test_check_order_first_match_wins() {
        // Both a login wall and a denied extension: the login check runs first
        let stats = CrawlStats::new();
        let url = normalize_url("https://support.ics.uci.edu/login/form.pdf").unwrap();
        assert_eq!(evaluate(&url, &stats), Some(RejectReason::LoginWall));

        // Outside the domain set beats every later check
        let url = normalize_url("https://example.com/login/form.pdf").unwrap();
        assert_eq!(
            evaluate(&url, &stats),
            Some(RejectReason::OutsideAllowedDomains)
        );
    }

    #[test]
    fn test_is_valid_handles_incomplete_urls() {
        let stats = CrawlStats::new();
        assert!(!is_valid("/relative/only", &stats).unwrap());
        assert!(!is_valid("https://", &stats).unwrap());
    }

    #[test]
    fn test_is_valid_propagates_malformed_urls() {
        let stats = CrawlStats::new();
        let result = is_valid("https://www.ics.uci.edu:99999999/", &stats);
        assert!(matches!(result, Err(UrlError::Malformed(_))));
    }

    #[test]
    fn test_stale_date_suffix_shapes() {
        assert!(has_stale_date_suffix("/archive/2005-06"));
        assert!(has_stale_date_suffix("/2009-12"));
        assert!(!has_stale_date_suffix("/archive/2010-01"));
        assert!(!has_stale_date_suffix("/archive/205-06"));
        assert!(!has_stale_date_suffix("/archive/2005_06"));
        assert!(!has_stale_date_suffix("/x"));
    }
}
