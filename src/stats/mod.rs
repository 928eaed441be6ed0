//! Crawl statistics aggregation
//!
//! One [`CrawlStats`] instance is constructed at crawl start, shared by every
//! fetch worker, and read once at crawl end. All aggregate state lives behind
//! a single internal mutex so concurrent updates are linearizable: no lost
//! increments, no torn reads during reporting.

mod report;

pub use report::{build_report, print_report, CrawlReport, TOP_WORDS};

use crate::url::dedup_key;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use url::Url;

/// A word-frequency entry with its first-seen sequence number
#[derive(Debug)]
struct WordEntry {
    count: u64,
    order: u64,
}

/// A per-page token count with its first-seen sequence number
#[derive(Debug)]
struct PageEntry {
    tokens: usize,
    order: u64,
}

#[derive(Debug, Default)]
struct StatsInner {
    /// word -> frequency across the whole crawl; counts only ever grow
    word_frequencies: HashMap<String, WordEntry>,
    next_word_order: u64,

    /// Dedup keys of every page analyzed with a 200 response
    visited: HashSet<String>,

    /// page URL -> countable-token total, written once per analysis
    page_words: HashMap<String, PageEntry>,
    next_page_order: u64,
}

/// Thread-safe aggregate statistics for one crawl
///
/// Holds the word-frequency table, the visited set, and per-page word counts.
/// Subdomain counts are derived on demand from the visited set, never stored.
#[derive(Debug, Default)]
pub struct CrawlStats {
    inner: Mutex<StatsInner>,
}

impl CrawlStats {
    /// Creates an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StatsInner> {
        // A poisoned lock means a worker panicked mid-update; the crawl
        // cannot produce trustworthy statistics past that point
        self.inner.lock().expect("crawl statistics mutex poisoned")
    }

    /// Marks a page as visited
    ///
    /// The URL is reduced to its dedup key (fragment and query dropped), so
    /// marking is idempotent: re-inserting an already-present page is a
    /// no-op and the unique count does not move.
    pub fn mark_visited(&self, url: &Url) {
        self.lock().visited.insert(dedup_key(url));
    }

    /// Whether a dedup key is already in the visited set
    ///
    /// Best-effort with respect to concurrent insertions: the key is checked
    /// at call time and no reservation is held afterwards, so two workers
    /// racing on a fresh URL may both see "not visited". The visited set
    /// itself stays consistent; the page is still only counted once.
    pub fn is_visited(&self, key: &str) -> bool {
        self.lock().visited.contains(key)
    }

    /// Records the countable tokens of one analyzed page
    ///
    /// Every token increments the global frequency table (cumulative across
    /// refetches); the page's total is written to the per-page table keyed by
    /// `url`, overwriting any prior total for that exact URL.
    pub fn record_page_words<'a, I>(&self, url: &str, tokens: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut inner = self.lock();
        let inner = &mut *inner;

        let mut page_total = 0usize;
        for token in tokens {
            page_total += 1;
            if !inner.word_frequencies.contains_key(token) {
                let order = inner.next_word_order;
                inner.next_word_order += 1;
                inner
                    .word_frequencies
                    .insert(token.to_string(), WordEntry { count: 0, order });
            }
            if let Some(entry) = inner.word_frequencies.get_mut(token) {
                entry.count += 1;
            }
        }

        if !inner.page_words.contains_key(url) {
            let order = inner.next_page_order;
            inner.next_page_order += 1;
            inner
                .page_words
                .insert(url.to_string(), PageEntry { tokens: 0, order });
        }
        if let Some(entry) = inner.page_words.get_mut(url) {
            entry.tokens = page_total;
        }
    }

    /// Returns the `n` highest-frequency words with their counts
    ///
    /// Tie-break rule (observable, tested): words with equal counts are
    /// ordered by when they first entered the table.
    pub fn top_n_words(&self, n: usize) -> Vec<(String, u64)> {
        let inner = self.lock();
        let mut entries: Vec<_> = inner.word_frequencies.iter().collect();
        entries.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then_with(|| a.1.order.cmp(&b.1.order))
        });
        entries
            .into_iter()
            .take(n)
            .map(|(word, entry)| (word.clone(), entry.count))
            .collect()
    }

    /// Number of distinct pages analyzed so far
    pub fn unique_page_count(&self) -> usize {
        self.lock().visited.len()
    }

    /// The page with the most countable tokens, with its count
    ///
    /// Ties go to the page seen first; `None` when no page has been counted.
    pub fn longest_page(&self) -> Option<(String, usize)> {
        let inner = self.lock();
        inner
            .page_words
            .iter()
            .max_by(|a, b| {
                a.1.tokens
                    .cmp(&b.1.tokens)
                    .then_with(|| b.1.order.cmp(&a.1.order))
            })
            .map(|(url, entry)| (url.clone(), entry.tokens))
    }

    /// Visited-page counts grouped by host, in host-sorted order
    pub fn subdomain_breakdown(&self) -> BTreeMap<String, usize> {
        let inner = self.lock();
        let mut counts = BTreeMap::new();
        for key in &inner.visited {
            if let Ok(url) = Url::parse(key) {
                if let Some(host) = url.host_str() {
                    *counts.entry(host.to_lowercase()).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::normalize_url;
    use std::sync::Arc;

    #[test]
    fn test_mark_visited_is_idempotent() {
        let stats = CrawlStats::new();
        let url = normalize_url("https://www.ics.uci.edu/page").unwrap();

        stats.mark_visited(&url);
        stats.mark_visited(&url);

        assert_eq!(stats.unique_page_count(), 1);
    }

    #[test]
    fn test_query_does_not_change_page_identity() {
        let stats = CrawlStats::new();
        stats.mark_visited(&normalize_url("https://www.ics.uci.edu/p?a=1").unwrap());
        stats.mark_visited(&normalize_url("https://www.ics.uci.edu/p?a=2").unwrap());

        assert_eq!(stats.unique_page_count(), 1);
    }

    #[test]
    fn test_top_n_words_orders_by_count() {
        let stats = CrawlStats::new();
        stats.record_page_words(
            "https://www.ics.uci.edu/a",
            vec!["research", "research", "lab"],
        );
        stats.record_page_words("https://www.ics.uci.edu/b", vec!["research"]);

        assert_eq!(
            stats.top_n_words(1),
            vec![("research".to_string(), 3)]
        );
    }

    #[test]
    fn test_top_n_words_ties_break_by_first_seen() {
        let stats = CrawlStats::new();
        stats.record_page_words("https://www.ics.uci.edu/a", vec!["beta", "alpha"]);

        // Equal counts: "beta" entered the table first
        assert_eq!(
            stats.top_n_words(2),
            vec![("beta".to_string(), 1), ("alpha".to_string(), 1)]
        );
    }

    #[test]
    fn test_longest_page_ties_break_by_first_seen() {
        let stats = CrawlStats::new();
        stats.record_page_words("https://www.ics.uci.edu/first", vec!["aa", "bb"]);
        stats.record_page_words("https://www.ics.uci.edu/second", vec!["cc", "dd"]);

        assert_eq!(
            stats.longest_page(),
            Some(("https://www.ics.uci.edu/first".to_string(), 2))
        );
    }

    #[test]
    fn test_longest_page_empty() {
        let stats = CrawlStats::new();
        assert_eq!(stats.longest_page(), None);
    }

    #[test]
    fn test_page_total_overwrites_frequencies_accumulate() {
        let stats = CrawlStats::new();
        let url = "https://www.ics.uci.edu/page";

        stats.record_page_words(url, vec!["research", "lab"]);
        stats.record_page_words(url, vec!["research"]);

        // The per-page total reflects the latest analysis only
        assert_eq!(stats.longest_page(), Some((url.to_string(), 1)));
        // The global table is cumulative
        assert_eq!(stats.top_n_words(1), vec![("research".to_string(), 2)]);
    }

    #[test]
    fn test_subdomain_breakdown_sums_to_unique_pages() {
        let stats = CrawlStats::new();
        for raw in [
            "https://vision.ics.uci.edu/a",
            "https://vision.ics.uci.edu/b",
            "https://www.cs.uci.edu/c",
            "https://www.stat.uci.edu/d",
        ] {
            stats.mark_visited(&normalize_url(raw).unwrap());
        }

        let breakdown = stats.subdomain_breakdown();
        assert_eq!(breakdown.values().sum::<usize>(), stats.unique_page_count());
        assert_eq!(breakdown["vision.ics.uci.edu"], 2);
        assert_eq!(breakdown["www.cs.uci.edu"], 1);

        // BTreeMap iteration is host-sorted
        let hosts: Vec<_> = breakdown.keys().cloned().collect();
        let mut sorted = hosts.clone();
        sorted.sort();
        assert_eq!(hosts, sorted);
    }

    #[test]
    fn test_concurrent_updates_lose_nothing() {
        let stats = Arc::new(CrawlStats::new());
        let mut handles = Vec::new();

        for worker in 0..8 {
            let stats = Arc::clone(&stats);
            handles.push(std::thread::spawn(move || {
                for i in 0..100 {
                    let raw = format!("https://www.ics.uci.edu/w{}/p{}", worker, i);
                    let url = normalize_url(&raw).unwrap();
                    stats.mark_visited(&url);
                    stats.record_page_words(url.as_str(), vec!["shared", "token"]);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(stats.unique_page_count(), 800);
        assert_eq!(stats.top_n_words(1), vec![("shared".to_string(), 800)]);
        assert_eq!(
            stats.subdomain_breakdown().values().sum::<usize>(),
            800
        );
    }
}
