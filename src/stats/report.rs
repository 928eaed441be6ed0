//! End-of-crawl reporting
//!
//! Reporting runs after the workers have quiesced; a snapshot taken while a
//! straggler is still writing would merely be eventually consistent, never
//! torn, because every read goes through the aggregator's lock.

use crate::stats::CrawlStats;
use std::collections::BTreeMap;

/// Number of top-frequency words in the standard report
pub const TOP_WORDS: usize = 50;

/// Everything the crawl report surfaces, as data
///
/// Exact text formatting is presentation; this structure is the contract.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Highest-frequency words, most frequent first
    pub top_words: Vec<(String, u64)>,

    /// Number of distinct pages analyzed
    pub unique_pages: usize,

    /// URL and token count of the longest page, if any page was counted
    pub longest_page: Option<(String, usize)>,

    /// Visited pages per host, host-sorted
    pub subdomains: BTreeMap<String, usize>,
}

/// Snapshots the aggregator into a report
///
/// # Arguments
///
/// * `stats` - The aggregator to read
/// * `top_words` - How many frequency entries to include (the CLI uses
///   [`TOP_WORDS`])
pub fn build_report(stats: &CrawlStats, top_words: usize) -> CrawlReport {
    CrawlReport {
        top_words: stats.top_n_words(top_words),
        unique_pages: stats.unique_page_count(),
        longest_page: stats.longest_page(),
        subdomains: stats.subdomain_breakdown(),
    }
}

/// Prints a report to stdout
pub fn print_report(report: &CrawlReport) {
    println!("Top {} words:", report.top_words.len());
    for (rank, (word, count)) in report.top_words.iter().enumerate() {
        println!("{:>3}. {} {}", rank + 1, word, count);
    }
    println!();

    println!("Number of unique pages: {}", report.unique_pages);

    match &report.longest_page {
        Some((url, tokens)) => println!("Longest page: {} ({} words)", url, tokens),
        None => println!("Longest page: (no pages analyzed)"),
    }
    println!();

    println!("Subdomain breakdown:");
    for (host, count) in &report.subdomains {
        println!("{}, {}", host, count);
    }
}
