//! Crawl driver: fetch workers over a shared frontier
//!
//! This module supplies the orchestration the analysis core deliberately
//! does not own: seeding the frontier, fanning out fetch workers, and
//! quiescing when the work runs dry. Each worker loop is fetch → analyze →
//! enqueue; all crawl-correctness policy lives in the analysis core.

mod fetcher;
mod frontier;

pub use fetcher::{build_http_client, fetch_page};
pub use frontier::Frontier;

use crate::analysis::scrape;
use crate::config::Config;
use crate::stats::CrawlStats;
use crate::url::normalize_url;
use crate::Result;
use reqwest::Client;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// How long an idle worker waits before re-checking the frontier
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Runs a complete crawl and leaves the results in `stats`
///
/// Seeds the frontier from the configuration, spawns `worker-count` fetch
/// workers, and returns once every worker has quiesced: the frontier is
/// empty, no page is mid-analysis, or the `max-pages` cap was reached.
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `stats` - The shared aggregator every worker writes into
pub async fn run_crawl(config: &Config, stats: Arc<CrawlStats>) -> Result<()> {
    let client = build_http_client(&config.crawler)?;

    let frontier = Arc::new(Frontier::new());
    for seed in &config.seeds {
        let url = normalize_url(seed)?;
        frontier.push(url);
    }

    let in_flight = Arc::new(AtomicUsize::new(0));
    let fetched = Arc::new(AtomicU64::new(0));

    let mut handles = Vec::new();
    for worker_id in 0..config.crawler.worker_count {
        let worker = Worker {
            id: worker_id,
            client: client.clone(),
            frontier: Arc::clone(&frontier),
            stats: Arc::clone(&stats),
            in_flight: Arc::clone(&in_flight),
            fetched: Arc::clone(&fetched),
            politeness_delay: Duration::from_millis(config.crawler.politeness_delay_ms),
            max_pages: config.crawler.max_pages,
        };
        handles.push(tokio::spawn(worker.run()));
    }

    for handle in handles {
        handle.await??;
    }

    tracing::info!(
        pages = stats.unique_page_count(),
        fetches = fetched.load(Ordering::SeqCst),
        "crawl finished"
    );
    Ok(())
}

/// One fetch worker's share of the crawl
struct Worker {
    id: u32,
    client: Client,
    frontier: Arc<Frontier>,
    stats: Arc<CrawlStats>,
    in_flight: Arc<AtomicUsize>,
    fetched: Arc<AtomicU64>,
    politeness_delay: Duration,
    max_pages: u64,
}

impl Worker {
    async fn run(self) -> Result<()> {
        loop {
            self.in_flight.fetch_add(1, Ordering::SeqCst);

            let Some(url) = self.frontier.pop() else {
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                // Quiesce only when nobody is mid-page; a busy peer may
                // still enqueue more work
                if self.in_flight.load(Ordering::SeqCst) == 0 && self.frontier.is_empty() {
                    tracing::debug!(worker = self.id, "worker quiescing");
                    return Ok(());
                }
                tokio::time::sleep(IDLE_POLL).await;
                continue;
            };

            if self.fetched.fetch_add(1, Ordering::SeqCst) >= self.max_pages {
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                tracing::info!(worker = self.id, "max-pages cap reached, stopping");
                return Ok(());
            }

            let outcome = self.process(&url).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            outcome?;
        }
    }

    async fn process(&self, url: &Url) -> Result<()> {
        tokio::time::sleep(self.politeness_delay).await;

        let response = fetch_page(&self.client, url).await;
        let links = scrape(url.as_str(), &response, &self.stats)?;

        let mut enqueued = 0usize;
        for link in &links {
            match Url::parse(link) {
                Ok(parsed) => {
                    if self.frontier.push(parsed) {
                        enqueued += 1;
                    }
                }
                Err(e) => {
                    // scrape() only returns URLs it parsed itself
                    tracing::error!(%link, error = %e, "accepted link failed to re-parse");
                }
            }
        }

        tracing::info!(
            worker = self.id,
            url = %url,
            status = response.status,
            accepted = links.len(),
            enqueued,
            "page processed"
        );
        Ok(())
    }
}
