use serde::Deserialize;

/// Main configuration structure for ics-scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,

    /// URLs the crawl starts from; every seed must satisfy the crawl policy
    pub seeds: Vec<String>,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of concurrent fetch workers
    #[serde(rename = "worker-count")]
    pub worker_count: u32,

    /// Delay before each fetch, per worker (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Safety cap on total fetches for one run
    #[serde(rename = "max-pages")]
    pub max_pages: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

/// Report configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Number of top-frequency words in the final report
    #[serde(rename = "top-words", default = "default_top_words")]
    pub top_words: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_words: default_top_words(),
        }
    }
}

fn default_top_words() -> usize {
    crate::stats::TOP_WORDS
}
