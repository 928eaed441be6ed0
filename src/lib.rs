//! ics-scout: page analysis and link discovery for a focused academic crawler
//!
//! This crate implements the analysis core of a web crawler restricted to a
//! small set of UCI academic subdomains. It decides which discovered links are
//! worth following, extracts and normalizes them, and accumulates corpus-level
//! statistics (word frequencies, longest page, unique and per-subdomain page
//! counts) across many concurrent fetch workers.

pub mod analysis;
pub mod config;
pub mod crawler;
pub mod policy;
pub mod stats;
pub mod url;

use thiserror::Error;

/// Main error type for ics-scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL: {0}")]
    InvalidSeed(String),
}

/// URL-specific errors
///
/// `Parse` covers URL values that are structurally incomplete (no scheme, no
/// host); these are rejected by the validity policy, not raised. `Malformed`
/// covers values the parser cannot make sense of at all; those indicate an
/// upstream contract violation and propagate to the caller.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for ics-scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::analysis::{count_words, extract_links, scrape, PageResponse};
pub use crate::config::Config;
pub use crate::policy::{evaluate, is_valid, RejectReason};
pub use crate::stats::CrawlStats;
pub use crate::url::{dedup_key, extract_host, normalize_url};
