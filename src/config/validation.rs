use crate::config::types::Config;
use crate::policy::evaluate;
use crate::stats::CrawlStats;
use crate::url::normalize_url;
use crate::ConfigError;

/// Validates a parsed configuration
///
/// Beyond structural checks, every seed URL must be one the crawl policy
/// would accept on an empty crawl, since a seed the policy rejects would silently
/// produce an empty run.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.crawler.worker_count == 0 {
        return Err(ConfigError::Validation(
            "worker-count must be at least 1".to_string(),
        ));
    }

    if config.crawler.max_pages == 0 {
        return Err(ConfigError::Validation(
            "max-pages must be at least 1".to_string(),
        ));
    }

    if config.crawler.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent must not be empty".to_string(),
        ));
    }

    if config.report.top_words == 0 {
        return Err(ConfigError::Validation(
            "report.top-words must be at least 1".to_string(),
        ));
    }

    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    let fresh = CrawlStats::new();
    for seed in &config.seeds {
        let url = normalize_url(seed)
            .map_err(|e| ConfigError::InvalidSeed(format!("{}: {}", seed, e)))?;
        if let Some(reason) = evaluate(&url, &fresh) {
            return Err(ConfigError::InvalidSeed(format!(
                "{}: rejected by crawl policy ({:?})",
                seed, reason
            )));
        }
    }

    Ok(())
}
