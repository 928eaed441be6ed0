//! ics-scout main entry point
//!
//! Command-line interface for the focused academic crawler: load and
//! validate the configuration, run the crawl, print the report.

use clap::Parser;
use ics_scout::config::load_config_with_hash;
use ics_scout::crawler::run_crawl;
use ics_scout::stats::{build_report, print_report, CrawlStats};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// ics-scout: focused crawler for UCI academic subdomains
///
/// Crawls a fixed set of academic subdomains, avoiding auth walls, calendar
/// generators, and other crawl traps, and reports corpus statistics: word
/// frequencies, unique page count, the longest page, and per-subdomain page
/// counts.
#[derive(Parser, Debug)]
#[command(name = "ics-scout")]
#[command(version = "1.0.0")]
#[command(about = "A focused academic web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
        return Ok(());
    }

    tracing::info!(
        "Starting crawl: {} seeds, {} workers",
        config.seeds.len(),
        config.crawler.worker_count
    );

    let stats = Arc::new(CrawlStats::new());
    run_crawl(&config, Arc::clone(&stats)).await?;

    let report = build_report(&stats, config.report.top_words);
    println!();
    print_report(&report);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ics_scout=info,warn"),
            1 => EnvFilter::new("ics_scout=debug,info"),
            2 => EnvFilter::new("ics_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &ics_scout::config::Config, config_hash: &str) {
    println!("=== ics-scout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Workers: {}", config.crawler.worker_count);
    println!(
        "  Politeness delay: {}ms",
        config.crawler.politeness_delay_ms
    );
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  User agent: {}", config.crawler.user_agent);
    println!("  Config hash: {}", config_hash);

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\nReport: top {} words", config.report.top_words);

    println!("\n✓ Configuration is valid");
}
