//! refcrawl main entry point
//!
//! This is the command-line interface for the refcrawl reference crawler.

use clap::Parser;
use refcrawl::config::{load_config_with_hash, validate, Config};
use refcrawl::crawler::run_crawl;
use refcrawl::output::{print_statistics, write_outcome, JsonFileOutput, OutputStyle};
use refcrawl::CrawlError;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// refcrawl: a breadth-first reference crawler
///
/// refcrawl fetches pages starting from a seed set, follows links breadth-first
/// until its site budget is spent or its deadline passes, and writes page
/// metadata plus a reverse link graph as JSON.
#[derive(Parser, Debug)]
#[command(name = "refcrawl")]
#[command(version)]
#[command(about = "A breadth-first reference crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_configuration(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_crawl(&config, cli.quiet).await?;
    }

    Ok(())
}

/// Loads and validates the configuration, falling back to built-in defaults
fn load_configuration(path: Option<&Path>) -> Result<Config, CrawlError> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using built-in defaults");
        let config = Config::default();
        validate(&config)?;
        return Ok(config);
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("refcrawl=info,warn"),
            1 => EnvFilter::new("refcrawl=debug,info"),
            2 => EnvFilter::new("refcrawl=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== refcrawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max sites: {}", config.crawler.max_sites);
    println!("  Max duration: {}s", config.crawler.max_duration_secs);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Progress interval: {}", config.crawler.progress_interval);

    println!("\nUser Agent: {}", config.user_agent.header_value());
    println!("\nOutput: {}", config.output.result_path);

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation and writes its snapshot
async fn handle_crawl(config: &Config, quiet: bool) -> Result<(), CrawlError> {
    tracing::info!("Total seed URLs: {}", config.seeds.len());

    let outcome = run_crawl(config).await?;

    let output = JsonFileOutput::new(&config.output.result_path);
    match write_outcome(&outcome, &output)? {
        Some(OutputStyle::Compact) => {
            tracing::info!("Output written to {}", output.path().display())
        }
        Some(OutputStyle::Pretty) => {
            tracing::info!("Cut short. Output written to {}", output.path().display())
        }
        None => tracing::warn!("Crawl produced no snapshot"),
    }

    if let (Some(report), false) = (outcome.report(), quiet) {
        println!();
        print_statistics(&report.statistics);
    }

    if outcome.is_cut_short() {
        // Abandoned fetches may be parked in blocking DNS lookups that runtime shutdown waits on
        tracing::debug!("Exiting with abandoned in-flight fetches");
        std::process::exit(0);
    }

    Ok(())
}
