//! Meta-Harvest main entry point
//!
//! This is the command-line interface for the Meta-Harvest metadata crawler.

use anyhow::Context;
use clap::Parser;
use meta_harvest::config::{load_config_with_hash, CrawlConfig};
use meta_harvest::crawler::crawl;
use meta_harvest::output::{JsonOutput, OutputHandler, RunSummary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Meta-Harvest: a bounded metadata crawler
///
/// Crawls from a set of start URLs within a fixed request budget, extracts
/// title, description, heading and article text from content pages and
/// writes them as a JSON array.
#[derive(Parser, Debug)]
#[command(name = "meta-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A bounded metadata crawler", long_about = None)]
struct Cli {
    /// Path to the JSON (or .toml) input configuration
    #[arg(
        short,
        long,
        env = "SCRAPER_INPUT",
        default_value = "data/inputs.sample.json"
    )]
    input: PathBuf,

    /// Override the configured output file
    #[arg(short, long, env = "SCRAPER_OUTPUT")]
    out: Option<PathBuf>,

    /// Override the configured maximum number of requests
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max: Option<u32>,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    tracing::info!("Loading configuration from: {}", cli.input.display());
    let (config, config_hash) = load_config_with_hash(&cli.input)
        .with_context(|| format!("Failed to load configuration from {}", cli.input.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let config = config.with_overrides(cli.out, cli.max);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG`, when set, takes precedence. Logs go to stderr so stdout only
/// carries the run summary.
fn setup_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("meta_harvest=warn,warn"),
        1 => EnvFilter::new("meta_harvest=info,warn"),
        _ => EnvFilter::new("meta_harvest=debug,warn"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the validated config and exits
fn handle_dry_run(config: &CrawlConfig) {
    println!("=== Meta-Harvest Dry Run ===\n");

    println!("Crawl limits:");
    println!("  Max requests: {}", config.max_requests_per_crawl);
    println!("  Delay: {:.2}s", config.delay.as_secs_f64());
    println!("  Timeout: {:.2}s", config.timeout.as_secs_f64());
    if let Some(user_agent) = &config.user_agent {
        println!("  User agent: {}", user_agent);
    }

    println!("\nOutput: {}", config.output_file.display());

    print_list("Start URLs", &config.start_urls);
    print_list("Scrape patterns", &config.scrape_url_globs);
    print_list("Pagination patterns", &config.pagination_url_globs);
    print_list("Ignore patterns", &config.ignore_url_globs);

    println!("\n✓ Configuration is valid");
}

fn print_list(heading: &str, items: &[String]) {
    println!("\n{} ({}):", heading, items.len());
    for item in items {
        println!("  - {}", item);
    }
}

/// Handles the main crawl operation
async fn handle_crawl(config: CrawlConfig) -> anyhow::Result<()> {
    let output = JsonOutput::new(config.output_file.clone());

    let outcome = crawl(config).await.context("Failed to start crawl")?;
    tracing::info!(
        "Crawl completed ({}), {} records",
        outcome.stop_reason,
        outcome.records.len()
    );

    output.write_records(&outcome.records).with_context(|| {
        format!(
            "Failed to write results to {}",
            output.destination().display()
        )
    })?;

    let summary = RunSummary::new(outcome.records.len(), output.destination());
    println!("{}", summary.to_json()?);

    Ok(())
}
