//! Quest-Scribe main entry point
//!
//! This is the command-line interface for the Quest-Scribe world-quest harvester.

use anyhow::Context;
use clap::Parser;
use quest_scribe::config::{load_config, Config};
use quest_scribe::crawler::Harvester;
use quest_scribe::output::{print_report, write_csv};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Quest-Scribe: a polite world-quest harvester
///
/// Quest-Scribe reads region listings from an index page, visits every quest
/// detail page with randomized pacing, and exports the step counts and
/// rewards it finds as CSV.
#[derive(Parser, Debug)]
#[command(name = "quest-scribe")]
#[command(version = "1.0.0")]
#[command(about = "A polite world-quest harvester", long_about = None)]
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

    /// Validate config and show what would be harvested without fetching
    #[arg(long)]
    dry_run: bool,

    /// Write the CSV here instead of the configured path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quest_scribe=info,warn"),
            1 => EnvFilter::new("quest_scribe=debug,info"),
            2 => EnvFilter::new("quest_scribe=trace,debug"),
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

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== Quest-Scribe Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Index page: {}", config.crawler.index_url);
    println!("  Base delay: {}ms", config.crawler.base_delay_ms);
    println!("  Max jitter: {}ms", config.crawler.max_jitter_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    if config.crawler.allowed_domains.is_empty() {
        println!("  Allowed domains: any");
    } else {
        println!(
            "  Allowed domains: {}",
            config.crawler.allowed_domains.join(", ")
        );
    }

    println!("\nBrowser:");
    println!("  User-Agent: {}", config.browser.user_agent);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  Unknown steps marker: {}", config.output.unknown_steps_marker);

    println!("\nRegions ({}):", config.regions.len());
    for region in &config.regions {
        println!(
            "  - {} (reputation: #{}, non-reputation: #{})",
            region.name, region.reputation_anchor, region.non_reputation_anchor
        );
    }

    println!("\n✓ Configuration is valid");
}

/// Runs the harvest, writes the CSV and prints the summary
async fn handle_harvest(config: Config, quiet: bool) -> anyhow::Result<()> {
    let harvester = Harvester::new(config).context("Failed to build HTTP client")?;
    let report = harvester.run().await.context("Harvest failed")?;

    let output = &harvester.config().output;
    write_csv(output, &report.details)
        .with_context(|| format!("Failed to write {}", output.csv_path))?;

    if !quiet {
        print_report(&report);
        println!("Wrote {} quests to {}", report.fetched(), output.csv_path);
    }

    Ok(())
}
