//! Product-Harvest main entry point
//!
//! This is the command-line interface for the Product-Harvest product page
//! harvester.

use anyhow::Context;
use clap::Parser;
use product_harvest::config::{load_config_with_hash, validate, Config};
use product_harvest::output::print_summary;
use product_harvest::robots::PermissionGate;
use product_harvest::url::parse_canonical;
use product_harvest::Harvester;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Product-Harvest: a polite product page harvester
///
/// Product-Harvest crawls a shop breadth-first from a root URL while
/// respecting robots.txt and a fixed request delay, classifies product pages
/// by path, and writes one flat JSON record per product page.
#[derive(Parser, Debug)]
#[command(name = "product-harvest")]
#[command(version)]
#[command(about = "A polite product page harvester", long_about = None)]
struct Cli {
    /// Root URL of the shop to crawl
    #[arg(value_name = "ROOT_URL")]
    root_url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of pages to visit while crawling
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Maximum number of product records to collect
    #[arg(long, value_name = "N")]
    max_products: Option<usize>,

    /// Path of the JSON output file
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without making any request
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(max_pages) = self.max_pages {
            config.crawler.max_pages = max_pages;
        }
        if let Some(max_products) = self.max_products {
            config.output.max_products = max_products;
        }
        if let Some(output) = &self.output {
            config.output.path = output.display().to_string();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        return handle_dry_run(&cli.root_url, &config);
    }

    handle_harvest(&cli.root_url, config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("product_harvest=info,warn"),
            1 => EnvFilter::new("product_harvest=debug,info"),
            2 => EnvFilter::new("product_harvest=trace,debug"),
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

/// Handles the --dry-run mode: validates input and shows the effective settings
fn handle_dry_run(root_url: &str, config: &Config) -> anyhow::Result<()> {
    let root = parse_canonical(root_url).context("Invalid root URL")?;

    println!("=== Product-Harvest Dry Run ===\n");

    println!("Root:");
    println!("  URL: {}", root);
    if let Some(robots) = PermissionGate::robots_url(&root) {
        println!("  robots.txt: {}", robots);
    }

    println!("\nCrawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Honor Crawl-delay: {}", config.crawler.honor_crawl_delay);
    println!("  Product patterns:");
    for pattern in &config.crawler.product_patterns {
        println!("    - {}", pattern);
    }

    println!("\nUser Agent:");
    println!("  Header: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Path: {}", config.output.path);
    println!("  Max products: {}", config.output.max_products);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(root_url: &str, config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Harvesting up to {} products from {} (page budget {})",
        config.output.max_products,
        root_url,
        config.crawler.max_pages
    );

    let mut harvester = Harvester::new(config).context("Failed to set up harvester")?;

    match harvester.run(root_url).await {
        Ok(summary) => {
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
