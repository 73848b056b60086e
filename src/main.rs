//! Vitrine main entry point
//!
//! This is the command-line interface for the vitrine bestseller harvester.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url::Url;
use vitrine::config::{load_config_with_hash, Config};
use vitrine::discovery;
use vitrine::driver::run_loop;
use vitrine::output::{load_statistics, print_statistics};
use vitrine::scrape::ChromeRenderer;
use vitrine::store::{open_store, SqliteStore, WorkStore};

/// Vitrine: a bestseller shelf harvester
///
/// Vitrine discovers the category pages behind a retail site's bestsellers
/// index, renders each one, and collects the listed products into a local
/// SQLite database. Interrupted runs can simply be restarted: the category
/// set is kept and every category is reprocessed from scratch.
#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(version = "0.1.0")]
#[command(about = "A bestseller shelf harvester", long_about = None)]
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

    /// Refresh the category set from the seed page and exit
    #[arg(long, conflicts_with = "stats")]
    discover: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "discover")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) =
        load_config_with_hash(&cli.config).context("Failed to load configuration")?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.stats {
        handle_stats(&config)?;
    } else if cli.discover {
        handle_discover(&config).await?;
    } else {
        handle_run(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("vitrine=info,warn"),
            1 => EnvFilter::new("vitrine=debug,info"),
            2 => EnvFilter::new("vitrine=trace,debug"),
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

/// Handles the --discover mode: refresh the category set and exit
async fn handle_discover(config: &Config) -> anyhow::Result<()> {
    let mut store = open_store(Path::new(&config.output.database_path))?;

    let installed = refresh_categories(&mut store, config).await?;

    println!(
        "{} categories installed from {}",
        installed, config.scrape.seed_url
    );

    Ok(())
}

/// Handles the --stats mode: show statistics from the database and exit
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let store = open_store(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&store)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the default mode: drain the work queue
///
/// When the store holds no categories yet, discovery runs first. The browser
/// session is acquired once for the whole run and released on every exit
/// path, including a failed run.
async fn handle_run(config: &Config) -> anyhow::Result<()> {
    let mut store = open_store(Path::new(&config.output.database_path))?;

    if store.count_total_items()? == 0 {
        tracing::info!("Work store is empty; discovering categories first");
        let installed = refresh_categories(&mut store, config).await?;
        if installed == 0 {
            anyhow::bail!("Nothing to process: discovery found no categories");
        }
    }

    let renderer = ChromeRenderer::launch(&config.browser, &config.scrape)
        .await
        .context("Failed to launch browser session")?;

    let result = run_loop(&mut store, &renderer, &config.scrape).await;

    if let Err(e) = renderer.close().await {
        tracing::warn!("Failed to close browser session: {}", e);
    }

    let summary = result?;

    println!(
        "{} categories processed, {} failed, {} products extracted",
        summary.processed, summary.failed, summary.records_written
    );

    Ok(())
}

/// Discovers the category set and installs it into the store
///
/// When the page structure has drifted and nothing was discovered, the
/// existing category set is left untouched.
async fn refresh_categories(store: &mut SqliteStore, config: &Config) -> anyhow::Result<usize> {
    let client = discovery::build_http_client().context("Failed to build HTTP client")?;
    let base_url = Url::parse(&config.scrape.base_url)?;

    let categories = discovery::discover(&client, &config.scrape.seed_url, &base_url).await?;

    if categories.is_empty() {
        tracing::warn!("Nothing discovered; keeping the existing category set");
        return Ok(0);
    }

    let installed = store.replace_all(&categories)?;
    tracing::info!("Installed {} categories, all pending", installed);

    Ok(installed)
}
