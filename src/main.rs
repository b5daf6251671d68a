//! Site-Digest main entry point
//!
//! This is the command-line interface for crawling a site's seed page and its
//! subpage batches. Results are printed to stdout as JSON; logs go to stderr.

use anyhow::Context;
use clap::{Parser, Subcommand};
use site_digest::config::{load_config_with_hash, Config};
use site_digest::storage::open_session_store;
use site_digest::{ContinueCrawlRequest, Crawler, StartCrawlRequest};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Site-Digest: read a site's pages into structured text
///
/// `start` fetches a seed page and, with `--depth 1`, the first batch of its
/// same-domain subpages. `continue` fetches further batches of the subpage
/// list saved by the last `start` for that domain.
#[derive(Parser, Debug)]
#[command(name = "site-digest")]
#[command(version = "1.0.0")]
#[command(about = "Crawl a site's seed page and subpages in batches", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a seed page and optionally one batch of its subpages
    Start {
        /// Seed URL; `https://` is assumed when no scheme is given
        url: String,

        /// 0 for the seed page only, 1 to include subpages
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        depth: i64,

        /// Zero-based batch of 20 subpages
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        page: i64,
    },

    /// Fetch another batch from the subpage list saved for a domain
    Continue {
        /// Any URL on the previously crawled domain
        url: String,

        /// Zero-based batch of 20 subpages
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(cli.config.as_deref())?;

    let store = open_session_store(Path::new(&config.storage.database_path))
        .with_context(|| format!("opening {}", config.storage.database_path))?;
    let crawler = Crawler::new(&config, Arc::new(store))?;

    let output = match cli.command {
        Command::Start { url, depth, page } => {
            let request = StartCrawlRequest::new(url).with_depth(depth).with_page(page);
            let result = crawler.start_crawl(&request).await?;
            serde_json::to_string_pretty(&result)?
        }
        Command::Continue { url, page } => {
            let request = ContinueCrawlRequest::new(url).with_page(page);
            let batch = crawler.continue_crawl(&request).await?;
            serde_json::to_string_pretty(&batch)?
        }
    };

    println!("{}", output);
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_digest=info,warn"),
            1 => EnvFilter::new("site_digest=debug,info"),
            2 => EnvFilter::new("site_digest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if one was given
fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path,
        None => {
            tracing::debug!("No configuration file given, using defaults");
            return Ok(Config::default());
        }
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("loading configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}
