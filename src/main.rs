//! Site-Scribe main entry point
//!
//! This is the command-line interface for the Site-Scribe content archiver.

use anyhow::Context;
use clap::Parser;
use site_scribe::config::{load_config_or_default, DEFAULT_CONFIG_FILE};
use site_scribe::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Scribe: archive one site as text and word-processor documents
///
/// Site-Scribe collects the internal links of a seed page, fetches each
/// linked page, keeps only its structural markup, and writes a `.txt` and a
/// `.docx` copy under a directory tree mirroring the site's paths.
#[derive(Parser, Debug)]
#[command(name = "site-scribe")]
#[command(version = "1.0.0")]
#[command(about = "Archive a website's pages as text and DOCX", long_about = None)]
struct Cli {
    /// Base URL of the site, e.g. https://example.com
    #[arg(value_name = "BASE_URL")]
    base_url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Increase logging verbosity over the configured level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = load_config_or_default(&cli.config);
    let level = loaded
        .as_ref()
        .map(|(config, _)| config.log_level.filter_directive())
        .unwrap_or("warn");
    setup_logging(level, cli.verbose, cli.quiet);

    let (config, hash) = loaded
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    match hash {
        Some(hash) => {
            tracing::info!("Configuration loaded from: {}", cli.config.display());
            tracing::debug!("Configuration hash: {}", hash);
        }
        None => tracing::warn!(
            "Configuration file {} not found, using default settings.",
            cli.config.display()
        ),
    }

    tracing::info!(
        "Output directory: {}, excluded routes: {}",
        config.output_options.output_directory.display(),
        config.exclude_routes.len()
    );

    match crawl(config, &cli.base_url).await {
        Ok(report) => {
            tracing::info!(
                "Crawl finished in state {} ({} of {} routes written)",
                report.state,
                report.processed.len(),
                report.routes_found
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Error while scraping: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber
///
/// `-q` wins over everything; otherwise `-v` raises the configured level.
fn setup_logging(configured: &str, verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new(configured),
            1 => EnvFilter::new("site_scribe=debug,info"),
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
