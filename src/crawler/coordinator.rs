//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl sequence:
//! - Clearing and recreating the output directory
//! - Collecting routes from the seed page
//! - Fetching, sanitizing, and writing each route in order
//! - Writing the route manifest

use crate::config::Config;
use crate::content::clean_content;
use crate::crawler::fetcher::{build_http_client, fetch_page_content};
use crate::crawler::routes::collect_routes;
use crate::output::{page_url, prepare_output_directory, save_content, write_manifest};
use crate::state::CrawlState;
use crate::ScribeError;
use reqwest::Client;
use std::path::PathBuf;
use url::Url;

/// Outcome of a finished crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// Terminal state the crawl ended in
    pub state: CrawlState,

    /// Routes found on the seed page
    pub routes_found: usize,

    /// Routes that went through fetch and write, in order (the manifest)
    pub processed: Vec<String>,

    /// Routes skipped by an exclusion pattern
    pub skipped: Vec<String>,

    /// Processed routes whose fetch produced no content
    pub empty_pages: usize,

    /// Processed routes where at least one output file could not be written
    pub write_failures: usize,

    /// Location of the manifest, if it was written
    pub manifest_path: Option<PathBuf>,
}

impl CrawlReport {
    fn new() -> Self {
        Self {
            state: CrawlState::Init,
            routes_found: 0,
            processed: Vec::new(),
            skipped: Vec::new(),
            empty_pages: 0,
            write_failures: 0,
            manifest_path: None,
        }
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    base_url: String,
    state: CrawlState,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `base_url` - The seed page; routes are appended to it
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScribeError)` - The base URL is not an http(s) URL, or the
    ///   HTTP client could not be built
    pub fn new(config: Config, base_url: &str) -> Result<Self, ScribeError> {
        let parsed = Url::parse(base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScribeError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = build_http_client(&config.scraper_options)?;

        Ok(Self {
            config,
            client,
            base_url: base_url.to_string(),
            state: CrawlState::Init,
        })
    }

    /// Current phase of the crawl
    pub fn state(&self) -> CrawlState {
        self.state
    }

    fn transition(&mut self, next: CrawlState) -> Result<(), ScribeError> {
        if !self.state.can_transition_to(next) {
            return Err(ScribeError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!("Crawl state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Runs the crawl to completion
    ///
    /// Per-route failures never abort the crawl; they are logged and counted
    /// in the returned report. A coordinator runs once: calling this again
    /// fails with an invalid transition.
    pub async fn run(&mut self) -> Result<CrawlReport, ScribeError> {
        let mut report = CrawlReport::new();
        let output = self.config.output_options.clone();
        let text_root = output.text_dir();
        let docx_root = output.docx_dir();

        self.transition(CrawlState::CollectingRoutes)?;

        match prepare_output_directory(&output).await {
            Ok(()) => tracing::info!(
                "Output directory {} cleared and recreated.",
                output.output_directory.display()
            ),
            Err(e) => tracing::error!("Error clearing or creating the output directory: {}", e),
        }

        let routes =
            collect_routes(&self.client, &self.base_url, &self.config.scraper_options).await;
        report.routes_found = routes.len();

        if routes.is_empty() {
            tracing::warn!("No routes found to scrape.");
            self.transition(CrawlState::NoRoutesFound)?;
            report.state = self.state;
            return Ok(report);
        }

        tracing::info!("Found {} routes on {}", routes.len(), self.base_url);
        self.transition(CrawlState::ProcessingRoutes)?;

        for route in routes {
            let full_url = page_url(&self.base_url, &route);

            if self.config.is_route_excluded(&route) {
                tracing::info!("Skipping excluded route: {}", full_url);
                report.skipped.push(route);
                continue;
            }

            tracing::info!("Scraping: {}", full_url);

            if let Some(delay) = self.config.scraper_options.request_delay_duration() {
                tokio::time::sleep(delay).await;
            }

            let content = fetch_page_content(
                &self.client,
                &full_url,
                &self.config.scraper_options,
                &self.config.exclude_options,
            )
            .await;
            if content.is_empty() {
                report.empty_pages += 1;
            }

            let cleaned = clean_content(&content);
            let saved =
                save_content(&route, &cleaned, &text_root, &docx_root, &self.base_url).await;
            if !saved.is_complete() {
                report.write_failures += 1;
            }

            report.processed.push(route);
        }

        self.transition(CrawlState::WritingManifest)?;
        match write_manifest(&report.processed, &text_root).await {
            Ok(path) => {
                tracing::info!("Saved list of routes to: {}", path.display());
                report.manifest_path = Some(path);
            }
            Err(e) => tracing::error!("Error saving route list: {}", e),
        }

        self.transition(CrawlState::Done)?;
        report.state = self.state;

        tracing::info!(
            "Scraping complete: {} processed, {} skipped, {} empty, {} write failures",
            report.processed.len(),
            report.skipped.len(),
            report.empty_pages,
            report.write_failures
        );

        Ok(report)
    }
}

/// Creates a coordinator and runs a single crawl
pub async fn run_crawl(config: Config, base_url: &str) -> Result<CrawlReport, ScribeError> {
    let mut coordinator = Coordinator::new(config, base_url)?;
    coordinator.run().await
}
