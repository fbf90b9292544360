//! Crawler module for route discovery and page fetching
//!
//! This module contains the crawling logic, including:
//! - Route collection from the seed page
//! - HTTP fetching with retry logic and markup exclusion
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod routes;

pub use coordinator::{run_crawl, Coordinator, CrawlReport};
pub use fetcher::{build_http_client, fetch_html, fetch_page_content, strip_excluded};
pub use routes::{collect_routes, extract_routes};

use crate::config::Config;
use crate::ScribeError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Clear and recreate the output directory
/// 2. Collect routes from the seed page
/// 3. Fetch, sanitize, and write every non-excluded route
/// 4. Write the route manifest
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `base_url` - The seed page URL
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl finished (possibly with per-route failures)
/// * `Err(ScribeError)` - The crawl could not be started
pub async fn crawl(config: Config, base_url: &str) -> Result<CrawlReport, ScribeError> {
    run_crawl(config, base_url).await
}
