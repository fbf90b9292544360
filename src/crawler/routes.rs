//! Route collection from the seed page
//!
//! Only the seed page is inspected. A route is the `href` of an anchor that
//! starts with a single `/`; anything containing `#` is dropped entirely.

use crate::config::ScraperOptions;
use crate::crawler::fetcher::fetch_html;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Fetches `base_url` once and returns its distinct root-relative routes
///
/// Any failure (network error, non-success status, timeout) is logged and
/// yields an empty list. There is no retry at this stage.
pub async fn collect_routes(
    client: &Client,
    base_url: &str,
    options: &ScraperOptions,
) -> Vec<String> {
    match fetch_html(client, base_url, options).await {
        Ok(html) => {
            let routes = extract_routes(&html);
            tracing::debug!("Found {} routes on {}", routes.len(), base_url);
            routes
        }
        Err(e) => {
            tracing::error!("Error fetching routes from {}: {}", base_url, e);
            Vec::new()
        }
    }
}

/// Extracts root-relative anchor targets in first-occurrence order
///
/// # Example
///
/// ```
/// use site_scribe::crawler::extract_routes;
///
/// let html = r##"<a href="/a">A</a><a href="/a">A</a><a href="/b#x">B</a><a href="/c">C</a>"##;
/// assert_eq!(extract_routes(html), vec!["/a", "/c"]);
/// ```
pub fn extract_routes(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse(r#"a[href^="/"]"#) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut routes = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !is_route(href) {
            continue;
        }
        if seen.insert(href.to_string()) {
            routes.push(href.to_string());
        }
    }

    routes
}

/// Root-relative and fragment-free; protocol-relative `//host` links are not routes
fn is_route(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//") && !href.contains('#')
}
