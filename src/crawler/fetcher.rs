//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client from the scraper options
//! - Single-attempt page fetches with status checking
//! - Bounded retry for route content
//! - Removal of excluded classes and tags before the body is serialized

use crate::config::{ExcludeOptions, ScraperOptions};
use crate::ScribeError;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use scraper::{Html, Selector};

/// Builds an HTTP client with proper configuration
///
/// The user agent and timeout are also set on every request, so a client
/// built elsewhere behaves the same way when passed to [`fetch_page_content`].
///
/// # Example
///
/// ```no_run
/// use site_scribe::config::ScraperOptions;
/// use site_scribe::crawler::build_http_client;
///
/// let client = build_http_client(&ScraperOptions::default()).unwrap();
/// ```
pub fn build_http_client(options: &ScraperOptions) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(options.user_agent().to_string())
        .timeout(options.timeout_duration())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs one GET request and returns the response body
///
/// A non-success status is an error, as is any network failure or timeout.
pub async fn fetch_html(
    client: &Client,
    url: &str,
    options: &ScraperOptions,
) -> Result<String, ScribeError> {
    let response = client
        .get(url)
        .header(USER_AGENT, options.user_agent())
        .timeout(options.timeout_duration())
        .send()
        .await
        .map_err(|source| ScribeError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScribeError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| ScribeError::Http {
        url: url.to_string(),
        source,
    })
}

/// Fetches a page's body markup with excluded elements removed
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | Success (2xx) | Return the stripped body markup |
/// | Network error, timeout, non-2xx | Log with attempt number, try again |
/// | Last attempt failed | Log and return an empty string |
///
/// There is no pause between attempts.
pub async fn fetch_page_content(
    client: &Client,
    url: &str,
    options: &ScraperOptions,
    exclude: &ExcludeOptions,
) -> String {
    let attempts = options.attempts();

    for attempt in 1..=attempts {
        match fetch_html(client, url, options).await {
            Ok(html) => {
                tracing::debug!("Fetched {} on attempt {}", url, attempt);
                return strip_excluded(&html, exclude);
            }
            Err(e) => {
                tracing::error!(
                    "Error scraping content from {}, attempt {} of {}: {}",
                    url,
                    attempt,
                    attempts,
                    e
                );
            }
        }
    }

    tracing::error!("Failed to scrape {} after {} attempts.", url, attempts);
    String::new()
}

/// Removes excluded elements (and their descendants) and returns the inner
/// markup of `<body>`
///
/// A class entry containing spaces matches elements carrying all of the
/// listed classes. Entries that do not form a valid selector are skipped.
pub fn strip_excluded(html: &str, exclude: &ExcludeOptions) -> String {
    let mut document = Html::parse_document(html);

    let mut doomed = Vec::new();
    for selector in exclusion_selectors(exclude) {
        doomed.extend(document.root_element().select(&selector).map(|el| el.id()));
    }
    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    let Ok(body_selector) = Selector::parse("body") else {
        return String::new();
    };
    document
        .root_element()
        .select(&body_selector)
        .next()
        .map(|body| body.inner_html())
        .unwrap_or_default()
}

fn exclusion_selectors(exclude: &ExcludeOptions) -> Vec<Selector> {
    let classes = exclude.exclude_classes.iter().map(|class_name| {
        format!(
            ".{}",
            class_name.split_whitespace().collect::<Vec<_>>().join(".")
        )
    });
    let tags = exclude.exclude_tags.iter().cloned();

    classes
        .chain(tags)
        .filter_map(|css| match Selector::parse(&css) {
            Ok(selector) => Some(selector),
            Err(e) => {
                tracing::warn!("Ignoring invalid exclusion selector {:?}: {:?}", css, e);
                None
            }
        })
        .collect()
}
