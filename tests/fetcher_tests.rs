//! Integration tests for route collection and content fetching
//!
//! These tests use wiremock to stand in for the crawled site.

use site_scribe::config::{ExcludeOptions, ScraperOptions};
use site_scribe::crawler::{build_http_client, collect_routes, fetch_page_content};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options(max_retries: u32, timeout: u64) -> ScraperOptions {
    ScraperOptions {
        user_agent: "TestBot/1.0".to_string(),
        timeout,
        max_retries,
        request_delay: 0,
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><head><title>T</title></head><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

#[tokio::test]
async fn test_collect_routes_dedupes_and_drops_fragments() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r##"<a href="/a">A</a><a href="/a">A again</a><a href="/b#x">B</a><a href="/c">C</a>"##,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let opts = options(3, 2000);
    let client = build_http_client(&opts).unwrap();
    let routes = collect_routes(&client, &format!("{}/", mock_server.uri()), &opts).await;

    assert_eq!(routes, vec!["/a", "/c"]);
}

#[tokio::test]
async fn test_collect_routes_returns_empty_on_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        // No retry when collecting routes
        .expect(1)
        .mount(&mock_server)
        .await;

    let opts = options(3, 2000);
    let client = build_http_client(&opts).unwrap();
    let routes = collect_routes(&client, &mock_server.uri(), &opts).await;

    assert!(routes.is_empty());
}

#[tokio::test]
async fn test_fetch_succeeds_after_two_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(html_page("<p>Finally</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let opts = options(3, 2000);
    let client = build_http_client(&opts).unwrap();
    let content = fetch_page_content(
        &client,
        &format!("{}/flaky", mock_server.uri()),
        &opts,
        &ExcludeOptions::default(),
    )
    .await;

    assert_eq!(content, "<p>Finally</p>");
}

#[tokio::test]
async fn test_fetch_gives_up_after_max_retries() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let opts = options(3, 2000);
    let client = build_http_client(&opts).unwrap();
    let content = fetch_page_content(
        &client,
        &format!("{}/down", mock_server.uri()),
        &opts,
        &ExcludeOptions::default(),
    )
    .await;

    assert_eq!(content, "");
}

#[tokio::test]
async fn test_zero_max_retries_falls_back_to_three_attempts() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let opts = options(0, 2000);
    let client = build_http_client(&opts).unwrap();
    let content = fetch_page_content(
        &client,
        &format!("{}/down", mock_server.uri()),
        &opts,
        &ExcludeOptions::default(),
    )
    .await;

    assert_eq!(content, "");
}

#[tokio::test]
async fn test_fetch_attempt_times_out() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_page("<p>Late</p>").set_delay(Duration::from_millis(1500)))
        .expect(2)
        .mount(&mock_server)
        .await;

    let opts = options(2, 100);
    let client = build_http_client(&opts).unwrap();
    let content = fetch_page_content(
        &client,
        &format!("{}/slow", mock_server.uri()),
        &opts,
        &ExcludeOptions::default(),
    )
    .await;

    assert_eq!(content, "");
}

#[tokio::test]
async fn test_fetch_sends_configured_user_agent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(html_page("<p>Matched</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let opts = options(1, 2000);
    let client = build_http_client(&opts).unwrap();
    let content = fetch_page_content(
        &client,
        &format!("{}/ua", mock_server.uri()),
        &opts,
        &ExcludeOptions::default(),
    )
    .await;

    assert_eq!(content, "<p>Matched</p>");
}

#[tokio::test]
async fn test_blank_user_agent_sends_default() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", "Mozilla/5.0"))
        .respond_with(html_page("<p>Default</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let opts = ScraperOptions {
        user_agent: String::new(),
        ..options(1, 2000)
    };
    let client = build_http_client(&opts).unwrap();
    let content = fetch_page_content(
        &client,
        &format!("{}/ua", mock_server.uri()),
        &opts,
        &ExcludeOptions::default(),
    )
    .await;

    assert_eq!(content, "<p>Default</p>");
}

#[tokio::test]
async fn test_fetch_applies_exclusions() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(html_page(
            r#"<header><h1>Site</h1></header><div class="ad"><p>Buy</p></div><p>Article</p><footer>(c)</footer>"#,
        ))
        .mount(&mock_server)
        .await;

    let opts = options(1, 2000);
    let exclude = ExcludeOptions {
        exclude_classes: vec!["ad".to_string()],
        exclude_tags: vec!["header".to_string(), "footer".to_string()],
    };
    let client = build_http_client(&opts).unwrap();
    let content = fetch_page_content(
        &client,
        &format!("{}/page", mock_server.uri()),
        &opts,
        &exclude,
    )
    .await;

    assert_eq!(content, "<p>Article</p>");
}
