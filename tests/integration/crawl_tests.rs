//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use meta_harvest::config::{load_config, CrawlConfig};
use meta_harvest::crawler::{crawl, Coordinator, StopReason};
use meta_harvest::output::{JsonOutput, OutputHandler};
use meta_harvest::state::PageState;
use meta_harvest::PageRecord;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration seeded with the given paths on `base_url`
fn create_test_config(base_url: &str, seeds: &[&str]) -> CrawlConfig {
    let mut config = CrawlConfig::new(seeds.iter().map(|p| format!("{}{}", base_url, p)));
    config.timeout = Duration::from_secs(5);
    config.max_requests_per_crawl = 20;
    config
}

async fn mount_html(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

fn article_page(title: &str) -> String {
    format!(
        r#"<html><head><title>{0}</title>
        <meta name="description" content="About {0}"></head>
        <body><h1>{0}</h1><article><p>The story of {0}.</p></article></body></html>"#,
        title
    )
}

#[tokio::test]
async fn test_full_crawl_detail_and_pagination() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<html><body>
            <a href="/articles/1">First</a>
            <a href="/page/2">Older</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_html(
        &mock_server,
        "/page/2",
        r#"<html><body><a href="/articles/2">Second</a></body></html>"#.to_string(),
    )
    .await;
    mount_html(&mock_server, "/articles/1", article_page("First")).await;
    mount_html(&mock_server, "/articles/2", article_page("Second")).await;

    let mut config = create_test_config(&base_url, &["/"]);
    config.scrape_url_globs = vec![format!("{}/articles/*", base_url)];
    config.pagination_url_globs = vec![format!("{}/page/*", base_url)];

    let outcome = crawl(config).await.expect("Crawl failed");

    assert_eq!(outcome.stop_reason, StopReason::FrontierEmpty);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].url, format!("{}/articles/1", base_url));
    assert_eq!(outcome.records[0].title.as_deref(), Some("First"));
    assert_eq!(outcome.records[0].description.as_deref(), Some("About First"));
    assert_eq!(outcome.records[1].url, format!("{}/articles/2", base_url));
    assert_eq!(outcome.records[1].heading.as_deref(), Some("Second"));
    assert_eq!(outcome.stats.fetch_attempts, 4);
}

#[tokio::test]
async fn test_not_found_consumes_budget() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/ok", article_page("Fine")).await;

    let config = create_test_config(&base_url, &["/missing", "/ok"]);
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    coordinator.run().await;

    assert_eq!(coordinator.budget().used(), 2);
    assert_eq!(coordinator.stats().count(PageState::Unusable), 1);
    assert_eq!(coordinator.results().len(), 1);
    assert_eq!(coordinator.results()[0].title.as_deref(), Some("Fine"));
}

#[tokio::test]
async fn test_redirect_target_is_canonical_and_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<a href="/old">Old</a> <a href="/new">New</a>"#.to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", base_url).as_str()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_page("Moved")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url, &["/"]);
    config.scrape_url_globs = vec![format!("{}/new", base_url)];

    let outcome = crawl(config).await.expect("Crawl failed");

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].url, format!("{}/new", base_url));
    assert_eq!(outcome.records[0].title.as_deref(), Some("Moved"));
}

#[tokio::test]
async fn test_ignored_urls_never_requested() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<a href="/private/secret">Secret</a> <a href="/public">Public</a>"#.to_string(),
    )
    .await;
    mount_html(&mock_server, "/public", article_page("Public")).await;
    Mock::given(method("GET"))
        .and(path("/private/secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_page("Secret")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url, &["/", "/private/secret"]);
    config.ignore_url_globs = vec!["*/private/*".to_string()];

    let outcome = crawl(config).await.expect("Crawl failed");

    assert_eq!(outcome.stats.count(PageState::Ignored), 1);
    assert!(outcome
        .records
        .iter()
        .all(|r| !r.url.contains("/private/")));
}

#[tokio::test]
async fn test_fragment_links_collapse() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r##"<a href="/a">A</a> <a href="/a#comments">A comments</a> <a href="#top">Top</a>"##
            .to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_page("A")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = crawl(create_test_config(&base_url, &["/"]))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.stats.fetch_attempts, 2);
}

#[tokio::test]
async fn test_timeout_is_fetch_failure() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(article_page("Slow"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, "/fast", article_page("Fast")).await;

    let mut config = create_test_config(&base_url, &["/slow", "/fast"]);
    config.timeout = Duration::from_millis(300);

    let outcome = crawl(config).await.expect("Crawl failed");

    assert_eq!(outcome.stats.count(PageState::FetchFailed), 1);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].title.as_deref(), Some("Fast"));
}

#[tokio::test]
async fn test_budget_stops_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let links: String = (1..=8)
        .map(|i| format!(r#"<a href="/p{}">{}</a>"#, i, i))
        .collect();
    mount_html(&mock_server, "/", links).await;
    for i in 1..=8 {
        mount_html(&mock_server, &format!("/p{}", i), article_page("Page")).await;
    }

    let mut config = create_test_config(&base_url, &["/"]);
    config.max_requests_per_crawl = 4;

    let outcome = crawl(config).await.expect("Crawl failed");

    assert_eq!(outcome.stop_reason, StopReason::BudgetExhausted);
    assert_eq!(outcome.stats.fetch_attempts, 4);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_config_file_to_output_file() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_html(&mock_server, "/story", article_page("Story")).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("out/records.json");
    let config_path = dir.path().join("input.json");
    let document = serde_json::json!({
        "startUrls": [{ "url": format!("{}/story", base_url) }],
        "maxRequestsPerCrawl": 5,
        "outputFile": output_path,
    });
    std::fs::write(&config_path, document.to_string()).expect("Failed to write config");

    let config = load_config(&config_path).expect("Failed to load config");
    let outcome = crawl(config.clone()).await.expect("Crawl failed");

    let output = JsonOutput::new(config.output_file.clone());
    output
        .write_records(&outcome.records)
        .expect("Failed to write output");

    let written: Vec<PageRecord> =
        serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].url, format!("{}/story", base_url));
    assert_eq!(written[0].article.as_deref().map(|a| a.contains("Story")), Some(true));
}
