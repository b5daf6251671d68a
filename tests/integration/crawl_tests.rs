//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! start and continue requests end-to-end.

use site_digest::config::{Config, CrawlerConfig};
use site_digest::storage::{SessionStore, SqliteSessionStore};
use site_digest::{
    ContinueCrawlRequest, Crawler, DigestError, MemorySessionStore, PaginationInfo,
    StartCrawlRequest,
};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration without the politeness delay
fn create_test_config() -> Config {
    Config {
        crawler: CrawlerConfig {
            politeness_delay_ms: 0,
        },
        ..Config::default()
    }
}

fn create_crawler() -> (Crawler, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let crawler =
        Crawler::new(&create_test_config(), store.clone()).expect("Failed to create crawler");
    (crawler, store)
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// A seed page linking to `count` subpages under `/page/N`
fn seed_page_with_links(count: usize) -> String {
    let links: String = (0..count)
        .map(|i| format!(r#"<a href="/page/{}">Page {}</a>"#, i, i))
        .collect();
    format!(
        "<html><head><title>Home</title></head><body>{}</body></html>",
        links
    )
}

/// Mounts `/page/N` for every N in `range`
async fn mount_subpages(server: &MockServer, range: std::ops::Range<usize>) {
    for i in range {
        mount_html(
            server,
            &format!("/page/{}", i),
            format!(
                "<html><head><title>Page {}</title></head><body><p>Content of page number {}.</p><a href=\"/\">Home</a></body></html>",
                i, i
            ),
        )
        .await;
    }
}

#[tokio::test]
async fn test_seed_page_only() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<html><head>
            <title> Home </title>
            <meta name="description" content="The home page">
        </head><body>
            <nav><a href="/nav-only">Nav</a></nav>
            <h1>Welcome</h1>
            <p>This is the introduction paragraph.</p>
            <a href="/about">About us</a>
            <a href="https://elsewhere.org/">Elsewhere</a>
            <img src="/logo.png" alt="Logo">
        </body></html>"#
            .to_string(),
    )
    .await;

    // Depth 0 never requests subpages
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (crawler, store) = create_crawler();
    let result = crawler
        .start_crawl(&StartCrawlRequest::new(format!("{}/", base_url)))
        .await
        .expect("Crawl failed");

    assert_eq!(result.title, "Home");
    assert_eq!(result.meta_description, "The home page");
    assert_eq!(result.headings, vec!["Welcome"]);
    assert_eq!(
        result
            .links
            .iter()
            .map(|l| l.href.as_str())
            .collect::<Vec<_>>(),
        vec![
            format!("{}/nav-only", base_url),
            format!("{}/about", base_url)
        ]
    );
    assert_eq!(result.images[0].src, format!("{}/logo.png", base_url));
    assert!(result.full_text.contains("WELCOME"));
    assert!(result.full_text.contains("This is the introduction paragraph."));
    assert!(!result.full_text.contains("Nav"));
    assert!(result.subpages.is_empty());
    assert_eq!(result.pagination, PaginationInfo::default());
    assert!(store.load("127.0.0.1").is_empty());
}

#[tokio::test]
async fn test_depth_one_fetches_first_batch_and_saves_session() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", seed_page_with_links(3)).await;
    mount_subpages(&mock_server, 0..3).await;

    let (crawler, store) = create_crawler();
    let result = crawler
        .start_crawl(&StartCrawlRequest::new(format!("{}/", base_url)).with_depth(1))
        .await
        .expect("Crawl failed");

    let mut titles: Vec<&str> = result.subpages.iter().map(|p| p.title.as_str()).collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["Page 0", "Page 1", "Page 2"]);
    assert!(result.subpages.iter().all(|p| p.subpages.is_empty()));
    assert_eq!(result.pagination, PaginationInfo::for_page(3, 0));

    let saved = store.load("127.0.0.1");
    assert_eq!(
        saved,
        (0..3)
            .map(|i| format!("{}/page/{}", base_url, i))
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_depth_above_one_is_clamped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", seed_page_with_links(1)).await;
    mount_subpages(&mock_server, 0..1).await;

    let (crawler, _) = create_crawler();
    let result = crawler
        .start_crawl(&StartCrawlRequest::new(format!("{}/", base_url)).with_depth(5))
        .await
        .expect("Crawl failed");

    // The subpage links back to the seed, but nothing is fetched two hops out
    assert_eq!(result.subpages.len(), 1);
    assert!(result.subpages[0].subpages.is_empty());
    assert_eq!(mock_server.received_requests().await.unwrap_or_default().len(), 2);
}

#[tokio::test]
async fn test_failing_subpage_is_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", seed_page_with_links(3)).await;
    mount_subpages(&mock_server, 0..1).await;
    Mock::given(method("GET"))
        .and(path("/page/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_subpages(&mock_server, 2..3).await;

    let (crawler, _) = create_crawler();
    let result = crawler
        .start_crawl(&StartCrawlRequest::new(format!("{}/", base_url)).with_depth(1))
        .await
        .expect("Crawl failed");

    assert_eq!(result.subpages.len(), 2);
    assert!(result.subpages.iter().all(|p| p.title != "Page 1"));
    assert_eq!(result.pagination.total_subpages, 3);
}

#[tokio::test]
async fn test_seed_failure_fails_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let (crawler, _) = create_crawler();
    let err = crawler
        .start_crawl(&StartCrawlRequest::new(format!("{}/", mock_server.uri())).with_depth(1))
        .await
        .unwrap_err();

    assert!(matches!(err, DigestError::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_continue_walks_remaining_batches() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Only the first 30 anchors are considered, so store the list directly
    let (crawler, store) = create_crawler();
    let urls: Vec<String> = (0..45)
        .map(|i| format!("{}/page/{}", base_url, i))
        .collect();
    store
        .save("127.0.0.1", &format!("{}/", base_url), &urls)
        .expect("Failed to save session");
    mount_subpages(&mock_server, 20..45).await;

    let second = crawler
        .continue_crawl(&ContinueCrawlRequest::new(base_url.clone()).with_page(1))
        .await
        .expect("Continue failed");
    assert_eq!(second.subpages.len(), 20);
    assert_eq!(second.pagination.total_pages, 3);
    assert!(second.pagination.has_next);

    let third = crawler
        .continue_crawl(&ContinueCrawlRequest::new(base_url.clone()).with_page(2))
        .await
        .expect("Continue failed");
    assert_eq!(third.subpages.len(), 5);
    assert!(!third.pagination.has_next);

    let past_end = crawler
        .continue_crawl(&ContinueCrawlRequest::new(base_url).with_page(3))
        .await
        .expect("Continue failed");
    assert!(past_end.subpages.is_empty());
    assert_eq!(past_end.pagination, PaginationInfo::default());
}

#[tokio::test]
async fn test_continue_without_session() {
    let (crawler, _) = create_crawler();
    let err = crawler
        .continue_crawl(&ContinueCrawlRequest::new("https://never-crawled.example/"))
        .await
        .unwrap_err();

    assert!(matches!(err, DigestError::SessionNotFound { .. }));
}

#[tokio::test]
async fn test_second_start_replaces_session() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = Arc::new(
        SqliteSessionStore::new(&dir.path().join("sessions.db")).expect("Failed to open DB"),
    );
    let crawler =
        Crawler::new(&create_test_config(), store.clone()).expect("Failed to create crawler");

    let first_server = MockServer::start().await;
    mount_html(&first_server, "/", seed_page_with_links(2)).await;
    mount_subpages(&first_server, 0..2).await;
    crawler
        .start_crawl(&StartCrawlRequest::new(format!("{}/", first_server.uri())).with_depth(1))
        .await
        .expect("First crawl failed");

    let second_server = MockServer::start().await;
    mount_html(
        &second_server,
        "/",
        r#"<html><body><a href="/only">Only</a></body></html>"#.to_string(),
    )
    .await;
    mount_html(
        &second_server,
        "/only",
        "<html><head><title>Only</title></head></html>".to_string(),
    )
    .await;
    crawler
        .start_crawl(&StartCrawlRequest::new(format!("{}/", second_server.uri())).with_depth(1))
        .await
        .expect("Second crawl failed");

    // Both servers share the 127.0.0.1 domain key
    assert_eq!(
        store.load("127.0.0.1"),
        vec![format!("{}/only", second_server.uri())]
    );
}

#[tokio::test]
async fn test_corrupt_session_database_recovers() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("sessions.db");
    std::fs::write(&db_path, b"not a sqlite database at all\n".repeat(64))
        .expect("Failed to write corrupt file");

    let store = Arc::new(SqliteSessionStore::new(&db_path).expect("Failed to open DB"));
    let crawler =
        Crawler::new(&create_test_config(), store.clone()).expect("Failed to create crawler");

    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_html(&mock_server, "/", seed_page_with_links(2)).await;
    mount_subpages(&mock_server, 0..2).await;

    let result = crawler
        .start_crawl(&StartCrawlRequest::new(format!("{}/", base_url)).with_depth(1))
        .await
        .expect("Crawl over a corrupt database failed");
    assert_eq!(result.subpages.len(), 2);

    let batch = crawler
        .continue_crawl(&ContinueCrawlRequest::new(base_url).with_page(0))
        .await
        .expect("Continue found no session");
    assert_eq!(batch.subpages.len(), 2);
    assert_eq!(batch.pagination.total_subpages, 2);
}
