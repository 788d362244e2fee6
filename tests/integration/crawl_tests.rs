//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end over real HTTP.

use refcrawl::config::Config;
use refcrawl::crawler::{run_crawl, Coordinator, CrawlOutcome, CrawlReport, HttpFetcher};
use refcrawl::output::{write_outcome, JsonFileOutput, OutputStyle};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given seeds and budget
fn create_test_config(seeds: Vec<String>, max_sites: usize, max_duration_secs: u64) -> Config {
    let mut config = Config {
        seeds,
        ..Config::default()
    };
    config.crawler.max_sites = max_sites;
    config.crawler.max_duration_secs = max_duration_secs;
    config.crawler.request_timeout_secs = 30;
    config.crawler.progress_interval = 1;
    config.user_agent.crawler_name = "TestBot".to_string();
    config
}

/// Mounts an HTML page at `page_path`
async fn mount_page(server: &MockServer, page_path: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(html, "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts an HTML page that answers only after `delay`
async fn mount_slow_page(server: &MockServer, page_path: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><head><title>Slow</title></head></html>", "text/html")
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

fn expect_completed(outcome: CrawlOutcome) -> CrawlReport {
    match outcome {
        CrawlOutcome::Completed(report) => report,
        other => panic!("expected natural completion, got {:?}", other),
    }
}

async fn count_requests(server: &MockServer, page_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == page_path)
        .count()
}

#[tokio::test]
async fn test_single_seed_without_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/a",
        r#"<html><head><title>A</title><meta name="description" content="Site A"></head>
        <body><h1>Welcome</h1></body></html>"#
            .to_string(),
    )
    .await;

    let config = create_test_config(vec![format!("{}/a", base)], 1, 60);
    let report = expect_completed(run_crawl(&config).await.expect("crawl failed"));

    let a = format!("{}/a", base);
    assert_eq!(report.snapshot.bodies.len(), 1);
    let body = &report.snapshot.bodies[&a];
    assert_eq!(body.title.as_deref(), Some("A"));
    assert_eq!(body.description.as_deref(), Some("Site A"));
    assert!(report.snapshot.references.is_empty());
    assert_eq!(report.statistics.dispatched, 1);
    assert_eq!(report.statistics.completed, 1);
}

#[tokio::test]
async fn test_valid_link_followed_invalid_discarded() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/a",
        format!(
            r#"<html><body>
            <a href="{}/b">B</a>
            <a href="not a url">Prose</a>
            </body></html>"#,
            base
        ),
    )
    .await;
    mount_page(
        &server,
        "/b",
        "<html><head><title>B</title></head></html>".to_string(),
    )
    .await;

    let config = create_test_config(vec![format!("{}/a", base)], 5, 60);
    let report = expect_completed(run_crawl(&config).await.expect("crawl failed"));

    let a = format!("{}/a", base);
    let b = format!("{}/b", base);

    assert_eq!(
        report.snapshot.references.referrers(&b).unwrap(),
        [a.as_str()]
    );
    assert_eq!(report.snapshot.references.len(), 1);
    assert!(report
        .snapshot
        .references
        .iter()
        .all(|(target, _)| !target.contains("not")));
    assert!(report.snapshot.bodies.contains_key(&b));
    assert_eq!(report.statistics.completed, 2);
    assert_eq!(report.statistics.in_flight, 0);
}

#[tokio::test]
async fn test_shared_target_recorded_in_settle_order() {
    let server = MockServer::start().await;
    let base = server.uri();

    let link_to_c = format!(r#"<html><body><a href="{}/c">C</a></body></html>"#, base);
    mount_page(&server, "/a", link_to_c.clone()).await;
    // b settles well after a
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(link_to_c, "text/html")
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/c", "<html></html>".to_string()).await;

    let seeds = vec![format!("{}/a", base), format!("{}/b", base)];
    let config = create_test_config(seeds, 2, 60);
    let report = expect_completed(run_crawl(&config).await.expect("crawl failed"));

    let a = format!("{}/a", base);
    let b = format!("{}/b", base);
    let c = format!("{}/c", base);

    assert_eq!(
        report.snapshot.references.referrers(&c).unwrap(),
        [a.as_str(), b.as_str()]
    );
    assert!(!report.snapshot.bodies.contains_key(&c));
    assert_eq!(count_requests(&server, "/c").await, 0);
}

#[tokio::test]
async fn test_failed_fetches_still_complete() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/a",
        format!(
            r#"<a href="{0}/missing">404</a><a href="{0}/json">json</a>"#,
            base
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("{}", "application/json"),
        )
        .mount(&server)
        .await;

    let config = create_test_config(vec![format!("{}/a", base)], 10, 60);
    let report = expect_completed(run_crawl(&config).await.expect("crawl failed"));

    assert_eq!(report.statistics.completed, 3);
    assert_eq!(report.statistics.succeeded, 1);
    assert_eq!(report.statistics.failed, 2);
    assert_eq!(report.snapshot.bodies.len(), 1);
    assert_eq!(report.snapshot.references.len(), 2);
}

#[tokio::test]
async fn test_each_url_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    // a and b link to each other and themselves
    let html = format!(
        r#"<a href="{0}/a">a</a><a href="{0}/b">b</a><a href="/a#top">a again</a>"#,
        base
    );
    mount_page(&server, "/a", html.clone()).await;
    mount_page(&server, "/b", html).await;

    let config = create_test_config(vec![format!("{}/a", base)], 50, 60);
    let report = expect_completed(run_crawl(&config).await.expect("crawl failed"));

    assert_eq!(count_requests(&server, "/a").await, 1);
    assert_eq!(count_requests(&server, "/b").await, 1);
    assert_eq!(report.statistics.dispatched, 2);
    assert_eq!(report.statistics.completed, 2);

    let a = format!("{}/a", base);
    // a is referenced twice by each page that settled
    assert_eq!(report.snapshot.references.referrers(&a).unwrap().len(), 4);
}

#[tokio::test]
async fn test_deadline_cuts_crawl_short() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/a",
        format!(
            r#"<a href="{0}/slow1">1</a><a href="{0}/slow2">2</a><a href="{0}/slow3">3</a>"#,
            base
        ),
    )
    .await;
    for slow in ["/slow1", "/slow2", "/slow3"] {
        mount_slow_page(&server, slow, Duration::from_secs(5)).await;
    }

    let config = create_test_config(vec![format!("{}/a", base)], 10, 1);
    let coordinator =
        Coordinator::new(&config, HttpFetcher::from_config(&config.user_agent).unwrap()).unwrap();
    let latch = coordinator.latch();

    let started = std::time::Instant::now();
    let outcome = coordinator.run().await;
    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(latch.is_fired());

    let report = match &outcome {
        CrawlOutcome::CutShort(report) => report,
        other => panic!("expected deadline cutoff, got {:?}", other),
    };

    assert_eq!(report.snapshot.bodies.len(), 1);
    assert_eq!(report.snapshot.references.len(), 3);
    assert_eq!(report.statistics.in_flight, 3);

    // The written snapshot is the indented form and later settles cannot touch it
    let dir = tempfile::tempdir().unwrap();
    let output = JsonFileOutput::new(dir.path().join("result.json"));
    let style = write_outcome(&outcome, &output).unwrap();
    assert_eq!(style, Some(OutputStyle::Pretty));

    let written = std::fs::read_to_string(output.path()).unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(std::fs::read_to_string(output.path()).unwrap(), written);
    assert!(written.contains("\n  \"references\""));
}

#[tokio::test]
async fn test_completed_crawl_writes_compact_json() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/a",
        format!(
            r#"<html><head><meta name="keywords" content="one, two"></head>
            <body><h2>Sub</h2><a href="{}/b">b</a></body></html>"#,
            base
        ),
    )
    .await;
    mount_page(&server, "/b", "<html></html>".to_string()).await;

    let config = create_test_config(vec![format!("{}/a", base)], 2, 60);
    let outcome = run_crawl(&config).await.expect("crawl failed");

    let dir = tempfile::tempdir().unwrap();
    let output = JsonFileOutput::new(dir.path().join("result.json"));
    assert_eq!(
        write_outcome(&outcome, &output).unwrap(),
        Some(OutputStyle::Compact)
    );

    let written = std::fs::read_to_string(output.path()).unwrap();
    assert!(!written.contains('\n'));

    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    let a = format!("{}/a", base);
    let b = format!("{}/b", base);
    assert_eq!(value["bodies"][&a]["keywords"], serde_json::json!(["one", "two"]));
    assert_eq!(value["bodies"][&a]["headings"]["h2"][0], "Sub");
    assert_eq!(value["references"][&b][0], a.as_str());
}
