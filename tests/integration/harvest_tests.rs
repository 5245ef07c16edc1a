//! Integration tests for the harvester
//!
//! These tests use wiremock to serve an index page and quest detail pages and
//! run the full harvest cycle end-to-end over HTTP.

use quest_scribe::config::{parse_config, Config};
use quest_scribe::crawler::{FetchError, Harvester, RequestId};
use quest_scribe::output::write_csv;
use quest_scribe::{ScribeError, NO_REWARDS_SENTINEL};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a config pointing at the mock server's index page
fn create_test_config(server: &MockServer, extra_crawler: &str, csv_path: &str) -> Config {
    parse_config(&format!(
        r#"
[crawler]
index-url = "{}/index"
base-delay-ms = 0
max-jitter-ms = 0
request-timeout-secs = 5
{}

[output]
csv-path = "{}"

[[region]]
name = "Inazuma"
reputation-anchor = "inaWQL"
non-reputation-anchor = "zumaNR1"
"#,
        server.uri(),
        extra_crawler,
        csv_path
    ))
    .expect("Failed to parse test config")
}

fn index_page(quests: &[(&str, &str)]) -> String {
    let items: String = quests
        .iter()
        .map(|(name, href)| format!(r#"<li><a href="{}">{}</a></li>"#, href, name))
        .collect();

    format!(
        r#"<html><body><div id="article-body">
        <p><a id="inaWQL">Inazuma World Quests</a></p>
        <h3>Inazuma World Quests</h3>
        <ul>{}</ul>
        </div></body></html>"#,
        items
    )
}

const DETAIL_PAGE: &str = r#"<html><body><div id="article-body">
    <div class="genshin_quest"><ol><li>Go</li><li>Talk</li><li>Return</li></ol></div>
    <h3>Rewards List</h3>
    <ul><li>Primogem x60</li></ul>
</div></body></html>"#;

async fn mount_page(server: &MockServer, page_path: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_single_quest() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/index",
        200,
        &index_page(&[("Tatarasuna", "/quest/1")]),
    )
    .await;
    mount_page(&server, "/quest/1", 200, DETAIL_PAGE).await;

    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("quests.csv");
    let config = create_test_config(&server, "", &csv_path.display().to_string());

    let harvester = Harvester::new(config).unwrap();
    let report = harvester.run().await.unwrap();

    assert_eq!(report.discovered, 1);
    assert_eq!(report.details.len(), 1);
    assert!(report.failures.is_empty());

    let detail = &report.details[0];
    assert_eq!(detail.region, "Inazuma");
    assert_eq!(detail.name, "Tatarasuna");
    assert_eq!(detail.step_count, Some(3));
    assert_eq!(detail.rewards, vec!["Primogem x60"]);

    // The non-reputation anchor is missing from the index page
    assert_eq!(report.unresolved.len(), 1);
    assert_eq!(report.unresolved[0].anchor, "zumaNR1");

    let rows = write_csv(&harvester.config().output, &report.details).unwrap();
    assert_eq!(rows, 1);

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["Region", "Quest Name", "Steps to Complete", "Rewards"]
    );
    let record = reader.records().next().unwrap().unwrap();
    assert_eq!(
        record.iter().collect::<Vec<_>>(),
        vec!["Inazuma", "Tatarasuna", "3", "Primogem x60"]
    );
}

#[tokio::test]
async fn test_failed_detail_page_is_isolated() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/index",
        200,
        &index_page(&[
            ("First", "/quest/1"),
            ("Second", "/quest/2"),
            ("Third", "/quest/3"),
        ]),
    )
    .await;
    mount_page(&server, "/quest/1", 200, DETAIL_PAGE).await;
    mount_page(&server, "/quest/2", 500, "boom").await;
    mount_page(&server, "/quest/3", 200, "<html><body></body></html>").await;

    let config = create_test_config(&server, "", "unused.csv");
    let report = Harvester::new(config).unwrap().run().await.unwrap();

    let names: Vec<&str> = report.details.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Third"]);

    assert_eq!(report.details[1].step_count, None);
    assert_eq!(report.details[1].rewards, vec![NO_REWARDS_SENTINEL]);

    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.id, RequestId::new(1));
    assert_eq!(failure.quest.name, "Second");
    assert!(matches!(
        failure.error,
        FetchError::Status {
            status_code: 500,
            ..
        }
    ));
}

#[tokio::test]
async fn test_index_failure_aborts_harvest() {
    let server = MockServer::start().await;
    mount_page(&server, "/index", 503, "").await;

    let config = create_test_config(&server, "", "unused.csv");
    let result = Harvester::new(config).unwrap().run().await;

    assert!(matches!(
        result,
        Err(ScribeError::IndexFetch(FetchError::Status {
            status_code: 503,
            ..
        }))
    ));
}

#[tokio::test]
async fn test_links_outside_allowed_domains_are_not_fetched() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/index",
        200,
        &index_page(&[("Local", "/quest/1")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/quest/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAIL_PAGE))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(
        &server,
        r#"allowed-domains = ["gamewith.net"]"#,
        "unused.csv",
    );
    let report = Harvester::new(config).unwrap().run().await.unwrap();

    assert!(report.details.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        FetchError::DomainNotAllowed { .. }
    ));
}

#[tokio::test]
async fn test_detail_requests_are_paced() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/index",
        200,
        &index_page(&[("A", "/quest/1"), ("B", "/quest/2"), ("C", "/quest/3")]),
    )
    .await;
    for page in ["/quest/1", "/quest/2", "/quest/3"] {
        mount_page(&server, page, 200, DETAIL_PAGE).await;
    }

    let mut config = create_test_config(&server, "", "unused.csv");
    config.crawler.base_delay_ms = 100;

    let start = Instant::now();
    let report = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.details.len(), 3);
    // Two gaps between three requests to the same host
    assert!(start.elapsed() >= Duration::from_millis(200));
}
