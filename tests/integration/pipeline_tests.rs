use crate::common::{discussion_html, job, listing_html, mount_page, mount_robots, test_config};
use discussion_scraper::output::read_records;
use discussion_scraper::{crawler::Coordinator, RunOutcome};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const Q1: &str = "/discussions/acme/view/101-exam-az-900-topic-1-question-3/";
const Q2: &str = "/discussions/acme/view/102-exam-az-900-topic-2-question-5/";
const Q3: &str = "/discussions/acme/view/103-exam-az-900-topic-1/";
const BROKEN: &str = "/discussions/acme/view/104-exam-az-900-topic-1-question-8/";
const OTHER: &str = "/discussions/acme/view/200-exam-az-104-topic-1-question-1/";

#[tokio::test]
async fn test_full_scrape_dedups_filters_and_sorts() {
    let mock_server = MockServer::start().await;
    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;

    mount_page(
        &mock_server,
        "/discussions/acme/1/",
        200,
        listing_html(&[
            (Q2, "Exam AZ-900 topic 2 question 5 discussion"),
            (Q1, "Exam AZ-900 topic 1 question 3 discussion"),
            (OTHER, "Exam AZ-104 topic 1 question 1 discussion"),
            ("/exams/acme/az-900/", "AZ-900 exam page"),
        ]),
    )
    .await;
    mount_page(
        &mock_server,
        "/discussions/acme/2/",
        200,
        listing_html(&[
            (Q1, "Exam AZ-900 topic 1 question 3 discussion"),
            (Q3, "exam az-900 topic 1 discussion"),
            (BROKEN, "Exam AZ-900 topic 1 question 8 discussion"),
        ]),
    )
    .await;
    // Page 3 is not mounted: wiremock answers 404, the end of the listing.

    Mock::given(method("GET"))
        .and(path(Q1))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(discussion_html("Exam AZ-900 topic 1 question 3 discussion", "Première réponse")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        Q2,
        200,
        discussion_html("Exam AZ-900 topic 2 question 5 discussion", "plain"),
    )
    .await;
    mount_page(
        &mock_server,
        Q3,
        200,
        discussion_html("Exam AZ-900 topic 1 discussion", "日本語のコメント"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(BROKEN))
        .respond_with(ResponseTemplate::new(500))
        .expect(4) // first attempt plus three retries
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(OTHER))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("questions.json");
    let coordinator = Coordinator::new(test_config()).expect("Failed to create coordinator");
    let outcome = coordinator
        .run(&job(&mock_server, "az-900", 3, output.clone()))
        .await
        .expect("Scrape failed");

    let RunOutcome::Written { count, path } = outcome else {
        panic!("expected output to be written, got {:?}", outcome);
    };
    assert_eq!(count, 3);
    assert_eq!(path, output.canonicalize().unwrap());

    let records = read_records(&output).unwrap();
    let summary: Vec<(String, Option<u64>, String)> = records
        .iter()
        .map(|r| (r.topic.clone(), r.question_number, r.url.clone()))
        .collect();
    let base = mock_server.uri();
    assert_eq!(
        summary,
        vec![
            ("Topic 1".to_string(), None, format!("{}{}", base, Q3)),
            ("Topic 1".to_string(), Some(3), format!("{}{}", base, Q1)),
            ("Topic 2".to_string(), Some(5), format!("{}{}", base, Q2)),
        ]
    );

    let first = &records[1];
    assert_eq!(first.question_text.as_deref(), Some("What is the answer?"));
    assert_eq!(first.choices.len(), 2);
    assert_eq!(first.correct_answer.as_deref(), Some("A"));
    assert_eq!(first.vote_distribution[0].percentage, 80);
    assert_eq!(first.discussion[0].comment, "Première réponse");
    assert_eq!(first.discussion[0].date.as_deref(), Some("Fri 05 Jan 2024 09:30"));

    let raw = std::fs::read_to_string(&output).unwrap();
    assert!(raw.contains("日本語のコメント"));
    assert!(raw.starts_with("[\n  {\n"));
}

#[tokio::test]
async fn test_listing_404_does_not_stop_other_pages() {
    let mock_server = MockServer::start().await;
    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;

    mount_page(&mock_server, "/discussions/acme/1/", 404, String::new()).await;
    mount_page(&mock_server, "/discussions/acme/2/", 503, String::new()).await;
    mount_page(
        &mock_server,
        "/discussions/acme/3/",
        200,
        listing_html(&[(Q1, "Exam AZ-900 topic 1 question 3 discussion")]),
    )
    .await;
    mount_page(
        &mock_server,
        Q1,
        200,
        discussion_html("Exam AZ-900 topic 1 question 3 discussion", "ok"),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.json");
    let coordinator = Coordinator::new(test_config()).expect("Failed to create coordinator");
    let outcome = coordinator
        .run(&job(&mock_server, "AZ-900", 3, output.clone()))
        .await
        .expect("Scrape failed");

    assert!(matches!(outcome, RunOutcome::Written { count: 1, .. }));
    assert_eq!(read_records(&output).unwrap()[0].question_number, Some(3));
}

#[tokio::test]
async fn test_no_matching_keyword_writes_nothing() {
    let mock_server = MockServer::start().await;
    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;

    mount_page(
        &mock_server,
        "/discussions/acme/1/",
        200,
        listing_html(&[(Q1, "Exam AZ-900 topic 1 question 3 discussion")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(Q1))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.json");
    let coordinator = Coordinator::new(test_config()).expect("Failed to create coordinator");
    let outcome = coordinator
        .run(&job(&mock_server, "SAA-C03", 2, output.clone()))
        .await
        .expect("Scrape failed");

    assert_eq!(outcome, RunOutcome::NoMatches);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_all_discussions_failing_writes_nothing() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/discussions/acme/1/",
        200,
        listing_html(&[(Q1, "Exam AZ-900 topic 1 question 3 discussion")]),
    )
    .await;
    mount_page(&mock_server, Q1, 403, String::new()).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.json");
    let coordinator = Coordinator::new(test_config()).expect("Failed to create coordinator");
    let outcome = coordinator
        .run(&job(&mock_server, "az-900", 1, output.clone()))
        .await
        .expect("Scrape failed");

    assert_eq!(outcome, RunOutcome::NoMatches);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_zero_pages_fetches_no_listing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discussions/acme/1/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.json");
    let coordinator = Coordinator::new(test_config()).expect("Failed to create coordinator");
    let outcome = coordinator
        .run(&job(&mock_server, "az-900", 0, output.clone()))
        .await
        .expect("Scrape failed");

    assert_eq!(outcome, RunOutcome::NoMatches);
}

#[tokio::test]
async fn test_unwritable_output_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/discussions/acme/1/",
        200,
        listing_html(&[(Q1, "Exam AZ-900 topic 1 question 3 discussion")]),
    )
    .await;
    mount_page(
        &mock_server,
        Q1,
        200,
        discussion_html("Exam AZ-900 topic 1 question 3 discussion", "ok"),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("no-such-dir").join("out.json");
    let coordinator = Coordinator::new(test_config()).expect("Failed to create coordinator");
    let result = coordinator
        .run(&job(&mock_server, "az-900", 1, output.clone()))
        .await;

    assert!(matches!(
        result,
        Err(discussion_scraper::ScrapeError::Write { .. })
    ));
    assert!(!output.exists());
}
