use std::sync::{Arc, Mutex};

use dashboard_engine::{
    run_backfill, ApiSettings, BackfillSummary, EngineEvent, EventSink, FailureKind,
    ReqwestArticleApi,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn api_for(server: &MockServer) -> ReqwestArticleApi {
    ReqwestArticleApi::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("client")
}

async fn mount_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/articles/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "articles": [
                { "id": 1, "title": "Has body", "content": "text" },
                { "id": 2, "title": "Empty", "content": "" },
                { "id": 3, "title": "Missing" }
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn one_failure_does_not_block_the_other_update() {
    let server = MockServer::start().await;
    mount_list(&server).await;
    Mock::given(method("PUT"))
        .and(path("/articles/2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/articles/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/articles/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sink = TestSink::default();
    let summary = run_backfill(&api_for(&server), "This is default content", &sink)
        .await
        .expect("relist ok");

    assert_eq!(
        summary,
        BackfillSummary {
            attempted: 2,
            failed: 1
        }
    );

    let mut outcomes: Vec<(String, Option<FailureKind>)> = sink
        .take()
        .into_iter()
        .filter_map(|event| match event {
            EngineEvent::ContentUpdated {
                article_id,
                content,
                result,
            } => {
                assert_eq!(content, "This is default content");
                Some((article_id, result.err().map(|err| err.kind)))
            }
            _ => None,
        })
        .collect();
    outcomes.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        outcomes,
        vec![
            ("2".to_string(), Some(FailureKind::HttpStatus(500))),
            ("3".to_string(), None),
        ]
    );
}

#[tokio::test]
async fn nothing_to_do_when_all_articles_have_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "articles": [{ "id": 1, "title": "A", "content": "text" }]
        })))
        .mount(&server)
        .await;

    let sink = TestSink::default();
    let summary = run_backfill(&api_for(&server), "x", &sink).await.unwrap();
    assert_eq!(summary, BackfillSummary::default());
    assert!(sink.take().is_empty());
}

#[tokio::test]
async fn failed_relist_aborts_the_pass() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let sink = TestSink::default();
    let err = run_backfill(&api_for(&server), "x", &sink).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert!(sink.take().is_empty());
}
