use std::time::Duration;

use dashboard_engine::{ApiSettings, ArticleApi, FailureKind, ReqwestArticleApi, WireId};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestArticleApi {
    ReqwestArticleApi::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn list_articles_preserves_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "articles": [
                { "id": 3, "title": "Third", "rewrite_status": "not_selected" },
                { "id": 1, "title": "First", "content": "body", "rewrite_status": "pending" },
                { "id": 2, "title": "Second", "selected_for_rewrite": true }
            ]
        })))
        .mount(&server)
        .await;

    let records = api_for(&server).list_articles().await.expect("list ok");

    let ids: Vec<_> = records.iter().map(|r| r.article_id()).collect();
    assert_eq!(ids, vec!["3", "1", "2"]);
    assert_eq!(records[0].id, WireId::Number(3.into()));
    assert_eq!(records[1].content.as_deref(), Some("body"));
    assert_eq!(records[1].rewrite_status.as_deref(), Some("pending"));
    assert_eq!(records[2].selected_for_rewrite, Some(true));
}

#[tokio::test]
async fn list_articles_rejects_non_list_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "articles": "not-a-list" })),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).list_articles().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedPayload);
}

#[tokio::test]
async fn list_articles_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = api_for(&server).list_articles().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn list_articles_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({ "articles": [] })),
        )
        .mount(&server)
        .await;

    let api = ReqwestArticleApi::new(ApiSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    })
    .expect("client");

    let err = api.list_articles().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn select_posts_to_select_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles/select/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Article 1 selected for rewriting"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = api_for(&server).select_for_rewrite("1").await.expect("ack");
    assert_eq!(ack.message, "Article 1 selected for rewriting");
}

#[tokio::test]
async fn select_error_body_is_a_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles/select/9"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "error": "Article not found" })),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).select_for_rewrite("9").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.message, "Article not found");
}

#[tokio::test]
async fn reserved_characters_in_ids_stay_inside_the_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles/select/a%2Fb%3Fc%23d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Article selected for rewriting"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/articles/x%2F..%2F..%2Fy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let ack = api.select_for_rewrite("a/b?c#d").await.expect("ack");
    assert_eq!(ack.message, "Article selected for rewriting");
    api.update_content("x/../../y", "body")
        .await
        .expect("update ok");
}

#[tokio::test]
async fn update_content_puts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/articles/4"))
        .and(body_json(serde_json::json!({ "content": "This is default content" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server)
        .update_content("4", "This is default content")
        .await
        .expect("update ok");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let api = ReqwestArticleApi::new(ApiSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        connect_timeout: Duration::from_millis(200),
        request_timeout: Duration::from_millis(500),
    })
    .expect("client");

    let err = api.list_articles().await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::Network | FailureKind::Timeout
    ));
}
