//! REST client behaviour against a mocked Jira site

mod common;

use common::{client_for, AUTH_HEADER};
use jira_mcp::JiraMcpError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_issue_sends_credentials_and_query() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/PROJ-1"))
        .and(header("authorization", AUTH_HEADER))
        .and(query_param("fields", "summary,status"))
        .and(query_param("expand", "changelog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "10001",
            "key": "PROJ-1",
            "fields": { "summary": "Fix login", "status": { "name": "To Do" } }
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let issue = client_for(&mock)
        .get_issue("PROJ-1", Some("summary,status"), Some("changelog"))
        .await
        .unwrap();

    assert_eq!(issue.key, "PROJ-1");
    assert_eq!(issue.summary(), "Fix login");
    assert_eq!(issue.status_name(), Some("To Do"));
}

#[tokio::test]
async fn test_error_status_carries_endpoint_and_body() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/PROJ-2"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Issue does not exist"))
        .mount(&mock)
        .await;

    let err = client_for(&mock)
        .get_issue("PROJ-2", None, None)
        .await
        .unwrap_err();

    match err {
        JiraMcpError::Api {
            status,
            endpoint,
            body,
        } => {
            assert_eq!(status, 404);
            assert_eq!(endpoint, "/rest/api/3/issue/PROJ-2");
            assert_eq!(body, "Issue does not exist");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_search_defaults_to_navigable_fields() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/search/jql"))
        .and(query_param("jql", "project = KP"))
        .and(query_param("fields", "*navigable"))
        .and(query_param("maxResults", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issues": [{ "key": "KP-1", "fields": { "summary": "One" } }]
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let results = client_for(&mock)
        .search_issues("project = KP", None, None, 30)
        .await
        .unwrap();
    assert_eq!(results.issues.len(), 1);
    assert_eq!(results.issues[0].key, "KP-1");
}

#[tokio::test]
async fn test_add_comment_sends_rich_text_document() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/api/3/issue/PROJ-1/comment"))
        .and(body_json(json!({
            "body": {
                "type": "doc",
                "version": 1,
                "content": [{
                    "type": "paragraph",
                    "content": [{ "type": "text", "text": "Looks good" }]
                }]
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "500",
            "author": { "displayName": "Dev" },
            "created": "2024-01-02T03:04:05.000+0000"
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let comment = client_for(&mock)
        .add_comment("PROJ-1", "Looks good")
        .await
        .unwrap();
    assert_eq!(comment.id, "500");
}

#[tokio::test]
async fn test_move_issues_to_sprint_posts_keys() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/agile/1.0/sprint/12/issue"))
        .and(body_json(json!({ "issues": ["KP-1", "KP-2"] })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock)
        .await;

    client_for(&mock)
        .move_issues_to_sprint(12, &["KP-1".to_string(), "KP-2".to_string()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_download_attachment_follows_redirect() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/attachment/content/77"))
        .respond_with(
            ResponseTemplate::new(303)
                .insert_header("location", format!("{}/media/77", mock.uri()).as_str()),
        )
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/77"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"file body".to_vec()))
        .mount(&mock)
        .await;

    let bytes = client_for(&mock).download_attachment("77").await.unwrap();
    assert_eq!(bytes, b"file body");
}
