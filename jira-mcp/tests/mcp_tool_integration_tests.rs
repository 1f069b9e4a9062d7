//! Tool output through the MCP server against a mocked Jira site

mod common;

use common::{call, server_for, server_with_attachment_dir};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_issue_renders_details() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/PROJ-1"))
        .and(query_param("expand", "transitions,changelog,subtasks,description"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "10001",
            "key": "PROJ-1",
            "fields": {
                "summary": "Fix login",
                "status": { "name": "In Progress" },
                "issuetype": { "name": "Bug" }
            }
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let (text, is_error) = call(
        &server_for(&mock),
        "jira_get_issue",
        json!({ "issue_key": "PROJ-1" }),
    )
    .await;
    assert!(!is_error, "{text}");
    assert!(text.starts_with("Key: PROJ-1\n"));
    assert!(text.contains("Summary: Fix login\n"));
    assert!(text.contains("Status: In Progress\n"));
}

#[tokio::test]
async fn test_backend_failure_names_operation() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/PROJ-9"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock)
        .await;

    let (text, is_error) = call(
        &server_for(&mock),
        "jira_get_issue",
        json!({ "issue_key": "PROJ-9" }),
    )
    .await;
    assert!(is_error);
    assert!(
        text.starts_with("failed to get issue: 500: boom (endpoint: /rest/api/3/issue/PROJ-9?expand="),
        "{text}"
    );
}

#[tokio::test]
async fn test_create_issue_reports_key() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/api/3/issue"))
        .and(body_partial_json(json!({
            "fields": {
                "project": { "key": "KP" },
                "summary": "New thing",
                "issuetype": { "name": "Task" }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "10100",
            "key": "KP-42",
            "self": "https://example.atlassian.net/rest/api/3/issue/10100"
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let (text, is_error) = call(
        &server_for(&mock),
        "jira_create_issue",
        json!({
            "project_key": "KP",
            "summary": "New thing",
            "description": "Details",
            "issue_type": "Task"
        }),
    )
    .await;
    assert!(!is_error, "{text}");
    assert_eq!(
        text,
        "Issue created successfully!\nKey: KP-42\nID: 10100\nURL: https://example.atlassian.net/rest/api/3/issue/10100"
    );
}

#[tokio::test]
async fn test_add_worklog_converts_duration() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/api/3/issue/PROJ-1/worklog"))
        .and(body_partial_json(json!({ "timeSpentSeconds": 5400 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "900",
            "author": { "displayName": "Dev" }
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let (text, is_error) = call(
        &server_for(&mock),
        "jira_add_worklog",
        json!({
            "issue_key": "PROJ-1",
            "time_spent": "1h 30m",
            "started": "2024-01-02T09:00:00.000+0000"
        }),
    )
    .await;
    assert!(!is_error, "{text}");
    assert!(text.contains("Worklog ID: 900\n"));
    assert!(text.contains("Time Spent: 1h 30m (5400 seconds)\n"));
}

#[tokio::test]
async fn test_bad_worklog_duration_never_reaches_backend() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock)
        .await;

    let (text, is_error) = call(
        &server_for(&mock),
        "jira_add_worklog",
        json!({ "issue_key": "PROJ-1", "time_spent": "soon" }),
    )
    .await;
    assert!(is_error);
    assert!(text.starts_with("invalid time_spent format"), "{text}");
}

#[tokio::test]
async fn test_list_project_versions() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/project/KP/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "name": "v1.0", "released": true }
        ])))
        .expect(1)
        .mount(&mock)
        .await;

    let (text, is_error) = call(
        &server_for(&mock),
        "jira_list_project_versions",
        json!({ "project_key": "KP" }),
    )
    .await;
    assert!(!is_error, "{text}");
    assert_eq!(text, "Project KP Versions:\n\nID: 1\nName: v1.0\nStatus: Released\n");
}

#[tokio::test]
async fn test_active_sprint_from_project_boards() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/agile/1.0/board"))
        .and(query_param("projectKeyOrId", "KP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [{ "id": 3, "name": "KP board" }]
        })))
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/agile/1.0/board/3/sprint"))
        .and(query_param("state", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [{ "id": 12, "name": "Sprint 12", "state": "active" }]
        })))
        .mount(&mock)
        .await;

    let (text, is_error) = call(
        &server_for(&mock),
        "jira_get_active_sprint",
        json!({ "project_key": "KP" }),
    )
    .await;
    assert!(!is_error, "{text}");
    assert!(text.contains("Sprint 12"));
}

#[tokio::test]
async fn test_download_attachment_writes_file() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/attachment/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "77",
            "filename": "notes.txt",
            "size": 9,
            "mimeType": "text/plain"
        })))
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/attachment/content/77"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"file body".to_vec()))
        .mount(&mock)
        .await;

    let temp = TempDir::new().unwrap();
    let server = server_with_attachment_dir(&mock, temp.path());
    let (text, is_error) = call(
        &server,
        "jira_download_attachment",
        json!({ "attachment_id": 77 }),
    )
    .await;
    assert!(!is_error, "{text}");

    let saved = temp.path().join("77_notes.txt");
    assert_eq!(std::fs::read(&saved).unwrap(), b"file body");
    assert_eq!(
        text,
        format!(
            "Attachment downloaded successfully!\nFile: {}\nFilename: notes.txt\nSize: 9 bytes\nMIME Type: text/plain",
            saved.display()
        )
    );
}
