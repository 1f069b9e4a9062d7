//! Shared helpers for integration tests against a mocked Jira site

#![allow(dead_code)]

use jira_mcp::client::JiraClient;
use jira_mcp::config::JiraConfig;
use jira_mcp::mcp::{McpServer, ToolContext};
use rmcp::model::{CallToolResult, RawContent};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use wiremock::MockServer;

/// Basic credentials `dev@example.com:token`
pub const AUTH_HEADER: &str = "Basic ZGV2QGV4YW1wbGUuY29tOnRva2Vu";

pub fn config_for(mock: &MockServer) -> JiraConfig {
    JiraConfig::new(&mock.uri(), "dev@example.com", "token")
}

pub fn client_for(mock: &MockServer) -> JiraClient {
    JiraClient::new(config_for(mock)).unwrap()
}

pub fn server_for(mock: &MockServer) -> McpServer {
    server_with_config(config_for(mock))
}

pub fn server_with_attachment_dir(mock: &MockServer, dir: &Path) -> McpServer {
    let mut config = config_for(mock);
    config.attachment_dir = dir.to_path_buf();
    server_with_config(config)
}

fn server_with_config(config: JiraConfig) -> McpServer {
    let client = Arc::new(JiraClient::new(config).unwrap());
    McpServer::with_context(ToolContext::new(client)).unwrap()
}

/// Call a tool and return its text and error flag
pub async fn call(server: &McpServer, tool: &str, arguments: serde_json::Value) -> (String, bool) {
    let arguments = match arguments {
        serde_json::Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    };
    let result = server
        .execute_tool(tool, arguments, CancellationToken::new())
        .await
        .unwrap();
    (text(&result).to_string(), result.is_error == Some(true))
}

pub fn text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}
