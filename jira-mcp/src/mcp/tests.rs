//! Tests for MCP server functionality

use super::server::McpServer;
use super::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use super::tools::test_support::{args, offline_context, text};
use crate::devinfo::mock_source::MockDevStatusSource;
use rmcp::model::{CallToolResult, ErrorCode, PromptMessageContent};
use rmcp::{Error as McpError, ServerHandler};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Test tool with a fixed misbehaviour
struct MisbehavingTool {
    name: &'static str,
}

#[async_trait::async_trait]
impl McpTool for MisbehavingTool {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        "misbehaves on purpose"
    }

    fn schema(&self) -> serde_json::Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn execute(
        &self,
        _arguments: serde_json::Map<String, serde_json::Value>,
        _context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        match self.name {
            "panics" => panic!("boom"),
            "hangs" => {
                std::future::pending::<()>().await;
                Ok(BaseToolImpl::create_success_response("unreachable"))
            }
            _ => Err(McpError::internal_error("backend unavailable", None)),
        }
    }
}

fn server() -> McpServer {
    McpServer::with_context(offline_context()).unwrap()
}

fn misbehaving_server() -> McpServer {
    let mut registry = ToolRegistry::new();
    for name in ["panics", "hangs", "fails"] {
        registry.register(MisbehavingTool { name });
    }
    McpServer::with_registry(registry, offline_context()).unwrap()
}

#[test]
fn test_server_info() {
    let info = server().get_info();
    assert_eq!(info.server_info.name, "Jira MCP");
    assert_eq!(info.server_info.version, crate::VERSION);
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.prompts.is_some());
    assert!(info.capabilities.resources.is_none());
    assert!(info.instructions.unwrap().contains("Jira"));
}

#[test]
fn test_tool_names_are_sorted_and_complete() {
    let names = server().list_tool_names();
    assert_eq!(names.len(), 23);
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert!(names.contains(&"jira_get_issue".to_string()));
    assert!(names.contains(&"jira_sprint_report".to_string()));
}

#[test]
fn test_prompt_list() {
    let prompts = server().prompt_list();
    assert_eq!(prompts.len(), 2);

    let tree = prompts
        .iter()
        .find(|p| p.name == "issue_development_tree")
        .unwrap();
    let arguments = tree.arguments.as_ref().unwrap();
    assert_eq!(arguments.len(), 1);
    assert_eq!(arguments[0].name, "issue_key");
    assert_eq!(arguments[0].required, Some(true));
}

#[test]
fn test_render_prompt() {
    let result = server()
        .render_prompt(
            "issue_development_tree",
            Some(&args(json!({ "issue_key": "PROJ-9" }))),
        )
        .unwrap();

    assert_eq!(result.messages.len(), 1);
    match &result.messages[0].content {
        PromptMessageContent::Text { text } => assert!(text.contains("PROJ-9")),
        other => panic!("unexpected prompt content {other:?}"),
    }
}

#[test]
fn test_render_prompt_errors_are_invalid_params() {
    let server = server();

    let err = server.render_prompt("nope", None).unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "Prompt 'nope' is not available");

    let err = server
        .render_prompt("release_development_overview", Some(&args(json!({ "version": "v1" }))))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "project_key is required");
}

#[tokio::test]
async fn test_unknown_tool_is_protocol_error() {
    let err = server()
        .execute_tool("jira_nope", serde_json::Map::new(), CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_REQUEST);
    assert_eq!(err.message, "Unknown tool: jira_nope");
}

#[tokio::test]
async fn test_validation_failure_is_error_result() {
    let result = server()
        .execute_tool(
            "jira_get_issue",
            args(json!({ "issue_key": "" })),
            CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert_eq!(text(&result), "Issue key cannot be empty");
}

#[tokio::test]
async fn test_malformed_arguments_are_error_result() {
    let result = server()
        .execute_tool("jira_get_issue", serde_json::Map::new(), CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert!(text(&result).starts_with("Invalid arguments:"));
    assert!(text(&result).contains("issue_key"));
}

#[tokio::test]
async fn test_tool_error_is_error_result() {
    let result = misbehaving_server()
        .execute_tool("fails", serde_json::Map::new(), CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert_eq!(text(&result), "backend unavailable");
}

#[tokio::test]
async fn test_panic_is_contained() {
    let server = misbehaving_server();
    let result = server
        .execute_tool("panics", serde_json::Map::new(), CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert_eq!(text(&result), "panic in tool handler: boom");

    // The server keeps serving after a panic
    let result = server
        .execute_tool("fails", serde_json::Map::new(), CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(text(&result), "backend unavailable");
}

#[tokio::test]
async fn test_canceled_before_start() {
    let token = CancellationToken::new();
    token.cancel();

    let result = misbehaving_server()
        .execute_tool("hangs", serde_json::Map::new(), token)
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert_eq!(text(&result), "operation canceled");
}

#[tokio::test]
async fn test_canceled_while_running() {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        misbehaving_server().execute_tool("hangs", serde_json::Map::new(), token),
    )
    .await
    .expect("cancellation should end the call")
    .unwrap();
    assert_eq!(text(&result), "operation canceled");
}

#[tokio::test]
async fn test_development_information_through_server() {
    let source = MockDevStatusSource::new().with_issue("PROJ-1", "10001").with_summary(
        "10001",
        json!({ "summary": { "branch": { "byInstanceType": {} } } }),
    );
    let server =
        McpServer::with_context(offline_context().with_dev_status(Arc::new(source))).unwrap();

    let result = server
        .execute_tool(
            "jira_get_development_information",
            args(json!({ "issue_key": "PROJ-1" })),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(false));
    let value: serde_json::Value = serde_json::from_str(text(&result)).unwrap();
    assert_eq!(value["message"], crate::devinfo::NO_INTEGRATIONS);
    assert_eq!(value["branches"], json!([]));
}

#[tokio::test]
async fn test_unreachable_backend_is_error_result() {
    let result = server()
        .execute_tool(
            "jira_get_issue",
            args(json!({ "issue_key": "PROJ-1" })),
            CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert!(text(&result).starts_with("failed to get issue"));
}
