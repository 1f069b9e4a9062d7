//! Issue retrieval tool

use crate::format::format_issue;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetIssueRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Sections expanded when the caller does not choose any
pub const DEFAULT_EXPAND: &str = "transitions,changelog,subtasks,description";

/// Tool for reading one issue
#[derive(Default)]
pub struct GetIssueTool;

impl GetIssueTool {
    /// Creates a new instance of the GetIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssueTool {
    fn name(&self) -> &'static str {
        "jira_get_issue"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("issues", "get")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<GetIssueRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        McpValidation::validate_not_empty(&request.issue_key, "issue key")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate issue key"))?;

        let expand = request
            .expand
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(DEFAULT_EXPAND);
        tracing::debug!("Fetching issue {} (expand={})", request.issue_key, expand);

        let issue = McpErrorHandler::handle_result(
            context
                .client
                .get_issue(request.issue_key.trim(), request.fields.as_deref(), Some(expand))
                .await,
            "get issue",
        )?;

        Ok(BaseToolImpl::create_success_response(format_issue(&issue)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tools::test_support::{args, offline_context};
    use rmcp::model::ErrorCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_blank_issue_key_is_rejected_before_any_request() {
        let err = GetIssueTool::new()
            .execute(args(json!({ "issue_key": "  " })), &offline_context())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "Issue key cannot be empty");
    }

    #[tokio::test]
    async fn test_missing_issue_key() {
        let err = GetIssueTool::new()
            .execute(serde_json::Map::new(), &offline_context())
            .await
            .unwrap_err();
        assert!(err.message.contains("issue_key"));
    }
}
