//! Workflow transition tool

use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::TransitionIssueRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for moving an issue to another workflow status
#[derive(Default)]
pub struct TransitionIssueTool;

impl TransitionIssueTool {
    /// Creates a new instance of the TransitionIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for TransitionIssueTool {
    fn name(&self) -> &'static str {
        "jira_transition_issue"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("issues", "transition")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<TransitionIssueRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: TransitionIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        McpValidation::validate_not_empty(&request.issue_key, "issue key")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate issue key"))?;
        McpValidation::validate_not_empty(&request.transition_id, "transition id")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate transition id"))?;

        tracing::debug!(
            "Transitioning {} with transition {}",
            request.issue_key,
            request.transition_id
        );
        McpErrorHandler::handle_result(
            context
                .client
                .transition_issue(
                    request.issue_key.trim(),
                    request.transition_id.trim(),
                    request.comment.as_deref(),
                )
                .await,
            "transition issue",
        )?;
        tracing::info!("Transitioned issue {}", request.issue_key.trim());

        Ok(BaseToolImpl::create_success_response(
            "Issue transition completed successfully",
        ))
    }
}
