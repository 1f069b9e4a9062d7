//! Comment creation tool

use super::author_name;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::AddCommentRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for commenting on an issue
#[derive(Default)]
pub struct AddCommentTool;

impl AddCommentTool {
    /// Creates a new instance of the AddCommentTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddCommentTool {
    fn name(&self) -> &'static str {
        "jira_add_comment"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("comments", "add")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<AddCommentRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: AddCommentRequest = BaseToolImpl::parse_arguments(arguments)?;
        McpValidation::validate_not_empty(&request.issue_key, "issue key")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate issue key"))?;
        McpValidation::validate_not_empty(&request.comment, "comment")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate comment"))?;

        let comment = McpErrorHandler::handle_result(
            context
                .client
                .add_comment(request.issue_key.trim(), &request.comment)
                .await,
            "add comment",
        )?;
        tracing::info!("Added comment {} to {}", comment.id, request.issue_key.trim());

        Ok(BaseToolImpl::create_success_response(format!(
            "Comment added successfully!\nID: {}\nAuthor: {}\nCreated: {}",
            comment.id,
            author_name(comment.author.as_ref()),
            comment.created
        )))
    }
}
