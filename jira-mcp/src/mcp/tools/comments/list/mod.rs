//! Comment listing tool

use super::author_name;
use crate::adf;
use crate::client::Comment;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::IssueKeyRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for reading the comments on an issue
#[derive(Default)]
pub struct GetCommentsTool;

impl GetCommentsTool {
    /// Creates a new instance of the GetCommentsTool
    pub fn new() -> Self {
        Self
    }
}

/// Render comments as text blocks
pub fn format_comments(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "No comments found for this issue.".to_string();
    }

    let mut result = String::new();
    for comment in comments {
        result.push_str(&format!(
            "ID: {}\nAuthor: {}\nCreated: {}\nUpdated: {}\nBody: {}\n\n",
            comment.id,
            author_name(comment.author.as_ref()),
            comment.created,
            comment.updated,
            adf::render_optional(comment.body.as_ref()).trim_end()
        ));
    }
    result
}

#[async_trait]
impl McpTool for GetCommentsTool {
    fn name(&self) -> &'static str {
        "jira_get_comments"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("comments", "list")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<IssueKeyRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: IssueKeyRequest = BaseToolImpl::parse_arguments(arguments)?;
        McpValidation::validate_not_empty(&request.issue_key, "issue key")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate issue key"))?;

        let page = McpErrorHandler::handle_result(
            context
                .client
                .get_comments(
                    request.issue_key.trim(),
                    context.client.config().comment_max_results,
                )
                .await,
            "get comments",
        )?;
        tracing::debug!(
            "Fetched {} of {} comments on {}",
            page.comments.len(),
            page.total,
            request.issue_key
        );

        Ok(BaseToolImpl::create_success_response(format_comments(
            &page.comments,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_comments_renders_document_bodies() {
        let comments: Vec<Comment> = serde_json::from_value(json!([
            {
                "id": "100",
                "author": { "displayName": "Grace" },
                "created": "2024-01-01T10:00:00.000+0000",
                "updated": "2024-01-01T11:00:00.000+0000",
                "body": {
                    "type": "doc",
                    "version": 1,
                    "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "Looks good" }] }]
                }
            },
            { "id": "101", "body": "legacy text", "created": "c", "updated": "u" }
        ]))
        .unwrap();

        assert_eq!(
            format_comments(&comments),
            "ID: 100\nAuthor: Grace\nCreated: 2024-01-01T10:00:00.000+0000\n\
             Updated: 2024-01-01T11:00:00.000+0000\nBody: Looks good\n\n\
             ID: 101\nAuthor: Unknown\nCreated: c\nUpdated: u\nBody: legacy text\n\n"
        );
    }

    #[test]
    fn test_no_comments() {
        assert_eq!(format_comments(&[]), "No comments found for this issue.");
    }
}
