//! Issue update tool

use crate::adf;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::UpdateIssueRequest;
use crate::JiraMcpError;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::{Map, Value};

/// Tool for changing an issue's summary or description
#[derive(Default)]
pub struct UpdateIssueTool;

impl UpdateIssueTool {
    /// Creates a new instance of the UpdateIssueTool
    pub fn new() -> Self {
        Self
    }

    /// Fields object holding only the non-empty changes
    fn changed_fields(request: &UpdateIssueRequest) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(summary) = request.summary.as_deref().filter(|s| !s.trim().is_empty()) {
            fields.insert("summary".to_string(), Value::String(summary.to_string()));
        }
        if let Some(description) = request
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
        {
            fields.insert(
                "description".to_string(),
                adf::document_from_text(description),
            );
        }
        fields
    }
}

#[async_trait]
impl McpTool for UpdateIssueTool {
    fn name(&self) -> &'static str {
        "jira_update_issue"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("issues", "update")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<UpdateIssueRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: UpdateIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        McpValidation::validate_not_empty(&request.issue_key, "issue key")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate issue key"))?;

        let fields = Self::changed_fields(&request);
        if fields.is_empty() {
            return Err(McpErrorHandler::handle_error(
                JiraMcpError::validation("at least one of summary or description is required"),
                "validate update",
            ));
        }

        tracing::debug!("Updating {} field(s) of {}", fields.len(), request.issue_key);
        McpErrorHandler::handle_result(
            context
                .client
                .update_issue(request.issue_key.trim(), Value::Object(fields))
                .await,
            "update issue",
        )?;
        tracing::info!("Updated issue {}", request.issue_key.trim());

        Ok(BaseToolImpl::create_success_response(
            "Issue updated successfully!",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tools::test_support::{args, offline_context};
    use serde_json::json;

    #[test]
    fn test_only_non_empty_fields_are_sent() {
        let request: UpdateIssueRequest = serde_json::from_value(json!({
            "issue_key": "KP-1",
            "summary": "New title",
            "description": "   "
        }))
        .unwrap();
        let fields = UpdateIssueTool::changed_fields(&request);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["summary"], "New title");
    }

    #[test]
    fn test_description_is_sent_as_document() {
        let request: UpdateIssueRequest = serde_json::from_value(json!({
            "issue_key": "KP-1",
            "description": "Line"
        }))
        .unwrap();
        let fields = UpdateIssueTool::changed_fields(&request);
        assert_eq!(fields["description"]["type"], "doc");
    }

    #[tokio::test]
    async fn test_update_without_changes_is_rejected() {
        let err = UpdateIssueTool::new()
            .execute(args(json!({ "issue_key": "KP-1" })), &offline_context())
            .await
            .unwrap_err();
        assert_eq!(
            err.message,
            "at least one of summary or description is required"
        );
    }
}
