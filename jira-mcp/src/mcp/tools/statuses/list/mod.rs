//! Status listing tool

use crate::client::IssueTypeStatuses;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::ProjectKeyRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing a project's statuses
#[derive(Default)]
pub struct ListStatusesTool;

impl ListStatusesTool {
    /// Creates a new instance of the ListStatusesTool
    pub fn new() -> Self {
        Self
    }
}

/// Render statuses grouped by issue type
pub fn format_statuses(issue_types: &[IssueTypeStatuses]) -> String {
    if issue_types.is_empty() {
        return "No issue types found for this project.".to_string();
    }

    let mut result = String::from("Available Statuses:\n");
    for issue_type in issue_types {
        result.push_str(&format!("\nIssue Type: {}\n", issue_type.name));
        for status in &issue_type.statuses {
            result.push_str(&format!("  - {}: {}\n", status.name, status.id));
        }
    }
    result
}

#[async_trait]
impl McpTool for ListStatusesTool {
    fn name(&self) -> &'static str {
        "jira_list_statuses"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("statuses", "list")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<ProjectKeyRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ProjectKeyRequest = BaseToolImpl::parse_arguments(arguments)?;
        McpValidation::validate_not_empty(&request.project_key, "project key")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate project key"))?;

        let statuses = McpErrorHandler::handle_result(
            context
                .client
                .list_project_statuses(request.project_key.trim())
                .await,
            "get statuses",
        )?;

        Ok(BaseToolImpl::create_success_response(format_statuses(
            &statuses,
        )))
    }
}
