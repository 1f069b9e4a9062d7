//! Issue type listing tool

use crate::client::IssueType;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::ProjectKeyRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing the issue types of a project
#[derive(Default)]
pub struct ListIssueTypesTool;

impl ListIssueTypesTool {
    /// Creates a new instance of the ListIssueTypesTool
    pub fn new() -> Self {
        Self
    }
}

/// Render issue types as text blocks
pub fn format_issue_types(issue_types: &[IssueType]) -> String {
    if issue_types.is_empty() {
        return "No issue types found for this project.".to_string();
    }

    let mut result = String::from("Available Issue Types:\n\n");
    for issue_type in issue_types {
        let subtask = if issue_type.subtask {
            " (Subtask Type)"
        } else {
            ""
        };
        result.push_str(&format!(
            "ID: {}\nName: {}{}\n",
            issue_type.id, issue_type.name, subtask
        ));
        if !issue_type.description.is_empty() {
            result.push_str(&format!("Description: {}\n", issue_type.description));
        }
        if !issue_type.icon_url.is_empty() {
            result.push_str(&format!("Icon URL: {}\n", issue_type.icon_url));
        }
        if let Some(scope) = &issue_type.scope {
            result.push_str(&format!("Scope: {}\n", scope.scope_type));
        }
        result.push('\n');
    }
    result
}

#[async_trait]
impl McpTool for ListIssueTypesTool {
    fn name(&self) -> &'static str {
        "jira_list_issue_types"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("issues", "list_types")
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

        let issue_types = McpErrorHandler::handle_result(
            context
                .client
                .list_project_issue_types(request.project_key.trim())
                .await,
            "get issue types",
        )?;
        tracing::debug!(
            "Project {} has {} issue types",
            request.project_key,
            issue_types.len()
        );

        Ok(BaseToolImpl::create_success_response(format_issue_types(
            &issue_types,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::IssueTypeScope;

    #[test]
    fn test_format_issue_types() {
        let types = vec![
            IssueType {
                id: "10001".to_string(),
                name: "Task".to_string(),
                description: "A task".to_string(),
                ..Default::default()
            },
            IssueType {
                id: "10002".to_string(),
                name: "Subtask".to_string(),
                subtask: true,
                scope: Some(IssueTypeScope {
                    scope_type: "PROJECT".to_string(),
                }),
                ..Default::default()
            },
        ];

        assert_eq!(
            format_issue_types(&types),
            "Available Issue Types:\n\n\
             ID: 10001\nName: Task\nDescription: A task\n\n\
             ID: 10002\nName: Subtask (Subtask Type)\nScope: PROJECT\n\n"
        );
    }

    #[test]
    fn test_no_issue_types() {
        assert_eq!(
            format_issue_types(&[]),
            "No issue types found for this project."
        );
    }
}
