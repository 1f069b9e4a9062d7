//! Issue creation tool

use crate::adf;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::CreateIssueRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::json;

/// Tool for creating top-level issues
#[derive(Default)]
pub struct CreateIssueTool;

impl CreateIssueTool {
    /// Creates a new instance of the CreateIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateIssueTool {
    fn name(&self) -> &'static str {
        "jira_create_issue"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("issues", "create")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<CreateIssueRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CreateIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        for (value, field) in [
            (&request.project_key, "project key"),
            (&request.summary, "summary"),
            (&request.issue_type, "issue type"),
        ] {
            McpValidation::validate_not_empty(value, field)
                .map_err(|e| McpErrorHandler::handle_error(e, "validate issue fields"))?;
        }

        tracing::debug!(
            "Creating {} in project {}",
            request.issue_type,
            request.project_key
        );
        let fields = json!({
            "project": { "key": request.project_key.trim() },
            "summary": request.summary,
            "description": adf::document_from_text(&request.description),
            "issuetype": { "name": request.issue_type.trim() },
        });

        let created = McpErrorHandler::handle_result(
            context.client.create_issue(fields).await,
            "create issue",
        )?;
        tracing::info!("Created issue {}", created.key);

        Ok(BaseToolImpl::create_success_response(format!(
            "Issue created successfully!\nKey: {}\nID: {}\nURL: {}",
            created.key, created.id, created.self_url
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tools::test_support::{args, offline_context};
    use serde_json::json;

    #[tokio::test]
    async fn test_blank_summary_is_rejected() {
        let err = CreateIssueTool::new()
            .execute(
                args(json!({
                    "project_key": "KP",
                    "summary": "",
                    "description": "body",
                    "issue_type": "Task"
                })),
                &offline_context(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.message, "Summary cannot be empty");
    }

    #[tokio::test]
    async fn test_issue_type_is_required() {
        let err = CreateIssueTool::new()
            .execute(
                args(json!({ "project_key": "KP", "summary": "s", "description": "d" })),
                &offline_context(),
            )
            .await
            .unwrap_err();
        assert!(err.message.contains("issue_type"));
    }
}
