//! Issue linking tool

use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::LinkIssuesRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for linking two issues
#[derive(Default)]
pub struct LinkIssuesTool;

impl LinkIssuesTool {
    /// Creates a new instance of the LinkIssuesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for LinkIssuesTool {
    fn name(&self) -> &'static str {
        "jira_link_issues"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("links", "create")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<LinkIssuesRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: LinkIssuesRequest = BaseToolImpl::parse_arguments(arguments)?;
        for (value, field) in [
            (&request.inward_issue, "inward issue"),
            (&request.outward_issue, "outward issue"),
            (&request.link_type, "link type"),
        ] {
            McpValidation::validate_not_empty(value, field)
                .map_err(|e| McpErrorHandler::handle_error(e, "validate link"))?;
        }

        let (inward, outward, link_type) = (
            request.inward_issue.trim(),
            request.outward_issue.trim(),
            request.link_type.trim(),
        );
        McpErrorHandler::handle_result(
            context
                .client
                .link_issues(inward, outward, link_type, request.comment.as_deref())
                .await,
            "link issues",
        )?;
        tracing::info!("Linked {} and {} ({})", inward, outward, link_type);

        Ok(BaseToolImpl::create_success_response(format!(
            "Successfully linked issues {inward} and {outward} with link type \"{link_type}\""
        )))
    }
}
