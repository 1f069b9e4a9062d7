//! Related issues tool

use crate::client::IssueLink;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::IssueKeyRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing the issues linked to an issue
#[derive(Default)]
pub struct GetRelatedIssuesTool;

impl GetRelatedIssuesTool {
    /// Creates a new instance of the GetRelatedIssuesTool
    pub fn new() -> Self {
        Self
    }
}

/// Render issue links; a link with both sides set is reported by its inward side
pub fn format_related_issues(issue_key: &str, links: &[IssueLink]) -> String {
    if links.is_empty() {
        return format!("Issue {issue_key} has no linked issues.");
    }

    let mut result = format!("Related issues for {issue_key}:\n\n");
    for link in links {
        let (relationship, related) = match (&link.inward_issue, &link.outward_issue) {
            (Some(inward), _) => (&link.link_type.inward, inward),
            (None, Some(outward)) => (&link.link_type.outward, outward),
            (None, None) => continue,
        };

        result.push_str(&format!("Relationship: {relationship}\n"));
        result.push_str(&format!("Issue: {}\n", related.key));
        result.push_str(&format!("Summary: {}\n", related.summary()));
        result.push_str(&format!(
            "Status: {}\n",
            related.status_name().unwrap_or("Unknown")
        ));
        result.push('\n');
    }
    result
}

#[async_trait]
impl McpTool for GetRelatedIssuesTool {
    fn name(&self) -> &'static str {
        "jira_get_related_issues"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("links", "related")
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
        let issue_key = request.issue_key.trim();

        let issue = McpErrorHandler::handle_result(
            context
                .client
                .get_issue(issue_key, Some("issuelinks"), None)
                .await,
            "get issue",
        )?;
        let links = issue
            .fields
            .as_ref()
            .map(|f| f.issuelinks.as_slice())
            .unwrap_or(&[]);

        Ok(BaseToolImpl::create_success_response(
            format_related_issues(issue_key, links),
        ))
    }
}
