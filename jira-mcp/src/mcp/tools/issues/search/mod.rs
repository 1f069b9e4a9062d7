//! JQL search tool

use crate::format::{format_issue, format_issue_compact};
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::tools::issues::get::DEFAULT_EXPAND;
use crate::mcp::types::SearchIssueRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

const NO_MATCHES: &str = "No issues found matching the search criteria.";

/// Tool for searching issues with JQL
#[derive(Default)]
pub struct SearchIssueTool;

impl SearchIssueTool {
    /// Creates a new instance of the SearchIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchIssueTool {
    fn name(&self) -> &'static str {
        "jira_search_issue"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("issues", "search")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<SearchIssueRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SearchIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        McpValidation::validate_not_empty(&request.jql, "jql")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate jql"))?;

        let expand = request
            .expand
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(DEFAULT_EXPAND);
        tracing::debug!("Searching issues: {}", request.jql);

        let results = McpErrorHandler::handle_result(
            context
                .client
                .search_issues(
                    &request.jql,
                    request.fields.as_deref(),
                    Some(expand),
                    context.client.config().search_max_results,
                )
                .await,
            "search issues",
        )?;

        if results.issues.is_empty() {
            return Ok(BaseToolImpl::create_success_response(NO_MATCHES));
        }

        tracing::info!("Search matched {} issues", results.issues.len());
        let (render, separator): (fn(&crate::client::Issue) -> String, &str) = if request.compact {
            (format_issue_compact, "\n")
        } else {
            (format_issue, "\n===\n")
        };
        let rendered: Vec<String> = results.issues.iter().map(render).collect();

        Ok(BaseToolImpl::create_success_response(rendered.join(separator)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tools::test_support::{args, offline_context};
    use serde_json::json;

    #[tokio::test]
    async fn test_blank_jql_is_rejected() {
        let err = SearchIssueTool::new()
            .execute(args(json!({ "jql": "" })), &offline_context())
            .await
            .unwrap_err();
        assert_eq!(err.message, "Jql cannot be empty");
    }
}
