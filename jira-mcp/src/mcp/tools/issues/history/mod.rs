//! Issue change history tool

use crate::client::Issue;
use crate::common::time::format_timestamp;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::IssueKeyRequest;
use crate::JiraMcpError;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Serialize;

const EMPTY_VALUE: &str = "(empty)";

/// One changed field
#[derive(Debug, Serialize, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub from_string: String,
    pub to_string: String,
}

/// One changelog entry
#[derive(Debug, Serialize, PartialEq)]
pub struct HistoryEntry {
    pub date: String,
    pub author: String,
    pub changes: Vec<FieldChange>,
}

/// Tool output
#[derive(Debug, Serialize, PartialEq)]
pub struct IssueHistory {
    pub issue_key: String,
    pub history: Vec<HistoryEntry>,
    pub count: usize,
}

fn or_empty(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY_VALUE.to_string(),
    }
}

impl IssueHistory {
    /// Flatten the changelog of an issue fetched with `expand=changelog`
    pub fn from_issue(issue_key: &str, issue: &Issue) -> Self {
        let history: Vec<HistoryEntry> = issue
            .histories()
            .iter()
            .map(|h| HistoryEntry {
                date: format_timestamp(&h.created),
                author: h
                    .author
                    .as_ref()
                    .map(|a| a.display_name.clone())
                    .unwrap_or_default(),
                changes: h
                    .items
                    .iter()
                    .map(|item| FieldChange {
                        field: item.field.clone(),
                        from_string: or_empty(item.from_string.as_deref()),
                        to_string: or_empty(item.to_string.as_deref()),
                    })
                    .collect(),
            })
            .collect();

        Self {
            issue_key: issue_key.to_string(),
            count: history.len(),
            history,
        }
    }
}

/// Tool for reading an issue's changelog
#[derive(Default)]
pub struct IssueHistoryTool;

impl IssueHistoryTool {
    /// Creates a new instance of the IssueHistoryTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for IssueHistoryTool {
    fn name(&self) -> &'static str {
        "jira_get_issue_history"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("issues", "history")
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
                .get_issue(issue_key, None, Some("changelog"))
                .await,
            "get issue history",
        )?;

        if issue.histories().is_empty() {
            return Ok(BaseToolImpl::create_success_response(format!(
                "No history found for issue {issue_key}"
            )));
        }

        let history = IssueHistory::from_issue(issue_key, &issue);
        tracing::debug!("Issue {} has {} history entries", issue_key, history.count);
        let json = serde_json::to_string(&history)
            .map_err(|e| McpErrorHandler::handle_error(JiraMcpError::from(e), "marshal result"))?;

        Ok(BaseToolImpl::create_success_response(json))
    }
}
