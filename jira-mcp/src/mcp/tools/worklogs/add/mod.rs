//! Worklog creation tool

use crate::common::time::{now_jira_timestamp, parse_jira_timestamp, parse_time_spent};
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::AddWorklogRequest;
use crate::JiraMcpError;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for logging work on an issue
#[derive(Default)]
pub struct AddWorklogTool;

impl AddWorklogTool {
    /// Creates a new instance of the AddWorklogTool
    pub fn new() -> Self {
        Self
    }

    /// Caller-supplied start time, or now
    fn started(value: Option<&str>) -> crate::Result<String> {
        match value.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(now_jira_timestamp()),
            Some(started) if parse_jira_timestamp(started).is_some() => Ok(started.to_string()),
            Some(started) => Err(JiraMcpError::validation(format!(
                "invalid started timestamp: {started} (expected e.g. 2024-01-15T09:30:00.000+0000)"
            ))),
        }
    }
}

#[async_trait]
impl McpTool for AddWorklogTool {
    fn name(&self) -> &'static str {
        "jira_add_worklog"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("worklogs", "add")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<AddWorklogRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: AddWorklogRequest = BaseToolImpl::parse_arguments(arguments)?;
        McpValidation::validate_not_empty(&request.issue_key, "issue key")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate issue key"))?;
        let seconds = parse_time_spent(&request.time_spent)
            .map_err(|e| McpErrorHandler::handle_error(e, "parse time spent"))?;
        let started = Self::started(request.started.as_deref())
            .map_err(|e| McpErrorHandler::handle_error(e, "parse started"))?;
        let issue_key = request.issue_key.trim();

        tracing::debug!("Logging {}s on {} starting {}", seconds, issue_key, started);
        let worklog = McpErrorHandler::handle_result(
            context
                .client
                .add_worklog(issue_key, seconds, &started, request.comment.as_deref())
                .await,
            "add worklog",
        )?;
        tracing::info!("Added worklog {} to {}", worklog.id, issue_key);

        let logged_seconds = if worklog.time_spent_seconds > 0 {
            worklog.time_spent_seconds
        } else {
            seconds
        };
        let date_started = if worklog.started.is_empty() {
            started
        } else {
            worklog.started.clone()
        };

        Ok(BaseToolImpl::create_success_response(format!(
            "Worklog added successfully!\nIssue: {}\nWorklog ID: {}\nTime Spent: {} ({} seconds)\nDate Started: {}\nAuthor: {}",
            issue_key,
            worklog.id,
            request.time_spent.trim(),
            logged_seconds,
            date_started,
            worklog
                .author
                .as_ref()
                .map(|a| a.display_name.as_str())
                .unwrap_or("Unknown")
        )))
    }
}
