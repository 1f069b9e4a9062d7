//! Sprint report tool
//!
//! Story points come from the changelog because team-managed projects do not
//! expose the estimate as a stable field id.

use crate::client::{Issue, Sprint};
use crate::common::time::{parse_jira_timestamp, timestamp_date};
use crate::format::STORY_POINTS_FIELD;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::SprintIdRequest;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use std::collections::HashMap;

const DONE_STATUSES: [&str; 3] = ["Done", "Closed", "Resolved"];

/// Latest story point estimate recorded in the changelog, 0 when never estimated
pub fn story_points(issue: &Issue) -> f64 {
    issue
        .histories()
        .iter()
        .flat_map(|h| h.items.iter())
        .filter(|item| item.field == STORY_POINTS_FIELD)
        .filter_map(|item| item.to_string.as_deref())
        .filter_map(|value| value.trim().parse::<f64>().ok())
        .last()
        .unwrap_or(0.0)
}

/// Day of the first status change into a done status
pub fn done_date(issue: &Issue) -> Option<NaiveDate> {
    issue
        .histories()
        .iter()
        .find(|h| {
            h.items.iter().any(|item| {
                item.field == "status"
                    && item
                        .to_string
                        .as_deref()
                        .is_some_and(|s| DONE_STATUSES.contains(&s))
            })
        })
        .and_then(|h| timestamp_date(&h.created))
}

fn is_bug(issue: &Issue) -> bool {
    issue
        .fields
        .as_ref()
        .and_then(|f| f.issuetype.as_ref())
        .is_some_and(|t| t.name == "Bug")
}

/// Computed sprint figures
#[derive(Debug, Clone, PartialEq)]
pub struct SprintReport {
    pub name: String,
    pub state: String,
    pub total_points: f64,
    pub bug_count: usize,
    /// Points remaining at the end of each sprint day
    pub burndown: Vec<(NaiveDate, f64)>,
}

impl SprintReport {
    pub fn build(sprint: &Sprint, issues: &[Issue]) -> Self {
        let mut total_points = 0.0;
        let mut burned: HashMap<NaiveDate, f64> = HashMap::new();
        for issue in issues {
            let points = story_points(issue);
            total_points += points;
            if let Some(day) = done_date(issue) {
                *burned.entry(day).or_default() += points;
            }
        }

        let mut burndown = Vec::new();
        let start = sprint.start_date.as_deref().and_then(parse_jira_timestamp);
        let end = sprint.end_date.as_deref().and_then(parse_jira_timestamp);
        if let (Some(start), Some(end)) = (start, end) {
            let mut remaining = total_points;
            let mut day = start;
            while day <= end {
                let date = day.date_naive();
                if let Some(points) = burned.get(&date) {
                    remaining = (remaining - points).max(0.0);
                }
                burndown.push((date, remaining));
                day += Duration::days(1);
            }
        }

        Self {
            name: sprint.name.clone(),
            state: sprint.state.clone(),
            total_points,
            bug_count: issues.iter().filter(|i| is_bug(i)).count(),
            burndown,
        }
    }

    pub fn render(&self) -> String {
        let table: Vec<String> = self
            .burndown
            .iter()
            .map(|(date, remaining)| format!("{}: {:.1}", date.format("%Y-%m-%d"), remaining))
            .collect();
        format!(
            "Sprint Report\nName: {}\nState: {}\nTotal Points: {:.1}\nBug Count: {}\n\nBurndown:\n{}",
            self.name,
            self.state,
            self.total_points,
            self.bug_count,
            table.join("\n")
        )
    }
}

/// Tool for summarising a sprint
#[derive(Default)]
pub struct SprintReportTool;

impl SprintReportTool {
    /// Creates a new instance of the SprintReportTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SprintReportTool {
    fn name(&self) -> &'static str {
        "jira_sprint_report"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("sprints", "report")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<SprintIdRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SprintIdRequest = BaseToolImpl::parse_arguments(arguments)?;
        let sprint_id = McpValidation::parse_id(&request.sprint_id, "sprint_id")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate sprint id"))?;

        let sprint = McpErrorHandler::handle_result(
            context.client.get_sprint(sprint_id).await,
            "get sprint",
        )?;
        let issues = McpErrorHandler::handle_result(
            context.client.get_sprint_issues(sprint_id).await,
            "get sprint issues",
        )?;

        let report = SprintReport::build(&sprint, &issues);
        tracing::info!(
            "Sprint {} report: {:.1} points across {} issues",
            sprint_id,
            report.total_points,
            issues.len()
        );

        Ok(BaseToolImpl::create_success_response(report.render()))
    }
}
