//! Project version listing tool

use crate::client::Version;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::ProjectKeyRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing a project's versions
#[derive(Default)]
pub struct ListProjectVersionsTool;

impl ListProjectVersionsTool {
    /// Creates a new instance of the ListProjectVersionsTool
    pub fn new() -> Self {
        Self
    }
}

/// Archived takes precedence over released
fn version_status(version: &Version) -> &'static str {
    if version.archived {
        "Archived"
    } else if version.released {
        "Released"
    } else {
        "In Development"
    }
}

pub fn format_project_versions(project_key: &str, versions: &[Version]) -> String {
    if versions.is_empty() {
        return format!("No versions found for project {project_key}.");
    }

    let mut result = format!("Project {project_key} Versions:\n\n");
    for (i, version) in versions.iter().enumerate() {
        if i > 0 {
            result.push('\n');
        }
        result.push_str(&format!("ID: {}\n", version.id));
        result.push_str(&format!("Name: {}\n", version.name));
        if !version.description.is_empty() {
            result.push_str(&format!("Description: {}\n", version.description));
        }
        result.push_str(&format!("Status: {}\n", version_status(version)));
        if let Some(date) = version.release_date.as_deref().filter(|d| !d.is_empty()) {
            result.push_str(&format!("Release Date: {date}\n"));
        }
        if let Some(date) = version.start_date.as_deref().filter(|d| !d.is_empty()) {
            result.push_str(&format!("Start Date: {date}\n"));
        }
    }
    result
}

#[async_trait]
impl McpTool for ListProjectVersionsTool {
    fn name(&self) -> &'static str {
        "jira_list_project_versions"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("versions", "list")
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
        let project_key = request.project_key.trim();

        let versions = McpErrorHandler::handle_result(
            context.client.list_project_versions(project_key).await,
            "list project versions",
        )?;

        Ok(BaseToolImpl::create_success_response(
            format_project_versions(project_key, &versions),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_project_versions() {
        let versions: Vec<Version> = serde_json::from_value(json!([
            { "id": "1", "name": "v1.0", "released": true, "releaseDate": "2024-01-10" },
            { "id": "2", "name": "v0.9", "released": true, "archived": true },
            { "id": "3", "name": "v2.0", "description": "Next", "startDate": "2024-03-01" }
        ]))
        .unwrap();

        assert_eq!(
            format_project_versions("KP", &versions),
            "Project KP Versions:\n\n\
             ID: 1\nName: v1.0\nStatus: Released\nRelease Date: 2024-01-10\n\n\
             ID: 2\nName: v0.9\nStatus: Archived\n\n\
             ID: 3\nName: v2.0\nDescription: Next\nStatus: In Development\nStart Date: 2024-03-01\n"
        );
    }

    #[test]
    fn test_no_versions() {
        assert_eq!(
            format_project_versions("KP", &[]),
            "No versions found for project KP."
        );
    }
}
