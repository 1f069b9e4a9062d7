//! Version detail tool

use crate::client::Version;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::VersionIdRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for reading one version
#[derive(Default)]
pub struct GetVersionTool;

impl GetVersionTool {
    /// Creates a new instance of the GetVersionTool
    pub fn new() -> Self {
        Self
    }
}

pub fn format_version_details(version: &Version) -> String {
    let mut result = String::from("Version Details:\n\n");
    result.push_str(&format!("ID: {}\n", version.id));
    result.push_str(&format!("Name: {}\n", version.name));
    if !version.description.is_empty() {
        result.push_str(&format!("Description: {}\n", version.description));
    }
    if let Some(project_id) = version.project_id.filter(|id| *id != 0) {
        result.push_str(&format!("Project ID: {project_id}\n"));
    }
    result.push_str(&format!("Released: {}\n", version.released));
    result.push_str(&format!("Archived: {}\n", version.archived));
    if let Some(date) = version.release_date.as_deref().filter(|d| !d.is_empty()) {
        result.push_str(&format!("Release Date: {date}\n"));
    }
    if !version.self_url.is_empty() {
        result.push_str(&format!("URL: {}\n", version.self_url));
    }
    result
}

#[async_trait]
impl McpTool for GetVersionTool {
    fn name(&self) -> &'static str {
        "jira_get_version"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("versions", "get")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<VersionIdRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: VersionIdRequest = BaseToolImpl::parse_arguments(arguments)?;
        McpValidation::validate_not_empty(&request.version_id, "version id")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate version id"))?;

        let version = McpErrorHandler::handle_result(
            context.client.get_version(request.version_id.trim()).await,
            "get version",
        )?;

        Ok(BaseToolImpl::create_success_response(
            format_version_details(&version),
        ))
    }
}
