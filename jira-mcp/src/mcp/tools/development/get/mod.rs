//! Development information tool

use crate::devinfo::{DevInfoAggregator, IncludeFlags};
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::DevelopmentInfoRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool reporting the branches, pull requests, commits and builds of an issue
#[derive(Default)]
pub struct GetDevelopmentInformationTool;

impl GetDevelopmentInformationTool {
    /// Creates a new instance of the GetDevelopmentInformationTool
    pub fn new() -> Self {
        Self
    }
}

impl From<&DevelopmentInfoRequest> for IncludeFlags {
    fn from(request: &DevelopmentInfoRequest) -> Self {
        Self {
            branches: request.include_branches,
            pull_requests: request.include_pull_requests,
            commits: request.include_commits,
            builds: request.include_builds,
        }
    }
}

#[async_trait]
impl McpTool for GetDevelopmentInformationTool {
    fn name(&self) -> &'static str {
        "jira_get_development_information"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("development", "get")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<DevelopmentInfoRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: DevelopmentInfoRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::debug!("Collecting development information for {}", request.issue_key);

        // Aggregator errors already name the failed step
        let info = DevInfoAggregator::new(context.dev_status.as_ref())
            .aggregate(
                &request.issue_key,
                IncludeFlags::from(&request),
                &context.cancellation,
            )
            .await
            .map_err(|e| McpErrorHandler::handle_error(e, "get development information"))?;

        tracing::info!(
            "Found {} development entities for {}",
            info.entity_count(),
            info.issue_key
        );

        let body = serde_json::to_string(&info).map_err(|e| {
            McpErrorHandler::handle_error(e.into(), "serialize development information")
        })?;
        Ok(BaseToolImpl::create_success_response(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devinfo::mock_source::MockDevStatusSource;
    use crate::devinfo::{Branch, DevStatusDetail, DevStatusResponse, PullRequest};
    use crate::mcp::tools::test_support::{args, offline_context, text};
    use crate::JiraMcpError;
    use rmcp::model::ErrorCode;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn source() -> MockDevStatusSource {
        MockDevStatusSource::new()
            .with_issue("PROJ-1", "10001")
            .with_summary(
                "10001",
                json!({ "summary": {
                    "branch": { "byInstanceType": { "GitHub": { "count": 1 } } },
                    "pullrequest": { "byInstanceType": { "GitHub": { "count": 1 } } }
                }}),
            )
            .with_detail(
                "GitHub",
                "branch",
                DevStatusResponse {
                    errors: Vec::new(),
                    detail: vec![DevStatusDetail {
                        branches: vec![Branch {
                            name: "feature/PROJ-1".to_string(),
                            ..Default::default()
                        }],
                        ..Default::default()
                    }],
                },
            )
            .with_detail(
                "GitHub",
                "pullrequest",
                DevStatusResponse {
                    errors: Vec::new(),
                    detail: vec![DevStatusDetail {
                        pull_requests: vec![PullRequest {
                            id: "#7".to_string(),
                            status: "OPEN".to_string(),
                            ..Default::default()
                        }],
                        ..Default::default()
                    }],
                },
            )
    }

    fn context_with(source: MockDevStatusSource) -> ToolContext {
        offline_context().with_dev_status(Arc::new(source))
    }

    #[tokio::test]
    async fn test_returns_every_category_by_default() {
        let result = GetDevelopmentInformationTool::new()
            .execute(args(json!({ "issue_key": "PROJ-1" })), &context_with(source()))
            .await
            .unwrap();

        let value: Value = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(value["issueKey"], "PROJ-1");
        assert_eq!(value["branches"][0]["name"], "feature/PROJ-1");
        assert_eq!(value["pullRequests"][0]["status"], "OPEN");
        assert_eq!(value["repositories"], json!([]));
        assert_eq!(value["builds"], json!([]));
    }

    #[tokio::test]
    async fn test_include_flags_filter_categories() {
        let result = GetDevelopmentInformationTool::new()
            .execute(
                args(json!({ "issue_key": "PROJ-1", "include_pull_requests": true })),
                &context_with(source()),
            )
            .await
            .unwrap();

        let value: Value = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(value["branches"], json!([]));
        assert_eq!(value["pullRequests"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_issue_is_invalid_params() {
        let err = GetDevelopmentInformationTool::new()
            .execute(args(json!({ "issue_key": "PROJ-404" })), &context_with(source()))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("issue not found"));
    }

    #[tokio::test]
    async fn test_auth_failure_is_internal_error() {
        let source = source().fail_resolve_with(JiraMcpError::AuthFailed {
            endpoint: "/rest/api/3/issue/PROJ-1".to_string(),
        });
        let err = GetDevelopmentInformationTool::new()
            .execute(args(json!({ "issue_key": "PROJ-1" })), &context_with(source))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn test_missing_summary_endpoint_is_reported_in_body() {
        let source = MockDevStatusSource::new().with_issue("PROJ-2", "10002");
        let result = GetDevelopmentInformationTool::new()
            .execute(args(json!({ "issue_key": "PROJ-2" })), &context_with(source))
            .await
            .unwrap();

        let value: Value = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(value["error"], crate::devinfo::ENDPOINT_NOT_FOUND);
        assert_eq!(value["builds"], json!([]));
    }

    #[tokio::test]
    async fn test_blank_issue_key_rejected() {
        let err = GetDevelopmentInformationTool::new()
            .execute(args(json!({ "issue_key": "  " })), &context_with(source()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "Issue key cannot be empty");
    }
}
