//! Backend access for the aggregator
//!
//! [`DevStatusSource`] is the seam between the aggregation algorithm and the
//! REST API. The production implementation lives on [`JiraClient`]; tests use
//! [`super::mock_source::MockDevStatusSource`].

use super::model::DevStatusResponse;
use super::IntegrationEndpoint;
use crate::client::{Issue, JiraClient};
use crate::{JiraMcpError, Result};
use async_trait::async_trait;
use serde_json::Value;

/// The three calls the aggregator needs from the backend
#[async_trait]
pub trait DevStatusSource: Send + Sync {
    /// Translate an issue key into the numeric issue id.
    ///
    /// Fails with [`JiraMcpError::NotFound`], [`JiraMcpError::AuthFailed`] or
    /// [`JiraMcpError::Upstream`].
    async fn resolve_issue_id(&self, issue_key: &str) -> Result<String>;

    /// Fetch the summary document listing configured integrations.
    ///
    /// Returns `Ok(None)` when the summary endpoint itself does not exist.
    async fn fetch_summary(&self, issue_id: &str) -> Result<Option<Value>>;

    /// Fetch the details contributed by one integration
    async fn fetch_detail(
        &self,
        issue_id: &str,
        endpoint: &IntegrationEndpoint,
    ) -> Result<DevStatusResponse>;
}

const ISSUE_SEGMENTS: [&str; 4] = ["rest", "api", "3", "issue"];
const DEV_STATUS_SEGMENTS: [&str; 4] = ["rest", "dev-status", "latest", "issue"];

impl JiraClient {
    fn endpoint_path(&self, segments: &[&str]) -> String {
        self.url(segments, &[])
            .map(|url| url.path().to_string())
            .unwrap_or_else(|_| format!("/{}", segments.join("/")))
    }
}

#[async_trait]
impl DevStatusSource for JiraClient {
    async fn resolve_issue_id(&self, issue_key: &str) -> Result<String> {
        let segments = [&ISSUE_SEGMENTS[..], &[issue_key][..]].concat();
        let endpoint = self.endpoint_path(&segments);

        let issue: Issue = match self
            .get_json(&segments, &[("fields", "id".to_string())])
            .await
        {
            Ok(issue) => issue,
            Err(JiraMcpError::Api { status: 404, .. }) => {
                return Err(JiraMcpError::NotFound {
                    issue_key: issue_key.to_string(),
                    endpoint,
                })
            }
            Err(JiraMcpError::Api { status: 401, .. }) => {
                return Err(JiraMcpError::AuthFailed { endpoint })
            }
            Err(JiraMcpError::Api { status, body, .. }) => {
                return Err(JiraMcpError::upstream(
                    endpoint,
                    format!("failed to retrieve issue: {status}: {body}"),
                ))
            }
            Err(other) => {
                return Err(JiraMcpError::upstream(
                    endpoint,
                    format!("failed to retrieve issue: {other}"),
                ))
            }
        };

        if issue.id.is_empty() {
            return Err(JiraMcpError::upstream(
                endpoint,
                "failed to retrieve issue: response carried no issue id",
            ));
        }
        Ok(issue.id)
    }

    async fn fetch_summary(&self, issue_id: &str) -> Result<Option<Value>> {
        let segments = [&DEV_STATUS_SEGMENTS[..], &["summary"][..]].concat();
        let query = [("issueId", issue_id.to_string())];

        match self.get_json::<Value>(&segments, &query).await {
            Ok(summary) => Ok(Some(summary)),
            Err(JiraMcpError::Api { status: 404, .. }) => Ok(None),
            Err(JiraMcpError::Api {
                status: 401,
                endpoint,
                ..
            }) => Err(JiraMcpError::AuthFailed { endpoint }),
            Err(JiraMcpError::Api {
                status,
                endpoint,
                body,
            }) => Err(JiraMcpError::upstream(
                endpoint,
                format!("failed to retrieve development summary: {status}: {body}"),
            )),
            Err(other) => Err(JiraMcpError::upstream(
                self.endpoint_path(&segments),
                format!("failed to retrieve development summary: {other}"),
            )),
        }
    }

    async fn fetch_detail(
        &self,
        issue_id: &str,
        endpoint: &IntegrationEndpoint,
    ) -> Result<DevStatusResponse> {
        let segments = [&DEV_STATUS_SEGMENTS[..], &["detail"][..]].concat();
        self.get_json(
            &segments,
            &[
                ("issueId", issue_id.to_string()),
                ("applicationType", endpoint.application_type.clone()),
                ("dataType", endpoint.data_type.clone()),
            ],
        )
        .await
    }
}
