//! In-memory [`DevStatusSource`] for tests
//!
//! Responses are registered up front with the builder methods. Every call is
//! recorded so tests can assert which requests were (or were not) issued.
//!
//! ```ignore
//! let source = MockDevStatusSource::new()
//!     .with_issue("PROJ-1", "10001")
//!     .with_summary("10001", summary_json)
//!     .with_detail("GitHub", "branch", response);
//! ```

use super::model::DevStatusResponse;
use super::{DevStatusSource, IntegrationEndpoint};
use crate::{JiraMcpError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Mock dev-status backend
#[derive(Debug, Clone, Default)]
pub struct MockDevStatusSource {
    /// Issue key to numeric id; unknown keys resolve as not found
    issues: HashMap<String, String>,
    /// Issue id to summary document; unknown ids behave like a missing endpoint
    summaries: HashMap<String, Value>,
    details: HashMap<IntegrationEndpoint, DevStatusResponse>,
    failing_details: HashSet<IntegrationEndpoint>,
    /// Error returned by the next resolve call
    resolve_error: Arc<Mutex<Option<JiraMcpError>>>,
    /// Cancel the token once this many detail calls completed
    cancel_after: Option<(usize, CancellationToken)>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockDevStatusSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(mut self, issue_key: &str, issue_id: &str) -> Self {
        self.issues
            .insert(issue_key.to_string(), issue_id.to_string());
        self
    }

    pub fn with_summary(mut self, issue_id: &str, summary: Value) -> Self {
        self.summaries.insert(issue_id.to_string(), summary);
        self
    }

    pub fn with_detail(
        mut self,
        application_type: &str,
        data_type: &str,
        response: DevStatusResponse,
    ) -> Self {
        self.details.insert(
            IntegrationEndpoint::new(application_type, data_type),
            response,
        );
        self
    }

    /// Make the detail request for a pair fail with a server error
    pub fn fail_detail(mut self, application_type: &str, data_type: &str) -> Self {
        self.failing_details
            .insert(IntegrationEndpoint::new(application_type, data_type));
        self
    }

    pub fn fail_resolve_with(self, error: JiraMcpError) -> Self {
        // The mutex is fresh and uncontended while building
        if let Ok(mut slot) = self.resolve_error.try_lock() {
            *slot = Some(error);
        }
        self
    }

    pub fn cancel_after_details(mut self, count: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((count, token));
        self
    }

    /// Recorded calls, e.g. `resolve PROJ-1`, `summary 10001`, `detail 10001 GitHub branch`
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    pub async fn detail_call_count(&self) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|call| call.starts_with("detail "))
            .count()
    }

    async fn record(&self, call: String) {
        self.calls.lock().await.push(call);
    }
}

#[async_trait]
impl DevStatusSource for MockDevStatusSource {
    async fn resolve_issue_id(&self, issue_key: &str) -> Result<String> {
        self.record(format!("resolve {issue_key}")).await;

        if let Some(error) = self.resolve_error.lock().await.take() {
            return Err(error);
        }
        self.issues
            .get(issue_key)
            .cloned()
            .ok_or_else(|| JiraMcpError::NotFound {
                issue_key: issue_key.to_string(),
                endpoint: format!("/rest/api/3/issue/{issue_key}"),
            })
    }

    async fn fetch_summary(&self, issue_id: &str) -> Result<Option<Value>> {
        self.record(format!("summary {issue_id}")).await;
        Ok(self.summaries.get(issue_id).cloned())
    }

    async fn fetch_detail(
        &self,
        issue_id: &str,
        endpoint: &IntegrationEndpoint,
    ) -> Result<DevStatusResponse> {
        self.record(format!(
            "detail {issue_id} {} {}",
            endpoint.application_type, endpoint.data_type
        ))
        .await;

        let result = if self.failing_details.contains(endpoint) {
            Err(JiraMcpError::Api {
                status: 500,
                endpoint: "/rest/dev-status/latest/issue/detail".to_string(),
                body: "simulated failure".to_string(),
            })
        } else {
            Ok(self.details.get(endpoint).cloned().unwrap_or_default())
        };

        if let Some((count, token)) = &self.cancel_after {
            if self.detail_call_count().await >= *count {
                token.cancel();
            }
        }
        result
    }
}
