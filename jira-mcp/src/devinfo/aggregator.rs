use super::model::{Branch, Build, DevStatusDetail, PullRequest, Repository};
use super::{DevStatusSource, DevelopmentInfo, IncludeFlags, IntegrationEndpoint, DATA_TYPES};
use crate::{JiraMcpError, Result};
use serde_json::Value;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Extract every (application type, data type) pair from a summary document.
///
/// Pairs live under `summary.<dataType>.byInstanceType`, one key per
/// integration. The result is sorted so the fan-out order is reproducible.
pub fn discover_endpoints(summary: &Value) -> Vec<IntegrationEndpoint> {
    let mut endpoints: Vec<IntegrationEndpoint> = DATA_TYPES
        .iter()
        .filter_map(|data_type| {
            summary
                .pointer(&format!("/summary/{data_type}/byInstanceType"))
                .and_then(Value::as_object)
                .map(|instances| (data_type, instances))
        })
        .flat_map(|(data_type, instances)| {
            instances
                .keys()
                .map(move |application_type| IntegrationEndpoint::new(application_type, *data_type))
        })
        .collect();
    endpoints.sort();
    endpoints
}

/// Everything collected from successful detail requests, in fetch order
#[derive(Debug, Default)]
struct Merged {
    branches: Vec<Branch>,
    pull_requests: Vec<PullRequest>,
    repositories: Vec<Repository>,
    builds: Vec<Build>,
}

impl Merged {
    fn absorb(&mut self, details: Vec<DevStatusDetail>) {
        for detail in details {
            self.branches.extend(detail.branches);
            self.pull_requests.extend(detail.pull_requests);
            self.repositories.extend(detail.repositories);
            self.builds.extend(detail.builds);
            for provider in detail.jswdd_builds_data {
                self.builds.extend(provider.builds);
            }
        }
    }

    fn into_info(self, issue_key: &str, flags: IncludeFlags, dropped: usize) -> DevelopmentInfo {
        fn keep<T>(include: bool, items: Vec<T>) -> Vec<T> {
            if include {
                items
            } else {
                Vec::new()
            }
        }

        DevelopmentInfo {
            issue_key: issue_key.to_string(),
            error: None,
            message: None,
            branches: keep(flags.branches, self.branches),
            pull_requests: keep(flags.pull_requests, self.pull_requests),
            repositories: keep(flags.commits, self.repositories),
            builds: keep(flags.builds, self.builds),
            dropped,
        }
    }
}

/// Race a backend call against cancellation
async fn cancellable<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(JiraMcpError::Canceled),
        result = call => result,
    }
}

/// Collects development information for one issue from a [`DevStatusSource`]
pub struct DevInfoAggregator<'a, S: DevStatusSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: DevStatusSource + ?Sized> DevInfoAggregator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolve, discover, fan out, merge and filter.
    ///
    /// Detail requests run one at a time. Once `cancel` fires no further request
    /// is issued and the call fails with [`JiraMcpError::Canceled`].
    pub async fn aggregate(
        &self,
        issue_key: &str,
        flags: IncludeFlags,
        cancel: &CancellationToken,
    ) -> Result<DevelopmentInfo> {
        let issue_key = issue_key.trim();
        if issue_key.is_empty() {
            return Err(JiraMcpError::validation("Issue key cannot be empty"));
        }
        let flags = flags.effective();

        let issue_id = cancellable(cancel, self.source.resolve_issue_id(issue_key)).await?;
        tracing::debug!("Resolved {} to issue id {}", issue_key, issue_id);

        let summary = match cancellable(cancel, self.source.fetch_summary(&issue_id)).await? {
            Some(summary) => summary,
            None => {
                tracing::warn!("Dev-status summary endpoint not found for {}", issue_key);
                return Ok(DevelopmentInfo::endpoint_not_found(issue_key));
            }
        };

        let endpoints = discover_endpoints(&summary);
        if endpoints.is_empty() {
            tracing::info!("No development integrations found for {}", issue_key);
            return Ok(DevelopmentInfo::no_integrations(issue_key));
        }

        let mut merged = Merged::default();
        let mut dropped = 0;
        for endpoint in &endpoints {
            if cancel.is_cancelled() {
                return Err(JiraMcpError::Canceled);
            }

            match cancellable(cancel, self.source.fetch_detail(&issue_id, endpoint)).await {
                Ok(response) if response.errors.is_empty() => merged.absorb(response.detail),
                Ok(response) => {
                    dropped += 1;
                    tracing::debug!(
                        "Dropping {}/{} for {}: backend reported {} error(s)",
                        endpoint.application_type,
                        endpoint.data_type,
                        issue_key,
                        response.errors.len()
                    );
                }
                Err(JiraMcpError::Canceled) => return Err(JiraMcpError::Canceled),
                Err(e) => {
                    dropped += 1;
                    tracing::debug!(
                        "Dropping {}/{} for {}: {}",
                        endpoint.application_type,
                        endpoint.data_type,
                        issue_key,
                        e
                    );
                }
            }
        }

        if dropped > 0 {
            tracing::warn!(
                "⚠️ {} of {} development detail requests failed for {}",
                dropped,
                endpoints.len(),
                issue_key
            );
        }

        Ok(merged.into_info(issue_key, flags, dropped))
    }
}
