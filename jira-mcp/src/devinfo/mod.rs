//! Development information linked to an issue
//!
//! Jira exposes branches, pull requests, commits and builds through the
//! undocumented dev-status API in two phases: a summary endpoint lists which
//! integrations hold data for an issue, and a detail endpoint returns the data
//! for one (application type, data type) pair. [`DevInfoAggregator`] walks both
//! phases and merges the results.
//!
//! Failures are tiered:
//!
//! - resolving the issue key fails the whole call
//! - a missing summary endpoint or an issue without integrations yields an
//!   informative empty result
//! - a failed detail request drops that pair's contribution and nothing else

mod aggregator;
pub mod mock_source;
pub mod model;
mod source;

pub use aggregator::{discover_endpoints, DevInfoAggregator};
pub use model::{Branch, Build, DevStatusDetail, DevStatusResponse, PullRequest, Repository};
pub use source::DevStatusSource;

use serde::Serialize;

/// Data types the summary endpoint is queried for, in discovery order
pub const DATA_TYPES: [&str; 4] = ["repository", "branch", "pullrequest", "build"];

/// Message carried by the result when the dev-status API is absent
pub const ENDPOINT_NOT_FOUND: &str = "Dev-status API endpoint not found";

/// Message carried by the result when no integration holds data for the issue
pub const NO_INTEGRATIONS: &str = "No development integrations found";

/// One (application type, data type) pair found in the summary.
///
/// Ordering is lexicographic by application type, then data type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntegrationEndpoint {
    /// Integration instance type, e.g. `GitHub` or `bitbucket`
    pub application_type: String,
    /// One of [`DATA_TYPES`]
    pub data_type: String,
}

impl IntegrationEndpoint {
    pub fn new(application_type: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            application_type: application_type.into(),
            data_type: data_type.into(),
        }
    }
}

/// Which categories to return.
///
/// The default (everything false) means no preference was stated and is
/// treated as everything true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncludeFlags {
    pub branches: bool,
    pub pull_requests: bool,
    /// Repositories carry the commits, so this flag governs `repositories`
    pub commits: bool,
    pub builds: bool,
}

impl IncludeFlags {
    /// Every category included
    pub const ALL: Self = Self {
        branches: true,
        pull_requests: true,
        commits: true,
        builds: true,
    };

    /// Apply the all-false-means-all-true rule
    pub fn effective(self) -> Self {
        if self == Self::default() {
            Self::ALL
        } else {
            self
        }
    }
}

/// Aggregated development information, serialized as the tool result
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentInfo {
    pub issue_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub branches: Vec<Branch>,
    pub pull_requests: Vec<PullRequest>,
    pub repositories: Vec<Repository>,
    pub builds: Vec<Build>,
    /// Detail requests whose contribution was discarded
    #[serde(skip)]
    pub dropped: usize,
}

impl DevelopmentInfo {
    /// Result with all four categories empty
    pub fn empty(issue_key: &str) -> Self {
        Self {
            issue_key: issue_key.to_string(),
            ..Default::default()
        }
    }

    /// Soft result for a site without the dev-status API
    pub fn endpoint_not_found(issue_key: &str) -> Self {
        Self {
            error: Some(ENDPOINT_NOT_FOUND.to_string()),
            ..Self::empty(issue_key)
        }
    }

    /// Soft result for an issue with no configured integrations
    pub fn no_integrations(issue_key: &str) -> Self {
        Self {
            message: Some(NO_INTEGRATIONS.to_string()),
            ..Self::empty(issue_key)
        }
    }

    /// Total number of entities across all categories
    pub fn entity_count(&self) -> usize {
        self.branches.len() + self.pull_requests.len() + self.repositories.len() + self.builds.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_false_means_all_true() {
        assert_eq!(IncludeFlags::default().effective(), IncludeFlags::ALL);

        let only_builds = IncludeFlags {
            builds: true,
            ..Default::default()
        };
        assert_eq!(only_builds.effective(), only_builds);
    }

    #[test]
    fn test_soft_results_keep_every_array() {
        let value = serde_json::to_value(DevelopmentInfo::endpoint_not_found("PROJ-1")).unwrap();
        assert_eq!(
            value,
            json!({
                "issueKey": "PROJ-1",
                "error": "Dev-status API endpoint not found",
                "branches": [],
                "pullRequests": [],
                "repositories": [],
                "builds": []
            })
        );

        let value = serde_json::to_value(DevelopmentInfo::no_integrations("PROJ-1")).unwrap();
        assert_eq!(value["message"], "No development integrations found");
        assert!(value.get("error").is_none());
        assert_eq!(value["builds"], json!([]));
    }

    #[test]
    fn test_endpoints_sort_lexicographically() {
        let mut endpoints = vec![
            IntegrationEndpoint::new("GitHub", "pullrequest"),
            IntegrationEndpoint::new("Bitbucket", "repository"),
            IntegrationEndpoint::new("GitHub", "branch"),
        ];
        endpoints.sort();
        assert_eq!(
            endpoints,
            vec![
                IntegrationEndpoint::new("Bitbucket", "repository"),
                IntegrationEndpoint::new("GitHub", "branch"),
                IntegrationEndpoint::new("GitHub", "pullrequest"),
            ]
        );
    }
}
