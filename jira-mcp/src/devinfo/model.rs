//! Payloads of the dev-status detail endpoint
//!
//! The endpoint is undocumented, so every field is defaulted, an explicit `null`
//! reads as the default and unknown fields are ignored. Optional fields are
//! omitted again on output so the aggregated JSON stays close to what the
//! backend returned.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Read a JSON `null` as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Top-level response of the detail endpoint
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DevStatusResponse {
    /// Backend-reported problems; a non-empty list invalidates the response
    #[serde(deserialize_with = "null_as_default")]
    pub errors: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub detail: Vec<DevStatusDetail>,
}

/// Development data contributed by one integration
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DevStatusDetail {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub branches: Vec<Branch>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub pull_requests: Vec<PullRequest>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub repositories: Vec<Repository>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub builds: Vec<Build>,
    /// Builds reported by cloud CI providers are wrapped one level deeper
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub jswdd_builds_data: Vec<ProviderBuilds>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProviderBuilds {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub builds: Vec<Build>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub providers: Vec<Provider>,
}

/// A CI/CD provider
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Provider {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub home_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub logo_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub documentation_url: String,
}

/// A branch linked to the issue
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Branch {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub create_pull_request_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub repository: RepositoryRef,
    #[serde(deserialize_with = "null_as_default")]
    pub last_commit: Commit,
}

/// Pull request; `status` is one of OPEN, MERGED, DECLINED, CLOSED
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PullRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: Author,
    #[serde(deserialize_with = "null_as_default")]
    pub last_update: String,
    #[serde(deserialize_with = "null_as_default")]
    pub source: BranchRef,
    #[serde(deserialize_with = "null_as_default")]
    pub destination: BranchRef,
    #[serde(skip_serializing_if = "is_zero")]
    #[serde(deserialize_with = "null_as_default")]
    pub comment_count: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub reviewers: Vec<Reviewer>,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub repository_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub repository_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub repository_url: String,
}

/// Repository together with the commits that mention the issue
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Repository {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub avatar: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RepositoryRef {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Commit {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: Author,
    #[serde(deserialize_with = "null_as_default")]
    pub author_timestamp: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(skip_serializing_if = "is_zero")]
    #[serde(deserialize_with = "null_as_default")]
    pub file_count: i64,
    #[serde(skip_serializing_if = "is_false")]
    #[serde(deserialize_with = "null_as_default")]
    pub merge: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub files: Vec<CommitFile>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CommitFile {
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub change_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lines_added: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub lines_removed: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Author {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub avatar: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Reviewer {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub avatar: String,
    #[serde(deserialize_with = "null_as_default")]
    pub approved: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BranchRef {
    #[serde(deserialize_with = "null_as_default")]
    pub branch: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// CI/CD build; `state` is one of successful, failed, in_progress, cancelled, unknown
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Build {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_updated: String,
    /// Providers report this as either a string or a number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_number: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_info: Option<BuildTestSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_summary: Option<BuildTestSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub references: Vec<BuildReference>,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub pipeline_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub pipeline_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub provider_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub provider_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub provider_ari: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub repository_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub repository_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub repository_url: String,
}

/// Test counts; providers use either the `number*` or the `*Number` spelling
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildTestSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub total_number: i64,
    #[serde(skip_serializing_if = "is_zero")]
    #[serde(deserialize_with = "null_as_default")]
    pub number_passed: i64,
    #[serde(skip_serializing_if = "is_zero")]
    #[serde(deserialize_with = "null_as_default")]
    pub success_number: i64,
    #[serde(skip_serializing_if = "is_zero")]
    #[serde(deserialize_with = "null_as_default")]
    pub number_failed: i64,
    #[serde(skip_serializing_if = "is_zero")]
    #[serde(deserialize_with = "null_as_default")]
    pub failed_number: i64,
    #[serde(skip_serializing_if = "is_zero")]
    #[serde(deserialize_with = "null_as_default")]
    pub skipped_number: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BuildReference {
    #[serde(deserialize_with = "null_as_default")]
    pub commit: CommitRef,
    #[serde(rename = "ref")]
    #[serde(deserialize_with = "null_as_default")]
    pub reference: RefInfo,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CommitRef {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub repository_uri: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RefInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub uri: String,
}
