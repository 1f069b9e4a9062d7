//! Wire models for the Jira REST and Agile APIs
//!
//! Only the fields the tools read are modelled. Every field is optional or
//! defaulted because callers can restrict the returned fields with `fields=`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A Jira user as embedded in issues, comments and worklogs
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub account_id: String,
    pub display_name: String,
    pub email_address: String,
}

/// Name plus optional description, used for priorities, resolutions and components
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NamedRef {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusCategory {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Status {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status_category: Option<StatusCategory>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct IssueTypeScope {
    #[serde(rename = "type")]
    pub scope_type: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub subtask: bool,
    pub icon_url: String,
    pub scope: Option<IssueTypeScope>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProjectRef {
    pub id: String,
    pub key: String,
    pub name: String,
}

/// Fields carried by linked issues, subtasks and parents
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LinkedIssueFields {
    pub summary: String,
    pub status: Option<Status>,
    pub priority: Option<NamedRef>,
    pub issuetype: Option<IssueType>,
}

/// An issue as referenced from another issue
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LinkedIssue {
    pub id: String,
    pub key: String,
    pub fields: Option<LinkedIssueFields>,
}

impl LinkedIssue {
    pub fn summary(&self) -> &str {
        self.fields.as_ref().map(|f| f.summary.as_str()).unwrap_or("")
    }

    pub fn status_name(&self) -> Option<&str> {
        self.fields
            .as_ref()
            .and_then(|f| f.status.as_ref())
            .map(|s| s.name.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct IssueLinkType {
    pub id: String,
    pub name: String,
    pub inward: String,
    pub outward: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueLink {
    pub id: String,
    #[serde(rename = "type")]
    pub link_type: IssueLinkType,
    pub inward_issue: Option<LinkedIssue>,
    pub outward_issue: Option<LinkedIssue>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Watches {
    pub watch_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Votes {
    pub votes: i64,
}

/// Count-only view of the embedded comment and worklog pages
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PageTotal {
    pub total: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Version {
    pub id: String,
    pub name: String,
    pub description: String,
    pub released: bool,
    pub archived: bool,
    pub release_date: Option<String>,
    pub start_date: Option<String>,
    pub project_id: Option<i64>,
    #[serde(rename = "self")]
    pub self_url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueFields {
    pub summary: String,
    /// Rich-text document (or a plain string on older sites)
    pub description: Option<Value>,
    pub issuetype: Option<IssueType>,
    pub status: Option<Status>,
    pub priority: Option<NamedRef>,
    pub resolution: Option<NamedRef>,
    pub resolutiondate: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub duedate: Option<String>,
    pub reporter: Option<User>,
    pub assignee: Option<User>,
    pub creator: Option<User>,
    pub project: Option<ProjectRef>,
    pub parent: Option<LinkedIssue>,
    pub labels: Vec<String>,
    pub components: Vec<NamedRef>,
    pub fix_versions: Vec<Version>,
    pub versions: Vec<Version>,
    pub subtasks: Vec<LinkedIssue>,
    pub issuelinks: Vec<IssueLink>,
    pub watches: Option<Watches>,
    pub votes: Option<Votes>,
    pub comment: Option<PageTotal>,
    pub worklog: Option<PageTotal>,
    pub attachment: Vec<Attachment>,
    /// Custom fields and anything else not modelled above
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeItem {
    pub field: String,
    pub fieldtype: String,
    pub from_string: Option<String>,
    pub to_string: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct History {
    pub id: String,
    pub author: Option<User>,
    pub created: String,
    pub items: Vec<ChangeItem>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Changelog {
    pub histories: Vec<History>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Transition {
    pub id: String,
    pub name: String,
    pub to: Option<Status>,
}

/// A full issue as returned by `GET /rest/api/3/issue/{key}` and search
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Issue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
    pub fields: Option<IssueFields>,
    pub changelog: Option<Changelog>,
    pub transitions: Vec<Transition>,
}

impl Issue {
    /// Histories in the embedded changelog, empty when it was not expanded
    pub fn histories(&self) -> &[History] {
        self.changelog
            .as_ref()
            .map(|c| c.histories.as_slice())
            .unwrap_or(&[])
    }

    /// Last non-empty value written to the given changelog field
    pub fn latest_change_to(&self, field: &str) -> Option<&str> {
        self.histories()
            .iter()
            .flat_map(|h| h.items.iter())
            .filter(|item| item.field == field)
            .filter_map(|item| item.to_string.as_deref())
            .filter(|value| !value.is_empty())
            .last()
    }
}

/// Response of `POST /rest/api/3/issue`
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
}

/// Response of `GET /rest/api/3/search/jql`
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResults {
    pub issues: Vec<Issue>,
    pub next_page_token: Option<String>,
    pub is_last: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Comment {
    pub id: String,
    pub author: Option<User>,
    pub body: Option<Value>,
    pub created: String,
    pub updated: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    pub total: i64,
    pub max_results: i64,
    pub start_at: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Worklog {
    pub id: String,
    pub author: Option<User>,
    pub time_spent: String,
    pub time_spent_seconds: i64,
    pub started: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Attachment {
    pub id: String,
    pub filename: String,
    pub size: i64,
    pub mime_type: String,
    pub content: String,
    pub created: String,
    pub author: Option<User>,
}

/// Statuses available to one issue type of a project
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct IssueTypeStatuses {
    pub id: String,
    pub name: String,
    pub subtask: bool,
    pub statuses: Vec<Status>,
}

/// Project details with the issue types it offers
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub key: String,
    pub name: String,
    pub issue_types: Vec<IssueType>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Board {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub board_type: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Sprint {
    pub id: i64,
    pub name: String,
    pub state: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub complete_date: Option<String>,
    pub origin_board_id: Option<i64>,
    pub goal: Option<String>,
}

/// Agile API page of values
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgilePage<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
    #[serde(default)]
    pub is_last: bool,
    #[serde(default)]
    pub total: i64,
}

/// Agile API page of issues (sprint issue listing)
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct IssuePage {
    pub issues: Vec<Issue>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_issue_tolerates_restricted_fields() {
        let issue: Issue = serde_json::from_value(json!({
            "id": "10001",
            "key": "PROJ-1",
            "fields": { "summary": "Only summary" }
        }))
        .unwrap();

        let fields = issue.fields.unwrap();
        assert_eq!(fields.summary, "Only summary");
        assert!(fields.status.is_none());
        assert!(fields.labels.is_empty());
    }

    #[test]
    fn test_custom_fields_land_in_extra() {
        let issue: Issue = serde_json::from_value(json!({
            "key": "PROJ-1",
            "fields": { "customfield_10016": 5.0 }
        }))
        .unwrap();
        assert_eq!(
            issue.fields.unwrap().extra.get("customfield_10016"),
            Some(&json!(5.0))
        );
    }

    #[test]
    fn test_latest_change_to_picks_last_non_empty_value() {
        let issue: Issue = serde_json::from_value(json!({
            "key": "PROJ-1",
            "changelog": { "histories": [
                { "created": "2024-01-01T10:00:00.000+0000",
                  "items": [{ "field": "Story point estimate", "toString": "3" }] },
                { "created": "2024-01-02T10:00:00.000+0000",
                  "items": [{ "field": "Story point estimate", "toString": "5" }] },
                { "created": "2024-01-03T10:00:00.000+0000",
                  "items": [{ "field": "Story point estimate", "toString": "" }] }
            ]}
        }))
        .unwrap();
        assert_eq!(issue.latest_change_to("Story point estimate"), Some("5"));
        assert_eq!(issue.latest_change_to("status"), None);
    }
}
