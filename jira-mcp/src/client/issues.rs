//! Issue endpoints: CRUD, search, comments, worklogs, transitions, links, attachments

use super::models::*;
use super::JiraClient;
use crate::adf;
use crate::Result;
use serde_json::{json, Value};

fn optional_csv(name: &'static str, value: Option<&str>) -> Option<(&'static str, String)> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| (name, v.to_string()))
}

impl JiraClient {
    /// Fetch one issue, optionally restricting fields and expanding sections
    pub async fn get_issue(
        &self,
        issue_key: &str,
        fields: Option<&str>,
        expand: Option<&str>,
    ) -> Result<Issue> {
        let query: Vec<_> = [optional_csv("fields", fields), optional_csv("expand", expand)]
            .into_iter()
            .flatten()
            .collect();
        self.get_json(&["rest", "api", "3", "issue", issue_key], &query)
            .await
    }

    /// Create an issue from a fields object
    pub async fn create_issue(&self, fields: Value) -> Result<CreatedIssue> {
        self.post_json(&["rest", "api", "3", "issue"], &[], &json!({ "fields": fields }))
            .await
    }

    /// Partially update an issue's fields
    pub async fn update_issue(&self, issue_key: &str, fields: Value) -> Result<()> {
        self.put_no_content(
            &["rest", "api", "3", "issue", issue_key],
            &[("notifyUsers", "true".to_string())],
            &json!({ "fields": fields }),
        )
        .await
    }

    /// Run a JQL search using the enhanced search endpoint
    pub async fn search_issues(
        &self,
        jql: &str,
        fields: Option<&str>,
        expand: Option<&str>,
        max_results: u32,
    ) -> Result<SearchResults> {
        let mut query = vec![
            ("jql", jql.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        // The enhanced endpoint returns only ids unless fields are requested.
        query.push(
            optional_csv("fields", fields).unwrap_or(("fields", "*navigable".to_string())),
        );
        query.extend(optional_csv("expand", expand));
        self.get_json(&["rest", "api", "3", "search", "jql"], &query)
            .await
    }

    /// Add a plain-text comment
    pub async fn add_comment(&self, issue_key: &str, text: &str) -> Result<Comment> {
        self.post_json(
            &["rest", "api", "3", "issue", issue_key, "comment"],
            &[],
            &json!({ "body": adf::document_from_text(text) }),
        )
        .await
    }

    /// First page of comments on an issue
    pub async fn get_comments(&self, issue_key: &str, max_results: u32) -> Result<CommentPage> {
        self.get_json(
            &["rest", "api", "3", "issue", issue_key, "comment"],
            &[
                ("startAt", "0".to_string()),
                ("maxResults", max_results.to_string()),
            ],
        )
        .await
    }

    /// Log work against an issue, adjusting the remaining estimate automatically
    pub async fn add_worklog(
        &self,
        issue_key: &str,
        time_spent_seconds: i64,
        started: &str,
        comment: Option<&str>,
    ) -> Result<Worklog> {
        let mut body = json!({
            "timeSpentSeconds": time_spent_seconds,
            "started": started,
        });
        if let Some(text) = comment.filter(|c| !c.trim().is_empty()) {
            body["comment"] = adf::document_from_text(text);
        }
        self.post_json(
            &["rest", "api", "3", "issue", issue_key, "worklog"],
            &[
                ("notifyUsers", "true".to_string()),
                ("adjustEstimate", "auto".to_string()),
            ],
            &body,
        )
        .await
    }

    /// Move an issue through a workflow transition
    pub async fn transition_issue(
        &self,
        issue_key: &str,
        transition_id: &str,
        comment: Option<&str>,
    ) -> Result<()> {
        let mut body = json!({ "transition": { "id": transition_id } });
        if let Some(text) = comment.filter(|c| !c.trim().is_empty()) {
            body["update"] = json!({
                "comment": [{ "add": { "body": adf::document_from_text(text) } }]
            });
        }
        self.post_no_content(
            &["rest", "api", "3", "issue", issue_key, "transitions"],
            &[],
            &body,
        )
        .await
    }

    /// Link two issues with a named link type
    pub async fn link_issues(
        &self,
        inward_issue: &str,
        outward_issue: &str,
        link_type: &str,
        comment: Option<&str>,
    ) -> Result<()> {
        let mut body = json!({
            "type": { "name": link_type },
            "inwardIssue": { "key": inward_issue },
            "outwardIssue": { "key": outward_issue },
        });
        if let Some(text) = comment.filter(|c| !c.trim().is_empty()) {
            body["comment"] = json!({ "body": adf::document_from_text(text) });
        }
        self.post_no_content(&["rest", "api", "3", "issueLink"], &[], &body)
            .await
    }

    /// Attachment metadata
    pub async fn get_attachment(&self, attachment_id: &str) -> Result<Attachment> {
        self.get_json(&["rest", "api", "3", "attachment", attachment_id], &[])
            .await
    }

    /// Attachment bytes, following the redirect to the media store
    pub async fn download_attachment(&self, attachment_id: &str) -> Result<Vec<u8>> {
        self.get_bytes(
            &["rest", "api", "3", "attachment", "content", attachment_id],
            &[("redirect", "true".to_string())],
        )
        .await
    }
}
