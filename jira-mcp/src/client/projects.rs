//! Project endpoints: issue types, statuses, versions

use super::models::*;
use super::JiraClient;
use crate::Result;

impl JiraClient {
    /// Issue types available in a project
    pub async fn list_project_issue_types(&self, project_key: &str) -> Result<Vec<IssueType>> {
        let project: Project = self
            .get_json(
                &["rest", "api", "3", "project", project_key],
                &[("expand", "issueTypes".to_string())],
            )
            .await?;
        Ok(project.issue_types)
    }

    /// Statuses grouped by issue type
    pub async fn list_project_statuses(&self, project_key: &str) -> Result<Vec<IssueTypeStatuses>> {
        self.get_json(&["rest", "api", "3", "project", project_key, "statuses"], &[])
            .await
    }

    /// One version by id
    pub async fn get_version(&self, version_id: &str) -> Result<Version> {
        self.get_json(&["rest", "api", "3", "version", version_id], &[])
            .await
    }

    /// Every version of a project
    pub async fn list_project_versions(&self, project_key: &str) -> Result<Vec<Version>> {
        self.get_json(&["rest", "api", "3", "project", project_key, "versions"], &[])
            .await
    }
}
