//! Agile endpoints: boards and sprints

use super::models::*;
use super::JiraClient;
use crate::Result;
use serde_json::json;

/// Largest page the Agile API accepts for boards and sprints
pub const AGILE_PAGE_SIZE: u32 = 50;

impl JiraClient {
    /// Boards that contain the given project
    pub async fn list_boards(&self, project_key: &str) -> Result<Vec<Board>> {
        let page: AgilePage<Board> = self
            .get_json(
                &["rest", "agile", "1.0", "board"],
                &[
                    ("projectKeyOrId", project_key.to_string()),
                    ("startAt", "0".to_string()),
                    ("maxResults", AGILE_PAGE_SIZE.to_string()),
                ],
            )
            .await?;
        Ok(page.values)
    }

    /// Sprints of a board in any of the given states
    pub async fn list_board_sprints(&self, board_id: i64, states: &[&str]) -> Result<Vec<Sprint>> {
        let board = board_id.to_string();
        let page: AgilePage<Sprint> = self
            .get_json(
                &["rest", "agile", "1.0", "board", &board, "sprint"],
                &[
                    ("state", states.join(",")),
                    ("startAt", "0".to_string()),
                    ("maxResults", AGILE_PAGE_SIZE.to_string()),
                ],
            )
            .await?;
        Ok(page.values)
    }

    /// One sprint by id
    pub async fn get_sprint(&self, sprint_id: i64) -> Result<Sprint> {
        let sprint = sprint_id.to_string();
        self.get_json(&["rest", "agile", "1.0", "sprint", &sprint], &[])
            .await
    }

    /// Issues of a sprint with their changelog expanded
    pub async fn get_sprint_issues(&self, sprint_id: i64) -> Result<Vec<Issue>> {
        let sprint = sprint_id.to_string();
        let page: IssuePage = self
            .get_json(
                &["rest", "agile", "1.0", "sprint", &sprint, "issue"],
                &[
                    ("expand", "changelog".to_string()),
                    ("startAt", "0".to_string()),
                    ("maxResults", AGILE_PAGE_SIZE.to_string()),
                ],
            )
            .await?;
        Ok(page.issues)
    }

    /// Move issues into a sprint
    pub async fn move_issues_to_sprint(&self, sprint_id: i64, issue_keys: &[String]) -> Result<()> {
        let sprint = sprint_id.to_string();
        self.post_no_content(
            &["rest", "agile", "1.0", "sprint", &sprint, "issue"],
            &[],
            &json!({ "issues": issue_keys }),
        )
        .await
    }
}
