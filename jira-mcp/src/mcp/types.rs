//! Request types for MCP tool calls
//!
//! Field docs double as the parameter descriptions in each tool's input schema.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Accept an identifier sent either as a JSON string or a JSON number
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

/// Request to retrieve one issue
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetIssueRequest {
    /// The unique identifier of the Jira issue (e.g. KP-2, PROJ-123)
    pub issue_key: String,
    /// Comma-separated list of fields to return (e.g. summary,status,assignee,priority)
    pub fields: Option<String>,
    /// Comma-separated list of sections to expand (e.g. transitions,changelog,subtasks,description)
    pub expand: Option<String>,
}

/// Request to create a top-level issue
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateIssueRequest {
    /// Project key where the issue will be created (e.g. KP, PROJ)
    pub project_key: String,
    /// Brief title or headline of the issue
    pub summary: String,
    /// Detailed explanation of the issue
    pub description: String,
    /// Type of issue to create (e.g. Bug, Task, Story, Epic)
    pub issue_type: String,
}

/// Request to create a child issue under a parent
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateChildIssueRequest {
    /// The parent issue key (e.g. KP-2)
    pub parent_issue_key: String,
    /// Brief title of the child issue
    pub summary: String,
    /// Detailed explanation of the child issue
    pub description: String,
    /// Issue type for the child; defaults to Subtask
    pub issue_type: Option<String>,
}

/// Request to update summary or description of an issue
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateIssueRequest {
    /// The issue to update (e.g. KP-2)
    pub issue_key: String,
    /// New title for the issue
    pub summary: Option<String>,
    /// New description for the issue
    pub description: Option<String>,
}

/// Request naming a project
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProjectKeyRequest {
    /// Project key (e.g. KP, PROJ)
    pub project_key: String,
}

/// Request naming an issue
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IssueKeyRequest {
    /// The unique identifier of the Jira issue (e.g. KP-2, PROJ-123)
    pub issue_key: String,
}

/// Request to run a JQL search
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchIssueRequest {
    /// JQL query string (e.g. project = KP AND status = "In Progress")
    pub jql: String,
    /// Comma-separated list of fields to return (default *navigable)
    pub fields: Option<String>,
    /// Comma-separated list of sections to expand
    pub expand: Option<String>,
    /// Render one line per issue instead of the full detail view
    #[serde(default)]
    pub compact: bool,
}

/// Request to add a comment
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddCommentRequest {
    /// The issue to comment on (e.g. KP-2)
    pub issue_key: String,
    /// The comment text
    pub comment: String,
}

/// Request to log time against an issue
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddWorklogRequest {
    /// The issue to log work against (e.g. KP-2)
    pub issue_key: String,
    /// Time spent: seconds, or a duration such as 1h 30m, 2d, 45m
    #[serde(deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub time_spent: String,
    /// Optional comment describing the work
    pub comment: Option<String>,
    /// When the work started, in Jira timestamp format (defaults to now)
    pub started: Option<String>,
}

/// Request to move an issue through a workflow transition
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TransitionIssueRequest {
    /// The issue to transition (e.g. KP-123)
    pub issue_key: String,
    /// Transition ID from the issue's available transitions
    #[serde(deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub transition_id: String,
    /// Optional comment to add with the transition
    pub comment: Option<String>,
}

/// Request to link two issues
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LinkIssuesRequest {
    /// The key of the inward issue (e.g. KP-1)
    pub inward_issue: String,
    /// The key of the outward issue (e.g. KP-2)
    pub outward_issue: String,
    /// The type of link (e.g. Duplicate, Blocks, Relates)
    pub link_type: String,
    /// Optional comment to add to the link
    pub comment: Option<String>,
}

/// Request selecting sprints by board or project
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BoardOrProjectRequest {
    /// Numeric ID of the board
    #[serde(default, deserialize_with = "optional_string_or_number")]
    #[schemars(with = "Option<String>")]
    pub board_id: Option<String>,
    /// Project key; every board of the project is searched
    pub project_key: Option<String>,
}

/// Request naming a sprint
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SprintIdRequest {
    /// Numeric ID of the sprint
    #[serde(deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub sprint_id: String,
}

/// Request to move issues into a sprint
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MoveIssuesToSprintRequest {
    /// Numeric ID of the target sprint
    #[serde(deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub sprint_id: String,
    /// Comma-separated issue keys to move, at most 50 (e.g. PROJ-1,PROJ-2)
    pub issue_keys: String,
}

/// Request naming a project version
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct VersionIdRequest {
    /// Numeric ID of the version
    #[serde(deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub version_id: String,
}

/// Request naming an attachment
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AttachmentIdRequest {
    /// Numeric ID of the attachment
    #[serde(deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub attachment_id: String,
}

/// Request for development information linked to an issue
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DevelopmentInfoRequest {
    /// The issue to inspect (e.g. PROJ-123)
    pub issue_key: String,
    /// Include branches (when every include flag is false, everything is included)
    #[serde(default)]
    pub include_branches: bool,
    /// Include pull requests
    #[serde(default)]
    pub include_pull_requests: bool,
    /// Include commits, reported per repository
    #[serde(default)]
    pub include_commits: bool,
    /// Include builds
    #[serde(default)]
    pub include_builds: bool,
}
