//! Jira tools exposed over MCP
//!
//! Tools are grouped by the Jira resource they act on. Each tool lives in its own
//! `<noun>/<verb>/` directory next to the `description.md` shown to clients.

pub mod attachments;
pub mod comments;
pub mod development;
pub mod issues;
pub mod links;
pub mod sprints;
pub mod statuses;
pub mod versions;
pub mod worklogs;

use super::tool_registry::ToolRegistry;

/// Register every Jira tool with the registry
pub fn register_all_tools(registry: &mut ToolRegistry) {
    issues::register_issue_tools(registry);
    comments::register_comment_tools(registry);
    worklogs::register_worklog_tools(registry);
    statuses::register_status_tools(registry);
    links::register_link_tools(registry);
    sprints::register_sprint_tools(registry);
    versions::register_version_tools(registry);
    attachments::register_attachment_tools(registry);
    development::register_development_tools(registry);
}
