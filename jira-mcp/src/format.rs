//! Human-readable rendering of issues
//!
//! Tool responses are plain text aimed at a language model, so every field is
//! written as `Label: value` on its own line and absent fields are skipped.

use crate::adf;
use crate::client::{Issue, LinkedIssue, User, Version};

/// Changelog field holding the story point estimate on team-managed projects
pub const STORY_POINTS_FIELD: &str = "Story point estimate";

fn person(label: &str, user: Option<&User>, fallback: Option<&str>) -> Option<String> {
    match (user, fallback) {
        (Some(user), _) => {
            let mut line = format!("{label}: {}", user.display_name);
            if !user.email_address.is_empty() {
                line.push_str(&format!(" ({})", user.email_address));
            }
            Some(line)
        }
        (None, Some(fallback)) => Some(format!("{label}: {fallback}")),
        (None, None) => None,
    }
}

fn version_list(label: &str, versions: &[Version], result: &mut String) {
    if versions.is_empty() {
        return;
    }
    result.push_str(&format!("{label}:\n"));
    for version in versions {
        result.push_str(&format!("- {}", version.name));
        if !version.description.is_empty() {
            result.push_str(&format!(" ({})", version.description));
        }
        result.push('\n');
    }
}

fn linked_line(relation: &str, issue: &LinkedIssue) -> String {
    let mut line = format!("- {relation} {}", issue.key);
    if !issue.summary().is_empty() {
        line.push_str(&format!(": {}", issue.summary()));
    }
    line
}

/// Render every populated field of an issue
pub fn format_issue(issue: &Issue) -> String {
    let mut result = format!("Key: {}\n", issue.key);
    if !issue.id.is_empty() {
        result.push_str(&format!("ID: {}\n", issue.id));
    }
    if !issue.self_url.is_empty() {
        result.push_str(&format!("URL: {}\n", issue.self_url));
    }

    if let Some(fields) = &issue.fields {
        if !fields.summary.is_empty() {
            result.push_str(&format!("Summary: {}\n", fields.summary));
        }
        if let Some(description) = &fields.description {
            let text = adf::render(description);
            if !text.is_empty() {
                result.push_str(&format!("Description: {text}\n"));
            }
        }

        if let Some(issue_type) = &fields.issuetype {
            result.push_str(&format!("Type: {}\n", issue_type.name));
            if !issue_type.description.is_empty() {
                result.push_str(&format!("Type Description: {}\n", issue_type.description));
            }
        }
        if let Some(status) = &fields.status {
            result.push_str(&format!("Status: {}\n", status.name));
            if !status.description.is_empty() {
                result.push_str(&format!("Status Description: {}\n", status.description));
            }
        }
        match &fields.priority {
            Some(priority) => result.push_str(&format!("Priority: {}\n", priority.name)),
            None => result.push_str("Priority: None\n"),
        }
        if let Some(resolution) = &fields.resolution {
            result.push_str(&format!("Resolution: {}\n", resolution.name));
            if !resolution.description.is_empty() {
                result.push_str(&format!(
                    "Resolution Description: {}\n",
                    resolution.description
                ));
            }
        }
        if let Some(date) = fields.resolutiondate.as_deref().filter(|d| !d.is_empty()) {
            result.push_str(&format!("Resolution Date: {date}\n"));
        }

        let people = [
            person("Reporter", fields.reporter.as_ref(), Some("Unassigned")),
            person("Assignee", fields.assignee.as_ref(), Some("Unassigned")),
            person("Creator", fields.creator.as_ref(), None),
        ];
        for line in people.into_iter().flatten() {
            result.push_str(&line);
            result.push('\n');
        }

        if let Some(created) = fields.created.as_deref().filter(|d| !d.is_empty()) {
            result.push_str(&format!("Created: {created}\n"));
        }
        if let Some(updated) = fields.updated.as_deref().filter(|d| !d.is_empty()) {
            result.push_str(&format!("Updated: {updated}\n"));
        }
        if let Some(due) = fields.duedate.as_deref().filter(|d| !d.is_empty()) {
            result.push_str(&format!("Due Date: {due}\n"));
        }

        if let Some(project) = &fields.project {
            result.push_str(&format!("Project: {}", project.name));
            if !project.key.is_empty() {
                result.push_str(&format!(" ({})", project.key));
            }
            result.push('\n');
        }
        if let Some(parent) = &fields.parent {
            result.push_str(&format!("Parent: {}", parent.key));
            if !parent.summary().is_empty() {
                result.push_str(&format!(" - {}", parent.summary()));
            }
            result.push('\n');
        }

        if !fields.labels.is_empty() {
            result.push_str(&format!("Labels: {}\n", fields.labels.join(", ")));
        }
        if !fields.components.is_empty() {
            result.push_str("Components:\n");
            for component in &fields.components {
                result.push_str(&format!("- {}", component.name));
                if !component.description.is_empty() {
                    result.push_str(&format!(" ({})", component.description));
                }
                result.push('\n');
            }
        }
        version_list("Fix Versions", &fields.fix_versions, &mut result);
        version_list("Affected Versions", &fields.versions, &mut result);

        if !fields.subtasks.is_empty() {
            result.push_str("Subtasks:\n");
            for subtask in &fields.subtasks {
                result.push_str(&format!("- {}", subtask.key));
                if !subtask.summary().is_empty() {
                    result.push_str(&format!(": {}", subtask.summary()));
                }
                if let Some(status) = subtask.status_name() {
                    result.push_str(&format!(" [{status}]"));
                }
                result.push('\n');
            }
        }

        if !fields.issuelinks.is_empty() {
            result.push_str("Issue Links:\n");
            for link in &fields.issuelinks {
                if let Some(outward) = &link.outward_issue {
                    result.push_str(&linked_line(&link.link_type.outward, outward));
                    result.push('\n');
                }
                if let Some(inward) = &link.inward_issue {
                    result.push_str(&linked_line(&link.link_type.inward, inward));
                    result.push('\n');
                }
            }
        }

        if let Some(watches) = &fields.watches {
            result.push_str(&format!("Watchers: {}\n", watches.watch_count));
        }
        if let Some(votes) = &fields.votes {
            result.push_str(&format!("Votes: {}\n", votes.votes));
        }
        if let Some(comments) = fields.comment.as_ref().filter(|c| c.total > 0) {
            result.push_str(&format!("Comments: {} total\n", comments.total));
        }
        if let Some(worklogs) = fields.worklog.as_ref().filter(|w| w.total > 0) {
            result.push_str(&format!("Worklogs: {} entries\n", worklogs.total));
        }
        if !fields.attachment.is_empty() {
            result.push_str("Attachments:\n");
            for attachment in &fields.attachment {
                result.push_str(&format!(
                    "- {} (ID: {}, {} bytes)\n",
                    attachment.filename, attachment.id, attachment.size
                ));
            }
        }
    }

    if !issue.transitions.is_empty() {
        result.push_str("\nAvailable Transitions:\n");
        for transition in &issue.transitions {
            result.push_str(&format!("- {} (ID: {})\n", transition.name, transition.id));
        }
    }

    if let Some(points) = issue.latest_change_to(STORY_POINTS_FIELD) {
        result.push_str(&format!("Story Point Estimate: {points}\n"));
    }

    result
}

/// Single-line summary used for lists
pub fn format_issue_compact(issue: &Issue) -> String {
    let mut parts = vec![format!("Key: {}", issue.key)];

    if let Some(fields) = &issue.fields {
        if !fields.summary.is_empty() {
            parts.push(format!("Summary: {}", fields.summary));
        }
        if let Some(status) = &fields.status {
            parts.push(format!("Status: {}", status.name));
        }
        match &fields.assignee {
            Some(assignee) => parts.push(format!("Assignee: {}", assignee.display_name)),
            None => parts.push("Assignee: Unassigned".to_string()),
        }
        if let Some(priority) = &fields.priority {
            parts.push(format!("Priority: {}", priority.name));
        }
    }

    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_issue() -> Issue {
        serde_json::from_value(json!({
            "id": "10001",
            "key": "PROJ-1",
            "self": "https://example.atlassian.net/rest/api/3/issue/10001",
            "fields": {
                "summary": "Fix login",
                "description": {
                    "type": "doc",
                    "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "Users cannot log in" }]}]
                },
                "issuetype": { "id": "1", "name": "Bug" },
                "status": { "id": "3", "name": "In Progress" },
                "reporter": { "displayName": "Ada", "emailAddress": "ada@example.com" },
                "project": { "id": "100", "key": "PROJ", "name": "Project" },
                "labels": ["auth", "urgent"],
                "subtasks": [
                    { "id": "10002", "key": "PROJ-2", "fields": { "summary": "Add test", "status": { "name": "Done" } } }
                ],
                "issuelinks": [
                    {
                        "id": "1",
                        "type": { "name": "Blocks", "inward": "is blocked by", "outward": "blocks" },
                        "outwardIssue": { "key": "PROJ-3", "fields": { "summary": "Release" } }
                    }
                ],
                "comment": { "total": 2 },
                "worklog": { "total": 0 }
            },
            "transitions": [{ "id": "31", "name": "Done" }],
            "changelog": { "histories": [
                { "created": "2024-01-01T10:00:00.000+0000", "items": [{ "field": "Story point estimate", "toString": "3" }] },
                { "created": "2024-01-02T10:00:00.000+0000", "items": [{ "field": "Story point estimate", "toString": "5" }] }
            ]}
        }))
        .unwrap()
    }

    #[test]
    fn test_format_issue_full() {
        let text = format_issue(&sample_issue());

        assert!(text.starts_with("Key: PROJ-1\nID: 10001\n"));
        assert!(text.contains("Summary: Fix login\n"));
        assert!(text.contains("Description: Users cannot log in\n"));
        assert!(text.contains("Type: Bug\n"));
        assert!(text.contains("Status: In Progress\n"));
        assert!(text.contains("Priority: None\n"));
        assert!(text.contains("Reporter: Ada (ada@example.com)\n"));
        assert!(text.contains("Assignee: Unassigned\n"));
        assert!(!text.contains("Creator:"));
        assert!(text.contains("Project: Project (PROJ)\n"));
        assert!(text.contains("Labels: auth, urgent\n"));
        assert!(text.contains("Subtasks:\n- PROJ-2: Add test [Done]\n"));
        assert!(text.contains("Issue Links:\n- blocks PROJ-3: Release\n"));
        assert!(text.contains("Comments: 2 total\n"));
        assert!(!text.contains("Worklogs:"));
        assert!(text.contains("\nAvailable Transitions:\n- Done (ID: 31)\n"));
        assert!(text.ends_with("Story Point Estimate: 5\n"));
    }

    #[test]
    fn test_format_issue_without_fields() {
        let issue = Issue {
            key: "PROJ-9".to_string(),
            ..Default::default()
        };
        assert_eq!(format_issue(&issue), "Key: PROJ-9\n");
    }

    #[test]
    fn test_format_issue_compact() {
        assert_eq!(
            format_issue_compact(&sample_issue()),
            "Key: PROJ-1 | Summary: Fix login | Status: In Progress | Assignee: Unassigned"
        );
    }
}
