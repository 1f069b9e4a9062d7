//! Tool descriptions registry for MCP operations
//!
//! Descriptions are generated at build time from the `description.md` file in
//! each tool directory.

use std::collections::HashMap;

// Include the generated tool descriptions from build.rs
include!(concat!(env!("OUT_DIR"), "/tool_descriptions.rs"));

/// Get description for a specific tool path such as `issues_create`
pub fn get_description(tool_path: &str) -> Option<&'static str> {
    get_tool_descriptions().get(tool_path).copied()
}

/// Get description for a tool by noun and verb
///
/// # Example
/// ```rust
/// use jira_mcp::mcp::tool_descriptions::get_tool_description;
///
/// let desc = get_tool_description("issues", "create");
/// assert!(desc.is_some());
/// ```
pub fn get_tool_description(noun: &str, verb: &str) -> Option<&'static str> {
    get_description(&format!("{noun}_{verb}"))
}

/// List all available tool descriptions
pub fn list_all_descriptions() -> Vec<(&'static str, &'static str)> {
    let mut descriptions: Vec<_> = get_tool_descriptions().into_iter().collect();
    descriptions.sort();
    descriptions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tool_has_a_description() {
        assert_eq!(list_all_descriptions().len(), 23);
        for (path, description) in list_all_descriptions() {
            assert!(
                description.trim().len() > 20,
                "description for {path} is too short"
            );
        }
    }

    #[test]
    fn test_get_tool_description() {
        assert!(get_tool_description("issues", "create_child").is_some());
        assert!(get_tool_description("development", "get").is_some());
        assert!(get_tool_description("nonexistent", "tool").is_none());
    }
}
