//! Built-in MCP prompts
//!
//! Each prompt is a markdown file under `prompts/` with YAML front matter
//! describing its arguments, followed by a Liquid template body.

use crate::{JiraMcpError, Result};
use liquid::{Object, ParserBuilder};
use serde::Deserialize;
use std::collections::HashMap;

const BUILTIN_PROMPTS: [(&str, &str); 2] = [
    (
        "issue_development_tree",
        include_str!("../../prompts/issue_development_tree.md"),
    ),
    (
        "release_development_overview",
        include_str!("../../prompts/release_development_overview.md"),
    ),
];

/// One argument a prompt accepts
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ArgumentSpec {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Deserialize)]
struct FrontMatter {
    description: String,
    result_description: Option<String>,
    #[serde(default)]
    arguments: Vec<ArgumentSpec>,
}

/// A prompt ready to be listed and rendered
#[derive(Debug, Clone)]
pub struct PromptDefinition {
    pub name: String,
    /// Shown in `prompts/list`
    pub description: String,
    /// Returned with the rendered prompt
    pub result_description: String,
    pub arguments: Vec<ArgumentSpec>,
    pub template: String,
}

impl PromptDefinition {
    /// Parse a prompt file with front matter
    pub fn parse(name: &str, content: &str) -> Result<Self> {
        let rest = content.strip_prefix("---\n").ok_or_else(|| {
            JiraMcpError::Template(format!("prompt '{name}' is missing front matter"))
        })?;
        let (yaml, body) = rest.split_once("\n---\n").ok_or_else(|| {
            JiraMcpError::Template(format!("prompt '{name}' has unterminated front matter"))
        })?;

        let front: FrontMatter = serde_yaml::from_str(yaml)
            .map_err(|e| JiraMcpError::Template(format!("prompt '{name}': {e}")))?;

        Ok(Self {
            name: name.to_string(),
            result_description: front
                .result_description
                .unwrap_or_else(|| front.description.clone()),
            description: front.description,
            arguments: front.arguments,
            template: body.trim().to_string(),
        })
    }

    /// Render the template after checking required arguments are present
    pub fn render(&self, args: &HashMap<String, String>) -> Result<String> {
        for argument in self.arguments.iter().filter(|a| a.required) {
            let present = args
                .get(&argument.name)
                .is_some_and(|value| !value.trim().is_empty());
            if !present {
                return Err(JiraMcpError::validation(format!("{} is required", argument.name)));
            }
        }

        let parser = ParserBuilder::with_stdlib()
            .build()
            .map_err(|e| JiraMcpError::Template(e.to_string()))?;
        let template = parser
            .parse(&self.template)
            .map_err(|e| JiraMcpError::Template(e.to_string()))?;

        let mut object = Object::new();
        for (key, value) in args {
            object.insert(
                key.clone().into(),
                liquid::model::Value::scalar(value.trim().to_string()),
            );
        }

        template
            .render(&object)
            .map_err(|e| JiraMcpError::Template(e.to_string()))
    }
}

/// The set of prompts served over MCP
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    prompts: Vec<PromptDefinition>,
}

impl PromptLibrary {
    /// Load the prompts compiled into the binary
    pub fn builtin() -> Result<Self> {
        let prompts = BUILTIN_PROMPTS
            .iter()
            .map(|(name, content)| PromptDefinition::parse(name, content))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { prompts })
    }

    pub fn list(&self) -> &[PromptDefinition] {
        &self.prompts
    }

    pub fn get(&self, name: &str) -> Option<&PromptDefinition> {
        self.prompts.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_builtin_prompts_load() {
        let library = PromptLibrary::builtin().unwrap();
        let names: Vec<_> = library.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["issue_development_tree", "release_development_overview"]
        );

        let release = library.get("release_development_overview").unwrap();
        assert_eq!(release.result_description, "Development overview for release");
        assert_eq!(release.arguments.len(), 2);
        assert!(release.arguments.iter().all(|a| a.required));
    }

    #[test]
    fn test_issue_tree_renders_key_everywhere() {
        let library = PromptLibrary::builtin().unwrap();
        let text = library
            .get("issue_development_tree")
            .unwrap()
            .render(&args(&[("issue_key", "PROJ-7")]))
            .unwrap();

        assert!(text.starts_with("Please analyze all development work for issue PROJ-7"));
        assert!(text.contains("issue_key=PROJ-7 and expand=subtasks"));
        assert!(text.contains("   - Parent issue: PROJ-7\n"));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn test_release_overview_builds_jql() {
        let library = PromptLibrary::builtin().unwrap();
        let text = library
            .get("release_development_overview")
            .unwrap()
            .render(&args(&[("version", "v1.2.0"), ("project_key", "KP")]))
            .unwrap();
        assert!(text.contains(r#"JQL: fixVersion = "v1.2.0" AND project = KP"#));
    }

    #[test]
    fn test_missing_required_argument() {
        let library = PromptLibrary::builtin().unwrap();
        let err = library
            .get("release_development_overview")
            .unwrap()
            .render(&args(&[("version", "v1")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "project_key is required");
    }

    #[test]
    fn test_parse_rejects_missing_front_matter() {
        assert!(PromptDefinition::parse("bad", "Hello {{ name }}").is_err());
    }
}
