//! Atlassian Document Format rendering
//!
//! Descriptions and comment bodies arrive as a JSON node tree. [`render`] turns
//! that tree into lightweight markdown-flavoured text; [`document_from_text`]
//! builds the minimal document the API expects when writing plain text.
//!
//! Node kinds this module does not know about render their children, so newly
//! introduced kinds still contribute their text.

use serde::Deserialize;
use serde_json::{json, Map, Value};

/// One node of a document tree
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Vec<Node>,
    pub text: Option<String>,
    pub marks: Vec<Mark>,
    pub attrs: Map<String, Value>,
}

/// Inline formatting applied to a text node
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: String,
    pub attrs: Map<String, Value>,
}

/// Node kinds the renderer distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Doc,
    Paragraph,
    Text,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    CodeBlock,
    Blockquote,
    Table,
    TableRow,
    TableCell,
    Media,
    MediaContainer,
    Mention,
    Emoji,
    Card,
    HardBreak,
    Rule,
    Unknown,
}

impl NodeKind {
    fn from_type(kind: &str) -> Self {
        match kind {
            "doc" => Self::Doc,
            "paragraph" => Self::Paragraph,
            "text" => Self::Text,
            "heading" => Self::Heading,
            "bulletList" => Self::BulletList,
            "orderedList" => Self::OrderedList,
            "listItem" | "taskItem" => Self::ListItem,
            "codeBlock" => Self::CodeBlock,
            "blockquote" => Self::Blockquote,
            "table" => Self::Table,
            "tableRow" => Self::TableRow,
            "tableCell" | "tableHeader" => Self::TableCell,
            "media" => Self::Media,
            "mediaSingle" | "mediaGroup" => Self::MediaContainer,
            "mention" => Self::Mention,
            "emoji" => Self::Emoji,
            "inlineCard" | "blockCard" | "embedCard" => Self::Card,
            "hardBreak" => Self::HardBreak,
            "rule" => Self::Rule,
            _ => Self::Unknown,
        }
    }
}

impl Node {
    pub fn node_kind(&self) -> NodeKind {
        NodeKind::from_type(&self.kind)
    }

    fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }
}

/// Render a description or comment body as text.
///
/// Plain strings (older API versions) are returned unchanged; anything that
/// does not parse as a document falls back to its JSON text.
pub fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Object(_) => match Node::deserialize(value) {
            Ok(node) => render_node(&node),
            Err(_) => value.to_string(),
        },
        other => other.to_string(),
    }
}

/// Render an optional body, empty when absent
pub fn render_optional(value: Option<&Value>) -> String {
    value.map(render).unwrap_or_default()
}

/// Render a parsed document tree
pub fn render_node(node: &Node) -> String {
    let mut renderer = Renderer::default();
    renderer.block(node);
    renderer.finish()
}

/// Build a document holding `text`, one paragraph per blank-line separated block
pub fn document_from_text(text: &str) -> Value {
    let paragraphs: Vec<Value> = text
        .split("\n\n")
        .map(str::trim_end)
        .filter(|block| !block.trim().is_empty())
        .map(|block| {
            let mut inline = Vec::new();
            for (index, line) in block.lines().enumerate() {
                if index > 0 {
                    inline.push(json!({ "type": "hardBreak" }));
                }
                if !line.is_empty() {
                    inline.push(json!({ "type": "text", "text": line }));
                }
            }
            json!({ "type": "paragraph", "content": inline })
        })
        .collect();

    json!({ "type": "doc", "version": 1, "content": paragraphs })
}

#[derive(Default)]
struct Renderer {
    out: String,
    /// Prefix written at the start of every line (list indentation, quotes)
    prefix: Vec<String>,
}

impl Renderer {
    fn finish(self) -> String {
        self.out.trim_end().to_string()
    }

    fn line_prefix(&self) -> String {
        self.prefix.concat()
    }

    fn push_block_text(&mut self, text: &str) {
        let prefix = self.line_prefix();
        for line in text.split('\n') {
            self.out.push_str(&prefix);
            self.out.push_str(line);
            self.out.push('\n');
        }
    }

    fn blank_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn children(&mut self, node: &Node) {
        for child in &node.content {
            self.block(child);
        }
    }

    fn block(&mut self, node: &Node) {
        match node.node_kind() {
            NodeKind::Doc | NodeKind::MediaContainer => self.children(node),
            NodeKind::Paragraph => {
                let text = inline_text(&node.content);
                self.push_block_text(&text);
                if self.prefix.is_empty() {
                    self.blank_line();
                }
            }
            NodeKind::Heading => {
                let level = node
                    .attrs
                    .get("level")
                    .and_then(Value::as_u64)
                    .unwrap_or(1)
                    .clamp(1, 6) as usize;
                let text = format!("{} {}", "#".repeat(level), inline_text(&node.content));
                self.push_block_text(&text);
                self.blank_line();
            }
            NodeKind::BulletList => {
                for item in &node.content {
                    self.list_item(item, "- ".to_string());
                }
                if self.prefix.is_empty() {
                    self.blank_line();
                }
            }
            NodeKind::OrderedList => {
                let start = node.attrs.get("order").and_then(Value::as_u64).unwrap_or(1);
                for (offset, item) in node.content.iter().enumerate() {
                    self.list_item(item, format!("{}. ", start + offset as u64));
                }
                if self.prefix.is_empty() {
                    self.blank_line();
                }
            }
            NodeKind::ListItem => self.list_item(node, "- ".to_string()),
            NodeKind::CodeBlock => {
                let language = node.attr_str("language").unwrap_or("");
                let code: String = node.content.iter().filter_map(|c| c.text.as_deref()).collect();
                self.push_block_text(&format!("```{language}\n{code}\n```"));
                self.blank_line();
            }
            NodeKind::Blockquote => {
                self.prefix.push("> ".to_string());
                for child in &node.content {
                    let text = inline_or_block(child);
                    self.push_block_text(&text);
                }
                self.prefix.pop();
                self.blank_line();
            }
            NodeKind::Table => {
                for row in &node.content {
                    self.block(row);
                }
                self.blank_line();
            }
            NodeKind::TableRow => {
                let cells: Vec<String> = node
                    .content
                    .iter()
                    .map(|cell| inline_or_block(cell).replace('\n', " "))
                    .collect();
                self.push_block_text(&format!("| {} |", cells.join(" | ")));
            }
            NodeKind::Rule => {
                self.push_block_text("---");
                self.blank_line();
            }
            NodeKind::Text
            | NodeKind::Mention
            | NodeKind::Emoji
            | NodeKind::Card
            | NodeKind::HardBreak
            | NodeKind::Media
            | NodeKind::TableCell => {
                let text = inline_or_block(node);
                self.push_block_text(&text);
            }
            NodeKind::Unknown => {
                if let Some(text) = &node.text {
                    self.push_block_text(text);
                }
                self.children(node);
            }
        }
    }

    fn list_item(&mut self, item: &Node, marker: String) {
        let indent = " ".repeat(marker.len());
        let mut first = true;
        for child in &item.content {
            match child.node_kind() {
                NodeKind::BulletList | NodeKind::OrderedList => {
                    self.prefix.push(indent.clone());
                    self.block(child);
                    self.prefix.pop();
                }
                _ => {
                    let text = inline_or_block(child);
                    let lead = if first { marker.clone() } else { indent.clone() };
                    self.push_block_text(&format!("{lead}{text}"));
                    first = false;
                }
            }
        }
        if first && item.content.is_empty() {
            self.push_block_text(marker.trim_end());
        }
    }
}

/// Render a node that may be either inline or a container of inline content
fn inline_or_block(node: &Node) -> String {
    match node.node_kind() {
        NodeKind::Paragraph | NodeKind::Heading | NodeKind::TableCell | NodeKind::ListItem => {
            if node.content.iter().all(is_inline) {
                inline_text(&node.content)
            } else {
                let mut renderer = Renderer::default();
                renderer.children(node);
                renderer.finish()
            }
        }
        _ if is_inline(node) => inline(node),
        _ => render_node(node),
    }
}

fn is_inline(node: &Node) -> bool {
    matches!(
        node.node_kind(),
        NodeKind::Text
            | NodeKind::Mention
            | NodeKind::Emoji
            | NodeKind::Card
            | NodeKind::HardBreak
            | NodeKind::Media
    ) || (node.node_kind() == NodeKind::Unknown && node.text.is_some())
}

fn inline_text(nodes: &[Node]) -> String {
    nodes.iter().map(inline).collect()
}

fn inline(node: &Node) -> String {
    match node.node_kind() {
        NodeKind::Text => apply_marks(node.text.as_deref().unwrap_or(""), &node.marks),
        NodeKind::HardBreak => "\n".to_string(),
        NodeKind::Mention => {
            let text = node
                .attr_str("text")
                .map(str::to_string)
                .or_else(|| node.attr_str("id").map(|id| format!("@{id}")))
                .unwrap_or_else(|| "@unknown".to_string());
            if text.starts_with('@') {
                text
            } else {
                format!("@{text}")
            }
        }
        NodeKind::Emoji => node
            .attr_str("text")
            .or_else(|| node.attr_str("shortName"))
            .unwrap_or("")
            .to_string(),
        NodeKind::Card => node.attr_str("url").unwrap_or("").to_string(),
        NodeKind::Media => {
            let label = node
                .attr_str("alt")
                .or_else(|| node.attr_str("id"))
                .unwrap_or("attachment");
            format!("[media: {label}]")
        }
        _ => {
            let own = node.text.clone().unwrap_or_default();
            own + &inline_text(&node.content)
        }
    }
}

fn apply_marks(text: &str, marks: &[Mark]) -> String {
    let mut rendered = text.to_string();
    let mut link = None;
    for mark in marks {
        match mark.kind.as_str() {
            "strong" => rendered = format!("**{rendered}**"),
            "em" => rendered = format!("*{rendered}*"),
            "code" => rendered = format!("`{rendered}`"),
            "strike" => rendered = format!("~~{rendered}~~"),
            "link" => link = mark.attrs.get("href").and_then(Value::as_str),
            _ => {}
        }
    }
    match link {
        Some(href) => format!("[{rendered}]({href})"),
        None => rendered,
    }
}
