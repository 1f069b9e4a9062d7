//! Attachment tools

pub mod download;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all attachment tools with the registry
pub fn register_attachment_tools(registry: &mut ToolRegistry) {
    registry.register(download::DownloadAttachmentTool::new());
}
