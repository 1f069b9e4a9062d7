//! Attachment download tool

use crate::client::Attachment;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::AttachmentIdRequest;
use crate::JiraMcpError;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use std::path::{Path, PathBuf};

/// Tool for saving an attachment to disk
#[derive(Default)]
pub struct DownloadAttachmentTool;

impl DownloadAttachmentTool {
    /// Creates a new instance of the DownloadAttachmentTool
    pub fn new() -> Self {
        Self
    }
}

/// Target path `<dir>/<id>_<filename>` with path separators neutralised
pub fn attachment_path(dir: &Path, attachment_id: &str, filename: &str) -> PathBuf {
    let name = if filename.is_empty() {
        format!("attachment-{attachment_id}")
    } else {
        filename.replace(['/', '\\'], "_")
    };
    dir.join(format!("{attachment_id}_{name}"))
}

async fn save(path: &Path, bytes: &[u8]) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            JiraMcpError::Other(format!("failed to create attachment directory: {e}"))
        })?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| JiraMcpError::Other(format!("failed to write attachment to file: {e}")))
}

fn format_download(path: &Path, metadata: &Attachment, size: usize) -> String {
    format!(
        "Attachment downloaded successfully!\nFile: {}\nFilename: {}\nSize: {} bytes\nMIME Type: {}",
        path.display(),
        metadata.filename,
        if metadata.size > 0 { metadata.size as usize } else { size },
        metadata.mime_type
    )
}

#[async_trait]
impl McpTool for DownloadAttachmentTool {
    fn name(&self) -> &'static str {
        "jira_download_attachment"
    }

    fn description(&self) -> &'static str {
        crate::mcp::tool_descriptions::get_tool_description("attachments", "download")
            .unwrap_or("Tool description not available")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for::<AttachmentIdRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: AttachmentIdRequest = BaseToolImpl::parse_arguments(arguments)?;
        McpValidation::validate_not_empty(&request.attachment_id, "attachment id")
            .map_err(|e| McpErrorHandler::handle_error(e, "validate attachment id"))?;
        let attachment_id = request.attachment_id.trim();

        let metadata = McpErrorHandler::handle_result(
            context.client.get_attachment(attachment_id).await,
            "get attachment metadata",
        )?;
        let bytes = McpErrorHandler::handle_result(
            context.client.download_attachment(attachment_id).await,
            "download attachment",
        )?;

        let path = attachment_path(
            &context.client.config().attachment_dir,
            attachment_id,
            &metadata.filename,
        );
        save(&path, &bytes)
            .await
            .map_err(|e| McpErrorHandler::handle_error(e, "save attachment"))?;
        tracing::info!("Saved attachment {} to {}", attachment_id, path.display());

        Ok(BaseToolImpl::create_success_response(format_download(
            &path,
            &metadata,
            bytes.len(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_attachment_path_sanitises_separators() {
        let dir = Path::new("/tmp/attachments");
        assert_eq!(
            attachment_path(dir, "42", "../etc/passwd"),
            dir.join("42_.._etc_passwd")
        );
        assert_eq!(
            attachment_path(dir, "42", "a\\b.txt"),
            dir.join("42_a_b.txt")
        );
        assert_eq!(attachment_path(dir, "42", ""), dir.join("42_attachment-42"));
    }

    #[tokio::test]
    async fn test_save_creates_directory() {
        let temp = TempDir::new().unwrap();
        let path = attachment_path(&temp.path().join("nested"), "7", "notes.txt");
        save(&path, b"hello").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn test_format_download_prefers_reported_size() {
        let metadata = Attachment {
            filename: "notes.txt".to_string(),
            size: 0,
            mime_type: "text/plain".to_string(),
            ..Default::default()
        };
        assert_eq!(
            format_download(Path::new("/tmp/7_notes.txt"), &metadata, 5),
            "Attachment downloaded successfully!\nFile: /tmp/7_notes.txt\nFilename: notes.txt\nSize: 5 bytes\nMIME Type: text/plain"
        );
    }
}
