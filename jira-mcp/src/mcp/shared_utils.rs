//! Shared utilities for MCP operations
//!
//! Error mapping and argument validation used by every tool handler.

use crate::error::ErrorContext;
use crate::{JiraMcpError, Result};
use rmcp::Error as McpError;

/// Common error handling patterns for MCP operations
pub struct McpErrorHandler;

impl McpErrorHandler {
    /// Convert a [`JiraMcpError`] to an MCP error.
    ///
    /// - caller input errors -> invalid_params
    /// - backend and system errors -> internal_error
    pub fn handle_error(error: JiraMcpError, operation: &str) -> McpError {
        tracing::error!("MCP operation '{}' failed: {}", operation, error);

        match error {
            JiraMcpError::Validation(msg) => McpError::invalid_params(msg, None),
            err @ JiraMcpError::NotFound { .. } => McpError::invalid_params(err.to_string(), None),
            JiraMcpError::Canceled => McpError::internal_error("operation canceled", None),
            err @ (JiraMcpError::AuthFailed { .. }
            | JiraMcpError::Upstream { .. }
            | JiraMcpError::Api { .. }) => McpError::internal_error(err.to_string(), None),
            JiraMcpError::Http(err) => McpError::internal_error(format!("HTTP error: {err}"), None),
            JiraMcpError::Io(err) => McpError::internal_error(format!("IO error: {err}"), None),
            JiraMcpError::Json(err) => McpError::internal_error(format!("JSON error: {err}"), None),
            other => McpError::internal_error(other.to_string(), None),
        }
    }

    /// Map a backend result, naming the failed operation in the message
    pub fn handle_result<T>(result: Result<T>, operation: &str) -> std::result::Result<T, McpError> {
        result
            .with_operation(operation)
            .map_err(|e| Self::handle_error(e, operation))
    }
}

/// Validation utilities for MCP requests
pub struct McpValidation;

impl McpValidation {
    /// Validate string is not empty
    pub fn validate_not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(JiraMcpError::validation(format!(
                "{} cannot be empty",
                Self::capitalize_first_letter(field)
            )));
        }
        Ok(())
    }

    /// Validate a list holds between one and `max` entries
    pub fn validate_item_count(count: usize, field: &str, max: usize) -> Result<()> {
        if count == 0 {
            return Err(JiraMcpError::validation(format!(
                "at least one {field} is required"
            )));
        }
        if count > max {
            return Err(JiraMcpError::validation(format!(
                "too many {field}s: {count} (max: {max})"
            )));
        }
        Ok(())
    }

    /// Parse a positive numeric identifier
    pub fn parse_id(value: &str, field: &str) -> Result<i64> {
        value
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| JiraMcpError::validation(format!("invalid {field}: {value}")))
    }

    /// Split a comma separated list, dropping blanks
    pub fn split_list(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn capitalize_first_letter(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        }
    }
}
