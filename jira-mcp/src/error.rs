//! Unified error handling for the jira-mcp library
//!
//! Every fallible operation in the crate returns [`Result`], whose error type
//! keeps enough structure for the MCP layer to decide between reporting a
//! caller mistake and an upstream failure.

use std::io;
use thiserror::Error;

/// The main error type for the jira-mcp library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JiraMcpError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level HTTP failure (connection refused, timeout, bad body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("{status}: {body} (endpoint: {endpoint})")]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Path of the request that failed
        endpoint: String,
        /// Response body as returned by the backend
        body: String,
    },

    /// The referenced issue does not exist
    #[error("failed to retrieve development information: issue not found (endpoint: {endpoint})")]
    NotFound {
        /// Issue key that could not be resolved
        issue_key: String,
        /// Endpoint that reported the missing issue
        endpoint: String,
    },

    /// Credentials were rejected by the backend
    #[error("failed to retrieve development information: authentication failed (endpoint: {endpoint})")]
    AuthFailed {
        /// Endpoint that rejected the credentials
        endpoint: String,
    },

    /// Any other backend failure that should be reported verbatim
    #[error("{message} (endpoint: {endpoint})")]
    Upstream {
        /// Endpoint involved in the failure
        endpoint: String,
        /// Description of what went wrong
        message: String,
    },

    /// Missing or malformed caller input
    #[error("{0}")]
    Validation(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Template parsing or rendering failed
    #[error("Template error: {0}")]
    Template(String),

    /// The caller canceled the request
    #[error("operation canceled")]
    Canceled,

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl JiraMcpError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an upstream error for the given endpoint
    pub fn upstream(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if the backend produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this error was caused by caller input rather than the backend
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound { .. })
    }
}

/// Result type alias for jira-mcp operations
pub type Result<T> = std::result::Result<T, JiraMcpError>;

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Prefix the error message with a description of the failed operation
    fn with_operation(self, operation: &str) -> Result<T>;
}

impl<T> ErrorContext<T> for Result<T> {
    fn with_operation(self, operation: &str) -> Result<T> {
        self.map_err(|e| match e {
            JiraMcpError::Api {
                status,
                endpoint,
                body,
            } => JiraMcpError::Upstream {
                endpoint,
                message: format!("failed to {operation}: {status}: {body}"),
            },
            JiraMcpError::Upstream { endpoint, message } => JiraMcpError::Upstream {
                endpoint,
                message: format!("failed to {operation}: {message}"),
            },
            JiraMcpError::Http(err) => JiraMcpError::Other(format!("failed to {operation}: {err}")),
            other => other,
        })
    }
}
