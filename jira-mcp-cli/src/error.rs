//! Error handling for the Jira MCP CLI
//!
//! Errors keep their source chain and carry the exit code the process should
//! end with.

use crate::exit_codes::{EXIT_CONFIG_ERROR, EXIT_FAILURE};
use jira_mcp::config::ConfigError;
use std::error::Error;
use std::fmt;

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error with the suggested exit code
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Wrap another error with a specific exit code
    pub fn from_error<E: Error + Send + Sync + 'static>(error: E, exit_code: i32) -> Self {
        Self {
            message: error.to_string(),
            exit_code,
            source: Some(Box::new(error)),
        }
    }

    /// Runtime failure (exit code 1)
    pub fn runtime(error: anyhow::Error) -> Self {
        Self {
            message: format!("{error:#}"),
            exit_code: EXIT_FAILURE,
            source: None,
        }
    }

    /// Configuration problem (exit code 2).
    /// Missing credentials are reported with setup instructions.
    pub fn config(error: ConfigError) -> Self {
        match error.setup_instructions() {
            Some(instructions) => Self::new(instructions, EXIT_CONFIG_ERROR),
            None => Self::from_error(error, EXIT_CONFIG_ERROR),
        }
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            result.push_str(&format!("\n  Caused by: {err}"));
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// Convert a CliResult to an exit code, printing the error if needed
pub fn handle_cli_result<T>(result: CliResult<T>) -> i32 {
    match result {
        Ok(_) => crate::exit_codes::EXIT_SUCCESS,
        Err(e) => {
            if e.exit_code == EXIT_CONFIG_ERROR && e.source.is_none() {
                eprintln!("{}", e.message);
            } else {
                eprintln!("Error: {}", e.full_chain());
            }
            e.exit_code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_variables_carry_instructions() {
        let error = CliError::config(ConfigError::MissingVariables {
            names: vec!["ATLASSIAN_HOST".to_string()],
        });
        assert_eq!(error.exit_code, EXIT_CONFIG_ERROR);
        assert!(error.message.contains("Setup Instructions"));
        assert!(error.message.contains("  - ATLASSIAN_HOST\n"));
    }

    #[test]
    fn test_full_chain_includes_source() {
        let error = CliError::config(ConfigError::FileRead {
            path: PathBuf::from("/missing/jira-mcp.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
        assert_eq!(error.exit_code, EXIT_CONFIG_ERROR);
        assert!(error.full_chain().contains("Caused by: no such file"));
    }

    #[test]
    fn test_runtime_error_keeps_context() {
        let error = CliError::runtime(
            anyhow::anyhow!("address in use").context("failed to bind HTTP transport"),
        );
        assert_eq!(error.exit_code, EXIT_FAILURE);
        assert_eq!(error.message, "failed to bind HTTP transport: address in use");
    }
}
