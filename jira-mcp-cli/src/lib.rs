//! Jira MCP CLI Library
//!
//! Command-line definitions, logging setup and exit codes for the `jira-mcp`
//! binary, exposed for tests.

/// Command-line interface definitions and argument parsing
pub mod cli;
/// Error type carrying an exit code
pub mod error;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Log destination and subscriber setup
pub mod logging;
/// Configuration loading and the MCP transports
pub mod serve;
