//! # jira-mcp
//!
//! Model Context Protocol tools for Jira Cloud.
//!
//! ## Features
//!
//! - **Issue tools**: Create, read, update, search, comment, log work, transition and link issues
//! - **Agile tools**: Boards, sprints, sprint moves and burndown reports
//! - **Development information**: Branches, pull requests, commits and builds linked to an issue
//! - **MCP Support**: A ready-to-serve `rmcp` server with tools and prompts
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jira_mcp::{config::JiraConfig, client::JiraClient, devinfo::{DevInfoAggregator, IncludeFlags}};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> jira_mcp::Result<()> {
//! let config = JiraConfig::new("example.atlassian.net", "dev@example.com", "token");
//! let client = JiraClient::new(config)?;
//! let outcome = DevInfoAggregator::new(&client)
//!     .aggregate("PROJ-1", IncludeFlags::default(), &CancellationToken::new())
//!     .await?;
//! println!("{}", serde_json::to_string_pretty(&outcome)?);
//! # Ok(())
//! # }
//! ```

/// Rich-text document rendering
pub mod adf;

/// REST client and wire models
pub mod client;

/// Shared helpers: environment loading, timestamps
pub mod common;

/// Configuration loading and validation
pub mod config;

/// Development information aggregation
pub mod devinfo;

/// Error types
pub mod error;

/// Human-readable issue rendering
pub mod format;

/// Model Context Protocol (MCP) server support
pub mod mcp;

pub use error::{JiraMcpError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
