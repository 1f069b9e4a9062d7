use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "jira-mcp")]
#[command(version)]
#[command(about = "An MCP server exposing Jira Cloud as tools")]
#[command(long_about = "
jira-mcp is an MCP (Model Context Protocol) server for Jira Cloud. It lets an
assistant read, create and update issues, search with JQL, manage sprints and
versions, download attachments and inspect the branches, pull requests, commits
and builds linked to an issue.

Credentials are read from ATLASSIAN_HOST, ATLASSIAN_EMAIL and ATLASSIAN_TOKEN.

Example usage:
  jira-mcp serve                      # Serve over stdio
  jira-mcp serve --env ~/.jira.env    # Load credentials from a dotenv file
  jira-mcp serve --http-port 8080     # Serve over HTTP (SSE)
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run as MCP server
    #[command(long_about = "
Runs jira-mcp as an MCP server. Without --http-port the server speaks the
protocol on stdin/stdout and writes its log to ~/.jira-mcp/mcp.log (override
the file name with JIRA_MCP_LOG_FILE). With --http-port it serves the SSE
transport on 0.0.0.0 and logs to stderr.

Exit codes:
  0 - Server stopped normally
  1 - Server failed
  2 - Configuration missing or invalid

Example:
  jira-mcp serve
  jira-mcp serve --env .env --http-port 8080
")]
    Serve {
        /// Dotenv file loaded before reading the environment
        #[arg(long, value_name = "FILE")]
        env: Option<PathBuf>,

        /// Serve over HTTP (SSE) on this port instead of stdio
        #[arg(long, value_name = "PORT")]
        http_port: Option<u16>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }

    /// Log level selected by the flags; quiet wins, verbose beats debug
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else if self.verbose {
            Level::TRACE
        } else if self.debug {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}
