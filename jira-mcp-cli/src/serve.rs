//! Configuration loading and the MCP transports

use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_CONFIG_ERROR;
use anyhow::Context;
use jira_mcp::config::JiraConfig;
use jira_mcp::mcp::McpServer;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::sse_server::SseServer;
use std::net::SocketAddr;
use std::path::Path;

/// Read configuration, loading `env_file` into the environment first.
/// Variables already set in the environment win over the file.
pub fn load_config(env_file: Option<&Path>) -> CliResult<JiraConfig> {
    if let Some(path) = env_file {
        dotenvy::from_path(path).map_err(|e| {
            CliError::new(
                format!("Failed to load env file {}: {e}", path.display()),
                EXIT_CONFIG_ERROR,
            )
        })?;
        tracing::debug!("Loaded environment from {}", path.display());
    }

    JiraConfig::from_env().map_err(CliError::config)
}

/// Load configuration and serve until the client disconnects or a shutdown
/// signal arrives
pub async fn run_server(env_file: Option<&Path>, http_port: Option<u16>) -> CliResult<()> {
    let config = load_config(env_file)?;
    tracing::info!("Using Jira site {}", config.host);

    let server = McpServer::new(config)
        .context("failed to create MCP server")
        .map_err(CliError::runtime)?;

    match http_port {
        Some(port) => run_http(server, port).await,
        None => run_stdio(server).await,
    }
    .map_err(CliError::runtime)
}

async fn run_stdio(server: McpServer) -> anyhow::Result<()> {
    let running = serve_server(server, stdio())
        .await
        .context("failed to start stdio transport")?;
    tracing::info!("MCP server started on stdio");

    tokio::select! {
        quit = running.waiting() => {
            quit.context("MCP service task failed")?;
            tracing::info!("MCP client disconnected");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for shutdown signal")?;
            tracing::info!("Shutdown signal received");
        }
    }
    Ok(())
}

async fn run_http(server: McpServer, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let sse = SseServer::serve(addr)
        .await
        .with_context(|| format!("failed to bind HTTP transport on {addr}"))?;
    let ct = sse.with_service(move || server.clone());
    tracing::info!("🌐 MCP server listening on http://{}/sse", addr);

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    tracing::info!("Shutdown signal received");
    ct.cancel();
    Ok(())
}
