use std::process;

use clap::CommandFactory;
use is_terminal::IsTerminal;
use jira_mcp_cli::cli::{Cli, Commands};
use jira_mcp_cli::error::handle_cli_result;
use jira_mcp_cli::exit_codes::{EXIT_FAILURE, EXIT_SUCCESS};
use jira_mcp_cli::logging::{self, LogTarget};
use jira_mcp_cli::serve::run_server;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let Some(Commands::Serve { env, http_port }) = cli.command.as_ref() else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Failed to print help: {e}");
            process::exit(EXIT_FAILURE);
        }
        process::exit(EXIT_SUCCESS);
    };

    // stdout belongs to the protocol when a client drives us over stdio
    let target = if http_port.is_none() && !std::io::stdin().is_terminal() {
        LogTarget::File(logging::mcp_log_path())
    } else {
        LogTarget::Stderr
    };
    logging::init(cli.log_level(), target);

    tracing::info!("Starting Jira MCP server v{}", jira_mcp::VERSION);
    let exit_code = handle_cli_result(run_server(env.as_deref(), *http_port).await);
    process::exit(exit_code);
}
