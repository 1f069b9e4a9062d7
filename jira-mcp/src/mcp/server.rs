//! MCP server implementation for serving Jira tools and prompts

use crate::client::JiraClient;
use crate::config::JiraConfig;
use crate::Result;
use futures_util::FutureExt;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};
use serde_json::Value;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::prompts::PromptLibrary;
use super::tool_registry::{create_tool_registry, BaseToolImpl, ToolContext, ToolRegistry};

const SERVER_NAME: &str = "Jira MCP";

const INSTRUCTIONS: &str = "Tools for Jira Cloud: read, create and update issues, search with JQL, \
comment, log work, transition and link issues, inspect history, manage sprints and versions, \
download attachments and list the branches, pull requests, commits and builds linked to an issue. \
Use list_prompts for guided development overviews.";

/// MCP server for Jira tools and prompts
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    prompts: Arc<PromptLibrary>,
    /// Tool context containing shared state for tool execution
    pub tool_context: Arc<ToolContext>,
}

impl McpServer {
    /// Create a server talking to the Jira site described by `config`
    pub fn new(config: JiraConfig) -> Result<Self> {
        let client = Arc::new(JiraClient::new(config)?);
        Self::with_context(ToolContext::new(client))
    }

    /// Create a server around an existing tool context
    pub fn with_context(tool_context: ToolContext) -> Result<Self> {
        Self::with_registry(create_tool_registry(), tool_context)
    }

    /// Create a server serving the tools of `tool_registry`
    pub fn with_registry(tool_registry: ToolRegistry, tool_context: ToolContext) -> Result<Self> {
        tracing::debug!("Registered {} tools", tool_registry.len());

        Ok(Self {
            tool_registry: Arc::new(tool_registry),
            prompts: Arc::new(PromptLibrary::builtin()?),
            tool_context: Arc::new(tool_context),
        })
    }

    /// Names of every registered tool
    pub fn list_tool_names(&self) -> Vec<String> {
        self.tool_registry.list_tool_names()
    }

    fn capabilities() -> ServerCapabilities {
        ServerCapabilities {
            prompts: Some(PromptsCapability {
                list_changed: Some(false),
            }),
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
            resources: None,
            logging: None,
            completions: None,
            experimental: None,
        }
    }

    fn implementation() -> Implementation {
        Implementation {
            name: SERVER_NAME.into(),
            version: crate::VERSION.into(),
        }
    }

    fn json_map_to_string_map(args: &serde_json::Map<String, Value>) -> HashMap<String, String> {
        args.iter()
            .map(|(key, value)| {
                let value_str = match value {
                    Value::String(s) => s.clone(),
                    v => v.to_string(),
                };
                (key.clone(), value_str)
            })
            .collect()
    }

    /// Prompt descriptors for `prompts/list`
    pub fn prompt_list(&self) -> Vec<Prompt> {
        self.prompts
            .list()
            .iter()
            .map(|p| Prompt {
                name: p.name.clone(),
                description: Some(p.description.clone()),
                arguments: Some(
                    p.arguments
                        .iter()
                        .map(|arg| PromptArgument {
                            name: arg.name.clone(),
                            description: arg.description.clone(),
                            required: Some(arg.required),
                        })
                        .collect(),
                ),
            })
            .collect()
    }

    /// Render a prompt with the supplied arguments
    pub fn render_prompt(
        &self,
        name: &str,
        arguments: Option<&serde_json::Map<String, Value>>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        let prompt = self.prompts.get(name).ok_or_else(|| {
            tracing::warn!("Prompt '{}' not found", name);
            McpError::invalid_params(format!("Prompt '{name}' is not available"), None)
        })?;

        let template_args = arguments
            .map(Self::json_map_to_string_map)
            .unwrap_or_default();
        let text = prompt.render(&template_args).map_err(|e| match e {
            crate::JiraMcpError::Validation(msg) => McpError::invalid_params(msg, None),
            other => McpError::internal_error(format!("Template rendering error: {other}"), None),
        })?;

        Ok(GetPromptResult {
            description: Some(prompt.result_description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::Text { text },
            }],
        })
    }

    /// Run a tool with the error and panic guard applied.
    ///
    /// Tool failures and panics become error results; only an unknown tool
    /// name is reported as a protocol error.
    pub async fn execute_tool(
        &self,
        name: &str,
        arguments: serde_json::Map<String, Value>,
        cancellation: CancellationToken,
    ) -> std::result::Result<CallToolResult, McpError> {
        let tool = self.tool_registry.get_tool(name).ok_or_else(|| {
            McpError::invalid_request(format!("Unknown tool: {name}"), None)
        })?;

        tracing::debug!("🔧 Calling tool {}", name);
        let context = self.tool_context.for_request(cancellation.clone());
        let guarded = AssertUnwindSafe(tool.execute(arguments, &context)).catch_unwind();

        let result = tokio::select! {
            biased;
            _ = cancellation.cancelled() => {
                tracing::info!("Tool {} canceled by client", name);
                BaseToolImpl::create_error_response("operation canceled", None)
            }
            outcome = guarded => match outcome {
                Ok(Ok(result)) => result,
                Ok(Err(error)) => BaseToolImpl::create_error_response(error.message.to_string(), None),
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    tracing::error!("❌ Tool {} panicked: {}", name, message);
                    BaseToolImpl::create_error_response(
                        "panic in tool handler",
                        Some(message),
                    )
                }
            },
        };

        Ok(result)
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl ServerHandler for McpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            "🚀 MCP client connecting: {} v{}",
            request.client_info.name,
            request.client_info.version
        );

        Ok(InitializeResult {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            server_info: Self::implementation(),
            instructions: Some(INSTRUCTIONS.into()),
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            prompts: self.prompt_list(),
            next_cursor: None,
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        self.render_prompt(&request.name, request.arguments.as_ref())
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        self.execute_tool(
            &request.name,
            request.arguments.unwrap_or_default(),
            context.ct.clone(),
        )
        .await
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            server_info: Self::implementation(),
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}
