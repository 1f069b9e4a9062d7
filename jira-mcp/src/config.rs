//! Configuration management for jira-mcp
//!
//! Credentials come from the `ATLASSIAN_*` environment variables. Tunables start
//! from defaults, are overridden by `JIRA_MCP_*` environment variables and then by
//! an optional `jira-mcp.yaml` file.

use crate::common::env_loader::EnvLoader;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variables that must be set before the server can start
pub const REQUIRED_ENV_VARS: [&str; 3] = ["ATLASSIAN_HOST", "ATLASSIAN_EMAIL", "ATLASSIAN_TOKEN"];

const CONFIG_FILENAME: &str = "jira-mcp.yaml";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SEARCH_MAX_RESULTS: u32 = 30;
const DEFAULT_COMMENT_MAX_RESULTS: u32 = 50;
const MAX_PAGE_SIZE: u32 = 100;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required environment variables are unset or blank
    #[error("Missing required environment variables: {}", .names.join(", "))]
    MissingVariables {
        /// Names of the missing variables, in declaration order
        names: Vec<String>,
    },

    /// Failed to read a configuration file from disk
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        /// Path to the configuration file that could not be read
        path: PathBuf,
        /// Underlying I/O error that occurred during file reading
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse YAML content from a configuration file
    #[error("Invalid YAML syntax in {path}:\n{source}\n\nHint: Check for proper indentation and YAML formatting")]
    YamlParse {
        /// Path to the configuration file with invalid YAML content
        path: PathBuf,
        /// Underlying YAML parsing error
        #[source]
        source: serde_yaml::Error,
    },

    /// Invalid configuration value for a specific field
    #[error("Invalid configuration value for '{field}': {value}\n{hint}")]
    InvalidValue {
        /// Name of the configuration field that has an invalid value
        field: String,
        /// The invalid value that was provided
        value: String,
        /// Helpful hint about how to fix the issue
        hint: String,
    },
}

impl ConfigError {
    /// Multi-line setup guide printed when credentials are missing
    pub fn setup_instructions(&self) -> Option<String> {
        let ConfigError::MissingVariables { names } = self else {
            return None;
        };

        let mut text = String::from("❌ Configuration Error: Missing required environment variables\n\n");
        text.push_str("Missing variables:\n");
        for name in names {
            text.push_str(&format!("  - {name}\n"));
        }
        text.push_str(
            "\n📋 Setup Instructions:\n\
             1. Get your Atlassian API token from: https://id.atlassian.com/manage-profile/security/api-tokens\n\
             2. Set the environment variables:\n\n\
             \x20  Option A - Using .env file (pass it with --env):\n\
             \x20  ATLASSIAN_HOST=https://your-domain.atlassian.net\n\
             \x20  ATLASSIAN_EMAIL=your-email@example.com\n\
             \x20  ATLASSIAN_TOKEN=your-api-token\n\n\
             \x20  Option B - Using environment variables:\n\
             \x20  export ATLASSIAN_HOST=https://your-domain.atlassian.net\n\
             \x20  export ATLASSIAN_EMAIL=your-email@example.com\n\
             \x20  export ATLASSIAN_TOKEN=your-api-token\n",
        );
        Some(text)
    }
}

/// Runtime configuration for the Jira client and tools
#[derive(Debug, Clone)]
pub struct JiraConfig {
    /// Base URL of the Jira site, without trailing slash
    pub host: String,
    /// Account email used for basic authentication
    pub email: String,
    /// API token used for basic authentication
    pub api_token: String,
    /// Timeout applied to every outbound request
    pub request_timeout: Duration,
    /// Page size for issue search
    pub search_max_results: u32,
    /// Page size for comment listing
    pub comment_max_results: u32,
    /// Directory where downloaded attachments are written
    pub attachment_dir: PathBuf,
}

impl JiraConfig {
    /// Build a configuration from explicit credentials and default tunables
    pub fn new(host: &str, email: &str, api_token: &str) -> Self {
        Self {
            host: normalize_host(host),
            email: email.to_string(),
            api_token: api_token.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            search_max_results: DEFAULT_SEARCH_MAX_RESULTS,
            comment_max_results: DEFAULT_COMMENT_MAX_RESULTS,
            attachment_dir: default_attachment_dir(),
        }
    }

    /// Load configuration from:
    /// 1. YAML file (highest precedence, tunables only)
    /// 2. Environment variables
    /// 3. Defaults (lowest precedence)
    pub fn from_env() -> Result<Self, ConfigError> {
        let atlassian = EnvLoader::new("ATLASSIAN");
        let mut missing = Vec::new();
        let mut required = Vec::new();
        for name in REQUIRED_ENV_VARS {
            let suffix = name.trim_start_matches("ATLASSIAN_");
            match atlassian.load_required(suffix) {
                Some(value) => required.push(value),
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables { names: missing });
        }

        let mut config = Self::new(&required[0], &required[1], &required[2]);
        config.apply_env_vars();

        if let Some(path) = Self::find_yaml_config_file() {
            YamlConfig::load_from_file(&path)?.apply_to_config(&mut config);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        let loader = EnvLoader::new("JIRA_MCP");

        let timeout_secs =
            loader.load_parsed("REQUEST_TIMEOUT_SECS", self.request_timeout.as_secs());
        self.request_timeout = Duration::from_secs(timeout_secs);
        self.search_max_results =
            loader.load_parsed("SEARCH_MAX_RESULTS", self.search_max_results);
        self.comment_max_results =
            loader.load_parsed("COMMENT_MAX_RESULTS", self.comment_max_results);
        if let Some(dir) = loader.load_optional::<PathBuf>("ATTACHMENT_DIR") {
            self.attachment_dir = dir;
        }
    }

    /// Find `jira-mcp.yaml` in the working directory or `~/.config/jira-mcp/`
    pub fn find_yaml_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(CONFIG_FILENAME)];
        if let Some(home_dir) = dirs::home_dir() {
            search_paths.push(home_dir.join(".config").join("jira-mcp").join(CONFIG_FILENAME));
        }

        let found = search_paths.into_iter().find(|p| p.is_file());
        match &found {
            Some(path) => tracing::debug!("Found configuration file: {:?}", path),
            None => tracing::debug!("No {} configuration file found", CONFIG_FILENAME),
        }
        found
    }

    /// Validate the current configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.host).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "ATLASSIAN_HOST".to_string(),
                value: self.host.clone(),
                hint: "Use the site URL, e.g. https://your-domain.atlassian.net".to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                value: "0".to_string(),
                hint: "The request timeout must be at least one second".to_string(),
            });
        }
        for (field, value) in [
            ("search_max_results", self.search_max_results),
            ("comment_max_results", self.comment_max_results),
        ] {
            if value == 0 || value > MAX_PAGE_SIZE {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                    hint: format!("Page sizes must be between 1 and {MAX_PAGE_SIZE}"),
                });
            }
        }
        Ok(())
    }
}

/// Optional tunables loaded from `jira-mcp.yaml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YamlConfig {
    /// Request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Page size for issue search
    pub search_max_results: Option<u32>,
    /// Page size for comment listing
    pub comment_max_results: Option<u32>,
    /// Attachment download directory
    pub attachment_dir: Option<PathBuf>,
}

impl YamlConfig {
    /// Apply YAML configuration values to an existing config.
    /// YAML values take precedence over existing values.
    pub fn apply_to_config(&self, config: &mut JiraConfig) {
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(max) = self.search_max_results {
            config.search_max_results = max;
        }
        if let Some(max) = self.comment_max_results {
            config.comment_max_results = max;
        }
        if let Some(ref dir) = self.attachment_dir {
            config.attachment_dir = dir.clone();
        }
    }

    /// Load YAML configuration from a file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::info!("Loading YAML configuration from: {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::YamlParse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Strip trailing slashes and default to https when no scheme is given
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

fn default_attachment_dir() -> PathBuf {
    std::env::temp_dir().join("jira-mcp-attachments")
}
