//! Environment variable loading utilities
//!
//! Variables are grouped under a prefix (`ATLASSIAN_HOST`, `JIRA_MCP_REQUEST_TIMEOUT_SECS`)
//! and read through an [`EnvLoader`] bound to that prefix.

use std::env;
use std::str::FromStr;

/// Load an environment variable with a string default
pub fn load_env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Load an environment variable with type conversion and default
pub fn load_env_parsed<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Load an environment variable as an Option<T>
pub fn load_env_optional<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Load a variable that must be present and non-blank
pub fn load_env_required(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Builder for loading multiple environment variables with consistent prefix
#[derive(Debug)]
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    /// Create a new environment loader with the given prefix
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    /// Full variable name for a suffix
    pub fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }

    /// Load a string value with default
    pub fn load_string(&self, suffix: &str, default: &str) -> String {
        load_env_string(&self.key(suffix), default)
    }

    /// Load a parsed value with default
    pub fn load_parsed<T>(&self, suffix: &str, default: T) -> T
    where
        T: FromStr,
    {
        load_env_parsed(&self.key(suffix), default)
    }

    /// Load an optional value
    pub fn load_optional<T>(&self, suffix: &str) -> Option<T>
    where
        T: FromStr,
    {
        load_env_optional(&self.key(suffix))
    }

    /// Load a required value, `None` when unset or blank
    pub fn load_required(&self, suffix: &str) -> Option<String> {
        load_env_required(&self.key(suffix))
    }
}
