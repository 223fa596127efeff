//! Runtime configuration for registry building and execution.
//!
//! Values come from YAML (string or file) or from the environment:
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `AI_LIB_TOOLS_CONFIG` | Path of a YAML file loaded first |
//! | `AI_LIB_TOOLS_NAMESPACED` | Overrides `namespaced_toolsets` (`true`/`false`/`1`/`0`) |
//! | `AI_LIB_TOOLS_SEPARATOR` | Overrides `namespace_separator` |

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_NAMESPACE_SEPARATOR: &str = "__";
pub const DEFAULT_EXECUTOR_THREAD_NAME: &str = "ai-lib-tool-exec";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolingConfig {
    /// Prefix toolset member names with the toolset name.
    pub namespaced_toolsets: bool,
    pub namespace_separator: String,
    /// Name given to threads that drive suspending tools from blocking callers.
    pub executor_thread_name: String,
}

impl Default for ToolingConfig {
    fn default() -> Self {
        Self {
            namespaced_toolsets: true,
            namespace_separator: DEFAULT_NAMESPACE_SEPARATOR.to_string(),
            executor_thread_name: DEFAULT_EXECUTOR_THREAD_NAME.to_string(),
        }
    }
}

impl ToolingConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: ToolingConfig = serde_yaml::from_str(content).map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to parse tooling config: {}", e),
                ErrorContext::new().with_source("yaml"),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to read tooling config: {}", e),
                ErrorContext::new().with_source(path.to_string_lossy().to_string()),
            )
        })?;
        Self::from_yaml(&content)
    }

    /// Defaults, then the file named by `AI_LIB_TOOLS_CONFIG`, then the
    /// individual variable overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var("AI_LIB_TOOLS_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::default(),
        };

        if let Ok(raw) = std::env::var("AI_LIB_TOOLS_NAMESPACED") {
            config.namespaced_toolsets = parse_flag(&raw).ok_or_else(|| {
                Error::configuration_with_context(
                    "expected a boolean flag",
                    ErrorContext::new()
                        .with_field_path("namespaced_toolsets")
                        .with_details(format!("got `{}`", raw))
                        .with_source("env"),
                )
            })?;
        }
        if let Ok(sep) = std::env::var("AI_LIB_TOOLS_SEPARATOR") {
            config.namespace_separator = sep;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_namespaced_toolsets(mut self, enabled: bool) -> Self {
        self.namespaced_toolsets = enabled;
        self
    }

    pub fn with_namespace_separator(mut self, separator: impl Into<String>) -> Self {
        self.namespace_separator = separator.into();
        self
    }

    pub fn with_executor_thread_name(mut self, name: impl Into<String>) -> Self {
        self.executor_thread_name = name.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.namespaced_toolsets && self.namespace_separator.is_empty() {
            return Err(Error::configuration_with_context(
                "separator must not be empty when toolsets are namespaced",
                ErrorContext::new()
                    .with_field_path("namespace_separator")
                    .with_source("tooling_config"),
            ));
        }
        if self.executor_thread_name.contains('\0') {
            return Err(Error::configuration_with_context(
                "thread name must not contain NUL bytes",
                ErrorContext::new()
                    .with_field_path("executor_thread_name")
                    .with_source("tooling_config"),
            ));
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
