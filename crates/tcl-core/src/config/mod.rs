mod logging;
mod registry;

pub use logging::LoggingConfig;
pub use registry::{DuplicatePolicy, RegistryConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TclError};

/// Root configuration for tcl.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TclConfig {
    /// Project metadata.
    #[serde(default)]
    pub project: ProjectConfig,

    /// Global function registry configuration.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TclConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| TclError::Config(format!("Failed to read config file: {}", e)))?;

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let content = substitute_env_vars(content)?;

        toml::from_str(&content)
            .map_err(|e| TclError::Config(format!("Failed to parse config: {}", e)))
    }
}

/// Project metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name.
    #[serde(default = "default_project_name")]
    pub name: String,

    /// Project version.
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            version: default_version(),
        }
    }
}

fn default_project_name() -> String {
    "tcl".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Substitute environment variables in the format ${VAR_NAME}.
fn substitute_env_vars(content: &str) -> Result<String> {
    let mut result = content.to_string();
    let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| TclError::Internal(e.to_string()))?;

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    Ok(result)
}
