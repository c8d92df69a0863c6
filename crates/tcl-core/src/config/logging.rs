use serde::{Deserialize, Serialize};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level, overridden by `RUST_LOG` when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output JSON format.
    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
