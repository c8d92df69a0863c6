use tcl_core::{LoggingConfig, Result, TclError};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| TclError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| TclError::Internal(format!("Failed to install subscriber: {}", e)))
}
