mod call;
mod info;
mod list;

pub use call::CallCommand;
pub use info::InfoCommand;
pub use list::ListCommand;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tcl::TclConfig;

/// Configuration file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "tcl.toml";

/// tcl - call registered global functions
#[derive(Parser)]
#[command(name = "tcl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to ./tcl.toml when present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List registered global functions.
    List(ListCommand),

    /// Invoke a global function and print its result.
    Call(CallCommand),

    /// Show metadata for a global function.
    Info(InfoCommand),
}

impl Cli {
    /// Execute the CLI command.
    pub fn execute(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;

        let mut logging = config.logging.clone();
        if self.verbose {
            logging.level = "debug".to_string();
        }
        tcl::logging::init(&logging)?;

        let registry = tcl::init(&config)?;

        match self.command {
            Commands::List(cmd) => cmd.execute(registry),
            Commands::Call(cmd) => cmd.execute(registry),
            Commands::Info(cmd) => cmd.execute(registry),
        }
    }
}

/// Load configuration from `path`, or from `tcl.toml` if present, or defaults.
fn load_config(path: Option<&Path>) -> Result<TclConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            Ok(TclConfig::from_file(path)?)
        }
        None => {
            let default = Path::new(DEFAULT_CONFIG);
            if default.exists() {
                Ok(TclConfig::from_file(default)?)
            } else {
                Ok(TclConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tcl::DuplicatePolicy;

    #[test]
    fn test_cli_parse_call() {
        let cli = Cli::try_parse_from(["tcl", "call", "testing.HelloWorld"]).unwrap();
        assert!(matches!(cli.command, Commands::Call(ref cmd) if cmd.name == "testing.HelloWorld"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_parse_list_json_with_config() {
        let cli = Cli::try_parse_from(["tcl", "list", "--json", "--config", "custom.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::List(ref cmd) if cmd.json));
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_cli_call_requires_name() {
        assert!(Cli::try_parse_from(["tcl", "call"]).is_err());
    }

    #[test]
    fn test_load_explicit_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[registry]\non_duplicate = \"reject\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.registry.on_duplicate, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_load_missing_explicit_config() {
        let err = load_config(Some(Path::new("/nonexistent/tcl.toml"))).unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }
}
