use anyhow::Result;
use clap::Parser;
use console::style;
use tcl::{FunctionRegistry, TclError};

/// Show metadata for a global function.
#[derive(Parser)]
pub struct InfoCommand {
    /// Global function name.
    pub name: String,
}

impl InfoCommand {
    /// Execute the info command.
    pub fn execute(self, registry: &FunctionRegistry) -> Result<()> {
        let info = registry
            .info(&self.name)
            .ok_or_else(|| TclError::NotFound(self.name.clone()))?;

        println!("  {} {}", style("name:").bold(), info.name);
        println!(
            "  {} {}",
            style("description:").bold(),
            info.description.as_deref().unwrap_or("-")
        );
        Ok(())
    }
}
