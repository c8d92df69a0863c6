use anyhow::Result;
use clap::Parser;
use console::style;
use tcl::{FunctionInfo, FunctionRegistry};

/// List registered global functions.
#[derive(Parser)]
pub struct ListCommand {
    /// Print the listing as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, registry: &FunctionRegistry) -> Result<()> {
        let functions: Vec<FunctionInfo> = registry
            .names()
            .iter()
            .filter_map(|name| registry.info(name))
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&functions)?);
            return Ok(());
        }

        if functions.is_empty() {
            println!("  No global functions registered.");
            return Ok(());
        }

        for info in &functions {
            match &info.description {
                Some(desc) => println!("  {}  {}", style(&info.name).cyan(), style(desc).dim()),
                None => println!("  {}", style(&info.name).cyan()),
            }
        }

        Ok(())
    }
}
