use anyhow::{Context, Result};
use clap::Parser;
use tcl::FunctionRegistry;

/// Invoke a global function and print its result.
#[derive(Parser)]
pub struct CallCommand {
    /// Global function name, e.g. testing.HelloWorld.
    pub name: String,
}

impl CallCommand {
    /// Execute the call command.
    pub fn execute(self, registry: &FunctionRegistry) -> Result<()> {
        let output = self.invoke(registry)?;
        println!("{}", output);
        Ok(())
    }

    fn invoke(&self, registry: &FunctionRegistry) -> Result<String> {
        registry
            .invoke(&self.name)
            .with_context(|| format!("Failed to call '{}'", self.name))
    }
}
