//! Functions registered under the `testing.` namespace.

use tcl_core::Result;
use tcl_runtime::FunctionRegistry;

use crate::global_function;

/// Returns the fixed greeting "Hello, World!".
#[global_function(name = "testing.HelloWorld")]
pub fn hello_world() -> &'static str {
    "Hello, World!"
}

/// Register every `testing.` function.
pub fn register(registry: &FunctionRegistry) -> Result<()> {
    registry.register_function::<HelloWorldFunction>()
}
