//! tcl - a process-wide registry of named global functions.
//!
//! Functions are registered under dotted names such as `testing.HelloWorld`
//! and can be looked up and invoked from Rust, from the `tcl` CLI, or across
//! the C ABI exported by this crate's `cdylib`.

// Lets `#[global_function]` expansions inside this crate resolve `tcl::...`.
extern crate self as tcl;

pub mod ffi;
mod global;
pub mod logging;
pub mod testing;

// Re-export tcl_core for macro-generated code
#[doc(hidden)]
pub use tcl_core;

pub use tcl_core::{
    DuplicatePolicy, FunctionInfo, GlobalFunction, Result, TclConfig, TclError,
};
pub use tcl_macros::global_function;
pub use tcl_runtime::{BoxedHandler, FunctionEntry, FunctionRegistry};

pub use global::{global, init, register_builtins};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_world_end_to_end() {
        let registry = FunctionRegistry::new();
        register_builtins(&registry).unwrap();

        assert_eq!(
            registry.invoke("testing.HelloWorld").unwrap(),
            "Hello, World!"
        );
    }

    #[test]
    fn test_empty_registry_end_to_end() {
        let registry = FunctionRegistry::new();

        let err = registry.invoke("testing.HelloWorld").unwrap_err();
        assert!(matches!(err, TclError::NotFound(_)));
    }
}
