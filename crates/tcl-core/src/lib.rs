pub mod config;
pub mod error;
pub mod function;

pub use config::{DuplicatePolicy, LoggingConfig, ProjectConfig, RegistryConfig, TclConfig};
pub use error::{Result, TclError};
pub use function::{FunctionInfo, GlobalFunction};
