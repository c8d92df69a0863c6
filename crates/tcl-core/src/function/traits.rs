use serde::{Deserialize, Serialize};

/// Information about a registered global function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    /// Global name (used for lookup), e.g. `testing.HelloWorld`.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FunctionInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A function exposed through the global registry.
///
/// Global functions:
/// - Take no arguments
/// - Return a string
/// - Should be deterministic and free of side effects
///
/// Usually implemented by `#[tcl::global_function]` rather than by hand.
pub trait GlobalFunction: Send + Sync + 'static {
    /// Function metadata.
    fn info() -> FunctionInfo;

    /// Call the function.
    fn call() -> String;
}
