use serde::{Deserialize, Serialize};

/// Global function registry configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// What to do when a name is registered twice.
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
}

/// Behaviour of `register` when the name already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Last registration wins.
    #[default]
    Overwrite,
    /// Keep the first registration and fail the second.
    Reject,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::Overwrite => write!(f, "overwrite"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}
