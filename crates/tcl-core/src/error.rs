use thiserror::Error;

/// Core error type for tcl operations.
#[derive(Error, Debug)]
pub enum TclError {
    #[error("Global function '{0}' is already registered")]
    DuplicateName(String),

    #[error("Global function '{0}' is not registered")]
    NotFound(String),

    #[error("Invalid function name: {0}")]
    InvalidName(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("FFI error: {0}")]
    Ffi(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for TclError {
    fn from(e: serde_json::Error) -> Self {
        TclError::Serialization(e.to_string())
    }
}

/// Result type alias using TclError.
pub type Result<T> = std::result::Result<T, TclError>;
