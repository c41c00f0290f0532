//! Error types for devtarget
//! 
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for devtarget
#[derive(Error, Debug)]
pub enum DevtargetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for devtarget operations
pub type Result<T> = std::result::Result<T, DevtargetError>;

impl DevtargetError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            DevtargetError::Io(e) => format!("File operation failed: {}", e),
            DevtargetError::Config(msg) => format!("Configuration error: {}", msg),
            DevtargetError::TomlParse(e) => format!("Config file is malformed: {}", e),
            DevtargetError::NotFound(msg) => format!("Not found: {}", msg),
            DevtargetError::InvalidState(msg) => format!("Can't do that right now: {}", msg),
            _ => self.to_string(),
        }
    }
}
