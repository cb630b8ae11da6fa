//! Error types for hooks-core

use std::path::PathBuf;

/// Result type for hooks-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in hooks-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A relative position name that is neither built in nor a valid custom name
    #[error("Invalid relative position: {position:?}")]
    InvalidPosition { position: String },

    /// Persisted ignore list that is not a JSON array of strings
    #[error("Invalid ignore list under {key}: {message}")]
    InvalidIgnoreList { key: String, message: String },

    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file is not valid TOML for the expected schema
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    /// Markup error from hooks-markup
    #[error(transparent)]
    Markup(#[from] hooks_markup::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
