//! Error types for hooks-markup

/// Result type for hooks-markup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ways block markup can be malformed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Block {name} opened at byte {position} is never closed")]
    UnclosedBlock { name: String, position: usize },

    #[error("Closing delimiter for {name} at byte {position} has no matching opener")]
    UnexpectedCloser { name: String, position: usize },

    #[error("Expected closer for {expected} at byte {position}, found {found}")]
    MismatchedCloser {
        expected: String,
        found: String,
        position: usize,
    },

    #[error("Invalid closing delimiter for {name} at byte {position}: {message}")]
    MalformedCloser {
        name: String,
        position: usize,
        message: String,
    },

    #[error("Invalid attributes for {name} at byte {position}: {message}")]
    InvalidAttributes {
        name: String,
        position: usize,
        message: String,
    },
}
