//! Core error types

use thiserror::Error;

/// Errors raised while interpreting host input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Key name not known to [`KeyCode::from_name`](crate::events::KeyCode::from_name)
    #[error("Unknown key name: {0}")]
    UnknownKey(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
