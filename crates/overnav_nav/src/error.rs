//! Navigation error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the navigation crate's configuration surface.
///
/// Transitions themselves never fail; a missing scroll container degrades to
/// a no-op instead of an error.
#[derive(Error, Debug)]
pub enum NavError {
    /// Failed to read a config file
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`NavConfig`](crate::config::NavConfig)
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config parsed but a value is out of range
    #[error("Invalid config value `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavError>;
