//! Error handling module for Hotlink

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for Hotlink operations
#[derive(Error, Debug)]
pub enum HotlinkError {
    /// Domain rule violation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// HTTP client construction error
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Logging subscriber could not be installed
    #[error("Failed to initialize logging: {message}")]
    LoggingInit { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Hotlink operations
pub type HotlinkResult<T> = std::result::Result<T, HotlinkError>;
