// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// File not found
    FileNotFound(String),
    /// File rejected before any provider is contacted
    InvalidInput(String),
    /// Provider answered but the body signalled failure
    ProviderRejected { provider: String, reason: String },
    /// Network failure or non-success status
    TransportError { provider: String, reason: String },
    /// Every remote provider failed; the run degrades to a local preview
    AllProvidersExhausted { attempts: usize },
    /// Configuration could not be loaded or is inconsistent
    ConfigInvalid(String),
    /// Internal error
    InternalError(String),
}

impl DomainError {
    /// Whether the error should be shown to the user as a hard failure
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            DomainError::BadArgs(_)
                | DomainError::FileNotFound(_)
                | DomainError::InvalidInput(_)
                | DomainError::ConfigInvalid(_)
        )
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FileNotFound(msg) => write!(f, "File not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::ProviderRejected { provider, reason } => {
                write!(f, "Provider {} rejected the upload: {}", provider, reason)
            }
            DomainError::TransportError { provider, reason } => {
                write!(f, "Transport error talking to {}: {}", provider, reason)
            }
            DomainError::AllProvidersExhausted { attempts } => {
                write!(f, "All providers exhausted after {} attempts", attempts)
            }
            DomainError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            DomainError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
