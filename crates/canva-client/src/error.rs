//! Error types for the Canva client

use thiserror::Error;

/// Result type alias for Canva client operations
pub type Result<T> = std::result::Result<T, CanvaError>;

/// Canva client errors
#[derive(Debug, Error)]
pub enum CanvaError {
    /// A required parameter was not supplied. Raised before any network I/O.
    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),

    /// A parameter was supplied but cannot be used where the endpoint needs it
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The remote service answered with a non-success status
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced an HTTP status (connect, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// A success response whose body is not valid JSON
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The credential provider could not supply auth material
    #[error("Credential error: {0}")]
    Credential(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CanvaError {
    /// True when the caller can recover by supplying or fixing an argument.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CanvaError::MissingParameter(_) | CanvaError::InvalidParameter { .. }
        )
    }

    /// HTTP status of a remote error
    pub fn status(&self) -> Option<u16> {
        match self {
            CanvaError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
