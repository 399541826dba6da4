//! Error types for the routine advisor.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for every boundary-crossing operation of the advisor.
///
/// Recoverable variants (`Precondition`, `Remote`, `MalformedResponse`,
/// `Network`, `Busy`) are surfaced to the user as transcript notices by the
/// session layer; the others are reported to the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AdvisorError {
    /// The catalog source was unreachable or returned a malformed document.
    #[error("Failed to fetch catalog from {origin}: {message}")]
    Fetch { origin: String, message: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// An operation was rejected locally before any I/O happened.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Required configuration (e.g. the advisory endpoint) is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The advisory endpoint answered with a non-success status.
    #[error("Remote error ({status}): {body}")]
    Remote { status: u16, body: String },

    /// The advisory endpoint answered successfully but without a usable reply.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// Durable storage could not be written.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Another advisory request is still in flight.
    #[error("An advisory request is already in progress")]
    Busy,

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl AdvisorError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Fetch error for the given catalog origin.
    pub fn fetch(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Creates a Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a Remote error
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::Remote {
            status,
            body: body.into(),
        }
    }

    /// Creates a MalformedResponse error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for AdvisorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, AdvisorError>`.
pub type Result<T> = std::result::Result<T, AdvisorError>;
