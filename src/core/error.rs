//! Error types for the bridge
//!
//! This module defines the errors raised by the bridge's own API surface:
//! registry lookups, connection URI handling and value materialization.
//! Failures reported by a database driver are normalized into
//! [`DriverError`](super::driver_error::DriverError) instead.

use super::driver_error::DriverError;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Error types for bridge operations
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// No dialect registered under the requested name
    #[error("Unknown database backend: {0}")]
    UnknownBackend(String),

    /// Connection URI could not be parsed
    #[error("Invalid connection URI: {0}")]
    InvalidConnectionUri(String),

    /// Native value cannot be materialized as the requested kind
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Normalized driver failure
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl BridgeError {
    /// Create an unknown backend error
    pub fn unknown_backend<S: Into<String>>(name: S) -> Self {
        BridgeError::UnknownBackend(name.into())
    }

    /// Create an invalid connection URI error
    pub fn invalid_uri<S: Into<String>>(msg: S) -> Self {
        BridgeError::InvalidConnectionUri(msg.into())
    }

    /// Create a new type mismatch error
    pub fn type_mismatch(expected: &str, actual: &str) -> Self {
        BridgeError::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        BridgeError::Other(msg.into())
    }
}
