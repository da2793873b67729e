//! Error types for the protocol crate.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while encoding or decoding wire messages.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// JSON serialization failed.
    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),

    /// JSON deserialization failed.
    #[error("failed to decode document: {0}")]
    Decode(#[source] serde_json::Error),

    /// A response carried a success status but no document.
    #[error("response with status {status} has no document")]
    MissingDocument {
        /// HTTP status code.
        status: u16,
    },
}
