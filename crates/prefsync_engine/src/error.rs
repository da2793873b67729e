//! Error types for the sync engine.

use prefsync_codec::CodecError;
use prefsync_protocol::ProtocolError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during a pull or push.
#[derive(Error, Debug)]
pub enum SyncError {
    /// No user is logged in. Operations are skipped silently.
    #[error("not authenticated")]
    Unauthenticated,

    /// The server answered a fetch with a status other than 200.
    #[error("fetch failed with status {status}")]
    Fetch {
        /// HTTP status code.
        status: u16,
    },

    /// The server answered a persist with a status other than 204.
    #[error("persist failed with unexpected status {status}")]
    Persist {
        /// HTTP status code.
        status: u16,
    },

    /// A remote value could not be coerced under strict coercion.
    #[error("coercion error: {0}")]
    Coercion(#[from] CodecError),

    /// The server document could not be encoded or decoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Network or transport error.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// Whether the operation can be retried.
        retryable: bool,
    },

    /// The request did not complete in time.
    #[error("operation timed out")]
    Timeout,
}

impl SyncError {
    /// Creates a retryable transport error.
    pub fn transport_retryable(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable transport error.
    pub fn transport_fatal(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if repeating the operation might succeed.
    ///
    /// Nothing is retried automatically; this is for callers deciding
    /// whether to trigger another pull or push.
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::Transport { retryable, .. } => *retryable,
            SyncError::Timeout => true,
            SyncError::Fetch { status } | SyncError::Persist { status } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the user should be told about this error.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, SyncError::Unauthenticated)
    }
}
