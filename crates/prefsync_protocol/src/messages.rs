//! Fetch and persist messages.

use crate::document::{DisplayPreferences, DocumentIdentity};
use crate::error::{ProtocolError, ProtocolResult};

/// Status code of a successful fetch.
pub const STATUS_OK: u16 = 200;

/// Status code of a successful persist.
pub const STATUS_NO_CONTENT: u16 = 204;

/// Request to read a preferences document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Document to read.
    pub identity: DocumentIdentity,
}

impl FetchRequest {
    /// Creates a fetch request.
    pub fn new(identity: DocumentIdentity) -> Self {
        Self { identity }
    }
}

/// Response to a fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// The document, when the server returned one.
    pub document: Option<DisplayPreferences>,
}

impl FetchResponse {
    /// A `200 OK` response carrying `document`.
    pub fn ok(document: DisplayPreferences) -> Self {
        Self {
            status: STATUS_OK,
            document: Some(document),
        }
    }

    /// A response with `status` and no body.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            document: None,
        }
    }

    /// Returns true if the status is `200`.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Consumes the response, returning the document of a successful fetch.
    pub fn into_document(self) -> ProtocolResult<DisplayPreferences> {
        self.document.ok_or(ProtocolError::MissingDocument {
            status: self.status,
        })
    }
}

/// Request to overwrite a preferences document.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistRequest {
    /// Document to write.
    pub identity: DocumentIdentity,
    /// Full replacement document.
    pub document: DisplayPreferences,
}

impl PersistRequest {
    /// Creates a persist request.
    pub fn new(identity: DocumentIdentity, document: DisplayPreferences) -> Self {
        Self { identity, document }
    }
}

/// Response to a persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistResponse {
    /// HTTP status code.
    pub status: u16,
}

impl PersistResponse {
    /// A `204 No Content` response.
    pub fn no_content() -> Self {
        Self {
            status: STATUS_NO_CONTENT,
        }
    }

    /// A response with `status`.
    pub fn status(status: u16) -> Self {
        Self { status }
    }

    /// Returns true if the status is `204`. Any other code, including
    /// `200`, is unexpected.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_NO_CONTENT
    }
}
