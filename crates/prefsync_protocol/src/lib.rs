//! # Prefsync Protocol
//!
//! Wire types for the server-side display-preferences document.
//!
//! This crate provides:
//! - `DocumentIdentity`, the (document id, user id, client tag) triple that
//!   addresses a preferences document
//! - `DisplayPreferences`, the document itself, whose `CustomPrefs` member
//!   carries the flat string preferences
//! - Fetch and persist request/response messages
//! - JSON encoding/decoding
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod document;
mod error;
mod messages;

pub use document::{DisplayPreferences, DocumentIdentity, DEFAULT_CLIENT, DEFAULT_DOCUMENT_ID};
pub use error::{ProtocolError, ProtocolResult};
pub use messages::{
    FetchRequest, FetchResponse, PersistRequest, PersistResponse, STATUS_NO_CONTENT, STATUS_OK,
};
