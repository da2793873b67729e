//! # Prefsync Engine
//!
//! Keeps a user's typed client settings in step with the string-valued
//! preferences document the server stores for them.
//!
//! This crate provides:
//! - Sync state tracker (idle ↔ syncing, pull/push/local-change timestamps)
//! - Reconciliation orchestrator (`PreferencesSync`) with `pull`, `push`,
//!   `update_settings` and `reset_state`
//! - Collaborator seams: transport, authentication, settings store,
//!   notifications and translation
//! - HTTP transport over an abstract client
//! - In-memory collaborators for tests and embedding
//!
//! ## Architecture
//!
//! Pull: fetch → decode → filter → merge into the settings store.
//!
//! Push: fetch the full server document → replace its custom preferences
//! with the encoded settings snapshot → persist. The server has no partial
//! update, so a push always starts from what the server currently holds.
//!
//! ## Key Invariants
//!
//! - Failures are reported through the notifier and never reach the caller
//! - The tracker always returns to idle, whatever the outcome
//! - Unauthenticated calls change nothing
//! - Pulls and pushes never overlap

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod engine;
mod error;
mod http;
mod notify;
mod status;
mod transport;

pub use config::SyncConfig;
pub use context::{AuthContext, MemorySettingsStore, SettingsStore, StaticAuth, SyncContext};
pub use engine::{PreferencesSync, SyncOutcome};
pub use error::{SyncError, SyncResult};
pub use http::{HttpClient, HttpResponse, HttpTransport, LoopbackClient, LoopbackServer, Method};
pub use notify::{
    EnglishTranslator, MessageKey, Notice, Notifier, RecordingNotifier, Severity, Translator,
};
pub use status::{SyncGuard, SyncKind, SyncState, SyncStatus, SyncTracker};
pub use transport::{MemoryTransport, PreferencesTransport, TransportCall};
