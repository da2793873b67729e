//! Configuration for the sync engine.

use prefsync_codec::CoercionOptions;
use prefsync_protocol::{DocumentIdentity, DEFAULT_CLIENT, DEFAULT_DOCUMENT_ID};
use std::time::Duration;
use uuid::Uuid;

/// Configuration for preference sync.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Server URL.
    pub base_url: String,
    /// Logical id of the preferences document.
    pub document_id: String,
    /// Client tag the document is stored under.
    pub client: String,
    /// Store-internal bookkeeping key that is never pushed.
    pub status_field: String,
    /// How remote strings are coerced on pull.
    pub coercion: CoercionOptions,
    /// Request timeout.
    pub timeout: Duration,
}

impl SyncConfig {
    /// Creates a new sync configuration.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            document_id: DEFAULT_DOCUMENT_ID.to_string(),
            client: DEFAULT_CLIENT.to_string(),
            status_field: "status".to_string(),
            coercion: CoercionOptions::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the document id.
    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = document_id.into();
        self
    }

    /// Sets the client tag.
    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    /// Sets the bookkeeping key stripped before push.
    pub fn with_status_field(mut self, field: impl Into<String>) -> Self {
        self.status_field = field.into();
        self
    }

    /// Sets the coercion options.
    pub fn with_coercion(mut self, coercion: CoercionOptions) -> Self {
        self.coercion = coercion;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the identity of `user_id`'s preferences document.
    pub fn identity(&self, user_id: Uuid) -> DocumentIdentity {
        DocumentIdentity::new(self.document_id.clone(), user_id, self.client.clone())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new("")
    }
}
