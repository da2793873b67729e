//! Reconciliation orchestrator.

use crate::config::SyncConfig;
use crate::context::SyncContext;
use crate::error::{SyncError, SyncResult};
use crate::notify::{MessageKey, Severity};
use crate::status::{SyncKind, SyncStatus, SyncTracker};
use crate::transport::PreferencesTransport;
use prefsync_codec::{decode_with, encode, partition_unknown};
use prefsync_protocol::{DisplayPreferences, FetchRequest, PersistRequest};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// How a pull or push ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nobody is logged in; nothing was touched.
    Skipped,
    /// The operation completed, touching this many preferences.
    Completed(usize),
    /// The operation failed and the user was notified.
    Failed,
}

/// Keeps the settings store and the server's preferences document in step.
///
/// Pulls and pushes are serialized: an operation started while another is in
/// flight waits for it to finish.
pub struct PreferencesSync<T: PreferencesTransport> {
    config: SyncConfig,
    transport: Arc<T>,
    context: SyncContext,
    tracker: SyncTracker,
    flight: Mutex<()>,
}

impl<T: PreferencesTransport> PreferencesSync<T> {
    /// Creates a new orchestrator.
    pub fn new(config: SyncConfig, transport: T, context: SyncContext) -> Self {
        Self::with_shared_transport(config, Arc::new(transport), context)
    }

    /// Creates a new orchestrator over a transport shared with other owners.
    pub fn with_shared_transport(config: SyncConfig, transport: Arc<T>, context: SyncContext) -> Self {
        Self {
            config,
            transport,
            context,
            tracker: SyncTracker::new(),
            flight: Mutex::new(()),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Returns the injected collaborators.
    pub fn context(&self) -> &SyncContext {
        &self.context
    }

    /// Returns a snapshot of the sync status.
    pub fn status(&self) -> SyncStatus {
        self.tracker.status()
    }

    /// Pulls the server's preferences into the settings store.
    ///
    /// Only keys the schema recognizes are applied; keys absent from the
    /// server document keep their current values.
    pub async fn pull(&self) -> SyncOutcome {
        let user_id = match self.authenticated_user() {
            Ok(user_id) => user_id,
            Err(_) => {
                debug!("not logged in, skipping pull");
                return SyncOutcome::Skipped;
            }
        };

        let span = info_span!("prefsync.pull", user_id = %user_id);
        async {
            let _flight = self.flight.lock().await;
            let _guard = self.tracker.begin(SyncKind::Pull);

            match self.try_pull(user_id).await {
                Ok(applied) => {
                    info!(applied, "pulled preferences");
                    SyncOutcome::Completed(applied)
                }
                Err(e) => {
                    self.report(&e, MessageKey::FailedRetrievingPreferences);
                    SyncOutcome::Failed
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Pushes the settings store to the server.
    ///
    /// The server document is fetched first and only its custom preferences
    /// are replaced, so members the client does not manage are written back
    /// unchanged.
    pub async fn push(&self) -> SyncOutcome {
        let user_id = match self.authenticated_user() {
            Ok(user_id) => user_id,
            Err(_) => {
                debug!("not logged in, skipping push");
                return SyncOutcome::Skipped;
            }
        };

        let span = info_span!("prefsync.push", user_id = %user_id);
        async {
            let _flight = self.flight.lock().await;
            let _guard = self.tracker.begin(SyncKind::Push);

            match self.try_push(user_id).await {
                Ok(pushed) => {
                    info!(pushed, "pushed preferences");
                    SyncOutcome::Completed(pushed)
                }
                Err(e) => {
                    self.report(&e, MessageKey::FailedSettingPreferences);
                    SyncOutcome::Failed
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Records a local setting change, then pushes.
    ///
    /// Call this after every settings mutation.
    pub async fn update_settings(&self) -> SyncOutcome {
        self.tracker.record_local_change();
        self.push().await
    }

    /// Resets the sync status to its initial values. The settings store is
    /// left alone.
    pub fn reset_state(&self) {
        self.tracker.reset();
    }

    fn authenticated_user(&self) -> SyncResult<Uuid> {
        if !self.context.auth.logged_in() {
            return Err(SyncError::Unauthenticated);
        }
        self.context
            .auth
            .current_user_id()
            .ok_or(SyncError::Unauthenticated)
    }

    async fn fetch_document(&self, user_id: Uuid) -> SyncResult<DisplayPreferences> {
        let request = FetchRequest::new(self.config.identity(user_id));
        let response = self.transport.fetch(&request).await?;
        if !response.is_success() {
            return Err(SyncError::Fetch {
                status: response.status,
            });
        }
        Ok(response.into_document()?)
    }

    async fn try_pull(&self, user_id: Uuid) -> SyncResult<usize> {
        let document = self.fetch_document(user_id).await?;
        debug!(keys = document.custom_prefs.len(), "fetched preferences");

        let schema = &*self.context.schema;
        let decoded = decode_with(&document.custom_prefs, schema, self.config.coercion)?;
        let (filtered, dropped) = partition_unknown(decoded, schema);
        if !dropped.is_empty() {
            warn!(?dropped, "ignoring preferences unknown to the schema");
        }

        let applied = filtered.len();
        self.context.store.initialize_state(filtered);
        Ok(applied)
    }

    async fn try_push(&self, user_id: Uuid) -> SyncResult<usize> {
        let mut document = self.fetch_document(user_id).await?;

        let mut snapshot = self.context.store.snapshot();
        snapshot.remove(&self.config.status_field);
        document.custom_prefs = encode(&snapshot);
        let pushed = document.custom_prefs.len();
        debug!(keys = pushed, "encoded preferences");

        let request = PersistRequest::new(self.config.identity(user_id), document);
        let response = self.transport.persist(&request).await?;
        if !response.is_success() {
            return Err(SyncError::Persist {
                status: response.status,
            });
        }
        Ok(pushed)
    }

    fn report(&self, error: &SyncError, key: MessageKey) {
        if !error.is_reportable() {
            return;
        }
        warn!(error = %error, notice = key.id(), "preference sync failed");
        let message = self.context.translator.translate(key);
        self.context.notifier.notify(&message, Severity::Error);
    }
}
