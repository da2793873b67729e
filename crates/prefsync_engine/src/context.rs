//! Collaborators the orchestrator depends on.

use crate::notify::{EnglishTranslator, Notifier, Translator};
use parking_lot::RwLock;
use prefsync_codec::{ClientPreferences, PrefValue, SchemaOracle};
use std::sync::Arc;
use uuid::Uuid;

/// Who is signed in.
pub trait AuthContext: Send + Sync {
    /// Returns true if a user session is active.
    fn logged_in(&self) -> bool;

    /// Returns the id of the signed-in user.
    fn current_user_id(&self) -> Option<Uuid>;
}

/// The client's global settings store.
pub trait SettingsStore: Send + Sync {
    /// Merges `partial` into the current state. Keys absent from `partial`
    /// keep their current values.
    fn initialize_state(&self, partial: ClientPreferences);

    /// Returns the full current state.
    fn snapshot(&self) -> ClientPreferences;
}

/// The dependencies injected into [`PreferencesSync`](crate::PreferencesSync).
#[derive(Clone)]
pub struct SyncContext {
    /// Authentication state.
    pub auth: Arc<dyn AuthContext>,
    /// Settings store pulled into and pushed from.
    pub store: Arc<dyn SettingsStore>,
    /// Recognized keys and their types.
    pub schema: Arc<dyn SchemaOracle + Send + Sync>,
    /// User-facing failure reports.
    pub notifier: Arc<dyn Notifier>,
    /// Message localization.
    pub translator: Arc<dyn Translator>,
}

impl SyncContext {
    /// Creates a context using the English translator.
    pub fn new(
        auth: Arc<dyn AuthContext>,
        store: Arc<dyn SettingsStore>,
        schema: Arc<dyn SchemaOracle + Send + Sync>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            auth,
            store,
            schema,
            notifier,
            translator: Arc::new(EnglishTranslator),
        }
    }

    /// Replaces the translator.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }
}

impl std::fmt::Debug for SyncContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncContext")
            .field("logged_in", &self.auth.logged_in())
            .finish_non_exhaustive()
    }
}

/// An [`AuthContext`] whose session can be switched at runtime.
#[derive(Debug, Default)]
pub struct StaticAuth {
    user_id: RwLock<Option<Uuid>>,
}

impl StaticAuth {
    /// A context with `user_id` signed in.
    pub fn logged_in_as(user_id: Uuid) -> Self {
        Self {
            user_id: RwLock::new(Some(user_id)),
        }
    }

    /// A context with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Signs `user_id` in.
    pub fn log_in(&self, user_id: Uuid) {
        *self.user_id.write() = Some(user_id);
    }

    /// Ends the session.
    pub fn log_out(&self) {
        *self.user_id.write() = None;
    }
}

impl AuthContext for StaticAuth {
    fn logged_in(&self) -> bool {
        self.user_id.read().is_some()
    }

    fn current_user_id(&self) -> Option<Uuid> {
        *self.user_id.read()
    }
}

/// An in-memory [`SettingsStore`].
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    state: RwLock<ClientPreferences>,
}

impl MemorySettingsStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `initial`.
    pub fn with_state(initial: ClientPreferences) -> Self {
        Self {
            state: RwLock::new(initial),
        }
    }

    /// Sets a single value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<PrefValue>) {
        self.state.write().insert(key, value);
    }

    /// Returns a single value.
    pub fn get(&self, key: &str) -> Option<PrefValue> {
        self.state.read().get(key).cloned()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn initialize_state(&self, partial: ClientPreferences) {
        self.state.write().merge(partial);
    }

    fn snapshot(&self) -> ClientPreferences {
        self.state.read().clone()
    }
}
