//! Test fixtures.
//!
//! Provides a representative schema, server documents and an in-memory
//! orchestrator with every collaborator exposed for assertions.

use prefsync_codec::{
    ClientPreferences, PrefValue, RemotePreferences, SchemaOracle, StaticSchema, TypeTag,
};
use prefsync_engine::{
    MemorySettingsStore, MemoryTransport, PreferencesSync, RecordingNotifier, StaticAuth,
    SyncConfig, SyncContext,
};
use prefsync_protocol::DisplayPreferences;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// User id every fixture signs in as.
pub const TEST_USER: Uuid = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);

/// Default settings of a media client, one key per coercion rule.
pub fn media_defaults() -> ClientPreferences {
    let mut defaults = ClientPreferences::new();
    defaults.insert("darkMode", true);
    defaults.insert("subtitleSize", 18.0);
    defaults.insert("recentSearches", PrefValue::Sequence(Vec::new()));
    defaults.insert("lastPlayedItem", PrefValue::Null);
    defaults.insert("locale", PrefValue::Undefined);
    defaults.insert("homeLayout", PrefValue::Object(String::new()));
    defaults
}

/// Schema derived from [`media_defaults`].
pub fn media_schema() -> StaticSchema {
    StaticSchema::from_defaults(&media_defaults())
}

/// Returns the type declared for `key` in [`media_schema`].
pub fn media_type(key: &str) -> Option<TypeTag> {
    media_schema().type_of(key)
}

/// A server document with the given custom preferences and a handful of
/// members the client does not manage.
pub fn server_document(custom: &[(&str, &str)]) -> DisplayPreferences {
    let custom_prefs: RemotePreferences = custom.iter().copied().collect();
    let mut document = DisplayPreferences::with_custom_prefs(custom_prefs);
    document.id = Some("usersettings".to_string());
    document.client = Some("vue".to_string());
    document.other.insert("SortBy".into(), json!("SortName"));
    document.other.insert("SortOrder".into(), json!("Ascending"));
    document.other.insert("PrimaryImageHeight".into(), json!(250));
    document
}

/// An in-memory orchestrator with every collaborator exposed.
pub struct TestSync {
    /// The orchestrator.
    pub sync: PreferencesSync<MemoryTransport>,
    /// Session; starts signed in as [`TEST_USER`].
    pub auth: Arc<StaticAuth>,
    /// Settings store.
    pub store: Arc<MemorySettingsStore>,
    /// Captured notices.
    pub notifier: Arc<RecordingNotifier>,
}

impl TestSync {
    /// Creates a fixture whose server holds `document`.
    pub fn with_document(document: DisplayPreferences) -> Self {
        Self::with_config(SyncConfig::default(), document)
    }

    /// Creates a fixture whose server holds `custom` preferences.
    pub fn with_server_prefs(custom: &[(&str, &str)]) -> Self {
        Self::with_document(server_document(custom))
    }

    /// Creates a fixture with an explicit configuration.
    pub fn with_config(config: SyncConfig, document: DisplayPreferences) -> Self {
        let auth = Arc::new(StaticAuth::logged_in_as(TEST_USER));
        let store = Arc::new(MemorySettingsStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let context = SyncContext::new(
            auth.clone(),
            store.clone(),
            Arc::new(media_schema()),
            notifier.clone(),
        );
        let sync = PreferencesSync::new(config, MemoryTransport::with_document(document), context);
        Self {
            sync,
            auth,
            store,
            notifier,
        }
    }

    /// Returns the server transport.
    pub fn server(&self) -> &MemoryTransport {
        self.sync.transport()
    }
}

impl std::ops::Deref for TestSync {
    type Target = PreferencesSync<MemoryTransport>;

    fn deref(&self) -> &Self::Target {
        &self.sync
    }
}
