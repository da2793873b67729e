//! Integration tests for the orchestrator over the HTTP transport.

use parking_lot::Mutex;
use prefsync_codec::{PrefValue, StaticSchema, TypeTag};
use prefsync_engine::{
    HttpResponse, HttpTransport, LoopbackClient, LoopbackServer, MemorySettingsStore, Method,
    PreferencesSync, RecordingNotifier, SettingsStore, StaticAuth, SyncConfig, SyncContext,
    SyncOutcome,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// A server that stores one JSON document per request path.
#[derive(Default)]
struct DocumentServer {
    documents: Mutex<HashMap<String, Vec<u8>>>,
    requests: Mutex<Vec<(Method, String)>>,
    persist_status: Mutex<Option<u16>>,
}

impl DocumentServer {
    fn seed(&self, path: &str, document: serde_json::Value) {
        self.documents
            .lock()
            .insert(path.to_string(), serde_json::to_vec(&document).unwrap());
    }

    fn stored(&self, path: &str) -> serde_json::Value {
        serde_json::from_slice(&self.documents.lock()[path]).unwrap()
    }
}

impl LoopbackServer for DocumentServer {
    fn handle(&self, method: Method, path: &str, body: &[u8]) -> HttpResponse {
        self.requests.lock().push((method, path.to_string()));
        match method {
            Method::Get => match self.documents.lock().get(path) {
                Some(doc) => HttpResponse::new(200, doc.clone()),
                None => HttpResponse::empty(404),
            },
            Method::Post => {
                if let Some(status) = *self.persist_status.lock() {
                    return HttpResponse::empty(status);
                }
                self.documents.lock().insert(path.to_string(), body.to_vec());
                HttpResponse::empty(204)
            }
        }
    }
}

/// Lets the test keep a handle on the server the client talks to.
struct Shared(Arc<DocumentServer>);

impl LoopbackServer for Shared {
    fn handle(&self, method: Method, path: &str, body: &[u8]) -> HttpResponse {
        self.0.handle(method, path, body)
    }
}

type HttpSync = PreferencesSync<HttpTransport<LoopbackClient<Shared>>>;

fn user() -> Uuid {
    Uuid::from_u128(0x5eed)
}

fn path() -> String {
    format!(
        "/DisplayPreferences/usersettings?userId={}&client=vue",
        user().simple()
    )
}

fn setup(server: Arc<DocumentServer>) -> (HttpSync, Arc<MemorySettingsStore>, Arc<RecordingNotifier>) {
    let schema = StaticSchema::new()
        .with_key("darkMode", TypeTag::Bool)
        .with_key("volume", TypeTag::Number)
        .with_key("recentSearches", TypeTag::Sequence);
    let store = Arc::new(MemorySettingsStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let context = SyncContext::new(
        Arc::new(StaticAuth::logged_in_as(user())),
        store.clone(),
        Arc::new(schema),
        notifier.clone(),
    );

    let config = SyncConfig::new("http://loopback");
    let transport = HttpTransport::from_config(&config, LoopbackClient::new(Shared(server)));
    (PreferencesSync::new(config, transport, context), store, notifier)
}

#[tokio::test]
async fn pull_then_push_over_http() {
    let server = Arc::new(DocumentServer::default());
    server.seed(
        &path(),
        json!({
            "Id": "usersettings",
            "SortBy": "SortName",
            "ShowBackdrop": true,
            "CustomPrefs": {
                "darkMode": "false",
                "volume": "35",
                "recentSearches": "[matrix,1999]",
                "legacyFeature": "on"
            },
            "Client": "vue"
        }),
    );
    let (sync, store, notifier) = setup(server.clone());

    assert_eq!(sync.pull().await, SyncOutcome::Completed(3));
    assert_eq!(store.get("darkMode"), Some(PrefValue::Bool(false)));
    assert_eq!(store.get("volume"), Some(PrefValue::Number(35.0)));
    assert_eq!(
        store.get("recentSearches"),
        Some(PrefValue::Sequence(vec![json!("matrix"), json!(1999)]))
    );
    assert_eq!(store.get("legacyFeature"), None);

    store.set("darkMode", true);
    assert_eq!(sync.update_settings().await, SyncOutcome::Completed(3));
    assert!(notifier.is_empty());

    let stored = server.stored(&path());
    assert_eq!(stored["SortBy"], json!("SortName"));
    assert_eq!(stored["ShowBackdrop"], json!(true));
    assert_eq!(stored["Client"], json!("vue"));
    assert_eq!(
        stored["CustomPrefs"],
        json!({
            "darkMode": "true",
            "volume": "35",
            "recentSearches": "[matrix,1999]"
        })
    );

    let requests: Vec<Method> = server.requests.lock().iter().map(|(m, _)| *m).collect();
    assert_eq!(requests, [Method::Get, Method::Get, Method::Post]);
}

#[tokio::test]
async fn missing_document_reports_failure() {
    let server = Arc::new(DocumentServer::default());
    let (sync, store, notifier) = setup(server);
    store.set("volume", 1.0);

    assert_eq!(sync.pull().await, SyncOutcome::Failed);
    assert_eq!(sync.push().await, SyncOutcome::Failed);

    let messages: Vec<String> = notifier.notices().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        ["Failed retrieving preferences", "Failed setting preferences"]
    );
    assert!(!sync.status().in_flight);
    assert_eq!(store.snapshot().len(), 1);
}

#[tokio::test]
async fn persist_with_ok_status_is_a_failure() {
    let server = Arc::new(DocumentServer::default());
    server.seed(&path(), json!({ "CustomPrefs": {} }));
    *server.persist_status.lock() = Some(200);
    let (sync, _store, notifier) = setup(server.clone());

    assert_eq!(sync.push().await, SyncOutcome::Failed);
    assert_eq!(notifier.notices().len(), 1);
    assert_eq!(server.stored(&path()), json!({ "CustomPrefs": {} }));
}
