//! The remote display-preferences document.

use crate::error::{ProtocolError, ProtocolResult};
use prefsync_codec::RemotePreferences;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document id under which user settings are stored.
pub const DEFAULT_DOCUMENT_ID: &str = "usersettings";

/// Client tag identifying this application's preferences.
pub const DEFAULT_CLIENT: &str = "vue";

/// Addresses a single preferences document on the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentIdentity {
    /// Logical document id.
    pub document_id: String,
    /// Owning user.
    pub user_id: Uuid,
    /// Client tag.
    pub client: String,
}

impl DocumentIdentity {
    /// Creates an identity for `user_id` with the default document id and
    /// client tag.
    pub fn for_user(user_id: Uuid) -> Self {
        Self::new(DEFAULT_DOCUMENT_ID, user_id, DEFAULT_CLIENT)
    }

    /// Creates an identity.
    pub fn new(document_id: impl Into<String>, user_id: Uuid, client: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            user_id,
            client: client.into(),
        }
    }

    /// Returns the request path, relative to the server base URL.
    ///
    /// The document id and client tag are percent-encoded.
    pub fn path(&self) -> String {
        format!(
            "/DisplayPreferences/{}?userId={}&client={}",
            urlencoding::encode(&self.document_id),
            self.user_id.simple(),
            urlencoding::encode(&self.client)
        )
    }
}

/// A display-preferences document as stored by the server.
///
/// The server only supports whole-document updates, so every member it sent
/// is kept, including ones this crate does not model, and written back on
/// push.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisplayPreferences {
    /// Document id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Client tag the document belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    /// Client-specific flat string preferences.
    #[serde(default)]
    pub custom_prefs: RemotePreferences,
    /// Every other member of the document, preserved verbatim.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl DisplayPreferences {
    /// Creates a document holding only `custom_prefs`.
    pub fn with_custom_prefs(custom_prefs: RemotePreferences) -> Self {
        Self {
            custom_prefs,
            ..Self::default()
        }
    }

    /// Encodes to JSON.
    pub fn to_json(&self) -> ProtocolResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(ProtocolError::Encode)
    }

    /// Decodes from JSON.
    pub fn from_json(bytes: &[u8]) -> ProtocolResult<Self> {
        serde_json::from_slice(bytes).map_err(ProtocolError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER_DOCUMENT: &str = r#"{
        "Id": "3ce5b65d-e116-d731-65d1-efc4a30ec35c",
        "SortBy": "SortName",
        "RememberIndexing": false,
        "PrimaryImageHeight": 250,
        "ScrollDirection": "Horizontal",
        "ShowBackdrop": true,
        "SortOrder": "Ascending",
        "CustomPrefs": {"darkMode": "true", "volume": "80"},
        "Client": "vue"
    }"#;

    #[test]
    fn path_escapes_identity_parts() {
        let identity = DocumentIdentity::new("user settings", Uuid::from_u128(7), "a&b=c");
        assert_eq!(
            identity.path(),
            format!(
                "/DisplayPreferences/user%20settings?userId={}&client=a%26b%3Dc",
                Uuid::from_u128(7).simple()
            )
        );
    }

    #[test]
    fn decode_server_document() {
        let doc = DisplayPreferences::from_json(SERVER_DOCUMENT.as_bytes()).unwrap();
        assert_eq!(doc.client.as_deref(), Some("vue"));
        assert_eq!(doc.custom_prefs.get("darkMode"), Some("true"));
        assert_eq!(doc.other.get("SortBy"), Some(&serde_json::json!("SortName")));
        assert_eq!(doc.other.get("PrimaryImageHeight"), Some(&serde_json::json!(250)));
    }

    #[test]
    fn unknown_members_survive_reencoding() {
        let doc = DisplayPreferences::from_json(SERVER_DOCUMENT.as_bytes()).unwrap();
        let bytes = doc.to_json().unwrap();
        let again: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let original: serde_json::Value = serde_json::from_str(SERVER_DOCUMENT).unwrap();
        assert_eq!(again, original);
    }

    #[test]
    fn missing_custom_prefs_defaults_to_empty() {
        let doc = DisplayPreferences::from_json(br#"{"Client":"vue"}"#).unwrap();
        assert!(doc.custom_prefs.is_empty());
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let err = DisplayPreferences::from_json(b"{not json").unwrap_err();
        assert!(matches!(err, ProtocolError::Decode(_)));
    }

    #[test]
    fn identity_path() {
        let user = Uuid::from_u128(0x1234);
        let identity = DocumentIdentity::for_user(user);
        assert_eq!(identity.document_id, DEFAULT_DOCUMENT_ID);
        assert_eq!(
            identity.path(),
            format!("/DisplayPreferences/usersettings?userId={}&client=vue", user.simple())
        );
    }
}
