//! HTTP transport implementation.
//!
//! This module provides an HTTP-based transport for preference sync.
//! The actual HTTP client is abstracted via a trait so any HTTP library
//! can sit underneath.

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::transport::PreferencesTransport;
use parking_lot::RwLock;
use prefsync_protocol::{
    DisplayPreferences, DocumentIdentity, FetchRequest, FetchResponse, PersistRequest,
    PersistResponse, STATUS_OK,
};
use std::future::Future;
use std::time::Duration;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET.
    Get,
    /// POST.
    Post,
}

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// A response with no body.
    pub fn empty(status: u16) -> Self {
        Self::new(status, Vec::new())
    }
}

/// HTTP client abstraction.
///
/// Errors are connection-level failures only; non-2xx statuses are
/// ordinary responses.
pub trait HttpClient: Send + Sync {
    /// Sends a GET request.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, String>> + Send;

    /// Sends a POST request with a JSON body.
    fn post(
        &self,
        url: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<HttpResponse, String>> + Send;
}

/// HTTP-based preferences transport.
///
/// Fetch is `GET {base}/DisplayPreferences/{id}?userId=..&client=..`,
/// persist is a `POST` of the JSON document to the same URL.
pub struct HttpTransport<C: HttpClient> {
    /// Base URL of the server (e.g., "https://media.example.com").
    base_url: String,
    /// HTTP client implementation.
    client: C,
    /// Per-request timeout.
    timeout: Duration,
    /// Last error message.
    last_error: RwLock<Option<String>>,
}

impl<C: HttpClient> HttpTransport<C> {
    /// Creates a new HTTP transport.
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            timeout: Duration::from_secs(30),
            last_error: RwLock::new(None),
        }
    }

    /// Creates a transport using the URL and timeout from `config`.
    pub fn from_config(config: &SyncConfig, client: C) -> Self {
        Self::new(config.base_url.clone(), client).with_timeout(config.timeout)
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the last error message.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    /// Returns the full URL of a document.
    pub fn url_for(&self, identity: &DocumentIdentity) -> String {
        format!("{}{}", self.base_url, identity.path())
    }

    fn set_error(&self, err: &str) {
        *self.last_error.write() = Some(err.to_string());
    }

    fn clear_error(&self) {
        *self.last_error.write() = None;
    }

    async fn send<F>(&self, request: F) -> SyncResult<HttpResponse>
    where
        F: Future<Output = Result<HttpResponse, String>>,
    {
        match tokio::time::timeout(self.timeout, request).await {
            Err(_) => {
                self.set_error("request timed out");
                Err(SyncError::Timeout)
            }
            Ok(Err(e)) => {
                self.set_error(&e);
                Err(SyncError::transport_retryable(e))
            }
            Ok(Ok(response)) => {
                self.clear_error();
                Ok(response)
            }
        }
    }
}

impl<C: HttpClient> PreferencesTransport for HttpTransport<C> {
    async fn fetch(&self, request: &FetchRequest) -> SyncResult<FetchResponse> {
        let url = self.url_for(&request.identity);
        let response = self.send(self.client.get(&url)).await?;

        if response.status != STATUS_OK {
            return Ok(FetchResponse::status(response.status));
        }

        let document = DisplayPreferences::from_json(&response.body)?;
        Ok(FetchResponse::ok(document))
    }

    async fn persist(&self, request: &PersistRequest) -> SyncResult<PersistResponse> {
        let url = self.url_for(&request.identity);
        let body = request.document.to_json()?;
        let response = self.send(self.client.post(&url, body)).await?;
        Ok(PersistResponse::status(response.status))
    }
}

/// Trait for servers that can handle loopback requests.
pub trait LoopbackServer: Send + Sync {
    /// Handles a request for `path` (including the query string).
    fn handle(&self, method: Method, path: &str, body: &[u8]) -> HttpResponse;
}

/// A loopback HTTP client that routes requests directly to a server
/// object.
///
/// Useful for testing without actual network overhead.
pub struct LoopbackClient<S: LoopbackServer> {
    server: S,
}

impl<S: LoopbackServer> LoopbackClient<S> {
    /// Creates a new loopback client connected to the given server.
    pub fn new(server: S) -> Self {
        Self { server }
    }

    /// Returns the server.
    pub fn server(&self) -> &S {
        &self.server
    }

    fn path_of(url: &str) -> &str {
        url.find("/DisplayPreferences/")
            .map(|i| &url[i..])
            .unwrap_or(url)
    }
}

impl<S: LoopbackServer> HttpClient for LoopbackClient<S> {
    async fn get(&self, url: &str) -> Result<HttpResponse, String> {
        Ok(self.server.handle(Method::Get, Self::path_of(url), &[]))
    }

    async fn post(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, String> {
        Ok(self.server.handle(Method::Post, Self::path_of(url), &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefsync_protocol::ProtocolError;
    use uuid::Uuid;

    struct TestClient {
        response: RwLock<Result<HttpResponse, String>>,
        requests: RwLock<Vec<(Method, String, Vec<u8>)>>,
    }

    impl TestClient {
        fn new(response: Result<HttpResponse, String>) -> Self {
            Self {
                response: RwLock::new(response),
                requests: RwLock::new(Vec::new()),
            }
        }
    }

    impl HttpClient for TestClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, String> {
            self.requests.write().push((Method::Get, url.to_string(), Vec::new()));
            self.response.read().clone()
        }

        async fn post(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, String> {
            self.requests.write().push((Method::Post, url.to_string(), body));
            self.response.read().clone()
        }
    }

    struct StalledClient;

    impl HttpClient for StalledClient {
        async fn get(&self, _url: &str) -> Result<HttpResponse, String> {
            std::future::pending().await
        }

        async fn post(&self, _url: &str, _body: Vec<u8>) -> Result<HttpResponse, String> {
            std::future::pending().await
        }
    }

    fn identity() -> DocumentIdentity {
        DocumentIdentity::for_user(Uuid::from_u128(0xabc))
    }

    #[test]
    fn transport_creation() {
        let client = TestClient::new(Ok(HttpResponse::empty(200)));
        let transport = HttpTransport::new("https://media.example.com/", client);
        assert_eq!(transport.base_url(), "https://media.example.com");
        assert!(transport.last_error().is_none());
        assert_eq!(
            transport.url_for(&identity()),
            format!(
                "https://media.example.com/DisplayPreferences/usersettings?userId={}&client=vue",
                Uuid::from_u128(0xabc).simple()
            )
        );
    }

    #[tokio::test]
    async fn fetch_decodes_document() {
        let body = br#"{"CustomPrefs":{"darkMode":"true"},"SortBy":"Name"}"#.to_vec();
        let client = TestClient::new(Ok(HttpResponse::new(200, body)));
        let transport = HttpTransport::new("https://media.example.com", client);

        let response = transport.fetch(&FetchRequest::new(identity())).await.unwrap();
        assert!(response.is_success());
        let document = response.document.unwrap();
        assert_eq!(document.custom_prefs.get("darkMode"), Some("true"));
        assert!(document.other.contains_key("SortBy"));
    }

    #[tokio::test]
    async fn fetch_passes_through_failure_status() {
        let client = TestClient::new(Ok(HttpResponse::empty(401)));
        let transport = HttpTransport::new("https://media.example.com", client);

        let response = transport.fetch(&FetchRequest::new(identity())).await.unwrap();
        assert_eq!(response.status, 401);
        assert!(response.document.is_none());
    }

    #[tokio::test]
    async fn fetch_rejects_malformed_body() {
        let client = TestClient::new(Ok(HttpResponse::new(200, b"<html>".to_vec())));
        let transport = HttpTransport::new("https://media.example.com", client);

        let err = transport.fetch(&FetchRequest::new(identity())).await.unwrap_err();
        assert!(matches!(err, SyncError::Protocol(ProtocolError::Decode(_))));
    }

    #[tokio::test]
    async fn persist_posts_json() {
        let client = TestClient::new(Ok(HttpResponse::empty(204)));
        let transport = HttpTransport::new("https://media.example.com", client);

        let document = DisplayPreferences::default();
        let response = transport
            .persist(&PersistRequest::new(identity(), document.clone()))
            .await
            .unwrap();
        assert!(response.is_success());

        let requests = transport.client.requests.read().clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, Method::Post);
        assert_eq!(DisplayPreferences::from_json(&requests[0].2).unwrap(), document);
    }

    #[tokio::test]
    async fn connection_failure_is_retryable() {
        let client = TestClient::new(Err("connection refused".into()));
        let transport = HttpTransport::new("https://media.example.com", client);

        let err = transport.fetch(&FetchRequest::new(identity())).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(transport.last_error().as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn stalled_request_times_out() {
        let transport = HttpTransport::new("https://media.example.com", StalledClient)
            .with_timeout(Duration::from_millis(20));

        let err = transport.fetch(&FetchRequest::new(identity())).await.unwrap_err();
        assert!(matches!(err, SyncError::Timeout));
    }
}
