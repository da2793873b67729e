//! Transport layer abstraction for preference sync.

use crate::error::{SyncError, SyncResult};
use parking_lot::Mutex;
use prefsync_protocol::{
    DisplayPreferences, FetchRequest, FetchResponse, PersistRequest, PersistResponse,
};
use std::future::Future;

/// Reads and writes the remote preferences document.
///
/// Implementations report the server's status code as-is; deciding which
/// codes are failures is left to the orchestrator. Transport-level failures
/// (unreachable server, timeouts) are returned as errors.
pub trait PreferencesTransport: Send + Sync {
    /// Fetches a preferences document.
    fn fetch(
        &self,
        request: &FetchRequest,
    ) -> impl Future<Output = SyncResult<FetchResponse>> + Send;

    /// Replaces a preferences document.
    fn persist(
        &self,
        request: &PersistRequest,
    ) -> impl Future<Output = SyncResult<PersistResponse>> + Send;
}

/// A call observed by [`MemoryTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCall {
    /// A fetch.
    Fetch,
    /// A persist.
    Persist,
}

#[derive(Debug)]
struct MemoryState {
    document: DisplayPreferences,
    fetch_status: Option<u16>,
    persist_status: Option<u16>,
    unreachable: bool,
    calls: Vec<TransportCall>,
    persisted: Vec<PersistRequest>,
}

/// An in-memory transport holding a single server document.
///
/// Successful persists replace the held document, like a real server.
/// Status overrides and an unreachable mode script failures.
#[derive(Debug)]
pub struct MemoryTransport {
    state: Mutex<MemoryState>,
}

impl MemoryTransport {
    /// Creates a transport serving an empty document.
    pub fn new() -> Self {
        Self::with_document(DisplayPreferences::default())
    }

    /// Creates a transport serving `document`.
    pub fn with_document(document: DisplayPreferences) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                document,
                fetch_status: None,
                persist_status: None,
                unreachable: false,
                calls: Vec::new(),
                persisted: Vec::new(),
            }),
        }
    }

    /// Replaces the server document.
    pub fn set_document(&self, document: DisplayPreferences) {
        self.state.lock().document = document;
    }

    /// Returns the server document.
    pub fn document(&self) -> DisplayPreferences {
        self.state.lock().document.clone()
    }

    /// Answers fetches with `status` and no body. `None` restores 200.
    pub fn set_fetch_status(&self, status: Option<u16>) {
        self.state.lock().fetch_status = status;
    }

    /// Answers persists with `status`. `None` restores 204.
    pub fn set_persist_status(&self, status: Option<u16>) {
        self.state.lock().persist_status = status;
    }

    /// Fails every call with a transport error while set.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.lock().unreachable = unreachable;
    }

    /// Returns every call received, in order.
    pub fn calls(&self) -> Vec<TransportCall> {
        self.state.lock().calls.clone()
    }

    /// Returns every persist request received, in order.
    pub fn persisted(&self) -> Vec<PersistRequest> {
        self.state.lock().persisted.clone()
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferencesTransport for MemoryTransport {
    async fn fetch(&self, _request: &FetchRequest) -> SyncResult<FetchResponse> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock();
        state.calls.push(TransportCall::Fetch);
        if state.unreachable {
            return Err(SyncError::transport_retryable("server unreachable"));
        }
        Ok(match state.fetch_status {
            Some(status) => FetchResponse::status(status),
            None => FetchResponse::ok(state.document.clone()),
        })
    }

    async fn persist(&self, request: &PersistRequest) -> SyncResult<PersistResponse> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock();
        state.calls.push(TransportCall::Persist);
        if state.unreachable {
            return Err(SyncError::transport_retryable("server unreachable"));
        }
        state.persisted.push(request.clone());
        match state.persist_status {
            Some(status) => Ok(PersistResponse::status(status)),
            None => {
                state.document = request.document.clone();
                Ok(PersistResponse::no_content())
            }
        }
    }
}
