//! Sync state tracker.

use parking_lot::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Whether a sync operation is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Nothing in flight.
    Idle,
    /// A pull or push is in flight.
    Syncing,
}

/// The kind of sync operation being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    /// Server to client.
    Pull,
    /// Client to server.
    Push,
}

/// Snapshot of the tracker's fields. Timestamps are epoch milliseconds,
/// [`SyncStatus::NEVER`] when the event has not happened yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncStatus {
    /// True while a pull or push runs.
    pub in_flight: bool,
    /// When the last pull ended, successfully or not.
    pub last_pull_timestamp: i64,
    /// When the last push ended, successfully or not.
    pub last_push_timestamp: i64,
    /// When a local setting last changed.
    pub last_local_change_timestamp: i64,
}

impl SyncStatus {
    /// Timestamp value for "never".
    pub const NEVER: i64 = -1;

    /// Returns the state corresponding to `in_flight`.
    pub fn state(&self) -> SyncState {
        if self.in_flight {
            SyncState::Syncing
        } else {
            SyncState::Idle
        }
    }
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self {
            in_flight: false,
            last_pull_timestamp: Self::NEVER,
            last_push_timestamp: Self::NEVER,
            last_local_change_timestamp: Self::NEVER,
        }
    }
}

/// Records sync progress.
///
/// [`begin`](SyncTracker::begin) enters `Syncing` and hands back a guard;
/// dropping the guard returns to `Idle` and stamps the completion time, so
/// every exit path, including errors and panics, releases the state.
#[derive(Debug, Default)]
pub struct SyncTracker {
    status: RwLock<SyncStatus>,
}

impl SyncTracker {
    /// Creates a tracker with all fields at their defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current fields.
    pub fn status(&self) -> SyncStatus {
        *self.status.read()
    }

    /// Returns the current state.
    pub fn state(&self) -> SyncState {
        self.status.read().state()
    }

    /// Enters `Syncing` for an operation of `kind`.
    pub fn begin(&self, kind: SyncKind) -> SyncGuard<'_> {
        self.status.write().in_flight = true;
        SyncGuard {
            tracker: self,
            kind,
        }
    }

    /// Records that a local setting changed.
    pub fn record_local_change(&self) {
        let mut status = self.status.write();
        status.last_local_change_timestamp = stamp(status.last_local_change_timestamp);
    }

    /// Restores all fields to their defaults.
    pub fn reset(&self) {
        *self.status.write() = SyncStatus::default();
    }

    fn finish(&self, kind: SyncKind) {
        let mut status = self.status.write();
        status.in_flight = false;
        match kind {
            SyncKind::Pull => status.last_pull_timestamp = stamp(status.last_pull_timestamp),
            SyncKind::Push => status.last_push_timestamp = stamp(status.last_push_timestamp),
        }
    }
}

/// Keeps the tracker in `Syncing` until dropped.
#[derive(Debug)]
#[must_use = "the tracker returns to idle as soon as the guard is dropped"]
pub struct SyncGuard<'a> {
    tracker: &'a SyncTracker,
    kind: SyncKind,
}

impl SyncGuard<'_> {
    /// Returns the kind of operation being tracked.
    pub fn kind(&self) -> SyncKind {
        self.kind
    }
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.tracker.finish(self.kind);
    }
}

/// Current time in epoch milliseconds, never earlier than `previous`.
fn stamp(previous: i64) -> i64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0);
    now.max(previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_status() {
        let tracker = SyncTracker::new();
        let status = tracker.status();
        assert!(!status.in_flight);
        assert_eq!(status.last_pull_timestamp, SyncStatus::NEVER);
        assert_eq!(status.last_push_timestamp, SyncStatus::NEVER);
        assert_eq!(status.last_local_change_timestamp, SyncStatus::NEVER);
        assert_eq!(tracker.state(), SyncState::Idle);
    }

    #[test]
    fn guard_toggles_in_flight() {
        let tracker = SyncTracker::new();
        {
            let guard = tracker.begin(SyncKind::Pull);
            assert_eq!(guard.kind(), SyncKind::Pull);
            assert_eq!(tracker.state(), SyncState::Syncing);
        }
        let status = tracker.status();
        assert!(!status.in_flight);
        assert!(status.last_pull_timestamp > 0);
        assert_eq!(status.last_push_timestamp, SyncStatus::NEVER);
    }

    #[test]
    fn push_stamps_its_own_timestamp() {
        let tracker = SyncTracker::new();
        drop(tracker.begin(SyncKind::Push));
        let status = tracker.status();
        assert!(status.last_push_timestamp > 0);
        assert_eq!(status.last_pull_timestamp, SyncStatus::NEVER);
    }

    #[test]
    fn guard_releases_on_panic() {
        let tracker = SyncTracker::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = tracker.begin(SyncKind::Push);
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(tracker.state(), SyncState::Idle);
    }

    #[test]
    fn local_change_is_monotonic() {
        let tracker = SyncTracker::new();
        tracker.record_local_change();
        let first = tracker.status().last_local_change_timestamp;
        tracker.record_local_change();
        assert!(tracker.status().last_local_change_timestamp >= first);
        assert!(!tracker.status().in_flight);
    }

    #[test]
    fn reset_restores_defaults() {
        let tracker = SyncTracker::new();
        tracker.record_local_change();
        drop(tracker.begin(SyncKind::Pull));
        tracker.reset();
        assert_eq!(tracker.status(), SyncStatus::default());
    }
}
