//! Observable operation state.
//!
//! Each cache operation (the two fetches and the three mutations) publishes
//! its lifecycle through a [`StatusCell`] so the UI can disable controls
//! while something is pending and show the last error without polling.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::error::CacheError;

/// Lifecycle phase of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpStatus {
    /// Never run in this session.
    Idle,
    /// A request is in flight.
    Pending,
    /// The most recent run settled successfully.
    Success,
    /// The most recent run failed.
    Error,
}

/// Snapshot of an operation's state.
#[derive(Debug, Clone, PartialEq)]
pub struct OpState {
    pub status: OpStatus,
    /// The failure that settled the most recent run, if it failed.
    pub error: Option<CacheError>,
}

impl OpState {
    fn idle() -> Self {
        Self {
            status: OpStatus::Idle,
            error: None,
        }
    }
}

/// Shared observable slot for one operation's state.
///
/// Clones share the same underlying channel; readers either take a
/// [`get`](Self::get) snapshot or [`subscribe`](Self::subscribe) for
/// change notifications.
#[derive(Debug, Clone)]
pub struct StatusCell {
    tx: Arc<watch::Sender<OpState>>,
}

impl StatusCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(OpState::idle());
        Self { tx: Arc::new(tx) }
    }

    /// Mark the operation in flight, clearing any previous error.
    pub fn begin(&self) {
        self.tx.send_replace(OpState {
            status: OpStatus::Pending,
            error: None,
        });
    }

    /// Mark the operation settled successfully.
    pub fn succeed(&self) {
        self.tx.send_replace(OpState {
            status: OpStatus::Success,
            error: None,
        });
    }

    /// Mark the operation settled with `error`.
    pub fn fail(&self, error: CacheError) {
        self.tx.send_replace(OpState {
            status: OpStatus::Error,
            error: Some(error),
        });
    }

    /// Current state.
    pub fn get(&self) -> OpState {
        self.tx.borrow().clone()
    }

    /// Watch for state changes.
    pub fn subscribe(&self) -> watch::Receiver<OpState> {
        self.tx.subscribe()
    }

    pub fn is_pending(&self) -> bool {
        self.tx.borrow().status == OpStatus::Pending
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use posthub_api::ApiError;

    #[test]
    fn test_lifecycle_transitions() {
        let cell = StatusCell::new();
        assert_eq!(cell.get().status, OpStatus::Idle);

        cell.begin();
        assert!(cell.is_pending());

        cell.succeed();
        assert_eq!(cell.get().status, OpStatus::Success);
        assert!(cell.get().error.is_none());
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let cell = StatusCell::new();
        cell.fail(CacheError::Api(ApiError::Remote { status: 500 }));
        assert_eq!(cell.get().status, OpStatus::Error);
        assert!(cell.get().error.is_some());

        cell.begin();
        assert!(cell.get().error.is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let cell = StatusCell::new();
        let other = cell.clone();
        cell.begin();
        assert!(other.is_pending());
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let cell = StatusCell::new();
        let mut rx = cell.subscribe();

        cell.begin();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().status, OpStatus::Pending);

        cell.succeed();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().status, OpStatus::Success);
    }
}
