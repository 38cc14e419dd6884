//! In-process session transport backing the `Pusher` capability.
//!
//! [`SessionMap`] tracks the outbound channel of every WebSocket session
//! this gateway hosts, keyed by connection id. [`SessionPusher`] routes a
//! push through that map; an id with no live channel is reported as
//! not-routable, which is what lets the broadcast engine prune stale
//! registry entries.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, mpsc};

use super::{PushError, Pusher};
use crate::domain::ConnectionId;

/// Outbound channel for one WebSocket session.
pub type OutboundSender = mpsc::UnboundedSender<Vec<u8>>;

/// Concurrent map of connection id to live session channel.
///
/// Cloneable; all clones share the same map. The WebSocket layer inserts
/// on upgrade and removes on close.
#[derive(Debug, Clone, Default)]
pub struct SessionMap {
    sessions: Arc<RwLock<HashMap<ConnectionId, OutboundSender>>>,
}

impl SessionMap {
    /// Creates an empty session map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the outbound channel for a session.
    pub async fn insert(&self, id: ConnectionId, sender: OutboundSender) {
        let mut map = self.sessions.write().await;
        map.insert(id, sender);
    }

    /// Removes a session channel, if present.
    pub async fn remove(&self, id: &ConnectionId) {
        let mut map = self.sessions.write().await;
        map.remove(id);
    }

    /// Returns the number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns `true` if no sessions are live.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Returns the sender for `id`, if a live session exists.
    async fn sender(&self, id: &ConnectionId) -> Option<OutboundSender> {
        let map = self.sessions.read().await;
        map.get(id).cloned()
    }
}

/// `Pusher` implementation over the in-process [`SessionMap`].
#[derive(Debug, Clone)]
pub struct SessionPusher {
    sessions: SessionMap,
}

impl SessionPusher {
    /// Creates a pusher routing through the given session map.
    #[must_use]
    pub fn new(sessions: SessionMap) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl Pusher for SessionPusher {
    async fn push(&self, id: &ConnectionId, payload: &[u8]) -> Result<(), PushError> {
        let Some(sender) = self.sessions.sender(id).await else {
            return Err(PushError::NotRoutable(id.clone()));
        };
        // A send error means the session task dropped its receiver: the
        // endpoint is gone, not merely slow.
        sender
            .send(payload.to_vec())
            .map_err(|_| PushError::NotRoutable(id.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn push_to_unknown_id_is_not_routable() {
        let pusher = SessionPusher::new(SessionMap::new());
        let id = ConnectionId::from("ghost");
        let result = pusher.push(&id, b"hello").await;
        assert_eq!(result, Err(PushError::NotRoutable(id)));
    }

    #[tokio::test]
    async fn push_delivers_to_live_session() {
        let sessions = SessionMap::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = ConnectionId::from("conn-1");
        sessions.insert(id.clone(), tx).await;

        let pusher = SessionPusher::new(sessions);
        let result = pusher.push(&id, b"hello").await;
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some(b"hello".to_vec()));
    }

    #[tokio::test]
    async fn push_after_receiver_dropped_is_not_routable() {
        let sessions = SessionMap::new();
        let (tx, rx) = mpsc::unbounded_channel::<Vec<u8>>();
        drop(rx);
        let id = ConnectionId::from("conn-1");
        sessions.insert(id.clone(), tx).await;

        let pusher = SessionPusher::new(sessions);
        let result = pusher.push(&id, b"hello").await;
        assert_eq!(result, Err(PushError::NotRoutable(id)));
    }

    #[tokio::test]
    async fn remove_makes_id_unroutable() {
        let sessions = SessionMap::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = ConnectionId::from("conn-1");
        sessions.insert(id.clone(), tx).await;
        assert_eq!(sessions.len().await, 1);

        sessions.remove(&id).await;
        assert!(sessions.is_empty().await);

        let pusher = SessionPusher::new(sessions);
        let result = pusher.push(&id, b"hello").await;
        assert_eq!(result, Err(PushError::NotRoutable(id)));
    }
}
