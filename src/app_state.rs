//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::push::SessionMap;
use crate::service::{BroadcastEngine, ConnectionRegistry};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Connection registry over the durable store.
    pub registry: Arc<ConnectionRegistry>,
    /// Broadcast fanout engine.
    pub engine: Arc<BroadcastEngine>,
    /// Live WebSocket session channels hosted by this process.
    pub sessions: SessionMap,
}
