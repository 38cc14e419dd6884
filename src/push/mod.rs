//! Push delivery: the `Pusher` capability and its failure taxonomy.
//!
//! A push target can fail in two distinct ways, and the broadcast engine
//! reacts differently to each: a confirmed-gone target is pruned from the
//! registry, a transient fault is logged and left alone. [`PushError`]
//! makes that distinction an explicit, exhaustively-matched enumeration
//! instead of ad-hoc error inspection.

use std::fmt;

use async_trait::async_trait;

use crate::domain::ConnectionId;

pub mod session;

pub use session::{SessionMap, SessionPusher};

/// Delivery failure for a single push attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PushError {
    /// The target is confirmed gone (stale or expired connection id).
    ///
    /// Drives best-effort deregistration of the target.
    #[error("connection {0} is no longer routable")]
    NotRoutable(ConnectionId),

    /// The push failed for a reason other than confirmed absence, such
    /// as a timeout or a transport fault. No registry mutation results.
    #[error("transient delivery failure for {id}: {reason}")]
    Transient {
        /// The push target.
        id: ConnectionId,
        /// Human-readable failure reason.
        reason: String,
    },
}

/// Capability to attempt one delivery to one identified endpoint.
///
/// Implementations must distinguish "target no longer routable" from
/// other transient errors so the broadcast engine can decide whether
/// to prune.
#[async_trait]
pub trait Pusher: fmt::Debug + Send + Sync {
    /// Attempts one delivery of `payload` to the endpoint behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::NotRoutable`] if the target is confirmed
    /// gone, [`PushError::Transient`] otherwise.
    async fn push(&self, id: &ConnectionId, payload: &[u8]) -> Result<(), PushError>;
}
