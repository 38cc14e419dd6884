//! Broadcast engine: fanout of one payload to all non-origin connections.
//!
//! The engine reconciles registry state against observed delivery
//! failures: a target confirmed gone is pruned, a transient fault is
//! left for a later attempt. Broadcast is fire-to-current-membership,
//! never all-or-nothing.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ConnectionId;
use crate::error::GatewayError;
use crate::push::{PushError, Pusher};
use crate::service::ConnectionRegistry;

/// Per-call delivery tally returned by [`BroadcastEngine::broadcast`].
///
/// A broadcast that reads the registry always completes, so the caller
/// learns about individual push outcomes from these counters rather
/// than from the `Result`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastOutcome {
    /// Non-origin connections for which a push was attempted.
    pub attempted: usize,
    /// Pushes that succeeded.
    pub delivered: usize,
    /// Targets confirmed gone and deregistered.
    pub pruned: usize,
    /// Pushes that failed transiently; no registry mutation.
    pub transient_failures: usize,
}

/// Delivers one event payload to every registered connection other than
/// its originator.
///
/// Pushes run sequentially in snapshot order, which trivially serializes
/// cleanup deregisters per connection id. Each push is bounded by
/// `push_timeout`; a timeout counts as a transient failure.
#[derive(Debug, Clone)]
pub struct BroadcastEngine {
    registry: Arc<ConnectionRegistry>,
    pusher: Arc<dyn Pusher>,
    push_timeout: Duration,
}

impl BroadcastEngine {
    /// Creates an engine over the given registry and pusher.
    #[must_use]
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        pusher: Arc<dyn Pusher>,
        push_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            pusher,
            push_timeout,
        }
    }

    /// Broadcasts `payload` to every registered connection except `origin`.
    ///
    /// Takes one snapshot up front; connections registered afterwards do
    /// not receive this event. Each snapshot entry gets at most one push
    /// attempt. A not-routable target is deregistered best-effort: a
    /// failed cleanup is logged and never aborts the broadcast. With
    /// `origin = None` no connection is excluded.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RegistryUnavailable`] if the snapshot
    /// cannot be read; in that case zero pushes are attempted.
    pub async fn broadcast(
        &self,
        origin: Option<&ConnectionId>,
        payload: &[u8],
    ) -> Result<BroadcastOutcome, GatewayError> {
        let conns = self
            .registry
            .snapshot()
            .await
            .map_err(|e| GatewayError::RegistryUnavailable(e.to_string()))?;

        let mut outcome = BroadcastOutcome::default();
        for conn in &conns {
            if origin == Some(&conn.id) {
                continue;
            }
            outcome.attempted += 1;

            let attempt = match tokio::time::timeout(
                self.push_timeout,
                self.pusher.push(&conn.id, payload),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(PushError::Transient {
                    id: conn.id.clone(),
                    reason: "push timed out".to_string(),
                }),
            };

            match attempt {
                Ok(()) => outcome.delivered += 1,
                Err(PushError::NotRoutable(_)) => {
                    outcome.pruned += 1;
                    tracing::info!(id = %conn.id, "pruning unreachable connection");
                    if let Err(e) = self.registry.deregister(&conn.id).await {
                        tracing::warn!(id = %conn.id, error = %e, "cleanup deregister failed");
                    }
                }
                Err(PushError::Transient { reason, .. }) => {
                    outcome.transient_failures += 1;
                    tracing::warn!(id = %conn.id, %reason, "transient delivery failure");
                }
            }
        }

        tracing::debug!(
            attempted = outcome.attempted,
            delivered = outcome.delivered,
            pruned = outcome.pruned,
            transient = outcome.transient_failures,
            "broadcast complete"
        );
        Ok(outcome)
    }
}
