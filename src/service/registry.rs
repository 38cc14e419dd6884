//! Connection registry: domain façade over the durable store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::{Connection, ConnectionId};
use crate::error::GatewayError;
use crate::store::ConnectionStore;

/// Translates connection lifecycle intents into store operations.
///
/// Owns no cache and no concurrency control beyond what the store
/// guarantees: each call reads or writes straight through, so the store
/// stays the sole source of truth for membership. Every store call is
/// bounded by `op_timeout`; a timeout is treated as a store failure.
#[derive(Debug, Clone)]
pub struct ConnectionRegistry {
    store: Arc<dyn ConnectionStore>,
    op_timeout: Duration,
}

impl ConnectionRegistry {
    /// Creates a registry over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn ConnectionStore>, op_timeout: Duration) -> Self {
        Self { store, op_timeout }
    }

    /// Registers a connection under the given id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if `id` is empty, or
    /// [`GatewayError::StoreUnavailable`] if the durable write fails.
    pub async fn register(
        &self,
        id: ConnectionId,
        at: DateTime<Utc>,
    ) -> Result<(), GatewayError> {
        if id.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "connection id must not be empty".to_string(),
            ));
        }
        tracing::debug!(%id, "registering connection");
        self.bounded(self.store.add(Connection::new(id, at))).await
    }

    /// Deregisters a connection. Removing an absent id succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnavailable`] if the store cannot be
    /// reached.
    pub async fn deregister(&self, id: &ConnectionId) -> Result<(), GatewayError> {
        tracing::debug!(%id, "deregistering connection");
        self.bounded(self.store.remove(id)).await
    }

    /// Returns a point-in-time list of all registered connections.
    ///
    /// Order is store-defined and not guaranteed stable across calls.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnavailable`] if the store cannot be
    /// read.
    pub async fn snapshot(&self) -> Result<Vec<Connection>, GatewayError> {
        self.bounded(self.store.list_all()).await
    }

    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, GatewayError>> + Send,
    ) -> Result<T, GatewayError> {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::StoreUnavailable(
                "store operation timed out".to_string(),
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use async_trait::async_trait;
    use tokio_test::assert_ok;

    use super::*;
    use crate::store::MemoryConnectionStore;

    /// Store double whose every operation fails.
    #[derive(Debug)]
    struct FailingStore;

    #[async_trait]
    impl ConnectionStore for FailingStore {
        async fn add(&self, _conn: Connection) -> Result<(), GatewayError> {
            Err(GatewayError::StoreUnavailable("down".to_string()))
        }

        async fn remove(&self, _id: &ConnectionId) -> Result<(), GatewayError> {
            Err(GatewayError::StoreUnavailable("down".to_string()))
        }

        async fn list_all(&self) -> Result<Vec<Connection>, GatewayError> {
            Err(GatewayError::StoreUnavailable("down".to_string()))
        }
    }

    fn registry() -> ConnectionRegistry {
        ConnectionRegistry::new(
            Arc::new(MemoryConnectionStore::new()),
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn register_then_snapshot_contains_connection() {
        let registry = registry();
        assert_ok!(registry.register(ConnectionId::from("conn-1"), Utc::now()).await);

        let snapshot = assert_ok!(registry.snapshot().await);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.first().map(|c| c.id.as_str()), Some("conn-1"));
    }

    #[tokio::test]
    async fn register_rejects_empty_id() {
        let registry = registry();
        let result = registry.register(ConnectionId::from(""), Utc::now()).await;
        assert!(matches!(result, Err(GatewayError::InvalidRequest(_))));

        let snapshot = assert_ok!(registry.snapshot().await);
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn register_then_deregister_excludes_connection() {
        let registry = registry();
        let id = ConnectionId::from("conn-1");
        assert_ok!(registry.register(id.clone(), Utc::now()).await);
        assert_ok!(registry.deregister(&id).await);

        let snapshot = assert_ok!(registry.snapshot().await);
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn deregister_absent_id_succeeds() {
        let registry = registry();
        assert_ok!(registry.register(ConnectionId::from("a"), Utc::now()).await);

        assert_ok!(registry.deregister(&ConnectionId::from("unknown-id")).await);

        let snapshot = assert_ok!(registry.snapshot().await);
        assert_eq!(snapshot.len(), 1);
    }

    #[tokio::test]
    async fn store_failures_are_surfaced() {
        let registry = ConnectionRegistry::new(Arc::new(FailingStore), Duration::from_secs(1));

        let result = registry.register(ConnectionId::from("a"), Utc::now()).await;
        assert!(matches!(result, Err(GatewayError::StoreUnavailable(_))));

        let result = registry.deregister(&ConnectionId::from("a")).await;
        assert!(matches!(result, Err(GatewayError::StoreUnavailable(_))));

        let result = registry.snapshot().await;
        assert!(matches!(result, Err(GatewayError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn slow_store_times_out_as_unavailable() {
        /// Store double that never completes.
        #[derive(Debug)]
        struct StalledStore;

        #[async_trait]
        impl ConnectionStore for StalledStore {
            async fn add(&self, _conn: Connection) -> Result<(), GatewayError> {
                std::future::pending().await
            }

            async fn remove(&self, _id: &ConnectionId) -> Result<(), GatewayError> {
                std::future::pending().await
            }

            async fn list_all(&self) -> Result<Vec<Connection>, GatewayError> {
                std::future::pending().await
            }
        }

        let registry = ConnectionRegistry::new(Arc::new(StalledStore), Duration::from_millis(10));
        let result = registry.snapshot().await;
        assert!(matches!(result, Err(GatewayError::StoreUnavailable(_))));
    }
}
