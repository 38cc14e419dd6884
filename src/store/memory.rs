//! In-memory implementation of the connection store.
//!
//! Used when persistence is disabled (single-process deployments) and as
//! the store double in tests. Same contract as the PostgreSQL store:
//! last-write-wins on re-add, idempotent remove, unordered listing.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ConnectionStore;
use crate::domain::{Connection, ConnectionId};
use crate::error::GatewayError;

/// Connection store backed by a `RwLock<HashMap>`.
#[derive(Debug, Default)]
pub struct MemoryConnectionStore {
    connections: RwLock<HashMap<ConnectionId, Connection>>,
}

impl MemoryConnectionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored connections.
    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Returns `true` if the store holds no connections.
    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}

#[async_trait]
impl ConnectionStore for MemoryConnectionStore {
    async fn add(&self, conn: Connection) -> Result<(), GatewayError> {
        let mut map = self.connections.write().await;
        map.insert(conn.id.clone(), conn);
        Ok(())
    }

    async fn remove(&self, id: &ConnectionId) -> Result<(), GatewayError> {
        let mut map = self.connections.write().await;
        map.remove(id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Connection>, GatewayError> {
        let map = self.connections.read().await;
        Ok(map.values().cloned().collect())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn conn(id: &str) -> Connection {
        Connection::new(ConnectionId::from(id), Utc::now())
    }

    #[tokio::test]
    async fn add_and_list() {
        let store = MemoryConnectionStore::new();
        assert!(store.is_empty().await);

        let result = store.add(conn("a")).await;
        assert!(result.is_ok());
        assert_eq!(store.len().await, 1);

        let all = store.list_all().await;
        let Ok(all) = all else {
            panic!("list_all failed");
        };
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn re_add_is_last_write_wins() {
        let store = MemoryConnectionStore::new();
        let first = conn("a");
        let second = conn("a");
        let _ = store.add(first).await;
        let _ = store.add(second.clone()).await;

        assert_eq!(store.len().await, 1);
        let all = store.list_all().await;
        let Ok(all) = all else {
            panic!("list_all failed");
        };
        assert_eq!(all.first().map(|c| c.created_at), Some(second.created_at));
    }

    #[tokio::test]
    async fn remove_absent_id_succeeds() {
        let store = MemoryConnectionStore::new();
        let result = store.remove(&ConnectionId::from("missing")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn remove_deletes_record() {
        let store = MemoryConnectionStore::new();
        let _ = store.add(conn("a")).await;
        let _ = store.add(conn("b")).await;

        let result = store.remove(&ConnectionId::from("a")).await;
        assert!(result.is_ok());

        let all = store.list_all().await;
        let Ok(all) = all else {
            panic!("list_all failed");
        };
        assert_eq!(all.len(), 1);
        assert_eq!(all.first().map(|c| c.id.as_str()), Some("b"));
    }
}
