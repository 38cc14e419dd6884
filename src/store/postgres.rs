//! PostgreSQL implementation of the connection store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::ConnectionStore;
use crate::domain::{Connection, ConnectionId};
use crate::error::GatewayError;

/// PostgreSQL-backed connection store using `sqlx::PgPool`.
///
/// One row per registered connection in the `connections` table, keyed
/// by the transport-assigned id.
#[derive(Debug, Clone)]
pub struct PostgresConnectionStore {
    pool: PgPool,
}

impl PostgresConnectionStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `connections` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnavailable`] on database failure.
    pub async fn init_schema(&self) -> Result<(), GatewayError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS connections (\
             id TEXT PRIMARY KEY, \
             created_at TIMESTAMPTZ NOT NULL)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| GatewayError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ConnectionStore for PostgresConnectionStore {
    async fn add(&self, conn: Connection) -> Result<(), GatewayError> {
        sqlx::query(
            "INSERT INTO connections (id, created_at) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET created_at = EXCLUDED.created_at",
        )
        .bind(conn.id.as_str())
        .bind(conn.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| GatewayError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }

    async fn remove(&self, id: &ConnectionId) -> Result<(), GatewayError> {
        // DELETE of an absent row affects zero rows; idempotent by design
        // of the operation, so rows_affected is not inspected.
        sqlx::query("DELETE FROM connections WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| GatewayError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Connection>, GatewayError> {
        let rows = sqlx::query_as::<_, (String, DateTime<Utc>)>(
            "SELECT id, created_at FROM connections",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::StoreUnavailable(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, created_at)| Connection {
                id: ConnectionId::from(id),
                created_at,
            })
            .collect())
    }
}
