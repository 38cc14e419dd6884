//! Connection store: durable set of registered connections.
//!
//! The store is the single shared mutable resource in the system. The
//! registry holds no in-process cache, so every snapshot reads straight
//! through to the store; its consistency model, not this gateway, is
//! responsible for isolating concurrent add/remove/list calls.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Connection, ConnectionId};
use crate::error::GatewayError;

pub mod memory;
pub mod postgres;

pub use memory::MemoryConnectionStore;
pub use postgres::PostgresConnectionStore;

/// Durable set of `{id, created_at}` records.
///
/// All failures surface as [`GatewayError::StoreUnavailable`]; no retry
/// is performed at this layer.
#[async_trait]
pub trait ConnectionStore: fmt::Debug + Send + Sync {
    /// Durably stores one connection record.
    ///
    /// Re-adding an existing id is last-write-wins; no resurrection
    /// guarantee is made against a concurrent remove.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnavailable`] on store failure.
    async fn add(&self, conn: Connection) -> Result<(), GatewayError>;

    /// Removes the record with the given id, if present.
    ///
    /// Removing an absent id is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnavailable`] on store failure.
    async fn remove(&self, id: &ConnectionId) -> Result<(), GatewayError>;

    /// Returns a point-in-time list of all stored connections.
    ///
    /// Order is store-defined and not guaranteed stable across calls.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnavailable`] on store failure.
    async fn list_all(&self) -> Result<Vec<Connection>, GatewayError>;
}
