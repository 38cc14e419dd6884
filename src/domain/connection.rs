//! The registered-connection record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ConnectionId;

/// One registered endpoint as stored in the connection registry.
///
/// Immutable once created: there is no update operation. `created_at` is
/// informational only; the registry has no TTL or expiry logic, so a
/// record lives until an explicit deregister or a failed push prunes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Transport-assigned identifier, unique across stored connections.
    pub id: ConnectionId,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl Connection {
    /// Creates a connection record for the given id and registration time.
    #[must_use]
    pub fn new(id: ConnectionId, created_at: DateTime<Utc>) -> Self {
        Self { id, created_at }
    }
}
