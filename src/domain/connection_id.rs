//! Type-safe connection identifier.
//!
//! [`ConnectionId`] is a newtype wrapper around an opaque string assigned
//! by the transport layer at connect time. It is the only handle used for
//! routing pushes and for deregistration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for one live connection.
///
/// The value is opaque: this gateway mints UUID v4 strings for the
/// sessions it hosts, but the registry and broadcast engine treat any
/// non-empty string as valid. Immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Mints a fresh random `ConnectionId` (UUID v4, simple format).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is the empty string.
    ///
    /// Empty ids are rejected at registration time; they never reach
    /// the store.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ConnectionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ConnectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<ConnectionId> for String {
    fn from(id: ConnectionId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        let a = ConnectionId::new();
        let b = ConnectionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn display_matches_inner_string() {
        let id = ConnectionId::from("conn-1");
        assert_eq!(format!("{id}"), "conn-1");
    }

    #[test]
    fn empty_id_is_detected() {
        let id = ConnectionId::from("");
        assert!(id.is_empty());
        assert!(!ConnectionId::new().is_empty());
    }

    #[test]
    fn serde_round_trip_is_transparent() {
        let id = ConnectionId::from("abc-123");
        let json = serde_json::to_string(&id).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"abc-123\"");
        let back: Option<ConnectionId> = serde_json::from_str(&json).ok();
        assert_eq!(back, Some(id));
    }

    #[test]
    fn hash_works_in_hashmap() {
        use std::collections::HashMap;
        let id = ConnectionId::new();
        let mut map = HashMap::new();
        map.insert(id.clone(), "test");
        assert_eq!(map.get(&id), Some(&"test"));
    }
}
