//! Domain layer: connection identity and the registered-connection record.
//!
//! The registry, not this module, decides membership; these types only
//! carry the data. A `Connection` is binary (present in the registry or
//! not) with no intermediate states.

pub mod connection;
pub mod connection_id;

pub use connection::Connection;
pub use connection_id::ConnectionId;
