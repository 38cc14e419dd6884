//! WebSocket layer: transport glue around the broadcast core.
//!
//! The endpoint at `/ws` hosts the live sessions. Each session gets a
//! transport-assigned connection id, a registry entry, and an outbound
//! channel in the session map; every inbound frame is handed to the
//! broadcast engine as an opaque payload.

pub mod connection;
pub mod handler;
