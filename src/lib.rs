//! # relay-gateway
//!
//! WebSocket relay gateway with a durable connection registry and
//! broadcast fanout. Every payload a client sends is delivered to all
//! other registered connections; endpoints that prove unreachable during
//! fanout are lazily pruned from the registry.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket, HTTP)
//!     │
//!     ├── WS Sessions (ws/)
//!     ├── REST Handlers (api/)
//!     │
//!     ├── BroadcastEngine (service/)
//!     ├── ConnectionRegistry (service/)
//!     │
//!     ├── Pusher / SessionMap (push/)
//!     │
//!     └── ConnectionStore (store/): PostgreSQL or in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod push;
pub mod service;
pub mod store;
pub mod ws;
