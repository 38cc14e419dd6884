//! Service layer: registry façade and broadcast fanout.
//!
//! [`ConnectionRegistry`] translates lifecycle intents into store
//! operations; [`BroadcastEngine`] fans one payload out to all other
//! registered connections and prunes targets that prove unreachable.

pub mod broadcast;
pub mod registry;

pub use broadcast::{BroadcastEngine, BroadcastOutcome};
pub use registry::ConnectionRegistry;
