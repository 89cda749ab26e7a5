//! Wayfarer Persistence Gateways
//!
//! Implements the `PersistenceGateway` trait from `wayfarer-domain`.
//!
//! # Gateways
//!
//! - `SqliteGateway`: durable per-user storage in a single SQLite file
//! - `MemoryGateway`: in-process storage with fault injection, for tests and demos
//!
//! # Examples
//!
//! ```no_run
//! use wayfarer_gateway::SqliteGateway;
//!
//! let gateway = SqliteGateway::new("itineraries.db").unwrap();
//! // Gateway is now ready for itinerary operations
//! ```

#![warn(missing_docs)]

pub mod memory;
pub mod sqlite;

pub use memory::{GatewayOp, MemoryGateway};
pub use sqlite::SqliteGateway;
