//! Adapters binding the ports to concrete technology.
//!
//! - [`inbound`] - Hook registry and operator CLI driving the application
//! - [`outbound`] - SQLite storage behind the catalog and metadata ports

pub mod inbound;
pub mod outbound;
