//! Outbound adapters implementing the storage ports.

pub mod sqlite;
