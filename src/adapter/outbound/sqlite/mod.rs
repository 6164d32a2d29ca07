//! SQLite persistence adapters.
//!
//! Provides SQLite-backed implementations of the metadata store, the
//! catalog and the host environment probe using Diesel ORM.

pub mod catalog;
pub mod database;
pub mod metadata;

pub use catalog::{SqliteCatalog, STOCK_STATUS_KEY};
pub use database::connection::{create_pool, open, run_migrations, DbPool};
pub use metadata::SqliteMetadataStore;
