//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`memory`] - In-memory [`MetadataStore`](crate::port::MetadataStore)
//!   and [`Catalog`](crate::port::Catalog) doubles.
//! - [`domain`] - Builders for ids and products.

pub mod domain;
pub mod memory;
