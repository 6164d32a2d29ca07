//! Catalog-agnostic domain types.
//!
//! - [`id`] - Product identifiers
//! - [`product`] - Products, stock status and the current-product slot
//! - [`fallback`] - Ordered fallback lists and input coercion
//! - [`stock`] - Out-of-stock snapshots

pub mod error;
pub mod fallback;
pub mod id;
pub mod product;
pub mod stock;

pub use error::DomainError;
pub use fallback::FallbackList;
pub use id::ProductId;
pub use product::{Product, ProductSlot, StockStatus};
pub use stock::OutOfStockSet;
