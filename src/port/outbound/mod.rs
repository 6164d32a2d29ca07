//! Outbound ports: what the fallback logic needs from the storefront.

pub mod catalog;
pub mod host;
pub mod metadata;
