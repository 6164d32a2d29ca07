//! Inbound ports: what the storefront calls on the fallback logic.

pub mod view;
