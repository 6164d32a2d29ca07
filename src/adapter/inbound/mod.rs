//! Inbound adapters: storefront hook wiring and the operator CLI.

pub mod cli;
pub mod hooks;
