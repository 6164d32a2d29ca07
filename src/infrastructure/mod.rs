//! Process-level wiring: configuration, logging and startup.

pub mod bootstrap;
pub mod config;
