//! Product fallbacks - show an in-stock substitute in place of an
//! out-of-stock catalog product.
//!
//! An admin gives each product an ordered list of fallback products. When a
//! visitor asks for a product that is not in stock, the first fallback that
//! is not out of stock takes its place: the product page redirects to it,
//! and anywhere else the product is rendered its content is swapped for the
//! fallback's.
//!
//! # Architecture
//!
//! Hexagonal: the fallback logic depends only on the traits in [`port`];
//! [`adapter`] binds them to SQLite and to a storefront hook registry.
//!
//! - [`domain`] - Product ids, products, fallback lists, stock snapshots
//! - [`port`] - Catalog, metadata and rendering-hook traits
//! - [`application`] - Fallback store, resolver and view substitution
//! - [`adapter`] - SQLite storage, hook registry and operator CLI
//! - [`infrastructure`] - Configuration, logging and startup wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use product_fallbacks::adapter::inbound::hooks::HookRegistry;
//! use product_fallbacks::application::RequestScope;
//! use product_fallbacks::domain::ProductId;
//! use product_fallbacks::infrastructure::bootstrap;
//! use product_fallbacks::infrastructure::config::settings::Config;
//! use product_fallbacks::port::{RenderDecision, ViewRequest};
//!
//! # fn main() -> product_fallbacks::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let services = bootstrap::build(&config)?;
//!
//! let mut hooks = HookRegistry::new();
//! bootstrap::register_hooks(&mut hooks, services.catalog.as_ref(), services.view.clone());
//!
//! let request = ViewRequest::single(ProductId::try_new(100)?);
//! if let RenderDecision::Redirect(redirect) = hooks.template_redirect(&request, &RequestScope::new()) {
//!     println!("{} {}", redirect.status, redirect.location);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
