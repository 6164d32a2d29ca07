//! Fallback use-cases built on the ports.
//!
//! - [`store`] - Read and replace a product's fallback list
//! - [`resolver`] - Pick the first in-stock candidate
//! - [`scope`] - Per-request memo of the out-of-stock snapshot
//! - [`substitution`] - Redirect and content-substitution hooks

pub mod resolver;
pub mod scope;
pub mod store;
pub mod substitution;

pub use resolver::FallbackResolver;
pub use scope::RequestScope;
pub use store::FallbackStore;
pub use substitution::{SubstitutionPolicy, ViewSubstitution};
