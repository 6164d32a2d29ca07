//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors when an input
//! violates a domain invariant.
//!
//! # Examples
//!
//! ```
//! use product_fallbacks::domain::error::DomainError;
//! use product_fallbacks::domain::id::ProductId;
//!
//! let result = ProductId::try_new(0);
//! assert!(matches!(result, Err(DomainError::ZeroProductId)));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Product identifiers start at 1; zero means "no product".
    #[error("product id must be greater than zero")]
    ZeroProductId,

    /// Product slugs appear in permalinks and cannot be empty.
    #[error("product slug cannot be empty")]
    EmptySlug,

    /// Product names are shown to visitors and cannot be empty.
    #[error("product name cannot be empty")]
    EmptyName,
}
