//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Catalog product identifier.
///
/// The inner u64 is private to ensure all construction goes through
/// the defined constructors. Zero is reserved for "no product" and is
/// rejected by [`ProductId::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Create a `ProductId`, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ZeroProductId`] when `id` is zero.
    pub const fn try_new(id: u64) -> Result<Self, DomainError> {
        if id == 0 {
            return Err(DomainError::ZeroProductId);
        }
        Ok(Self(id))
    }

    /// Create a `ProductId` from a value already known to be non-zero.
    ///
    /// Returns `None` for zero, which is how coerced input tokens get dropped.
    #[must_use]
    pub const fn from_coerced(id: u64) -> Option<Self> {
        if id == 0 {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for ProductId {
    type Error = DomainError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::try_new(id)
    }
}

impl From<ProductId> for u64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}
