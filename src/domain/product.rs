//! Catalog products and the per-request "current product" slot.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::ProductId;

/// Stock status as the catalog stores it.
///
/// Only [`StockStatus::InStock`] counts as available; every other value
/// (including statuses this crate does not know about) is "not in stock".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    OnBackorder,
    Other(String),
}

impl StockStatus {
    /// Literal value stored for in-stock products.
    pub const IN_STOCK: &'static str = "instock";
    /// Literal value stored for out-of-stock products.
    pub const OUT_OF_STOCK: &'static str = "outofstock";
    /// Literal value stored for products on backorder.
    pub const ON_BACKORDER: &'static str = "onbackorder";

    /// Parse a stored stock status value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            Self::IN_STOCK => Self::InStock,
            Self::OUT_OF_STOCK => Self::OutOfStock,
            Self::ON_BACKORDER => Self::OnBackorder,
            other => Self::Other(other.to_string()),
        }
    }

    /// Return the stored representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InStock => Self::IN_STOCK,
            Self::OutOfStock => Self::OUT_OF_STOCK,
            Self::OnBackorder => Self::ON_BACKORDER,
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        matches!(self, Self::InStock)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for StockStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<StockStatus> for String {
    fn from(status: StockStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A catalog product.
///
/// Owned by the catalog, not by this crate. Fields are public because the
/// content-substitution hook overwrites them wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub short_description: String,
    pub product_type: String,
    pub stock_status: StockStatus,
}

impl Product {
    /// Default product type for catalog entries.
    pub const SIMPLE: &'static str = "simple";

    /// Create a validated simple product.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or slug is blank.
    pub fn try_new(
        id: ProductId,
        name: impl Into<String>,
        slug: impl Into<String>,
        price: Decimal,
        stock_status: StockStatus,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let slug = slug.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        if slug.trim().is_empty() {
            return Err(DomainError::EmptySlug);
        }
        Ok(Self {
            id,
            name,
            slug,
            price,
            short_description: String::new(),
            product_type: Self::SIMPLE.to_string(),
            stock_status,
        })
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.short_description = description.into();
        self
    }

    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock_status.is_in_stock()
    }
}

/// "The current product" of a rendering pass.
///
/// The slot keeps the identity the request asked for while its visible
/// content can be overwritten with a substitute. Code that holds the slot
/// keeps reading through it and sees whichever product it now carries.
#[derive(Debug, Clone)]
pub struct ProductSlot {
    requested: ProductId,
    content: Product,
}

impl ProductSlot {
    #[must_use]
    pub fn new(product: Product) -> Self {
        Self {
            requested: product.id,
            content: product,
        }
    }

    /// Identifier the slot was opened for. Never changes.
    #[must_use]
    pub const fn requested_id(&self) -> ProductId {
        self.requested
    }

    /// Product currently visible through the slot.
    #[must_use]
    pub const fn current(&self) -> &Product {
        &self.content
    }

    /// Replace every field of the visible content with `substitute`.
    pub fn overwrite_with(&mut self, substitute: Product) {
        self.content = substitute;
    }

    #[must_use]
    pub fn is_substituted(&self) -> bool {
        self.content.id != self.requested
    }
}
