//! Catalog access port.
//!
//! Narrow view of the storefront's product storage: single-product lookups,
//! permalinks, and one bulk stock query.

use url::Url;

use crate::domain::{OutOfStockSet, Product, ProductId, StockStatus};
use crate::error::Result;
use crate::port::inbound::view::CollectionQuery;

/// Read access to catalog products.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait Catalog: Send + Sync {
    /// Load a product. `Ok(None)` when no product has this id.
    fn product(&self, id: ProductId) -> Result<Option<Product>>;

    /// Stock status of a product. `Ok(None)` when no product has this id.
    ///
    /// The default implementation loads the whole product.
    fn stock_status(&self, id: ProductId) -> Result<Option<StockStatus>> {
        Ok(self.product(id)?.map(|product| product.stock_status))
    }

    /// Canonical public URL of a product. `Ok(None)` when it has none.
    fn permalink(&self, id: ProductId) -> Result<Option<Url>>;

    /// Every product id whose stock status is out of stock, in one query.
    ///
    /// Not filtered by product type, and not restricted to any candidate
    /// set supplied by the caller.
    fn out_of_stock_ids(&self) -> Result<OutOfStockSet>;

    /// Products matching a listing query, in ascending id order.
    fn list(&self, query: &CollectionQuery) -> Result<Vec<Product>>;
}
