//! Fallback resolution.
//!
//! Given a product, walk its fallback list in stored order and return the
//! first candidate that is not in the out-of-stock snapshot. Nothing else is
//! weighed: no price, no recency. The walk is flat (a product's own list
//! only), so fallback cycles across products cannot recurse.

use std::sync::Arc;

use tracing::debug;

use super::scope::RequestScope;
use super::store::FallbackStore;
use crate::domain::{FallbackList, OutOfStockSet, ProductId};
use crate::error::Result;
use crate::port::Catalog;

/// Picks the first in-stock candidate from a product's fallback list.
#[derive(Clone)]
pub struct FallbackResolver {
    store: FallbackStore,
    catalog: Arc<dyn Catalog>,
}

impl FallbackResolver {
    #[must_use]
    pub fn new(store: FallbackStore, catalog: Arc<dyn Catalog>) -> Self {
        Self { store, catalog }
    }

    /// The fallback store this resolver reads from.
    #[must_use]
    pub const fn store(&self) -> &FallbackStore {
        &self.store
    }

    /// Query the catalog once for every out-of-stock product.
    ///
    /// Storage failures propagate unchanged.
    pub fn get_out_of_stock_set(&self) -> Result<OutOfStockSet> {
        let snapshot = self.catalog.out_of_stock_ids()?;
        debug!(out_of_stock = snapshot.len(), "Loaded out-of-stock snapshot");
        Ok(snapshot)
    }

    /// Resolve against a fresh snapshot.
    pub fn resolve_fallback(&self, product: ProductId) -> Result<Option<ProductId>> {
        self.resolve_in(product, &RequestScope::new())
    }

    /// Resolve, reusing the snapshot held by `scope` when there is one.
    ///
    /// Products without fallbacks never trigger the bulk stock query.
    pub fn resolve_in(
        &self,
        product: ProductId,
        scope: &RequestScope,
    ) -> Result<Option<ProductId>> {
        let fallbacks = self.store.get_fallbacks(product)?;
        if fallbacks.is_empty() {
            return Ok(None);
        }

        let snapshot = scope.out_of_stock(|| self.get_out_of_stock_set())?;
        let winner = first_available(product, &fallbacks, snapshot);
        debug!(
            product_id = %product,
            candidates = fallbacks.len(),
            fallback_id = ?winner.map(|id| id.value()),
            "Resolved fallback"
        );
        Ok(winner)
    }
}

/// First candidate of `fallbacks` that is not out of stock.
///
/// Entries pointing back at `owner` are skipped: the owner is the product
/// being replaced, so substituting it with itself never helps and a stale
/// snapshot would otherwise redirect a page to itself.
#[must_use]
pub fn first_available(
    owner: ProductId,
    fallbacks: &FallbackList,
    out_of_stock: &OutOfStockSet,
) -> Option<ProductId> {
    fallbacks
        .iter()
        .filter(|candidate| *candidate != owner)
        .find(|candidate| !out_of_stock.contains(*candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StockStatus;
    use crate::testkit::domain::{id, product};
    use crate::testkit::memory::{MemoryCatalog, MemoryMetadataStore};

    struct Fixture {
        catalog: Arc<MemoryCatalog>,
        resolver: FallbackResolver,
    }

    fn fixture() -> Fixture {
        let metadata = Arc::new(MemoryMetadataStore::new());
        let catalog = Arc::new(MemoryCatalog::new());
        let resolver = FallbackResolver::new(FallbackStore::new(metadata), catalog.clone());
        Fixture { catalog, resolver }
    }

    fn set(list: &[u64]) -> OutOfStockSet {
        list.iter().map(|value| id(*value)).collect()
    }

    fn list(values: &[u64]) -> FallbackList {
        values.iter().map(|value| id(*value)).collect()
    }

    #[test]
    fn first_available_skips_out_of_stock_candidates() {
        assert_eq!(
            first_available(id(100), &list(&[101, 102, 103]), &set(&[100, 101])),
            Some(id(102))
        );
    }

    #[test]
    fn first_available_returns_none_when_all_out_of_stock() {
        assert_eq!(
            first_available(id(100), &list(&[101, 102]), &set(&[100, 101, 102])),
            None
        );
    }

    #[test]
    fn first_available_is_order_sensitive() {
        let snapshot = set(&[100]);
        assert_eq!(first_available(id(100), &list(&[1, 2]), &snapshot), Some(id(1)));
        assert_eq!(first_available(id(100), &list(&[2, 1]), &snapshot), Some(id(2)));
    }

    #[test]
    fn first_available_skips_self_reference() {
        assert_eq!(
            first_available(id(100), &list(&[100, 101]), &OutOfStockSet::new()),
            Some(id(101))
        );
        assert_eq!(first_available(id(100), &list(&[100]), &OutOfStockSet::new()), None);
    }

    #[test]
    fn first_available_tolerates_duplicates() {
        assert_eq!(
            first_available(id(100), &list(&[101, 101, 102]), &set(&[101])),
            Some(id(102))
        );
    }

    #[test]
    fn resolve_without_fallbacks_skips_stock_query() {
        let f = fixture();
        assert_eq!(f.resolver.resolve_fallback(id(100)).unwrap(), None);
        assert_eq!(f.catalog.stock_queries(), 0);
    }

    #[test]
    fn resolve_uses_catalog_snapshot() {
        let f = fixture();
        f.catalog.insert(product(100, StockStatus::OutOfStock));
        f.catalog.insert(product(101, StockStatus::OutOfStock));
        f.catalog.insert(product(102, StockStatus::InStock));
        f.resolver.store().set_fallbacks(id(100), "101,102").unwrap();

        assert_eq!(f.resolver.resolve_fallback(id(100)).unwrap(), Some(id(102)));
        assert_eq!(f.resolver.resolve_fallback(id(100)).unwrap(), Some(id(102)));
    }

    #[test]
    fn resolve_passes_through_unknown_ids() {
        let f = fixture();
        f.catalog.insert(product(100, StockStatus::OutOfStock));
        f.resolver.store().set_fallbacks(id(100), "999").unwrap();
        assert_eq!(f.resolver.resolve_fallback(id(100)).unwrap(), Some(id(999)));
    }

    #[test]
    fn resolve_in_shares_snapshot_within_scope() {
        let f = fixture();
        f.catalog.insert(product(100, StockStatus::OutOfStock));
        f.catalog.insert(product(200, StockStatus::OutOfStock));
        f.resolver.store().set_fallbacks(id(100), "101").unwrap();
        f.resolver.store().set_fallbacks(id(200), "201").unwrap();

        let scope = RequestScope::new();
        f.resolver.resolve_in(id(100), &scope).unwrap();
        f.resolver.resolve_in(id(200), &scope).unwrap();
        assert_eq!(f.catalog.stock_queries(), 1);
    }
}
