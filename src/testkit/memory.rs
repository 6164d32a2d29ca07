//! In-memory port implementations.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;
use url::Url;

use crate::domain::{OutOfStockSet, Product, ProductId, StockStatus};
use crate::error::Result;
use crate::port::{Catalog, CollectionQuery, HostEnvironment, MetadataStore};

/// Metadata held in a map keyed by `(product, key)`.
#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    values: RwLock<HashMap<(ProductId, String), String>>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataStore for MemoryMetadataStore {
    fn get(&self, product: ProductId, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(&(product, key.to_string())).cloned())
    }

    fn set(&self, product: ProductId, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .insert((product, key.to_string()), value.to_string());
        Ok(())
    }

    fn delete(&self, product: ProductId, key: &str) -> Result<bool> {
        Ok(self.values.write().remove(&(product, key.to_string())).is_some())
    }
}

/// Catalog held in memory, with permalinks under `https://shop.test/product/`.
///
/// Counts bulk stock queries so tests can assert snapshot reuse.
#[derive(Debug)]
pub struct MemoryCatalog {
    products: RwLock<BTreeMap<ProductId, Product>>,
    stock_queries: AtomicUsize,
    active: AtomicBool,
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self {
            products: RwLock::new(BTreeMap::new()),
            stock_queries: AtomicUsize::new(0),
            active: AtomicBool::new(true),
        }
    }
}

impl MemoryCatalog {
    pub const BASE_URL: &'static str = "https://shop.test/product/";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, product: Product) {
        self.products.write().insert(product.id, product);
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    /// Number of `out_of_stock_ids` calls so far.
    pub fn stock_queries(&self) -> usize {
        self.stock_queries.load(Ordering::SeqCst)
    }
}

impl Catalog for MemoryCatalog {
    fn product(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.products.read().get(&id).cloned())
    }

    fn permalink(&self, id: ProductId) -> Result<Option<Url>> {
        let products = self.products.read();
        let Some(product) = products.get(&id) else {
            return Ok(None);
        };
        let base = Url::parse(Self::BASE_URL)?;
        Ok(Some(base.join(&format!("{}/", product.slug))?))
    }

    fn out_of_stock_ids(&self) -> Result<OutOfStockSet> {
        self.stock_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .products
            .read()
            .values()
            .filter(|product| product.stock_status == StockStatus::OutOfStock)
            .map(|product| product.id)
            .collect())
    }

    fn list(&self, query: &CollectionQuery) -> Result<Vec<Product>> {
        Ok(self
            .products
            .read()
            .values()
            .filter(|product| !query.exclude.contains(&product.id))
            .cloned()
            .collect())
    }
}

impl HostEnvironment for MemoryCatalog {
    fn commerce_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}
