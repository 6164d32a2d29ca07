use std::sync::Arc;

use diesel::prelude::*;
use tempfile::TempDir;
use url::Url;

use product_fallbacks::adapter::outbound::sqlite::{open, DbPool, SqliteCatalog, SqliteMetadataStore};
use product_fallbacks::application::{FallbackResolver, FallbackStore};
use product_fallbacks::domain::{Product, StockStatus};
use product_fallbacks::testkit::domain::product;

pub const PRODUCT_BASE: &str = "https://shop.example.com/product/";

/// Temporary SQLite catalog for integration tests, removed on drop.
pub struct TempDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("product-fallbacks-{name}-"))
            .tempdir()
            .expect("create temp dir");
        let path = dir.path().join("catalog.db");

        let pool = open(&path.display().to_string()).expect("open sqlite catalog");

        // WAL mode improves concurrent writer behavior in tests.
        {
            let mut conn = pool.get().expect("get sqlite connection");
            diesel::sql_query("PRAGMA journal_mode=WAL")
                .execute(&mut conn)
                .expect("enable WAL mode");
        }

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn catalog(&self) -> Arc<SqliteCatalog> {
        Arc::new(SqliteCatalog::new(
            self.pool.clone(),
            Url::parse(PRODUCT_BASE).expect("valid product base"),
        ))
    }

    pub fn store(&self) -> FallbackStore {
        FallbackStore::new(Arc::new(SqliteMetadataStore::new(self.pool.clone())))
    }

    pub fn resolver(&self) -> FallbackResolver {
        FallbackResolver::new(self.store(), self.catalog())
    }

    /// Save `(id, status)` pairs as test products.
    pub fn seed(&self, products: &[(u64, StockStatus)]) -> Vec<Product> {
        let catalog = self.catalog();
        products
            .iter()
            .map(|(id, status)| {
                let saved = product(*id, status.clone());
                catalog.save_product(&saved).expect("save product");
                saved
            })
            .collect()
    }
}
