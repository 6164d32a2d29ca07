//! SQLite catalog implementation.
//!
//! Products live in `products`; their stock status lives in `product_meta`
//! under `_stock_status`, the way the commerce platform stores it. A product
//! without that entry is in stock.

use std::str::FromStr;

use diesel::prelude::*;
use rust_decimal::Decimal;
use tracing::warn;
use url::Url;

use super::database::connection::DbPool;
use super::database::model::{MetaRow, ProductRow};
use super::database::schema::{product_meta, products};
use super::metadata::{product_id, require_storage_key, storage_key};
use crate::domain::{OutOfStockSet, Product, ProductId, StockStatus};
use crate::error::{Error, Result};
use crate::port::{Catalog, CollectionQuery, HostEnvironment};

/// Metadata key holding a product's stock status.
pub const STOCK_STATUS_KEY: &str = "_stock_status";

/// SQLite-backed catalog.
///
/// Permalinks are `{product_base_url}{slug}/`.
#[derive(Clone)]
pub struct SqliteCatalog {
    pool: DbPool,
    product_base_url: Url,
}

impl SqliteCatalog {
    /// Create a catalog whose permalinks hang off `product_base_url`.
    ///
    /// A trailing slash is added to the base when missing so that slugs
    /// are appended rather than replacing the last path segment.
    #[must_use]
    pub fn new(pool: DbPool, mut product_base_url: Url) -> Self {
        if !product_base_url.path().ends_with('/') {
            let path = format!("{}/", product_base_url.path());
            product_base_url.set_path(&path);
        }
        Self {
            pool,
            product_base_url,
        }
    }

    /// Insert or update a product together with its stock status.
    ///
    /// # Errors
    /// Returns [`Error::Database`] when the slug belongs to another product.
    pub fn save_product(&self, product: &Product) -> Result<()> {
        let key = require_storage_key(product.id)?;
        let row = ProductRow {
            id: key,
            name: product.name.clone(),
            slug: product.slug.clone(),
            price: product.price.to_string(),
            short_description: product.short_description.clone(),
            product_type: product.product_type.clone(),
        };
        let stock = MetaRow {
            product_id: key,
            meta_key: STOCK_STATUS_KEY.to_string(),
            meta_value: product.stock_status.as_str().to_string(),
        };
        let mut conn = self.pool.get()?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(products::table)
                .values(&row)
                .on_conflict(products::id)
                .do_update()
                .set((
                    products::name.eq(&row.name),
                    products::slug.eq(&row.slug),
                    products::price.eq(&row.price),
                    products::short_description.eq(&row.short_description),
                    products::product_type.eq(&row.product_type),
                ))
                .execute(conn)?;
            diesel::replace_into(product_meta::table)
                .values(&stock)
                .execute(conn)?;
            Ok(())
        })?;

        Ok(())
    }

    /// Update the stock status of an existing product.
    ///
    /// # Errors
    /// Returns [`Error::ProductNotFound`] when no product has this id.
    pub fn set_stock_status(&self, id: ProductId, status: &StockStatus) -> Result<()> {
        if !self.exists(id)? {
            return Err(Error::ProductNotFound(id.value()));
        }
        let row = MetaRow {
            product_id: require_storage_key(id)?,
            meta_key: STOCK_STATUS_KEY.to_string(),
            meta_value: status.as_str().to_string(),
        };
        let mut conn = self.pool.get()?;

        diesel::replace_into(product_meta::table)
            .values(&row)
            .execute(&mut conn)?;

        Ok(())
    }

    fn exists(&self, id: ProductId) -> Result<bool> {
        let Some(key) = storage_key(id) else {
            return Ok(false);
        };
        let mut conn = self.pool.get()?;

        let found = products::table
            .find(key)
            .select(products::id)
            .first::<i64>(&mut conn)
            .optional()?;

        Ok(found.is_some())
    }

    fn from_row(row: ProductRow, stock: Option<String>) -> Result<Product> {
        let id = product_id(row.id)
            .ok_or_else(|| Error::Database(format!("invalid product id {}", row.id)))?;
        let price = Decimal::from_str(&row.price)
            .map_err(|e| Error::Database(format!("invalid price for product {id}: {e}")))?;

        Ok(Product {
            id,
            name: row.name,
            slug: row.slug,
            price,
            short_description: row.short_description,
            product_type: row.product_type,
            stock_status: stock.map_or(StockStatus::InStock, |raw| StockStatus::parse(&raw)),
        })
    }
}

impl Catalog for SqliteCatalog {
    fn product(&self, id: ProductId) -> Result<Option<Product>> {
        let Some(key) = storage_key(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get()?;

        let row = products::table
            .left_join(
                product_meta::table.on(product_meta::product_id
                    .eq(products::id)
                    .and(product_meta::meta_key.eq(STOCK_STATUS_KEY))),
            )
            .filter(products::id.eq(key))
            .select((
                ProductRow::as_select(),
                product_meta::meta_value.nullable(),
            ))
            .first::<(ProductRow, Option<String>)>(&mut conn)
            .optional()?;

        row.map(|(row, stock)| Self::from_row(row, stock)).transpose()
    }

    fn stock_status(&self, id: ProductId) -> Result<Option<StockStatus>> {
        let Some(key) = storage_key(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get()?;

        let row = products::table
            .left_join(
                product_meta::table.on(product_meta::product_id
                    .eq(products::id)
                    .and(product_meta::meta_key.eq(STOCK_STATUS_KEY))),
            )
            .filter(products::id.eq(key))
            .select((products::id, product_meta::meta_value.nullable()))
            .first::<(i64, Option<String>)>(&mut conn)
            .optional()?;

        Ok(row.map(|(_, stock)| stock.map_or(StockStatus::InStock, |raw| StockStatus::parse(&raw))))
    }

    fn permalink(&self, id: ProductId) -> Result<Option<Url>> {
        let Some(key) = storage_key(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get()?;

        let slug = products::table
            .find(key)
            .select(products::slug)
            .first::<String>(&mut conn)
            .optional()?;

        slug.map(|slug| self.product_base_url.join(&format!("{slug}/")))
            .transpose()
            .map_err(Error::from)
    }

    fn out_of_stock_ids(&self) -> Result<OutOfStockSet> {
        let mut conn = self.pool.get()?;

        let keys = product_meta::table
            .filter(product_meta::meta_key.eq(STOCK_STATUS_KEY))
            .filter(product_meta::meta_value.eq(StockStatus::OUT_OF_STOCK))
            .select(product_meta::product_id)
            .load::<i64>(&mut conn)?;

        Ok(keys.into_iter().filter_map(product_id).collect())
    }

    fn list(&self, query: &CollectionQuery) -> Result<Vec<Product>> {
        if query
            .post_type
            .as_deref()
            .is_some_and(|post_type| post_type != CollectionQuery::PRODUCT)
        {
            return Ok(Vec::new());
        }

        let excluded: Vec<i64> = query.exclude.iter().copied().filter_map(storage_key).collect();
        let mut conn = self.pool.get()?;

        let rows = products::table
            .left_join(
                product_meta::table.on(product_meta::product_id
                    .eq(products::id)
                    .and(product_meta::meta_key.eq(STOCK_STATUS_KEY))),
            )
            .filter(products::id.ne_all(excluded))
            .order(products::id.asc())
            .select((
                ProductRow::as_select(),
                product_meta::meta_value.nullable(),
            ))
            .load::<(ProductRow, Option<String>)>(&mut conn)?;

        rows.into_iter()
            .map(|(row, stock)| Self::from_row(row, stock))
            .collect()
    }
}

impl HostEnvironment for SqliteCatalog {
    fn commerce_active(&self) -> bool {
        #[derive(QueryableByName)]
        struct TableCount {
            #[diesel(sql_type = diesel::sql_types::BigInt)]
            count: i64,
        }

        let probe = self.pool.get().map_err(Error::from).and_then(|mut conn| {
            diesel::sql_query(
                "SELECT COUNT(*) AS count FROM sqlite_master WHERE type='table' AND name='products'",
            )
            .get_result::<TableCount>(&mut conn)
            .map_err(Error::from)
        });

        match probe {
            Ok(found) => found.count > 0,
            Err(e) => {
                warn!(error = %e, "Catalog probe failed");
                false
            }
        }
    }
}
