//! SQLite product metadata store.

use diesel::prelude::*;

use super::database::connection::DbPool;
use super::database::model::MetaRow;
use super::database::schema::product_meta;
use crate::domain::ProductId;
use crate::error::{Error, Result};
use crate::port::MetadataStore;

/// SQLite-backed per-product key/value store.
///
/// Implements [`MetadataStore`] over the `product_meta` table.
#[derive(Clone)]
pub struct SqliteMetadataStore {
    pool: DbPool,
}

impl SqliteMetadataStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Storage key for a product id. `None` when the id does not fit the column.
pub(super) fn storage_key(id: ProductId) -> Option<i64> {
    i64::try_from(id.value()).ok()
}

/// Storage key for writes, where an unrepresentable id is an error.
pub(super) fn require_storage_key(id: ProductId) -> Result<i64> {
    storage_key(id).ok_or_else(|| Error::Database(format!("product id {id} exceeds storage range")))
}

/// Product id for a stored key. `None` for keys that are not valid ids.
pub(super) fn product_id(key: i64) -> Option<ProductId> {
    u64::try_from(key).ok().and_then(ProductId::from_coerced)
}

impl MetadataStore for SqliteMetadataStore {
    fn get(&self, product: ProductId, key: &str) -> Result<Option<String>> {
        let Some(product_key) = storage_key(product) else {
            return Ok(None);
        };
        let mut conn = self.pool.get()?;

        let value = product_meta::table
            .find((product_key, key))
            .select(product_meta::meta_value)
            .first::<String>(&mut conn)
            .optional()?;

        Ok(value)
    }

    fn set(&self, product: ProductId, key: &str, value: &str) -> Result<()> {
        let row = MetaRow {
            product_id: require_storage_key(product)?,
            meta_key: key.to_string(),
            meta_value: value.to_string(),
        };
        let mut conn = self.pool.get()?;

        diesel::replace_into(product_meta::table)
            .values(&row)
            .execute(&mut conn)?;

        Ok(())
    }

    fn delete(&self, product: ProductId, key: &str) -> Result<bool> {
        let Some(product_key) = storage_key(product) else {
            return Ok(false);
        };
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(product_meta::table.find((product_key, key)))
            .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{open, MEMORY_URL};
    use crate::testkit::domain::id;

    fn store() -> SqliteMetadataStore {
        SqliteMetadataStore::new(open(MEMORY_URL).unwrap())
    }

    #[test]
    fn set_get_delete_round_trip() {
        let store = store();
        assert_eq!(store.get(id(1), "_fallback_ids").unwrap(), None);

        store.set(id(1), "_fallback_ids", "[2,3]").unwrap();
        assert_eq!(
            store.get(id(1), "_fallback_ids").unwrap().as_deref(),
            Some("[2,3]")
        );

        assert!(store.delete(id(1), "_fallback_ids").unwrap());
        assert!(!store.delete(id(1), "_fallback_ids").unwrap());
        assert_eq!(store.get(id(1), "_fallback_ids").unwrap(), None);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let store = store();
        store.set(id(1), "k", "old").unwrap();
        store.set(id(1), "k", "new").unwrap();
        assert_eq!(store.get(id(1), "k").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn keys_are_scoped_per_product() {
        let store = store();
        store.set(id(1), "k", "one").unwrap();
        store.set(id(2), "k", "two").unwrap();
        assert_eq!(store.get(id(1), "k").unwrap().as_deref(), Some("one"));
        assert_eq!(store.get(id(2), "k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn out_of_range_ids_read_as_absent_and_refuse_writes() {
        let store = store();
        let huge = id(u64::MAX);
        assert_eq!(store.get(huge, "k").unwrap(), None);
        assert!(matches!(store.set(huge, "k", "v"), Err(Error::Database(_))));
    }
}
