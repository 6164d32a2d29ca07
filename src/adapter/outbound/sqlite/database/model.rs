//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{product_meta, products};

/// Database row for a product.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub price: String,
    pub short_description: String,
    pub product_type: String,
}

/// Database row for one product metadata entry.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = product_meta)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MetaRow {
    pub product_id: i64,
    pub meta_key: String,
    pub meta_value: String,
}
