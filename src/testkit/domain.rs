//! Builders for domain primitives used across tests.

use rust_decimal::Decimal;

use crate::domain::{Product, ProductId, StockStatus};

/// Create a [`ProductId`]. Panics on zero.
pub fn id(value: u64) -> ProductId {
    ProductId::try_new(value).expect("test product ids are non-zero")
}

/// Create a product named `Product {id}` with slug `product-{id}`.
pub fn product(value: u64, stock_status: StockStatus) -> Product {
    Product::try_new(
        id(value),
        format!("Product {value}"),
        format!("product-{value}"),
        Decimal::new(1000 + value as i64, 2),
        stock_status,
    )
    .expect("valid test product")
    .with_description(format!("Description of product {value}"))
}
