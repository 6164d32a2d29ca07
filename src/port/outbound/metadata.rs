//! Per-product metadata storage port.

use crate::domain::id::ProductId;
use crate::error::Result;

/// Generic key/value metadata scoped to a product.
///
/// Values are opaque strings; callers pick their own encoding.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`). No locking is done
/// by callers; consistency is whatever the backing store guarantees.
pub trait MetadataStore: Send + Sync {
    /// Read the value stored under `key` for `product`.
    fn get(&self, product: ProductId, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, product: ProductId, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Returns whether anything was deleted.
    fn delete(&self, product: ProductId, key: &str) -> Result<bool>;
}
