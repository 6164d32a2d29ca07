//! Fallback list persistence on top of product metadata.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::{FallbackList, ProductId};
use crate::error::Result;
use crate::port::MetadataStore;

/// Metadata key holding a product's fallback list.
pub const META_KEY: &str = "_fallback_ids";

/// Reads and replaces the ordered fallback list of a product.
///
/// Lists are always written whole. An empty list is stored as an absent key.
#[derive(Clone)]
pub struct FallbackStore {
    metadata: Arc<dyn MetadataStore>,
}

impl FallbackStore {
    #[must_use]
    pub fn new(metadata: Arc<dyn MetadataStore>) -> Self {
        Self { metadata }
    }

    /// Return the stored list for `product`, empty when none is configured.
    ///
    /// Stored entries that are not clean integers are coerced or dropped.
    /// Text that is not JSON at all is read as a comma-delimited list.
    pub fn get_fallbacks(&self, product: ProductId) -> Result<FallbackList> {
        let Some(raw) = self.metadata.get(product, META_KEY)? else {
            return Ok(FallbackList::new());
        };

        let list = match serde_json::from_str::<Value>(&raw) {
            Ok(value) => FallbackList::from_stored(&value),
            Err(e) => {
                warn!(product_id = %product, error = %e, "Malformed fallback metadata, reading leniently");
                FallbackList::parse(&raw)
            }
        };
        debug!(product_id = %product, fallbacks = list.len(), "Loaded fallback list");
        Ok(list)
    }

    /// Parse admin form input and replace the stored list with it.
    ///
    /// Returns the list as stored.
    pub fn set_fallbacks(&self, product: ProductId, raw_input: &str) -> Result<FallbackList> {
        let list = FallbackList::parse(raw_input);
        self.replace_fallbacks(product, &list)?;
        Ok(list)
    }

    /// Replace the stored list with `list`.
    pub fn replace_fallbacks(&self, product: ProductId, list: &FallbackList) -> Result<()> {
        if list.is_empty() {
            self.metadata.delete(product, META_KEY)?;
        } else {
            let encoded = serde_json::to_string(&list.to_stored())?;
            self.metadata.set(product, META_KEY, &encoded)?;
        }
        info!(product_id = %product, fallbacks = list.len(), "Saved fallback list");
        Ok(())
    }

    /// Remove any configured fallbacks. Returns whether a list existed.
    pub fn clear_fallbacks(&self, product: ProductId) -> Result<bool> {
        self.metadata.delete(product, META_KEY)
    }
}
