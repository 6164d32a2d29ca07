//! Request-scoped snapshot of every out-of-stock product.

use std::collections::HashSet;

use super::id::ProductId;

/// All product ids flagged out of stock at the moment the snapshot was taken.
///
/// Built by one bulk catalog query and thrown away at the end of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutOfStockSet {
    ids: HashSet<ProductId>,
}

impl OutOfStockSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in ascending order, for stable display.
    #[must_use]
    pub fn sorted(&self) -> Vec<ProductId> {
        let mut ids: Vec<_> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl FromIterator<ProductId> for OutOfStockSet {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
