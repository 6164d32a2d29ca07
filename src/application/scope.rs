//! Per-request state shared between hook invocations.

use std::cell::OnceCell;

use crate::domain::OutOfStockSet;
use crate::error::Result;

/// State that lives exactly as long as one incoming request.
///
/// Holds the out-of-stock snapshot so that several resolutions in the same
/// request query the catalog once. Not `Sync`: a request runs on one thread
/// and a scope must never be reused for the next request.
#[derive(Debug, Default)]
pub struct RequestScope {
    out_of_stock: OnceCell<OutOfStockSet>,
}

impl RequestScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope seeded with an already computed snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: OutOfStockSet) -> Self {
        Self {
            out_of_stock: OnceCell::from(snapshot),
        }
    }

    /// Return the snapshot, computing it with `load` on first use.
    ///
    /// A failed `load` leaves the scope empty so the next call retries.
    pub fn out_of_stock<F>(&self, load: F) -> Result<&OutOfStockSet>
    where
        F: FnOnce() -> Result<OutOfStockSet>,
    {
        if let Some(snapshot) = self.out_of_stock.get() {
            return Ok(snapshot);
        }
        let snapshot = load()?;
        Ok(self.out_of_stock.get_or_init(|| snapshot))
    }

    /// Whether the snapshot has been computed yet.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.out_of_stock.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testkit::domain::id;
    use std::cell::Cell;

    #[test]
    fn snapshot_is_loaded_once_per_scope() {
        let scope = RequestScope::new();
        let calls = Cell::new(0);
        let load = || -> Result<OutOfStockSet> {
            calls.set(calls.get() + 1);
            Ok([id(1), id(2)].into_iter().collect())
        };

        assert_eq!(scope.out_of_stock(load).unwrap().len(), 2);
        assert_eq!(scope.out_of_stock(load).unwrap().len(), 2);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn failed_load_is_retried() {
        let scope = RequestScope::new();
        let failed = scope.out_of_stock(|| Err(Error::Database("locked".into())));
        assert!(failed.is_err());
        assert!(!scope.is_loaded());

        let snapshot = scope.out_of_stock(|| Ok(OutOfStockSet::new())).unwrap();
        assert!(snapshot.is_empty());
        assert!(scope.is_loaded());
    }

    #[test]
    fn seeded_scope_never_calls_loader() {
        let scope = RequestScope::with_snapshot([id(7)].into_iter().collect());
        let snapshot = scope
            .out_of_stock(|| panic!("loader must not run"))
            .unwrap();
        assert!(snapshot.contains(id(7)));
    }
}
