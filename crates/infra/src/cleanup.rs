//! Downstream cleanup run once after a depletion pass.

use crate::stores::{StockStore, StoreError};

/// Hook invoked by the cooking workflow after all consumptions cleared.
/// Returns how many records it pruned.
pub trait PostDepletionCleanup: Send + Sync {
    fn run(&self) -> Result<usize, StoreError>;
}

/// Deletes stock items whose amount reached zero.
///
/// Depletion itself never deletes; this sweep is the separate pass that
/// prunes the leftovers, mirroring a stock cleanup job.
pub struct DepletedStockSweep<S> {
    store: S,
}

impl<S> DepletedStockSweep<S>
where
    S: StockStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> PostDepletionCleanup for DepletedStockSweep<S>
where
    S: StockStore,
{
    fn run(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for item in self.store.list()? {
            if item.is_depleted() {
                self.store.remove(item.id)?;
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::info!(removed, "pruned depleted stock items");
        }
        Ok(removed)
    }
}

/// No-op hook for callers that keep empty records around.
pub struct NoCleanup;

impl PostDepletionCleanup for NoCleanup {
    fn run(&self) -> Result<usize, StoreError> {
        Ok(0)
    }
}
