use std::sync::Arc;

use larder_core::ConsumptionId;
use larder_stock::PendingConsumption;

use super::{InMemoryTable, StoreError};

/// The pending-consumption queue: what the household has decided to cook but
/// has not yet cleared from stock.
pub trait ConsumptionQueue: Send + Sync {
    fn push(&self, entry: PendingConsumption) -> Result<(), StoreError>;

    fn get(&self, id: ConsumptionId) -> Result<PendingConsumption, StoreError>;

    /// Queued entries in arrival order.
    fn list(&self) -> Result<Vec<PendingConsumption>, StoreError>;

    fn remove(&self, id: ConsumptionId) -> Result<(), StoreError>;

    /// Discard the whole queue (after a depletion run has consumed it).
    fn delete_all(&self) -> Result<(), StoreError>;
}

impl<Q> ConsumptionQueue for Arc<Q>
where
    Q: ConsumptionQueue + ?Sized,
{
    fn push(&self, entry: PendingConsumption) -> Result<(), StoreError> {
        (**self).push(entry)
    }

    fn get(&self, id: ConsumptionId) -> Result<PendingConsumption, StoreError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<PendingConsumption>, StoreError> {
        (**self).list()
    }

    fn remove(&self, id: ConsumptionId) -> Result<(), StoreError> {
        (**self).remove(id)
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        (**self).delete_all()
    }
}

/// In-memory queue for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryConsumptionQueue {
    entries: InMemoryTable<PendingConsumption>,
}

impl InMemoryConsumptionQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConsumptionQueue for InMemoryConsumptionQueue {
    fn push(&self, entry: PendingConsumption) -> Result<(), StoreError> {
        self.entries.insert(entry)
    }

    fn get(&self, id: ConsumptionId) -> Result<PendingConsumption, StoreError> {
        self.entries.get(&id)
    }

    fn list(&self) -> Result<Vec<PendingConsumption>, StoreError> {
        self.entries.list()
    }

    fn remove(&self, id: ConsumptionId) -> Result<(), StoreError> {
        self.entries.remove(&id).map(|_| ())
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        self.entries.with_rows_mut(|rows| rows.clear())
    }
}
