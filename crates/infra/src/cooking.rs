//! The "cook today's plan" workflow: drain the pending-consumption queue,
//! clear stock for each entry, then hand over to the cleanup collaborator.

use crate::cleanup::PostDepletionCleanup;
use crate::depletion::{DepletionError, DepletionReport, StockDepletionProcessor};
use crate::stores::{ConsumptionQueue, StockStore};

pub struct CookingWorkflow<S, Q, C> {
    processor: StockDepletionProcessor<S>,
    queue: Q,
    cleanup: C,
}

impl<S, Q, C> CookingWorkflow<S, Q, C>
where
    S: StockStore,
    Q: ConsumptionQueue,
    C: PostDepletionCleanup,
{
    pub fn new(processor: StockDepletionProcessor<S>, queue: Q, cleanup: C) -> Self {
        Self {
            processor,
            queue,
            cleanup,
        }
    }

    /// Clear everything currently queued and report per consumption.
    ///
    /// The queue is discarded only after every consumption cleared, so a
    /// failed run keeps its entries for a retry by the operator. The cleanup
    /// collaborator runs once, after the queue is gone.
    pub fn clear_pending(&self) -> Result<DepletionReport, DepletionError> {
        let pending = self.queue.list()?;
        tracing::info!(pending = pending.len(), "clearing pending consumptions");

        let report = self.processor.clear_all(pending)?;

        self.queue.delete_all()?;
        self.cleanup.run()?;

        Ok(report)
    }
}
