//! The stock depletion processor: clears pending consumptions against the
//! stock store and reports what happened.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use larder_core::{ConsumptionId, DomainError, ProductId};
use larder_stock::{AuditEntry, DepletionOrder, PendingConsumption, plan_depletion};

use crate::stores::{StockStore, StoreError};

#[derive(Debug, Error)]
pub enum DepletionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Everything that happened to one consumption's product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDepletion {
    pub product_id: ProductId,
    pub cleared_stock_items: Vec<AuditEntry>,
    pub amount_unmet: f64,
}

/// Per-consumption report of a depletion run, keyed by consumption id.
/// Serializes straight to the caller-facing JSON payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DepletionReport {
    #[serde(flatten)]
    pub consumptions: HashMap<ConsumptionId, ProductDepletion>,
}

/// Consumes stock for pending "cook this" requests.
///
/// Single-threaded and synchronous; one store commit per product, no retries.
pub struct StockDepletionProcessor<S> {
    store: S,
    order: DepletionOrder,
}

impl<S> StockDepletionProcessor<S>
where
    S: StockStore,
{
    /// Processor consuming in the store's natural retrieval order.
    pub fn new(store: S) -> Self {
        Self::with_order(store, DepletionOrder::Storage)
    }

    pub fn with_order(store: S, order: DepletionOrder) -> Self {
        Self { store, order }
    }

    /// Consume stock of one product until `requested_amount` is satisfied or
    /// stock runs out. The product's amount changes are committed together;
    /// a failed commit leaves the product untouched. Insufficient stock is
    /// not an error: the shortfall comes back as `amount_unmet`.
    pub fn clear_product(
        &self,
        product_id: ProductId,
        requested_amount: f64,
    ) -> Result<ProductDepletion, DepletionError> {
        let items = self.store.list_for_product(product_id)?;
        let plan = plan_depletion(&items, requested_amount, self.order)?;
        self.store.apply_updates(&plan.updates)?;

        if plan.amount_unmet > 0.0 {
            tracing::warn!(
                %product_id,
                amount_unmet = plan.amount_unmet,
                "stock could not cover the requested amount"
            );
        }
        tracing::debug!(%product_id, items_touched = plan.audit.len(), "cleared product stock");

        Ok(ProductDepletion {
            product_id,
            cleared_stock_items: plan.audit,
            amount_unmet: plan.amount_unmet,
        })
    }

    /// Clear every pending consumption independently, one product commit at
    /// a time. There is no cross-product transaction: an error aborts the
    /// run, earlier products stay committed, later ones stay untouched.
    pub fn clear_all(
        &self,
        pending: Vec<PendingConsumption>,
    ) -> Result<DepletionReport, DepletionError> {
        let mut report = DepletionReport::default();
        for entry in pending {
            let cleared = self.clear_product(entry.product_id, entry.requested_amount)?;
            report.consumptions.insert(entry.id, cleared);
        }
        Ok(report)
    }
}
