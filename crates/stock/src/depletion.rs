//! Depletion planning: consume stock items for a product until a requested
//! amount is satisfied or stock runs out.
//!
//! Planning is pure. The plan lists the audit trail and the new per-item
//! amounts; persisting those amounts is the caller's job.

use serde::{Deserialize, Serialize};

use larder_core::{ConsumptionId, DomainError, ProductId, StockItemId, ValueObject};

use crate::item::StockItem;

/// One queued request to deduct stock for a product, raised when a recipe's
/// product is cooked. Transient; dropped once a depletion run has consumed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingConsumption {
    pub id: ConsumptionId,
    pub product_id: ProductId,
    pub requested_amount: f64,
}

impl PendingConsumption {
    pub fn new(
        id: ConsumptionId,
        product_id: ProductId,
        requested_amount: f64,
    ) -> Result<Self, DomainError> {
        if !requested_amount.is_finite() || requested_amount < 0.0 {
            return Err(DomainError::validation(
                "requested amount must be a non-negative number",
            ));
        }
        Ok(Self {
            id,
            product_id,
            requested_amount,
        })
    }
}

impl larder_core::Entity for PendingConsumption {
    type Id = ConsumptionId;

    fn id(&self) -> &ConsumptionId {
        &self.id
    }
}

/// Order in which a product's stock items are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepletionOrder {
    /// Consume items exactly as the store returned them (its natural
    /// insertion/retrieval order).
    Storage,
    /// Consume soonest-expiring items first; undated items last. Ties keep
    /// their storage order.
    ExpiresFirst,
}

/// How one stock item was touched while clearing a single consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    #[serde(rename = "id")]
    pub stock_item_id: StockItemId,
    pub amount_before: f64,
    pub amount_cleared: f64,
    /// What was still left to clear after this item was consumed.
    pub amount_remaining: f64,
}

impl ValueObject for AuditEntry {}

/// New amount for one stock item, to be persisted by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockItemUpdate {
    pub stock_item_id: StockItemId,
    pub new_amount: f64,
}

/// Outcome of planning one product's depletion. Nothing is persisted yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DepletionPlan {
    pub audit: Vec<AuditEntry>,
    pub updates: Vec<StockItemUpdate>,
    /// Remainder the stock could not cover. Zero when fully satisfied;
    /// insufficient stock under-clears silently rather than erroring.
    pub amount_unmet: f64,
}

/// Walk the product's stock items in the chosen order, clearing
/// `min(item.amount, remaining)` from each until the request is satisfied.
///
/// Every visited item produces an audit entry and an update, including an
/// already-empty item visited on the way (a zero-cleared, no-op update).
/// Items after the one that satisfied the request are not visited at all.
pub fn plan_depletion(
    items: &[StockItem],
    requested_amount: f64,
    order: DepletionOrder,
) -> Result<DepletionPlan, DomainError> {
    if !requested_amount.is_finite() {
        return Err(DomainError::validation(
            "requested amount must be a finite number",
        ));
    }
    if requested_amount < 0.0 {
        return Err(DomainError::validation(
            "requested amount cannot be negative",
        ));
    }

    let mut plan = DepletionPlan::default();
    if requested_amount == 0.0 {
        return Ok(plan);
    }

    let mut ordered: Vec<&StockItem> = items.iter().collect();
    if order == DepletionOrder::ExpiresFirst {
        // Stable sort: equal dates and the undated tail keep storage order.
        ordered.sort_by_key(|it| (it.expiration_date.is_none(), it.expiration_date));
    }

    let mut remaining = requested_amount;
    for item in ordered {
        let cleared_now = item.amount.min(remaining);
        remaining -= cleared_now;

        plan.audit.push(AuditEntry {
            stock_item_id: item.id,
            amount_before: item.amount,
            amount_cleared: cleared_now,
            amount_remaining: remaining,
        });
        plan.updates.push(StockItemUpdate {
            stock_item_id: item.id,
            new_amount: item.amount - cleared_now,
        });

        if remaining <= 0.0 {
            break;
        }
    }

    plan.amount_unmet = remaining;
    Ok(plan)
}
