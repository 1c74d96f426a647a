use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use larder_core::{DomainError, Entity, ProductId, StockItemId};

/// One persisted quantity of a product on hand, with its own expiration date.
///
/// The amount is mutated by the depletion process; an item whose amount has
/// reached zero stays a valid record until a cleanup pass removes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: StockItemId,
    pub product_id: ProductId,
    pub amount: f64,
    pub expiration_date: Option<NaiveDate>,
}

impl StockItem {
    pub fn new(
        id: StockItemId,
        product_id: ProductId,
        amount: f64,
        expiration_date: Option<NaiveDate>,
    ) -> Result<Self, DomainError> {
        validate_amount(amount)?;
        Ok(Self {
            id,
            product_id,
            amount,
            expiration_date,
        })
    }

    pub fn is_depleted(&self) -> bool {
        self.amount <= 0.0
    }
}

impl Entity for StockItem {
    type Id = StockItemId;

    fn id(&self) -> &StockItemId {
        &self.id
    }
}

/// Shared check for stock quantities: finite and non-negative.
pub fn validate_amount(amount: f64) -> Result<(), DomainError> {
    if !amount.is_finite() {
        return Err(DomainError::validation("amount must be a finite number"));
    }
    if amount < 0.0 {
        return Err(DomainError::validation("amount cannot be negative"));
    }
    Ok(())
}

/// Allow-listed update for a stock item. Only the fields enumerated here can
/// be changed through a patch; everything else is read-only after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockItemPatch {
    pub amount: Option<f64>,
    /// `Some(None)` clears the expiration date.
    pub expiration_date: Option<Option<NaiveDate>>,
}

impl StockItemPatch {
    pub fn apply(&self, item: &mut StockItem) -> Result<(), DomainError> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
            item.amount = amount;
        }
        if let Some(expiration_date) = self.expiration_date {
            item.expiration_date = expiration_date;
        }
        Ok(())
    }
}
