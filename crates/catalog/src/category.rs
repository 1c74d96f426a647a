use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

use larder_core::{CategoryId, DomainError, Entity};

/// Grouping of ingredients ("dairy", "spices"), with an icon symbol and an
/// optional manual position in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub symbol: String,
    pub ordering: Option<i32>,
}

impl Category {
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        symbol: impl Into<String>,
        ordering: Option<i32>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            symbol: symbol.into(),
            ordering,
        })
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &CategoryId {
        &self.id
    }
}

/// Listing order: manually positioned categories first, by position, then the
/// rest alphabetically.
pub fn listing_order(a: &Category, b: &Category) -> Ordering {
    match (a.ordering, b.ordering) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    }
}

/// Allow-listed update for a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub symbol: Option<String>,
    /// `Some(None)` removes the manual position.
    pub ordering: Option<Option<i32>>,
}

impl CategoryPatch {
    pub fn apply(&self, category: &mut Category) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
            category.name = name.clone();
        }
        if let Some(symbol) = &self.symbol {
            category.symbol = symbol.clone();
        }
        if let Some(ordering) = self.ordering {
            category.ordering = ordering;
        }
        Ok(())
    }
}
