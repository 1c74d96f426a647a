use serde::{Deserialize, Serialize};

use larder_core::{CategoryId, DomainError, Entity, IngredientId};

/// A kitchen ingredient ("milk", "flour"), the unit it is measured in, and
/// the level below which stock counts as running low.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub category_id: CategoryId,
    pub name: String,
    pub unit: String,
    pub minimal_amount: f64,
    /// Freezable ingredients are shelved in the freezer section of the
    /// stock overview; the rest go to the cupboard.
    pub freezable: bool,
}

impl Ingredient {
    pub fn new(
        id: IngredientId,
        category_id: CategoryId,
        name: impl Into<String>,
        unit: impl Into<String>,
        minimal_amount: f64,
        freezable: bool,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let unit = unit.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if unit.trim().is_empty() {
            return Err(DomainError::validation("unit cannot be empty"));
        }
        if !minimal_amount.is_finite() || minimal_amount < 0.0 {
            return Err(DomainError::validation(
                "minimal amount must be a non-negative number",
            ));
        }
        Ok(Self {
            id,
            category_id,
            name,
            unit,
            minimal_amount,
            freezable,
        })
    }
}

impl Entity for Ingredient {
    type Id = IngredientId;

    fn id(&self) -> &IngredientId {
        &self.id
    }
}

/// Allow-listed update for an ingredient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientPatch {
    pub category_id: Option<CategoryId>,
    pub name: Option<String>,
    pub unit: Option<String>,
    pub minimal_amount: Option<f64>,
    pub freezable: Option<bool>,
}

impl IngredientPatch {
    pub fn apply(&self, ingredient: &mut Ingredient) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
        }
        if let Some(unit) = &self.unit {
            if unit.trim().is_empty() {
                return Err(DomainError::validation("unit cannot be empty"));
            }
        }
        if let Some(minimal_amount) = self.minimal_amount {
            if !minimal_amount.is_finite() || minimal_amount < 0.0 {
                return Err(DomainError::validation(
                    "minimal amount must be a non-negative number",
                ));
            }
        }

        if let Some(category_id) = self.category_id {
            ingredient.category_id = category_id;
        }
        if let Some(name) = &self.name {
            ingredient.name = name.clone();
        }
        if let Some(unit) = &self.unit {
            ingredient.unit = unit.clone();
        }
        if let Some(minimal_amount) = self.minimal_amount {
            ingredient.minimal_amount = minimal_amount;
        }
        if let Some(freezable) = self.freezable {
            ingredient.freezable = freezable;
        }
        Ok(())
    }
}
