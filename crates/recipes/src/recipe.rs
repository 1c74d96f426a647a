use serde::{Deserialize, Serialize};

use larder_core::{DomainError, Entity, IngredientId, RecipeId};

/// A dish the household cooks, with free-form instructions and flags for
/// which meal plans it appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub subtitle: String,
    pub instructions: String,
    pub for_dinner: bool,
    pub for_supper: bool,
}

impl Recipe {
    pub fn new(
        id: RecipeId,
        name: impl Into<String>,
        subtitle: impl Into<String>,
        instructions: impl Into<String>,
        for_dinner: bool,
        for_supper: bool,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            subtitle: subtitle.into(),
            instructions: instructions.into(),
            for_dinner,
            for_supper,
        })
    }
}

impl Entity for Recipe {
    type Id = RecipeId;

    fn id(&self) -> &RecipeId {
        &self.id
    }
}

/// Ingredient line of a recipe: how much of an ingredient one cooking takes.
/// Keyed by the (recipe, ingredient) pair; a recipe lists an ingredient once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub recipe_id: RecipeId,
    pub ingredient_id: IngredientId,
    pub amount: f64,
}

impl RecipeIngredient {
    pub fn new(
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
        amount: f64,
    ) -> Result<Self, DomainError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::validation(
                "amount must be a non-negative number",
            ));
        }
        Ok(Self {
            recipe_id,
            ingredient_id,
            amount,
        })
    }
}

/// Allow-listed update for a recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub subtitle: Option<String>,
    pub instructions: Option<String>,
    pub for_dinner: Option<bool>,
    pub for_supper: Option<bool>,
}

impl RecipePatch {
    pub fn apply(&self, recipe: &mut Recipe) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
            recipe.name = name.clone();
        }
        if let Some(subtitle) = &self.subtitle {
            recipe.subtitle = subtitle.clone();
        }
        if let Some(instructions) = &self.instructions {
            recipe.instructions = instructions.clone();
        }
        if let Some(for_dinner) = self.for_dinner {
            recipe.for_dinner = for_dinner;
        }
        if let Some(for_supper) = self.for_supper {
            recipe.for_supper = for_supper;
        }
        Ok(())
    }
}
