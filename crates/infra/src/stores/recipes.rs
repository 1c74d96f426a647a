use std::sync::RwLock;

use larder_core::{IngredientId, RecipeId};
use larder_recipes::{Recipe, RecipeIngredient};

use super::{InMemoryTable, StoreError};

/// Persistence collaborator for recipes and their ingredient lines.
pub trait RecipeStore: Send + Sync {
    fn insert_recipe(&self, recipe: Recipe) -> Result<(), StoreError>;
    fn recipe(&self, id: RecipeId) -> Result<Recipe, StoreError>;
    /// Recipes by name.
    fn recipes(&self) -> Result<Vec<Recipe>, StoreError>;
    fn save_recipe(&self, recipe: &Recipe) -> Result<(), StoreError>;
    /// Removes the recipe together with its ingredient lines.
    fn remove_recipe(&self, id: RecipeId) -> Result<(), StoreError>;

    /// Insert or replace the recipe's line for this ingredient.
    fn upsert_line(&self, line: RecipeIngredient) -> Result<(), StoreError>;
    fn lines_for_recipe(&self, recipe_id: RecipeId) -> Result<Vec<RecipeIngredient>, StoreError>;
    fn remove_line(
        &self,
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
    ) -> Result<(), StoreError>;
}

/// In-memory recipe store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryRecipeStore {
    recipes: InMemoryTable<Recipe>,
    lines: RwLock<Vec<RecipeIngredient>>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecipeStore for InMemoryRecipeStore {
    fn insert_recipe(&self, recipe: Recipe) -> Result<(), StoreError> {
        self.recipes.insert(recipe)
    }

    fn recipe(&self, id: RecipeId) -> Result<Recipe, StoreError> {
        self.recipes.get(&id)
    }

    fn recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        let mut all = self.recipes.list()?;
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    fn save_recipe(&self, recipe: &Recipe) -> Result<(), StoreError> {
        self.recipes.save(recipe)
    }

    fn remove_recipe(&self, id: RecipeId) -> Result<(), StoreError> {
        self.recipes.remove(&id)?;
        let mut lines = self.lines.write().map_err(|_| StoreError::Poisoned)?;
        lines.retain(|l| l.recipe_id != id);
        Ok(())
    }

    fn upsert_line(&self, line: RecipeIngredient) -> Result<(), StoreError> {
        self.recipes.get(&line.recipe_id)?;
        let mut lines = self.lines.write().map_err(|_| StoreError::Poisoned)?;
        match lines
            .iter_mut()
            .find(|l| l.recipe_id == line.recipe_id && l.ingredient_id == line.ingredient_id)
        {
            Some(slot) => *slot = line,
            None => lines.push(line),
        }
        Ok(())
    }

    fn lines_for_recipe(&self, recipe_id: RecipeId) -> Result<Vec<RecipeIngredient>, StoreError> {
        Ok(self
            .lines
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .iter()
            .filter(|l| l.recipe_id == recipe_id)
            .cloned()
            .collect())
    }

    fn remove_line(
        &self,
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
    ) -> Result<(), StoreError> {
        let mut lines = self.lines.write().map_err(|_| StoreError::Poisoned)?;
        let pos = lines
            .iter()
            .position(|l| l.recipe_id == recipe_id && l.ingredient_id == ingredient_id)
            .ok_or_else(|| StoreError::NotFound(format!("{recipe_id:?}/{ingredient_id:?}")))?;
        lines.remove(pos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str) -> Recipe {
        Recipe::new(RecipeId::new(), name, "", "", true, true).unwrap()
    }

    #[test]
    fn recipes_come_back_by_name() {
        let store = InMemoryRecipeStore::new();
        for name in ["Stew", "Pancakes", "Omelette"] {
            store.insert_recipe(recipe(name)).unwrap();
        }

        let names: Vec<_> = store
            .recipes()
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Omelette", "Pancakes", "Stew"]);
    }

    #[test]
    fn removing_a_recipe_removes_its_lines() {
        let store = InMemoryRecipeStore::new();
        let r = recipe("Pancakes");
        let keep = recipe("Stew");
        store.insert_recipe(r.clone()).unwrap();
        store.insert_recipe(keep.clone()).unwrap();

        let flour = IngredientId::new();
        store
            .upsert_line(RecipeIngredient::new(r.id, flour, 250.0).unwrap())
            .unwrap();
        store
            .upsert_line(RecipeIngredient::new(keep.id, flour, 100.0).unwrap())
            .unwrap();

        store.remove_recipe(r.id).unwrap();

        assert!(store.lines_for_recipe(r.id).unwrap().is_empty());
        assert_eq!(store.lines_for_recipe(keep.id).unwrap().len(), 1);
    }

    #[test]
    fn upsert_line_replaces_the_existing_amount() {
        let store = InMemoryRecipeStore::new();
        let r = recipe("Pancakes");
        store.insert_recipe(r.clone()).unwrap();
        let flour = IngredientId::new();

        store
            .upsert_line(RecipeIngredient::new(r.id, flour, 250.0).unwrap())
            .unwrap();
        store
            .upsert_line(RecipeIngredient::new(r.id, flour, 300.0).unwrap())
            .unwrap();

        let lines = store.lines_for_recipe(r.id).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].amount, 300.0);
    }

    #[test]
    fn line_requires_a_known_recipe() {
        let store = InMemoryRecipeStore::new();
        let orphan = RecipeIngredient::new(RecipeId::new(), IngredientId::new(), 1.0).unwrap();
        assert!(matches!(
            store.upsert_line(orphan),
            Err(StoreError::NotFound(_))
        ));
    }
}
