//! Recipes domain module.

pub mod recipe;

pub use recipe::{Recipe, RecipeIngredient, RecipePatch};
