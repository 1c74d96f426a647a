//! Application services over the stores: the CRUD surface minus transport.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use larder_catalog::{
    Category, CategoryPatch, Ean, Ingredient, IngredientPatch, Product, ProductPatch,
};
use larder_core::{
    CategoryId, DomainError, IngredientId, ProductId, RecipeId, StockItemId,
};
use larder_recipes::{Recipe, RecipeIngredient, RecipePatch};
use larder_stock::{StockItem, StockItemPatch};

use crate::stores::{CatalogStore, RecipeStore, StockStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Catalog maintenance: categories, ingredients, products.
pub struct CatalogService<C> {
    catalog: Arc<C>,
}

impl<C> CatalogService<C>
where
    C: CatalogStore,
{
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    pub fn create_category(
        &self,
        name: &str,
        symbol: &str,
        ordering: Option<i32>,
    ) -> Result<Category, ServiceError> {
        let category = Category::new(CategoryId::new(), name, symbol, ordering)?;
        self.catalog.insert_category(category.clone())?;
        Ok(category)
    }

    pub fn patch_category(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> Result<Category, ServiceError> {
        let mut category = self.catalog.category(id)?;
        patch.apply(&mut category)?;
        self.catalog.save_category(&category)?;
        Ok(category)
    }

    pub fn delete_category(&self, id: CategoryId) -> Result<(), ServiceError> {
        Ok(self.catalog.remove_category(id)?)
    }

    pub fn create_ingredient(
        &self,
        category_id: CategoryId,
        name: &str,
        unit: &str,
        minimal_amount: f64,
        freezable: bool,
    ) -> Result<Ingredient, ServiceError> {
        let ingredient = Ingredient::new(
            IngredientId::new(),
            category_id,
            name,
            unit,
            minimal_amount,
            freezable,
        )?;
        self.catalog.insert_ingredient(ingredient.clone())?;
        Ok(ingredient)
    }

    pub fn patch_ingredient(
        &self,
        id: IngredientId,
        patch: &IngredientPatch,
    ) -> Result<Ingredient, ServiceError> {
        let mut ingredient = self.catalog.ingredient(id)?;
        patch.apply(&mut ingredient)?;
        self.catalog.save_ingredient(&ingredient)?;
        Ok(ingredient)
    }

    pub fn delete_ingredient(&self, id: IngredientId) -> Result<(), ServiceError> {
        Ok(self.catalog.remove_ingredient(id)?)
    }

    pub fn create_product(
        &self,
        ingredient_id: IngredientId,
        ean: Option<&str>,
        name: &str,
        package_amount: f64,
        dash: bool,
        est_expiration_days: Option<u32>,
    ) -> Result<Product, ServiceError> {
        let ean = ean.map(Ean::new).transpose()?;
        let product = Product::new(
            ProductId::new(),
            ingredient_id,
            ean,
            name,
            package_amount,
            dash,
            est_expiration_days,
        )?;
        self.catalog.insert_product(product.clone())?;
        Ok(product)
    }

    pub fn patch_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, ServiceError> {
        let mut product = self.catalog.product(id)?;
        patch.apply(&mut product)?;
        self.catalog.save_product(&product)?;
        Ok(product)
    }

    pub fn delete_product(&self, id: ProductId) -> Result<(), ServiceError> {
        Ok(self.catalog.remove_product(id)?)
    }

    /// Scanner lookup: products carrying the scanned barcode.
    pub fn find_products_by_ean(&self, code: &str) -> Result<Vec<Product>, ServiceError> {
        let ean = Ean::new(code)?;
        Ok(self.catalog.products_by_ean(&ean)?)
    }

    /// Manual lookup: an ingredient's products, for scanner-less intake.
    pub fn products_for_ingredient(
        &self,
        ingredient_id: IngredientId,
    ) -> Result<Vec<Product>, ServiceError> {
        Ok(self.catalog.products_for_ingredient(ingredient_id)?)
    }
}

/// Stock position of one ingredient, summed over its products' items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientOverview {
    pub ingredient_id: IngredientId,
    pub name: String,
    pub unit: String,
    pub freezable: bool,
    pub total_amount: f64,
    pub soonest_expiration: Option<NaiveDate>,
    pub below_minimal: bool,
}

/// Stock intake and maintenance.
pub struct StockService<C, S> {
    catalog: Arc<C>,
    stock: Arc<S>,
}

impl<C, S> StockService<C, S>
where
    C: CatalogStore,
    S: StockStore,
{
    pub fn new(catalog: Arc<C>, stock: Arc<S>) -> Self {
        Self { catalog, stock }
    }

    /// Take a scanned or hand-picked product into stock. Without an explicit
    /// expiration date, the product's shelf-life estimate (counted from
    /// `today`) fills it in.
    pub fn add_to_stock(
        &self,
        product_id: ProductId,
        amount: f64,
        expiration_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<StockItem, ServiceError> {
        let product = self.catalog.product(product_id)?;
        let expiration = expiration_date.or_else(|| product.estimated_expiration(today));
        let item = StockItem::new(StockItemId::new(), product_id, amount, expiration)?;
        self.stock.insert(item.clone())?;

        tracing::debug!(%product_id, amount, "stock item added");
        Ok(item)
    }

    pub fn patch_item(
        &self,
        id: StockItemId,
        patch: &StockItemPatch,
    ) -> Result<StockItem, ServiceError> {
        let mut item = self.stock.get(id)?;
        patch.apply(&mut item)?;
        self.stock.save(&item)?;
        Ok(item)
    }

    pub fn items_for_ingredient(
        &self,
        ingredient_id: IngredientId,
    ) -> Result<Vec<StockItem>, ServiceError> {
        let mut items = Vec::new();
        for product in self.catalog.products_for_ingredient(ingredient_id)? {
            items.extend(self.stock.list_for_product(product.id)?);
        }
        Ok(items)
    }

    /// Per-ingredient stock summary, one row per catalog ingredient (in name
    /// order): total on hand, the soonest expiration among its items, and
    /// whether the total fell below the ingredient's minimal amount.
    pub fn overview(&self) -> Result<Vec<IngredientOverview>, ServiceError> {
        let mut rows = Vec::new();
        for ingredient in self.catalog.ingredients()? {
            let items = self.items_for_ingredient(ingredient.id)?;

            let total_amount: f64 = items.iter().map(|it| it.amount).sum();
            let soonest_expiration = items
                .iter()
                .filter_map(|it| it.expiration_date)
                .min();

            rows.push(IngredientOverview {
                ingredient_id: ingredient.id,
                name: ingredient.name,
                unit: ingredient.unit,
                freezable: ingredient.freezable,
                total_amount,
                soonest_expiration,
                below_minimal: total_amount < ingredient.minimal_amount,
            });
        }
        Ok(rows)
    }
}

/// Recipe maintenance.
pub struct RecipeService<R> {
    recipes: Arc<R>,
}

impl<R> RecipeService<R>
where
    R: RecipeStore,
{
    pub fn new(recipes: Arc<R>) -> Self {
        Self { recipes }
    }

    pub fn create_recipe(
        &self,
        name: &str,
        subtitle: &str,
        instructions: &str,
        for_dinner: bool,
        for_supper: bool,
    ) -> Result<Recipe, ServiceError> {
        let recipe = Recipe::new(
            RecipeId::new(),
            name,
            subtitle,
            instructions,
            for_dinner,
            for_supper,
        )?;
        self.recipes.insert_recipe(recipe.clone())?;
        Ok(recipe)
    }

    pub fn patch_recipe(&self, id: RecipeId, patch: &RecipePatch) -> Result<Recipe, ServiceError> {
        let mut recipe = self.recipes.recipe(id)?;
        patch.apply(&mut recipe)?;
        self.recipes.save_recipe(&recipe)?;
        Ok(recipe)
    }

    /// Deletes the recipe and its ingredient lines.
    pub fn delete_recipe(&self, id: RecipeId) -> Result<(), ServiceError> {
        Ok(self.recipes.remove_recipe(id)?)
    }

    pub fn set_line(
        &self,
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
        amount: f64,
    ) -> Result<(), ServiceError> {
        let line = RecipeIngredient::new(recipe_id, ingredient_id, amount)?;
        Ok(self.recipes.upsert_line(line)?)
    }
}
