use larder_catalog::{Category, Ean, Ingredient, Product, listing_order};
use larder_core::{CategoryId, IngredientId, ProductId};

use super::{InMemoryTable, StoreError};

/// Persistence collaborator for the catalog: categories, ingredients,
/// products.
pub trait CatalogStore: Send + Sync {
    fn insert_category(&self, category: Category) -> Result<(), StoreError>;
    fn category(&self, id: CategoryId) -> Result<Category, StoreError>;
    /// Categories in listing order: manually positioned first, then by name.
    fn categories(&self) -> Result<Vec<Category>, StoreError>;
    fn save_category(&self, category: &Category) -> Result<(), StoreError>;
    /// Fails while any ingredient still belongs to the category.
    fn remove_category(&self, id: CategoryId) -> Result<(), StoreError>;

    fn insert_ingredient(&self, ingredient: Ingredient) -> Result<(), StoreError>;
    fn ingredient(&self, id: IngredientId) -> Result<Ingredient, StoreError>;
    /// Ingredients by name.
    fn ingredients(&self) -> Result<Vec<Ingredient>, StoreError>;
    fn save_ingredient(&self, ingredient: &Ingredient) -> Result<(), StoreError>;
    /// Fails while any product still renders the ingredient.
    fn remove_ingredient(&self, id: IngredientId) -> Result<(), StoreError>;

    fn insert_product(&self, product: Product) -> Result<(), StoreError>;
    fn product(&self, id: ProductId) -> Result<Product, StoreError>;
    fn products_for_ingredient(&self, ingredient_id: IngredientId)
    -> Result<Vec<Product>, StoreError>;
    /// Products carrying the given barcode (several package sizes can share
    /// an EAN in practice, so this is a list).
    fn products_by_ean(&self, ean: &Ean) -> Result<Vec<Product>, StoreError>;
    fn save_product(&self, product: &Product) -> Result<(), StoreError>;
    fn remove_product(&self, id: ProductId) -> Result<(), StoreError>;
}

/// In-memory catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    categories: InMemoryTable<Category>,
    ingredients: InMemoryTable<Ingredient>,
    products: InMemoryTable<Product>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn insert_category(&self, category: Category) -> Result<(), StoreError> {
        self.categories.insert(category)
    }

    fn category(&self, id: CategoryId) -> Result<Category, StoreError> {
        self.categories.get(&id)
    }

    fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut all = self.categories.list()?;
        all.sort_by(listing_order);
        Ok(all)
    }

    fn save_category(&self, category: &Category) -> Result<(), StoreError> {
        self.categories.save(category)
    }

    fn remove_category(&self, id: CategoryId) -> Result<(), StoreError> {
        let in_use = !self.ingredients.filter(|i| i.category_id == id)?.is_empty();
        if in_use {
            return Err(StoreError::StillReferenced(format!("{id:?}")));
        }
        self.categories.remove(&id).map(|_| ())
    }

    fn insert_ingredient(&self, ingredient: Ingredient) -> Result<(), StoreError> {
        self.categories.get(&ingredient.category_id)?;
        self.ingredients.insert(ingredient)
    }

    fn ingredient(&self, id: IngredientId) -> Result<Ingredient, StoreError> {
        self.ingredients.get(&id)
    }

    fn ingredients(&self) -> Result<Vec<Ingredient>, StoreError> {
        let mut all = self.ingredients.list()?;
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    fn save_ingredient(&self, ingredient: &Ingredient) -> Result<(), StoreError> {
        self.ingredients.save(ingredient)
    }

    fn remove_ingredient(&self, id: IngredientId) -> Result<(), StoreError> {
        let in_use = !self.products.filter(|p| p.ingredient_id == id)?.is_empty();
        if in_use {
            return Err(StoreError::StillReferenced(format!("{id:?}")));
        }
        self.ingredients.remove(&id).map(|_| ())
    }

    fn insert_product(&self, product: Product) -> Result<(), StoreError> {
        self.ingredients.get(&product.ingredient_id)?;
        self.products.insert(product)
    }

    fn product(&self, id: ProductId) -> Result<Product, StoreError> {
        self.products.get(&id)
    }

    fn products_for_ingredient(
        &self,
        ingredient_id: IngredientId,
    ) -> Result<Vec<Product>, StoreError> {
        self.products.filter(|p| p.ingredient_id == ingredient_id)
    }

    fn products_by_ean(&self, ean: &Ean) -> Result<Vec<Product>, StoreError> {
        self.products.filter(|p| p.ean.as_ref() == Some(ean))
    }

    fn save_product(&self, product: &Product) -> Result<(), StoreError> {
        self.products.save(product)
    }

    fn remove_product(&self, id: ProductId) -> Result<(), StoreError> {
        self.products.remove(&id).map(|_| ())
    }
}
