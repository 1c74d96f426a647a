//! Store traits and their in-memory implementations.
//!
//! The traits are the persistence collaborators of the domain; the in-memory
//! stores back them for tests and development. Retrieval order everywhere is
//! the insertion order unless a method documents otherwise.

pub mod catalog;
pub mod queue;
pub mod recipes;
pub mod stock;
pub mod table;

pub use catalog::{CatalogStore, InMemoryCatalogStore};
pub use queue::{ConsumptionQueue, InMemoryConsumptionQueue};
pub use recipes::{InMemoryRecipeStore, RecipeStore};
pub use stock::{InMemoryStockStore, StockStore};
pub use table::InMemoryTable;

use thiserror::Error;

/// Persistence-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("duplicate record: {0}")]
    Duplicate(String),

    #[error("record still referenced: {0}")]
    StillReferenced(String),

    #[error("store lock poisoned")]
    Poisoned,
}
