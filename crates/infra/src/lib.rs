//! Infrastructure layer: stores, the depletion processor, and the cooking
//! workflow over them.

pub mod cleanup;
pub mod cooking;
pub mod depletion;
pub mod services;
pub mod stores;
pub mod telemetry;

pub use cleanup::{DepletedStockSweep, NoCleanup, PostDepletionCleanup};
pub use cooking::CookingWorkflow;
pub use depletion::{DepletionError, DepletionReport, ProductDepletion, StockDepletionProcessor};
pub use services::{
    CatalogService, IngredientOverview, RecipeService, ServiceError, StockService,
};
pub use stores::{
    CatalogStore, ConsumptionQueue, InMemoryCatalogStore, InMemoryConsumptionQueue,
    InMemoryRecipeStore, InMemoryStockStore, InMemoryTable, RecipeStore, StockStore, StoreError,
};
