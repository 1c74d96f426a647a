use std::sync::Arc;

use larder_core::{ProductId, StockItemId};
use larder_stock::{StockItem, StockItemUpdate};

use super::{InMemoryTable, StoreError};

/// Persistence collaborator for stock items.
pub trait StockStore: Send + Sync {
    fn get(&self, id: StockItemId) -> Result<StockItem, StoreError>;

    fn list(&self) -> Result<Vec<StockItem>, StoreError>;

    /// Items of one product, in the store's natural retrieval order.
    /// No sorting is applied here; consumption order is the processor's
    /// policy, not the store's.
    fn list_for_product(&self, product_id: ProductId) -> Result<Vec<StockItem>, StoreError>;

    fn insert(&self, item: StockItem) -> Result<(), StoreError>;

    /// Persist a mutated item; fails when it no longer exists.
    fn save(&self, item: &StockItem) -> Result<(), StoreError>;

    /// Commit a depletion's new amounts, all or nothing: when any referenced
    /// item is missing, no amount changes.
    fn apply_updates(&self, updates: &[StockItemUpdate]) -> Result<(), StoreError>;

    fn remove(&self, id: StockItemId) -> Result<(), StoreError>;
}

impl<S> StockStore for Arc<S>
where
    S: StockStore + ?Sized,
{
    fn get(&self, id: StockItemId) -> Result<StockItem, StoreError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<StockItem>, StoreError> {
        (**self).list()
    }

    fn list_for_product(&self, product_id: ProductId) -> Result<Vec<StockItem>, StoreError> {
        (**self).list_for_product(product_id)
    }

    fn insert(&self, item: StockItem) -> Result<(), StoreError> {
        (**self).insert(item)
    }

    fn save(&self, item: &StockItem) -> Result<(), StoreError> {
        (**self).save(item)
    }

    fn apply_updates(&self, updates: &[StockItemUpdate]) -> Result<(), StoreError> {
        (**self).apply_updates(updates)
    }

    fn remove(&self, id: StockItemId) -> Result<(), StoreError> {
        (**self).remove(id)
    }
}

/// In-memory stock store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryStockStore {
    items: InMemoryTable<StockItem>,
}

impl InMemoryStockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StockStore for InMemoryStockStore {
    fn get(&self, id: StockItemId) -> Result<StockItem, StoreError> {
        self.items.get(&id)
    }

    fn list(&self) -> Result<Vec<StockItem>, StoreError> {
        self.items.list()
    }

    fn list_for_product(&self, product_id: ProductId) -> Result<Vec<StockItem>, StoreError> {
        self.items.filter(|it| it.product_id == product_id)
    }

    fn insert(&self, item: StockItem) -> Result<(), StoreError> {
        self.items.insert(item)
    }

    fn save(&self, item: &StockItem) -> Result<(), StoreError> {
        self.items.save(item)
    }

    fn apply_updates(&self, updates: &[StockItemUpdate]) -> Result<(), StoreError> {
        self.items.with_rows_mut(|rows| {
            for update in updates {
                if !rows.iter().any(|r| r.id == update.stock_item_id) {
                    return Err(StoreError::NotFound(format!("{:?}", update.stock_item_id)));
                }
            }
            for update in updates {
                if let Some(row) = rows.iter_mut().find(|r| r.id == update.stock_item_id) {
                    row.amount = update.new_amount;
                }
            }
            Ok(())
        })?
    }

    fn remove(&self, id: StockItemId) -> Result<(), StoreError> {
        self.items.remove(&id).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: ProductId, amount: f64) -> StockItem {
        StockItem::new(StockItemId::new(), product_id, amount, None).unwrap()
    }

    #[test]
    fn list_for_product_keeps_insertion_order_and_filters() {
        let store = InMemoryStockStore::new();
        let product = ProductId::new();
        let other = ProductId::new();

        let first = item(product, 1.0);
        let unrelated = item(other, 9.0);
        let second = item(product, 2.0);
        for it in [&first, &unrelated, &second] {
            store.insert((*it).clone()).unwrap();
        }

        let listed = store.list_for_product(product).unwrap();
        let ids: Vec<_> = listed.iter().map(|it| it.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn apply_updates_commits_every_amount() {
        let store = InMemoryStockStore::new();
        let product = ProductId::new();
        let a = item(product, 3.0);
        let b = item(product, 5.0);
        store.insert(a.clone()).unwrap();
        store.insert(b.clone()).unwrap();

        store
            .apply_updates(&[
                StockItemUpdate {
                    stock_item_id: a.id,
                    new_amount: 0.0,
                },
                StockItemUpdate {
                    stock_item_id: b.id,
                    new_amount: 4.0,
                },
            ])
            .unwrap();

        assert_eq!(store.get(a.id).unwrap().amount, 0.0);
        assert_eq!(store.get(b.id).unwrap().amount, 4.0);
    }

    #[test]
    fn apply_updates_is_all_or_nothing() {
        let store = InMemoryStockStore::new();
        let product = ProductId::new();
        let existing = item(product, 3.0);
        store.insert(existing.clone()).unwrap();

        let err = store
            .apply_updates(&[
                StockItemUpdate {
                    stock_item_id: existing.id,
                    new_amount: 0.0,
                },
                StockItemUpdate {
                    stock_item_id: StockItemId::new(),
                    new_amount: 1.0,
                },
            ])
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(store.get(existing.id).unwrap().amount, 3.0);
    }

    #[test]
    fn save_fails_once_the_item_is_gone() {
        let store = InMemoryStockStore::new();
        let it = item(ProductId::new(), 2.0);
        store.insert(it.clone()).unwrap();
        store.remove(it.id).unwrap();

        assert!(matches!(store.save(&it), Err(StoreError::NotFound(_))));
    }
}
