use std::sync::RwLock;

use larder_core::Entity;

use super::StoreError;

/// Insertion-ordered in-memory record table.
///
/// Rows come back in the order they were inserted, which is the "natural
/// retrieval order" callers of the store traits rely on.
#[derive(Debug)]
pub struct InMemoryTable<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> Default for InMemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T> InMemoryTable<T>
where
    T: Entity + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, row: T) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        if rows.iter().any(|r| r.id() == row.id()) {
            return Err(StoreError::Duplicate(format!("{:?}", row.id())));
        }
        rows.push(row);
        Ok(())
    }

    pub fn get(&self, id: &T::Id) -> Result<T, StoreError> {
        self.rows
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("{id:?}")))
    }

    pub fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.rows.read().map_err(|_| StoreError::Poisoned)?.clone())
    }

    pub fn filter(&self, keep: impl Fn(&T) -> bool) -> Result<Vec<T>, StoreError> {
        Ok(self
            .rows
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .iter()
            .filter(|r| keep(r))
            .cloned()
            .collect())
    }

    /// Replace an existing row; fails when it no longer exists.
    pub fn save(&self, row: &T) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        match rows.iter_mut().find(|r| r.id() == row.id()) {
            Some(slot) => {
                *slot = row.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("{:?}", row.id()))),
        }
    }

    pub fn remove(&self, id: &T::Id) -> Result<T, StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        let pos = rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::NotFound(format!("{id:?}")))?;
        Ok(rows.remove(pos))
    }

    /// Run `f` over the raw rows in one critical section. Store impls use
    /// this for multi-row commits that must be all-or-nothing.
    pub(crate) fn with_rows_mut<R>(
        &self,
        f: impl FnOnce(&mut Vec<T>) -> R,
    ) -> Result<R, StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&mut rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::{ProductId, StockItemId};
    use larder_stock::StockItem;

    fn item(amount: f64) -> StockItem {
        StockItem::new(StockItemId::new(), ProductId::new(), amount, None).unwrap()
    }

    #[test]
    fn list_preserves_insertion_order() {
        let table = InMemoryTable::new();
        let rows = vec![item(1.0), item(2.0), item(3.0)];
        for row in &rows {
            table.insert(row.clone()).unwrap();
        }

        let listed = table.list().unwrap();
        let ids: Vec<_> = listed.iter().map(|r| r.id).collect();
        assert_eq!(ids, rows.iter().map(|r| r.id).collect::<Vec<_>>());
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let table = InMemoryTable::new();
        let row = item(1.0);
        table.insert(row.clone()).unwrap();
        assert!(matches!(
            table.insert(row),
            Err(StoreError::Duplicate(_))
        ));
    }

    #[test]
    fn save_fails_for_a_removed_row() {
        let table = InMemoryTable::new();
        let row = item(1.0);
        table.insert(row.clone()).unwrap();
        table.remove(&row.id).unwrap();

        assert!(matches!(table.save(&row), Err(StoreError::NotFound(_))));
    }
}
