use dashmap::DashMap;

use crate::model::*;

/// Remaining stock per `(store, product)` cell.
///
/// Cells are individually locked (outer shard per store, inner shard per
/// product), so a check-then-decrement only ever contends on its own cell.
#[derive(Debug, Default)]
pub struct InventoryLedger {
    cells: DashMap<StoreId, DashMap<ProductId, u32>>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from inventory lines. Later entries for the same cell win.
    pub fn from_lines<'a, I: IntoIterator<Item = &'a InventoryLine>>(lines: I) -> Self {
        let ledger = Self::new();
        for line in lines {
            // A store with "-" still gets an (empty) entry.
            ledger.cells.entry(line.store_id).or_default();
            for (product, qty) in &line.items {
                ledger.set_stock(line.store_id, product, *qty);
            }
        }
        ledger
    }

    pub fn set_stock(&self, store_id: StoreId, product_id: &str, qty: u32) {
        self.cells
            .entry(store_id)
            .or_default()
            .insert(product_id.to_string(), qty);
    }

    /// Remaining quantity; an unknown store or product has none.
    pub fn stock_of(&self, store_id: StoreId, product_id: &str) -> u32 {
        self.cells
            .get(&store_id)
            .and_then(|products| products.get(product_id).map(|q| *q.value()))
            .unwrap_or(0)
    }

    /// Caller must have checked `stock_of(..) >= amount`.
    pub fn decrement(&self, store_id: StoreId, product_id: &str, amount: u32) {
        if amount == 0 {
            return;
        }
        if let Some(products) = self.cells.get(&store_id)
            && let Some(mut qty) = products.get_mut(product_id)
        {
            debug_assert!(*qty >= amount, "decrement below zero");
            *qty -= amount;
        }
    }

    /// Every known cell, sorted by `(store, product)`.
    pub fn snapshot(&self) -> Vec<StockLevel> {
        let mut levels: Vec<StockLevel> = self
            .cells
            .iter()
            .flat_map(|store| {
                let store_id = *store.key();
                let cells: Vec<StockLevel> = store
                    .value()
                    .iter()
                    .map(|cell| StockLevel {
                        store_id,
                        product_id: cell.key().clone(),
                        quantity: *cell.value(),
                    })
                    .collect();
                cells
            })
            .collect();
        levels.sort_by(|a, b| {
            a.store_id
                .cmp(&b.store_id)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        levels
    }
}
