use crate::model::*;

use super::ReservationProcessor;

impl ReservationProcessor {
    /// Slots still open in a store's hour bucket, or `None` for an unknown
    /// store or an hour outside its operating window.
    pub fn remaining_capacity(&self, store_id: StoreId, hour: Hour) -> Option<u32> {
        let store = self.catalog.lookup(store_id)?;
        if hour < store.open_hour || hour >= store.close_hour {
            return None;
        }
        let used = self.counter.count_at(store_id, hour);
        Some(store.hourly_limit.saturating_sub(used))
    }

    /// Remaining stock of every known `(store, product)` cell, sorted.
    pub fn stock_levels(&self) -> Vec<StockLevel> {
        self.ledger.snapshot()
    }

    /// Admitted pickups per non-empty `(store, hour)` bucket, sorted.
    pub fn pickup_loads(&self) -> Vec<PickupLoad> {
        self.counter.snapshot()
    }
}
