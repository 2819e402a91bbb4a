use dashmap::DashMap;

use crate::model::*;

/// Admitted pickups per `(store, hour)` capacity bucket.
#[derive(Debug, Default)]
pub struct PickupCounter {
    buckets: DashMap<(StoreId, Hour), u32>,
}

impl PickupCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero for any bucket nothing has been admitted into.
    pub fn count_at(&self, store_id: StoreId, hour: Hour) -> u32 {
        self.buckets
            .get(&(store_id, hour))
            .map(|c| *c.value())
            .unwrap_or(0)
    }

    /// Caller must have checked the bucket is below the store's limit.
    pub fn increment(&self, store_id: StoreId, hour: Hour) {
        *self.buckets.entry((store_id, hour)).or_insert(0) += 1;
    }

    /// Non-empty buckets, sorted by `(store, hour)`.
    pub fn snapshot(&self) -> Vec<PickupLoad> {
        let mut loads: Vec<PickupLoad> = self
            .buckets
            .iter()
            .map(|e| PickupLoad {
                store_id: e.key().0,
                hour: e.key().1,
                count: *e.value(),
            })
            .collect();
        loads.sort_by_key(|l| (l.store_id, l.hour));
        loads
    }
}
