use std::collections::HashMap;

use tracing::warn;

use crate::model::*;

/// Read-only store reference data, keyed by store id.
#[derive(Debug, Clone, Default)]
pub struct StoreCatalog {
    stores: HashMap<StoreId, Store>,
}

impl StoreCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from store lines in input order. A repeated id replaces the
    /// earlier definition.
    pub fn from_stores<I: IntoIterator<Item = Store>>(stores: I) -> Self {
        let mut catalog = Self::new();
        for store in stores {
            catalog.insert(store);
        }
        catalog
    }

    pub(super) fn insert(&mut self, store: Store) {
        if let Some(prev) = self.stores.insert(store.id, store) {
            warn!("store {} defined more than once; keeping the later definition", prev.id);
        }
    }

    pub fn lookup(&self, id: StoreId) -> Option<&Store> {
        self.stores.get(&id)
    }

    pub fn contains(&self, id: StoreId) -> bool {
        self.stores.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
