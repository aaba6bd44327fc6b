//! Shared stores for consumers that need the same collection.
//!
//! Stores are keyed by item type, collection path and filter. Consumers get a
//! [`SharedStore`] handle: it cannot change the filter it was keyed by, and
//! the store is closed only when the last handle is dropped. The registry
//! keeps weak references, so the next request after that builds and fetches
//! a fresh store.

use std::any::{Any, TypeId};
use std::sync::{Arc, Weak};

use brand_api_client::{BaseApi, UploadFile};
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::error::{ResourceError, Result};
use crate::item::ResourceItem;
use crate::reorder::{move_item, Direction, SwapPlan};
use crate::resource::{Resource, ResourceDef};
use crate::store::{ResourceState, ResourceStore};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StoreKey {
    item_type: TypeId,
    path: String,
    filter: Option<String>,
}

pub struct StoreRegistry {
    api: Arc<dyn BaseApi>,
    stores: DashMap<StoreKey, Weak<dyn Any + Send + Sync>>,
}

impl StoreRegistry {
    pub fn new(api: Arc<dyn BaseApi>) -> Self {
        Self {
            api,
            stores: DashMap::new(),
        }
    }

    /// Get a handle on the live store for `(T, def.path, filter)`, or create
    /// and fetch one.
    pub async fn store<T: ResourceItem>(&self, def: ResourceDef, filter: Option<&str>) -> SharedStore<T> {
        self.prune();

        let key = StoreKey {
            item_type: TypeId::of::<T>(),
            path: def.path.clone(),
            filter: filter.map(str::to_string),
        };

        let (store, fresh) = {
            let mut entry = self.stores.entry(key).or_insert_with(empty_weak);
            let live = entry
                .upgrade()
                .and_then(|s| s.downcast::<ResourceStore<T>>().ok())
                .filter(|s| !s.is_closed());
            match live {
                Some(live) => (live, false),
                None => {
                    let store = Arc::new(ResourceStore::<T>::new(self.api.clone(), def));
                    let erased: Arc<dyn Any + Send + Sync> = store.clone();
                    *entry = Arc::downgrade(&erased);
                    (store, true)
                }
            }
        };

        if fresh {
            debug!(resource = %store.definition().name, ?filter, "Opening shared store");
            if let Err(e) = store.list(filter).await {
                debug!(resource = %store.definition().name, error = %e, "Shared store fetch failed");
            }
        }
        SharedStore { store }
    }

    pub async fn store_for<T: Resource>(&self, filter: Option<&str>) -> SharedStore<T> {
        self.store::<T>(T::definition(), filter).await
    }

    /// Number of stores still held by someone.
    pub fn live_count(&self) -> usize {
        self.prune();
        self.stores.len()
    }

    fn prune(&self) {
        self.stores.retain(|_, weak| weak.strong_count() > 0);
    }
}

fn empty_weak() -> Weak<dyn Any + Send + Sync> {
    Weak::<()>::new()
}

/// A consumer's handle on a registry store.
///
/// Exposes everything except re-filtering and closing: the filter is part
/// of the registry key, and closing happens when the last handle drops.
pub struct SharedStore<T: ResourceItem> {
    store: Arc<ResourceStore<T>>,
}

impl<T: ResourceItem> Clone for SharedStore<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T: ResourceItem> Drop for SharedStore<T> {
    fn drop(&mut self) {
        if Arc::strong_count(&self.store) == 1 {
            self.store.close();
        }
    }
}

impl<T: ResourceItem> SharedStore<T> {
    /// Whether two handles point at the same store.
    pub fn same_store(&self, other: &SharedStore<T>) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }

    pub fn definition(&self) -> &ResourceDef {
        self.store.definition()
    }

    pub fn filter(&self) -> Option<String> {
        self.store.filter()
    }

    pub fn snapshot(&self) -> ResourceState<T> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.store.subscribe()
    }

    pub fn items(&self) -> Vec<T> {
        self.store.items()
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn error(&self) -> Option<ResourceError> {
        self.store.error()
    }

    pub fn find(&self, id: &str) -> Option<T> {
        self.store.find(id)
    }

    pub fn sorted_by_order(&self) -> Vec<T> {
        self.store.sorted_by_order()
    }

    pub fn active_sorted(&self) -> Vec<T> {
        self.store.active_sorted()
    }

    /// Re-fetch with the filter the store was keyed by.
    pub async fn refresh(&self) -> Result<()> {
        self.store.refresh().await
    }

    pub async fn create<D: Serialize + ?Sized>(&self, data: &D) -> Result<T> {
        self.store.create(data).await
    }

    pub async fn update<D: Serialize + ?Sized>(&self, id: &str, data: &D) -> Result<T> {
        self.store.update(id, data).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(id).await
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        self.store.remove(id).await
    }

    pub async fn move_item(&self, id: &str, direction: Direction) -> Result<Option<SwapPlan>> {
        move_item(&self.store, id, direction).await
    }

    pub async fn upload_image(&self, file: UploadFile) -> Result<String> {
        self.store.upload_image(file).await
    }
}
