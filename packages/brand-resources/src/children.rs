//! Child collections listed per parent (project → social links, videos).
//!
//! Children are only loaded while their parent is open. After any child
//! mutation the whole child list is fetched again instead of being patched.

use std::sync::Arc;

use brand_api_client::{decode_data, BaseApi, HttpMethod};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::item::ResourceItem;
use crate::resource::{Resource, ResourceDef};
use crate::store::{ResourceState, ResourceStore};

pub struct ChildStore<T: ResourceItem> {
    parent_id: String,
    store: ResourceStore<T>,
}

impl<T: ResourceItem> ChildStore<T> {
    pub fn new(api: Arc<dyn BaseApi>, def: ResourceDef, parent_id: impl Into<String>) -> Self {
        let parent_id = parent_id.into();
        let list_path = def.children_path(&parent_id);
        Self {
            parent_id,
            store: ResourceStore::with_list_path(api, def, list_path),
        }
    }

    /// Create and load the children of `parent_id`.
    pub async fn open(api: Arc<dyn BaseApi>, def: ResourceDef, parent_id: impl Into<String>) -> Self {
        let children = Self::new(api, def, parent_id);
        if let Err(e) = children.refresh().await {
            debug!(parent_id = %children.parent_id, error = %e, "Initial child fetch failed");
        }
        children
    }

    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    pub fn snapshot(&self) -> ResourceState<T> {
        self.store.snapshot()
    }

    pub fn items(&self) -> Vec<T> {
        self.store.sorted_by_order()
    }

    /// The underlying store, e.g. for subscribing or uploading.
    pub fn store(&self) -> &ResourceStore<T> {
        &self.store
    }

    pub async fn refresh(&self) -> Result<()> {
        self.store.refresh().await
    }

    /// Once the write succeeds the result is `Ok` even if the follow-up
    /// fetch fails; that failure is left in the store's `error`.
    pub async fn create<D: Serialize + ?Sized>(&self, data: &D) -> Result<T> {
        let created = self.store.create(data).await?;
        self.refresh_after_write().await;
        Ok(created)
    }

    pub async fn update<D: Serialize + ?Sized>(&self, id: &str, data: &D) -> Result<T> {
        let updated = self.store.update(id, data).await?;
        self.refresh_after_write().await;
        Ok(updated)
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        self.store.remove(id).await?;
        self.refresh_after_write().await;
        Ok(())
    }

    async fn refresh_after_write(&self) {
        if let Err(e) = self.refresh().await {
            warn!(parent_id = %self.parent_id, error = %e, "Child list refresh after write failed");
        }
    }

    pub fn close(&self) {
        self.store.close();
    }
}

impl<T: Resource> ChildStore<T> {
    pub fn for_parent(api: Arc<dyn BaseApi>, parent_id: impl Into<String>) -> Self {
        Self::new(api, T::definition(), parent_id)
    }
}

/// `GET /<resource>/:id/relations`: one parent with its children inlined.
pub async fn fetch_with_relations<R: DeserializeOwned>(
    api: &dyn BaseApi,
    def: &ResourceDef,
    id: &str,
) -> Result<R> {
    let body = api
        .request(HttpMethod::Get, &def.relations_path(id), None)
        .await?;
    Ok(decode_data(body)?)
}
