//! Resource store: one server collection bound to local observable state.
//!
//! The store owns an ordered list mirroring the collection and patches it
//! from server responses only (no speculative writes before the request).
//!
//! - Fetches are generation-stamped. A fetch that completes after a newer
//!   one started, or after [`ResourceStore::close`], does not touch state.
//! - Mutations go through a single-writer lock, one in flight per store,
//!   so the list reflects submission order rather than completion order.
//! - State changes are published on a `watch` channel; subscribers re-render
//!   from [`ResourceStore::subscribe`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use brand_api_client::{decode_data, BaseApi, HttpMethod, UploadFile, UploadedImage};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::{watch, MutexGuard};
use tracing::{debug, info, warn};

use crate::error::{ResourceError, Result};
use crate::item::ResourceItem;
use crate::resource::{DeletePolicy, Resource, ResourceDef};
use crate::upload::{validate_image, UPLOAD_FIELD, UPLOAD_PATH};

/// What a consumer renders from.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<ResourceError>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

pub struct ResourceStore<T: ResourceItem> {
    api: Arc<dyn BaseApi>,
    def: ResourceDef,
    list_path: String,
    filter: Mutex<Option<String>>,
    state: watch::Sender<ResourceState<T>>,
    mutations: tokio::sync::Mutex<()>,
    generation: AtomicU64,
    closed: AtomicBool,
}

impl<T: ResourceItem> ResourceStore<T> {
    /// Create a store without fetching. Call [`ResourceStore::list`] to load.
    pub fn new(api: Arc<dyn BaseApi>, def: ResourceDef) -> Self {
        let list_path = def.path.clone();
        Self::with_list_path(api, def, list_path)
    }

    pub(crate) fn with_list_path(api: Arc<dyn BaseApi>, def: ResourceDef, list_path: String) -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self {
            api,
            def,
            list_path,
            filter: Mutex::new(None),
            state,
            mutations: tokio::sync::Mutex::new(()),
            generation: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Create a store and fetch immediately, as a mounted view would.
    ///
    /// A failed initial fetch is recorded in the state, not returned.
    pub async fn open(api: Arc<dyn BaseApi>, def: ResourceDef, filter: Option<&str>) -> Self {
        let store = Self::new(api, def);
        if let Err(e) = store.list(filter).await {
            debug!(resource = %store.def.name, error = %e, "Initial fetch failed");
        }
        store
    }

    pub fn definition(&self) -> &ResourceDef {
        &self.def
    }

    pub fn filter(&self) -> Option<String> {
        self.filter.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> ResourceState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.state.subscribe()
    }

    /// Items in list order (insertion order for creates).
    pub fn items(&self) -> Vec<T> {
        self.state.borrow().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<ResourceError> {
        self.state.borrow().error.clone()
    }

    pub fn find(&self, id: &str) -> Option<T> {
        self.state.borrow().items.iter().find(|i| i.id() == id).cloned()
    }

    /// Items sorted by `orderIndex`. Ties keep list order.
    pub fn sorted_by_order(&self) -> Vec<T> {
        let mut items = self.items();
        items.sort_by_key(|i| i.order_index());
        items
    }

    /// What a public view shows: active items sorted by `orderIndex`.
    pub fn active_sorted(&self) -> Vec<T> {
        let mut items: Vec<T> = self.items().into_iter().filter(|i| i.is_active()).collect();
        items.sort_by_key(|i| i.order_index());
        items
    }

    // ------------------------------------------------------------------
    // Lifetime
    // ------------------------------------------------------------------

    /// Tear the store down. Requests already in flight still complete on the
    /// server, but their results are no longer written to state.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!(resource = %self.def.name, "Store closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(ResourceError::Closed(self.def.name.clone()))
        } else {
            Ok(())
        }
    }

    // ------------------------------------------------------------------
    // Fetch
    // ------------------------------------------------------------------

    /// Fetch the collection, keeping only items whose `type` equals `filter`.
    ///
    /// The server always returns the full collection; narrowing is local.
    pub async fn list(&self, filter: Option<&str>) -> Result<()> {
        *self.filter.lock().unwrap_or_else(|e| e.into_inner()) = filter.map(str::to_string);
        self.refresh().await
    }

    /// Change the filter, re-fetching only if it actually changed.
    pub async fn set_filter(&self, filter: Option<&str>) -> Result<()> {
        if self.filter().as_deref() == filter {
            return Ok(());
        }
        self.list(filter).await
    }

    /// Re-fetch with the current filter.
    pub async fn refresh(&self) -> Result<()> {
        self.ensure_open()?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let filter = self.filter();

        self.state.send_modify(|s| s.loading = true);
        debug!(resource = %self.def.name, path = %self.list_path, ?filter, "Fetching collection");

        let result = self
            .api
            .request(HttpMethod::Get, &self.list_path, None)
            .await
            .map_err(ResourceError::from)
            .and_then(|body| decode_data::<Vec<T>>(body).map_err(ResourceError::from));

        if self.is_closed() {
            debug!(resource = %self.def.name, "Dropping fetch result for closed store");
            return Err(ResourceError::Closed(self.def.name.clone()));
        }
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(resource = %self.def.name, generation, "Dropping superseded fetch result");
            return Ok(());
        }

        match result {
            Ok(items) => {
                let total = items.len();
                let items: Vec<T> = match filter.as_deref() {
                    Some(kind) => items.into_iter().filter(|i| i.kind() == Some(kind)).collect(),
                    None => items,
                };
                debug!(resource = %self.def.name, total, kept = items.len(), "Collection fetched");
                self.state.send_modify(|s| {
                    s.items = items;
                    s.loading = false;
                    s.error = None;
                });
                Ok(())
            }
            Err(e) => {
                warn!(resource = %self.def.name, error = %e, "Collection fetch failed");
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(e.clone());
                });
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    pub(crate) async fn lock_mutations(&self) -> MutexGuard<'_, ()> {
        self.mutations.lock().await
    }

    /// `POST /<resource>`; the server's item is appended to the tail.
    pub async fn create<D: Serialize + ?Sized>(&self, data: &D) -> Result<T> {
        self.ensure_open()?;
        let body = serde_json::to_value(data)
            .map_err(|e| brand_api_client::ApiError::Parse(e.to_string()))?;

        let _guard = self.lock_mutations().await;
        let created: T = decode_data(
            self.api
                .request(HttpMethod::Post, &self.def.path, Some(body))
                .await?,
        )?;

        if !self.is_closed() {
            self.state.send_modify(|s| s.items.push(created.clone()));
        }
        info!(resource = %self.def.name, id = created.id(), "Created item");
        Ok(created)
    }

    /// `PATCH /<resource>/:id`; the matching element is replaced in place.
    pub async fn update<D: Serialize + ?Sized>(&self, id: &str, data: &D) -> Result<T> {
        self.ensure_open()?;
        let body = serde_json::to_value(data)
            .map_err(|e| brand_api_client::ApiError::Parse(e.to_string()))?;

        let _guard = self.lock_mutations().await;
        self.patch_locked(id, body).await
    }

    /// Caller must hold the mutation lock.
    pub(crate) async fn patch_locked(&self, id: &str, body: Value) -> Result<T> {
        let updated: T = decode_data(
            self.api
                .request(HttpMethod::Patch, &self.def.item_path(id), Some(body))
                .await?,
        )?;

        if !self.is_closed() {
            self.state.send_modify(|s| {
                if let Some(slot) = s.items.iter_mut().find(|i| i.id() == id) {
                    *slot = updated.clone();
                }
            });
        }
        debug!(resource = %self.def.name, id, "Updated item");
        Ok(updated)
    }

    /// `DELETE /<resource>/:id`; the element is removed from the list.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.ensure_open()?;
        let _guard = self.lock_mutations().await;

        self.api
            .request(HttpMethod::Delete, &self.def.item_path(id), None)
            .await?;

        if !self.is_closed() {
            self.state.send_modify(|s| s.items.retain(|i| i.id() != id));
        }
        info!(resource = %self.def.name, id, "Deleted item");
        Ok(())
    }

    /// Delete according to the resource's [`DeletePolicy`].
    ///
    /// Soft deletes leave the item in the list with `isActive = false`.
    pub async fn remove(&self, id: &str) -> Result<()> {
        match self.def.delete_policy {
            DeletePolicy::Hard => self.delete(id).await,
            DeletePolicy::Soft => self
                .update(id, &json!({ "isActive": false }))
                .await
                .map(|_| ()),
        }
    }

    // ------------------------------------------------------------------
    // Upload
    // ------------------------------------------------------------------

    /// Upload an image and return its public URL. Does not touch the list.
    pub async fn upload_image(&self, file: UploadFile) -> Result<String> {
        upload_image(self.api.as_ref(), file).await
    }
}

impl<T: Resource> ResourceStore<T> {
    /// Store for a typed model at its catalogued path.
    pub fn for_resource(api: Arc<dyn BaseApi>) -> Self {
        Self::new(api, T::definition())
    }
}

/// Validate and send one image to the fixed upload endpoint.
pub async fn upload_image(api: &dyn BaseApi, file: UploadFile) -> Result<String> {
    validate_image(&file)?;
    let file_name = file.file_name.clone();
    let body = api.upload(UPLOAD_PATH, UPLOAD_FIELD, file).await?;
    let uploaded: UploadedImage = decode_data(body)?;
    info!(file_name = %file_name, url = %uploaded.url, "Image uploaded");
    Ok(uploaded.url)
}
