//! # Catalog Service
//!
//! Read-only item lookup on top of a [`CatalogStore`].

use std::sync::Arc;

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::store::CatalogStore;
use crate::types::{Item, ItemId};

pub struct CatalogService<S> {
    store: Arc<S>,
}

impl<S: CatalogStore> CatalogService<S> {
    pub fn new(store: Arc<S>) -> Self {
        CatalogService { store }
    }

    /// Every item, ordered by id.
    pub async fn items(&self) -> CoreResult<Vec<Item>> {
        let items = self.store.list_items().await?;
        debug!(count = items.len(), "Listed catalog");
        Ok(items)
    }

    pub async fn item_by_id(&self, id: ItemId) -> CoreResult<Item> {
        self.store
            .find_item_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))
    }

    /// Items whose name matches exactly.
    ///
    /// No match is reported as `ItemNotFound`, not as an empty list.
    pub async fn items_by_name(&self, name: &str) -> CoreResult<Vec<Item>> {
        let items = self.store.find_items_by_name(name).await?;
        if items.is_empty() {
            return Err(CoreError::ItemNotFound(name.to_string()));
        }
        debug!(name, count = items.len(), "Found items by name");
        Ok(items)
    }
}
