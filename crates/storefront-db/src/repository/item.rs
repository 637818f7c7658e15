//! # Item Repository
//!
//! Database operations for catalog items.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::ITEM_COLUMNS;
use storefront_core::{Item, ItemId, NewItem};

/// Repository for catalog item operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.items();
/// let widget = repo.get_by_id(1).await?;
/// let widgets = repo.find_by_name("Round Widget").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Gets an item by ID.
    pub async fn get_by_id(&self, id: ItemId) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items i WHERE i.id = ?1",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Exact-name lookup, ordered by id.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Vec<Item>> {
        debug!(name = %name, "Finding items by name");

        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items i WHERE i.name = ?1 ORDER BY i.id",
            ITEM_COLUMNS
        ))
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists the whole catalog, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items i ORDER BY i.id",
            ITEM_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Listed items");
        Ok(items)
    }

    /// Inserts a catalog item and returns it with its assigned id.
    pub async fn insert(&self, item: &NewItem) -> DbResult<Item> {
        debug!(name = %item.name, price = %item.price, "Inserting item");

        let result = sqlx::query(
            "INSERT INTO items (name, price_cents, description) VALUES (?1, ?2, ?3)",
        )
        .bind(&item.name)
        .bind(item.price)
        .bind(&item.description)
        .execute(&self.pool)
        .await?;

        Ok(Item {
            id: result.last_insert_rowid(),
            name: item.name.clone(),
            price: item.price,
            description: item.description.clone(),
        })
    }

    /// Counts catalog items (for seeding and diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
