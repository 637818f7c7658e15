//! # Store Traits
//!
//! The seams between the engines and persistence.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ CatalogStore │   │ AccountStore │   │  CartStore   │   │  OrderStore  │
//! │ read items   │   │ users + cart │   │  save cart   │   │ save / list  │
//! └──────┬───────┘   └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!        └──────────────────┴─────────┬────────┴──────────────────┘
//!                                     │ implemented by
//!                     ┌───────────────▼────────────────┐
//!                     │ storefront_db::Database        │
//!                     │ (tests: in-memory store)       │
//!                     └────────────────────────────────┘
//! ```
//!
//! Implementations must be `Send + Sync`; the engines are shared across
//! tasks behind a reference.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{Cart, Item, ItemId, NewOrder, NewUser, Order, User, UserId};

/// Read-only access to catalog items.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_item_by_id(&self, id: ItemId) -> StoreResult<Option<Item>>;

    /// Exact-name matches, ordered by id.
    async fn find_items_by_name(&self, name: &str) -> StoreResult<Vec<Item>>;

    /// Every item, ordered by id.
    async fn list_items(&self) -> StoreResult<Vec<Item>>;
}

/// User lookup and registration.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Loads the user with their cart.
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Creates the user and an empty cart as one unit.
    ///
    /// A taken username is reported as [`StoreError::Duplicate`].
    ///
    /// [`StoreError::Duplicate`]: crate::error::StoreError::Duplicate
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;
}

/// Cart persistence.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Replaces the stored entries and total of `cart` and returns the
    /// stored state.
    async fn save_cart(&self, cart: &Cart) -> StoreResult<Cart>;
}

/// Order persistence.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order, assigning its id and timestamp.
    async fn save_order(&self, order: NewOrder) -> StoreResult<Order>;

    /// All orders of a user in storage order.
    async fn find_orders_by_user(&self, user: &User) -> StoreResult<Vec<Order>>;
}
