//! In-memory store for engine tests.
//!
//! Counts every write so tests can assert that a failed operation left the
//! store untouched.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{StoreError, StoreResult};
use crate::money::Money;
use crate::store::{AccountStore, CartStore, CatalogStore, OrderStore};
use crate::types::{Cart, Item, ItemId, NewOrder, NewUser, Order, User, UserId};

#[derive(Default)]
struct State {
    items: Vec<Item>,
    users: Vec<User>,
    orders: Vec<Order>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    writes: AtomicUsize,
    fail_cart_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(MemoryStore::default())
    }

    /// Round Widget ($2.99, id 1), Square Widget ($1.99, id 2) and user
    /// "test" with an empty cart. Seeding does not count as a write.
    pub fn seeded() -> Arc<Self> {
        let store = MemoryStore::new();
        store.insert_item("Round Widget", 299);
        store.insert_item("Square Widget", 199);
        {
            let mut state = store.state.lock().unwrap();
            state.users.push(User {
                id: 1,
                username: "test".to_string(),
                password_hash: String::new(),
                cart: Cart::empty(1, 1),
            });
        }
        store
    }

    pub fn insert_item(&self, name: &str, cents: i64) -> ItemId {
        let mut state = self.state.lock().unwrap();
        let id = state.items.len() as ItemId + 1;
        state.items.push(Item {
            id,
            name: name.to_string(),
            price: Money::from_cents(cents),
            description: String::new(),
        });
        id
    }

    pub fn user(&self, username: &str) -> User {
        let state = self.state.lock().unwrap();
        state
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .unwrap()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn order_count(&self) -> usize {
        self.state.lock().unwrap().orders.len()
    }

    /// Makes every later `save_cart` fail with a backend error.
    pub fn fail_cart_saves(&self) {
        self.fail_cart_saves.store(true, Ordering::SeqCst);
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_item_by_id(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let state = self.state.lock().unwrap();
        Ok(state.items.iter().find(|i| i.id == id).cloned())
    }

    async fn find_items_by_name(&self, name: &str) -> StoreResult<Vec<Item>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .items
            .iter()
            .filter(|i| i.name == name)
            .cloned()
            .collect())
    }

    async fn list_items(&self) -> StoreResult<Vec<Item>> {
        Ok(self.state.lock().unwrap().items.clone())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate {
                field: "username".to_string(),
                value: user.username,
            });
        }
        let id = state.users.len() as UserId + 1;
        let created = User {
            id,
            username: user.username,
            password_hash: user.password_hash,
            cart: Cart::empty(id, id),
        };
        state.users.push(created.clone());
        self.record_write();
        Ok(created)
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn save_cart(&self, cart: &Cart) -> StoreResult<Cart> {
        if self.fail_cart_saves.load(Ordering::SeqCst) {
            return Err(StoreError::backend(std::io::Error::other("cart table locked")));
        }
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == cart.user_id)
            .unwrap();
        user.cart = cart.clone();
        self.record_write();
        Ok(user.cart.clone())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn save_order(&self, order: NewOrder) -> StoreResult<Order> {
        let mut state = self.state.lock().unwrap();
        let saved = Order {
            id: state.orders.len() as i64 + 1,
            user_id: order.user_id,
            items: order.items,
            total: order.total,
            created_at: Utc::now(),
        };
        state.orders.push(saved.clone());
        self.record_write();
        Ok(saved)
    }

    async fn find_orders_by_user(&self, user: &User) -> StoreResult<Vec<Order>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .orders
            .iter()
            .filter(|o| o.user_id == user.id)
            .cloned()
            .collect())
    }
}
