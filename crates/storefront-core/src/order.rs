//! # Order Engine
//!
//! Turns a user's cart into an immutable order and lists a user's orders.
//!
//! ## Submission
//! ```text
//!   User.cart ──── NewOrder::from_cart (clone entries, copy total) ────┐
//!       │                                                              ▼
//!       │                                          OrderStore::save_order
//!       │                                            (id + created_at)
//!       ▼
//!   left as is ── unless OrderPolicy.clear_cart_on_submit ──► emptied + saved
//! ```
//!
//! Because the cart survives submission by default, submitting twice in a
//! row yields two orders with identical contents.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::store::{AccountStore, CartStore, OrderStore};
use crate::types::{NewOrder, Order, OrderPolicy, User};
use crate::validation::normalize_username;

/// Creates and lists orders.
pub struct OrderEngine<S> {
    store: Arc<S>,
    policy: OrderPolicy,
}

impl<S> OrderEngine<S>
where
    S: AccountStore + OrderStore + CartStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_policy(store, OrderPolicy::default())
    }

    pub fn with_policy(store: Arc<S>, policy: OrderPolicy) -> Self {
        OrderEngine { store, policy }
    }

    pub fn policy(&self) -> OrderPolicy {
        self.policy
    }

    /// Snapshots the user's cart into a new order.
    ///
    /// An empty cart yields an order with no items and a zero total.
    /// On `UserNotFound` nothing is persisted.
    ///
    /// Once the order is stored the call succeeds. A failure to clear the
    /// cart afterwards is logged and leaves the cart as it was.
    pub async fn submit(&self, username: &str) -> CoreResult<Order> {
        let user = self.resolve_user(username).await?;
        let mut cart = user.cart;

        let order = self.store.save_order(NewOrder::from_cart(&cart)).await?;
        info!(
            username,
            order_id = order.id,
            entries = order.items.len(),
            total = %order.total,
            "Order submitted"
        );

        if self.policy.clear_cart_on_submit {
            cart.clear();
            match self.store.save_cart(&cart).await {
                Ok(_) => debug!(username, cart_id = cart.id, "Cart cleared after submit"),
                Err(e) => warn!(
                    username,
                    order_id = order.id,
                    cart_id = cart.id,
                    error = %e,
                    "Order stored but cart could not be cleared"
                ),
            }
        }

        Ok(order)
    }

    /// Every order of the user in storage order. No orders is not an error.
    pub async fn get_orders_for_user(&self, username: &str) -> CoreResult<Vec<Order>> {
        let user = self.resolve_user(username).await?;
        let orders = self.store.find_orders_by_user(&user).await?;
        debug!(username, count = orders.len(), "Loaded order history");
        Ok(orders)
    }

    async fn resolve_user(&self, username: &str) -> CoreResult<User> {
        let username = normalize_username(username);
        self.store
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| CoreError::UserNotFound(username.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
