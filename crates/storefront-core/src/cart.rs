//! # Cart Engine
//!
//! Adds and removes units of catalog items in a user's cart and keeps the
//! running total exact.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_to_cart("test", item 1, qty 2)                                     │
//! │       │                                                                 │
//! │       ├── validate_quantity(2)        ── qty <= 0 → ValidationError    │
//! │       ├── AccountStore: find user     ── absent  → UserNotFound        │
//! │       ├── CatalogStore: find item     ── absent  → ItemNotFound        │
//! │       │                                                                 │
//! │       │   ── nothing has been touched up to here ──                    │
//! │       │                                                                 │
//! │       ├── extend(total, price, 2, Add) ── overflow → AmountOverflow    │
//! │       ├── push 2 entries, set total                                    │
//! │       └── CartStore: save_cart ──► saved Cart                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `remove_from_cart` follows the same shape. How the total moves when the
//! cart holds fewer matching entries than requested is decided by the
//! configured [`RemovalPolicy`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::{extend, Money, Sign};
use crate::store::{AccountStore, CartStore, CatalogStore};
use crate::types::{Cart, CartPolicy, Item, ItemId, RemovalPolicy, User};
use crate::validation::{normalize_username, validate_quantity};

// =============================================================================
// Cart Mutations
// =============================================================================

impl Cart {
    /// Appends `quantity` entries of `item` and raises the total by
    /// `price × quantity`.
    ///
    /// The quantity is bounded and the new total is computed first, so a
    /// rejected call leaves the cart unchanged.
    pub fn add_units(&mut self, item: &Item, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;
        let new_total =
            extend(self.total, item.price, quantity, Sign::Add).ok_or(CoreError::AmountOverflow)?;

        let count = usize::try_from(quantity).map_err(|_| CoreError::AmountOverflow)?;
        self.items.extend(std::iter::repeat(item).take(count).cloned());
        self.total = new_total;

        Ok(())
    }

    /// Removes up to `quantity` entries of `item`, earliest first, and
    /// lowers the total according to `policy`.
    ///
    /// Returns the number of entries actually removed.
    ///
    /// ## Policies
    /// ```text
    /// Permissive            total -= price × quantity   (may go negative)
    /// ClampAtZero           same, floored at $0.00
    /// RejectIfInsufficient  fewer than quantity entries → error, no change
    /// ```
    pub fn remove_units(
        &mut self,
        item: &Item,
        quantity: i64,
        policy: RemovalPolicy,
    ) -> CoreResult<usize> {
        let present = self.count_of(item.id);
        let requested = usize::try_from(quantity).unwrap_or(usize::MAX);

        let new_total = match policy {
            RemovalPolicy::Permissive => extend(self.total, item.price, quantity, Sign::Remove)
                .ok_or(CoreError::AmountOverflow)?,
            // An overflowing subtraction would land far below zero anyway
            RemovalPolicy::ClampAtZero => extend(self.total, item.price, quantity, Sign::Remove)
                .map(Money::floor_at_zero)
                .unwrap_or_else(Money::zero),
            RemovalPolicy::RejectIfInsufficient => {
                if present < requested {
                    return Err(CoreError::InsufficientQuantity {
                        item_id: item.id,
                        present,
                        requested: quantity,
                    });
                }
                extend(self.total, item.price, quantity, Sign::Remove)
                    .ok_or(CoreError::AmountOverflow)?
            }
        };

        let mut remaining = requested.min(present);
        let removed = remaining;
        self.items.retain(|entry| {
            if remaining > 0 && entry.id == item.id {
                remaining -= 1;
                false
            } else {
                true
            }
        });
        self.total = new_total;

        Ok(removed)
    }

    /// Drops every entry and resets the total to zero.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = Money::zero();
    }
}

// =============================================================================
// Cart Engine
// =============================================================================

/// Applies add/remove operations to users' carts.
///
/// The engine holds no locks and no cart state of its own. Every call loads
/// the user's cart from the store, changes it, and saves it back.
pub struct CartEngine<S> {
    store: Arc<S>,
    policy: CartPolicy,
}

impl<S> CartEngine<S>
where
    S: AccountStore + CatalogStore + CartStore,
{
    /// Creates an engine with the default (permissive) policy.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_policy(store, CartPolicy::default())
    }

    pub fn with_policy(store: Arc<S>, policy: CartPolicy) -> Self {
        CartEngine { store, policy }
    }

    pub fn policy(&self) -> CartPolicy {
        self.policy
    }

    /// Adds `quantity` units of an item to a user's cart.
    ///
    /// ## Errors
    /// - `Validation` when `quantity <= 0`
    /// - `UserNotFound` / `ItemNotFound` before anything is written
    /// - `AmountOverflow` when the new total does not fit
    pub async fn add_to_cart(
        &self,
        username: &str,
        item_id: ItemId,
        quantity: i64,
    ) -> CoreResult<Cart> {
        validate_quantity(quantity)?;
        let user = self.resolve_user(username).await?;
        let item = self.resolve_item(item_id).await?;

        let mut cart = user.cart;
        cart.add_units(&item, quantity)?;

        let saved = self.store.save_cart(&cart).await?;
        debug!(
            username,
            item_id,
            quantity,
            total = %saved.total,
            entries = saved.item_count(),
            "Added to cart"
        );

        Ok(saved)
    }

    /// Removes up to `quantity` units of an item from a user's cart.
    ///
    /// ## Errors
    /// Same as [`add_to_cart`](Self::add_to_cart), plus
    /// `InsufficientQuantity` under [`RemovalPolicy::RejectIfInsufficient`].
    pub async fn remove_from_cart(
        &self,
        username: &str,
        item_id: ItemId,
        quantity: i64,
    ) -> CoreResult<Cart> {
        validate_quantity(quantity)?;
        let user = self.resolve_user(username).await?;
        let item = self.resolve_item(item_id).await?;

        let mut cart = user.cart;
        let removed = cart.remove_units(&item, quantity, self.policy.removal_policy)?;

        if cart.total.is_negative() {
            warn!(
                username,
                item_id,
                requested = quantity,
                removed,
                total = %cart.total,
                "Cart total went below zero"
            );
        }

        let saved = self.store.save_cart(&cart).await?;
        debug!(
            username,
            item_id,
            quantity,
            removed,
            total = %saved.total,
            "Removed from cart"
        );

        Ok(saved)
    }

    async fn resolve_user(&self, username: &str) -> CoreResult<User> {
        let username = normalize_username(username);
        self.store
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| CoreError::UserNotFound(username.to_string()))
    }

    async fn resolve_item(&self, item_id: ItemId) -> CoreResult<Item> {
        self.store
            .find_item_by_id(item_id)
            .await?
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
