//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │      Cart       │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │1─1│  id             │   │  id             │       │
//! │  │  username       │   │  user_id        │   │  user_id        │       │
//! │  │  password_hash  │   │  items: [Item]  │──►│  items: [Item]  │       │
//! │  │  cart           │   │  total: Money   │   │  total: Money   │       │
//! │  └─────────────────┘   └─────────────────┘   │  created_at     │       │
//! │                                 ▲            └─────────────────┘       │
//! │                        ┌────────┴────────┐      (snapshot copy)        │
//! │                        │      Item       │                              │
//! │                        │  id, name       │                              │
//! │                        │  price: Money   │                              │
//! │                        │  description    │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Entry Per Unit
//! A cart holding three Round Widgets stores three `Item` entries, not one
//! line with a quantity of three. Orders copy that sequence verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::Money;

/// Catalog item identifier.
pub type ItemId = i64;
/// User identifier.
pub type UserId = i64;
/// Cart identifier.
pub type CartId = i64;
/// Order identifier.
pub type OrderId = i64;

// =============================================================================
// Item
// =============================================================================

/// A product in the catalog.
///
/// Items are read-only from the point of view of carts and orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,

    /// Display name. Not unique; name searches may return several items.
    pub name: String,

    /// Unit price.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "price_cents"))]
    pub price: Money,

    pub description: String,
}

/// Data needed to insert a catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub price: Money,
    pub description: String,
}

// =============================================================================
// Cart
// =============================================================================

/// A user's shopping cart.
///
/// ## Invariant
/// `total` is maintained incrementally by the cart engine. Under the default
/// removal policy it equals the sum of the entry prices only as long as no
/// removal asked for more units than were present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub id: CartId,

    /// Owning user (one cart per user).
    pub user_id: UserId,

    /// One entry per unit, in insertion order.
    pub items: Vec<Item>,

    /// Running total.
    pub total: Money,
}

impl Cart {
    /// Creates an empty cart for a user.
    pub fn empty(id: CartId, user_id: UserId) -> Self {
        Cart {
            id,
            user_id,
            items: Vec::new(),
            total: Money::zero(),
        }
    }

    /// Number of entries (units) in the cart.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of entries for one catalog item.
    pub fn count_of(&self, item_id: ItemId) -> usize {
        self.items.iter().filter(|i| i.id == item_id).count()
    }

    /// Sum of entry prices, independent of the running total.
    pub fn entries_total(&self) -> Money {
        self.items.iter().map(|i| i.price).sum()
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered user together with their cart.
///
/// The password hash never leaves the process: it is skipped by serde and
/// by the TypeScript bindings.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: UserId,

    /// Unique login name.
    pub username: String,

    /// Argon2 PHC string.
    #[serde(skip)]
    #[ts(skip)]
    pub password_hash: String,

    /// The user's cart. Every user has exactly one.
    pub cart: Cart,
}

/// Data needed to create a user. The store creates the cart alongside.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

// =============================================================================
// Order
// =============================================================================

/// An immutable snapshot of a cart at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: OrderId,

    pub user_id: UserId,

    /// Copy of the cart entries at submission.
    pub items: Vec<Item>,

    /// Copy of the cart total at submission.
    pub total: Money,

    /// Assigned by the store.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// An order that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<Item>,
    pub total: Money,
}

impl NewOrder {
    /// Snapshots a cart. The entries are cloned, so later cart changes do
    /// not reach the order.
    pub fn from_cart(cart: &Cart) -> Self {
        NewOrder {
            user_id: cart.user_id,
            items: cart.items.clone(),
            total: cart.total,
        }
    }
}

// =============================================================================
// Configuration Types
// =============================================================================

/// How `remove_from_cart` adjusts the total when the cart holds fewer
/// matching entries than the requested quantity.
///
/// ```text
/// cart: [Round Widget $2.99]      remove Round Widget × 2
///
///   Permissive            → entries: []   total: -$2.99
///   ClampAtZero           → entries: []   total:  $0.00
///   RejectIfInsufficient  → error, cart unchanged
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RemovalPolicy {
    /// Subtract `price × quantity` no matter how many entries were removed.
    #[default]
    Permissive,
    /// Like `Permissive`, but the total never drops below zero.
    ClampAtZero,
    /// Fail with `InsufficientQuantity` and leave the cart alone.
    RejectIfInsufficient,
}

impl RemovalPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemovalPolicy::Permissive => "permissive",
            RemovalPolicy::ClampAtZero => "clamp_at_zero",
            RemovalPolicy::RejectIfInsufficient => "reject_if_insufficient",
        }
    }
}

impl fmt::Display for RemovalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemovalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(RemovalPolicy::Permissive),
            "clamp_at_zero" => Ok(RemovalPolicy::ClampAtZero),
            "reject_if_insufficient" => Ok(RemovalPolicy::RejectIfInsufficient),
            other => Err(format!("unknown removal policy '{}'", other)),
        }
    }
}

/// Cart engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartPolicy {
    #[serde(default)]
    pub removal_policy: RemovalPolicy,
}

/// Order engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderPolicy {
    /// Empty the cart after a successful submit. Off by default: the cart
    /// keeps its contents and a second submit produces a second order.
    #[serde(default)]
    pub clear_cart_on_submit: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
