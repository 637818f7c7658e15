//! # Repository Module
//!
//! Database repository implementations for the storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories and Tables                              │
//! │                                                                         │
//! │  ItemRepository   ──► items                                            │
//! │  UserRepository   ──► users (+ carts row on create)                    │
//! │  CartRepository   ──► carts, cart_items                                │
//! │  OrderRepository  ──► orders, order_items                              │
//! │                                                                         │
//! │  Multi-row writes (cart save, order insert, user create) run in a      │
//! │  single transaction each.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`](item::ItemRepository) - Catalog reads and seeding inserts
//! - [`UserRepository`](user::UserRepository) - Users with their carts
//! - [`CartRepository`](cart::CartRepository) - Cart load and save
//! - [`OrderRepository`](order::OrderRepository) - Order insert and history

pub mod cart;
pub mod item;
pub mod order;
pub mod user;

/// Column list for reading an `Item` from the `items` table aliased as `i`.
pub(crate) const ITEM_COLUMNS: &str = "i.id, i.name, i.price_cents, i.description";
