//! # storefront-core: Cart and Order Domain Logic
//!
//! This crate is the **heart** of the storefront. It owns the rules for how
//! a user's cart changes, how its running total is kept exact, and how a cart
//! becomes an immutable order.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Calling layer (storefront-cli)                  │   │
//! │  │    cart add ──► cart remove ──► order submit ──► order history  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │   order   │  │   │
//! │  │   │ Item/User │  │   Money   │  │CartEngine │  │OrderEngine│  │   │
//! │  │   │Cart/Order │  │  extend   │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └─────┬─────┘  └─────┬─────┘  │   │
//! │  │                                       │              │         │   │
//! │  │                          ┌────────────▼──────────────▼──────┐  │   │
//! │  │                          │  store traits (async seams)      │  │   │
//! │  │                          └────────────┬─────────────────────┘  │   │
//! │  └───────────────────────────────────────┼─────────────────────────┘   │
//! │                                          │                              │
//! │  ┌───────────────────────────────────────▼─────────────────────────┐   │
//! │  │                 storefront-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, User, Cart, Order) and policies
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input rules (quantity, username, password)
//! - [`store`] - Storage traits the engines depend on
//! - [`cart`] - Cart mutations and the [`CartEngine`]
//! - [`order`] - Order snapshots and the [`OrderEngine`]
//! - [`account`] - Registration and user lookup
//! - [`catalog`] - Item lookup
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::{extend, Money, Sign};
//!
//! let price = Money::from_cents(299); // $2.99
//! let total = extend(Money::zero(), price, 3, Sign::Add).unwrap();
//! assert_eq!(total.cents(), 897);
//!
//! let back = extend(total, price, 3, Sign::Remove).unwrap();
//! assert!(back.is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod account;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use account::{AccountService, CreateUserRequest};
pub use cart::CartEngine;
pub use catalog::CatalogService;
pub use error::{CoreError, CoreResult, StoreError, ValidationError};
pub use money::Money;
pub use order::OrderEngine;
pub use store::{AccountStore, CartStore, CatalogStore, OrderStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 7;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 64;

/// Largest quantity a single add or remove may ask for. Every unit is one
/// cart entry, so this also bounds how much one call can allocate.
pub const MAX_QUANTITY: i64 = 10_000;
