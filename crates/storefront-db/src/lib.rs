//! # storefront-db: Database Layer for the Storefront
//!
//! This crate provides database access for the storefront.
//! It uses SQLite for storage with sqlx for async operations, and
//! implements the store traits from `storefront-core` on [`Database`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  CartEngine::add_to_cart / OrderEngine::submit                         │
//! │       │  (through CatalogStore, AccountStore, CartStore, OrderStore)   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ItemRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ UserRepo      │    │ 001_initial_ │  │   │
//! │  │   │ store traits  │    │ CartRepo      │    │ schema.sql   │  │   │
//! │  │   │ (store.rs)    │    │ OrderRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/storefront/storefront.db (platform data dir)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (item, user, cart, order)
//! - [`seed`] - Demo catalog
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_core::CartEngine;
//! use storefront_db::{Database, DbConfig};
//!
//! let db = Arc::new(Database::new(DbConfig::new("storefront.db")).await?);
//! let carts = CartEngine::new(Arc::clone(&db));
//! carts.add_to_cart("test", 1, 2).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;
mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DatabaseStatus, DbConfig};

// Repository re-exports for convenience
pub use repository::cart::CartRepository;
pub use repository::item::ItemRepository;
pub use repository::order::OrderRepository;
pub use repository::user::UserRepository;
