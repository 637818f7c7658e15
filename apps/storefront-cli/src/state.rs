//! # Application Context
//!
//! One database handle and the services built on top of it, configured from
//! [`StorefrontConfig`].
//!
//! ```text
//! StorefrontConfig ──► DbConfig ──► Database::new (migrations)
//!        │                               │
//!        │                         Arc<Database>
//!        │           ┌──────────────┬────┴─────────┬───────────────┐
//!        ▼           ▼              ▼              ▼               ▼
//!   cart/order   CartEngine    OrderEngine   AccountService  CatalogService
//!   policies
//! ```

use std::sync::Arc;

use storefront_core::{AccountService, CartEngine, CatalogService, OrderEngine};
use storefront_db::Database;
use tracing::info;

use crate::config::StorefrontConfig;
use crate::error::CliResult;

pub struct AppContext {
    db: Arc<Database>,
    carts: CartEngine<Database>,
    orders: OrderEngine<Database>,
    accounts: AccountService<Database>,
    catalog: CatalogService<Database>,
}

impl AppContext {
    /// Connects to the configured database and builds the services.
    pub async fn open(config: &StorefrontConfig) -> CliResult<Self> {
        let db_config = config.to_db_config();
        info!(path = ?db_config.database_path, "Opening database");

        let db = Database::new(db_config).await?;
        Ok(Self::with_database(db, config))
    }

    pub fn with_database(db: Database, config: &StorefrontConfig) -> Self {
        let db = Arc::new(db);
        AppContext {
            carts: CartEngine::with_policy(Arc::clone(&db), config.cart_policy()),
            orders: OrderEngine::with_policy(Arc::clone(&db), config.order_policy()),
            accounts: AccountService::new(Arc::clone(&db)),
            catalog: CatalogService::new(Arc::clone(&db)),
            db,
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn carts(&self) -> &CartEngine<Database> {
        &self.carts
    }

    pub fn orders(&self) -> &OrderEngine<Database> {
        &self.orders
    }

    pub fn accounts(&self) -> &AccountService<Database> {
        &self.accounts
    }

    pub fn catalog(&self) -> &CatalogService<Database> {
        &self.catalog
    }

    pub async fn close(&self) {
        self.db.close().await;
    }
}
