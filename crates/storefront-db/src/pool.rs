//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  CLI startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← from [database] in storefront.toml              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<Database> shared by CartEngine, OrderEngine, services             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! File databases run in WAL mode so readers never block the single
//! writer that a cart save or order insert holds.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use serde::Serialize;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::migrations::{self, MigrationStatus};
use crate::repository::cart::CartRepository;
use crate::repository::item::ItemRepository;
use crate::repository::order::OrderRepository;
use crate::repository::user::UserRepository;

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust
/// use storefront_db::DbConfig;
///
/// let config = DbConfig::new("/path/to/storefront.db")
///     .max_connections(5)
///     .min_connections(1);
/// assert_eq!(config.max_connections, 5);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection. `None` keeps connections
    /// open for the life of the pool.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    /// The file is created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// The database lives exactly as long as its single connection, so the
    /// pool never retires it.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            run_migrations: true,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap (the pool is reference counted). The engines take it as
/// `Arc<Database>` through the store traits implemented in `store.rs`.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    path: PathBuf,
}

/// Health and size snapshot, printed by `storefront status`.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStatus {
    pub path: PathBuf,
    pub healthy: bool,
    pub migrations: MigrationStatus,
    pub items: i64,
    pub users: i64,
    pub orders: i64,
}

impl Database {
    /// Opens the pool and, unless disabled, brings the schema up to date.
    ///
    /// ```text
    /// file     sqlite://<path>?mode=rwc   WAL, synchronous=NORMAL
    /// memory   sqlite::memory:            one connection, never recycled
    /// both     foreign_keys = ON
    /// ```
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening database");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout);
        if config.is_in_memory() {
            // Dropping the last connection would drop the database with it
            pool_options = pool_options.max_lifetime(None::<Duration>);
        }

        let pool = pool_options
            .connect_with(connect_options(&config)?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(
            max_connections = config.max_connections,
            in_memory = config.is_in_memory(),
            "Pool ready"
        );

        let db = Database {
            pool,
            path: config.database_path,
        };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. Idempotent.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn items(&self) -> ItemRepository {
        ItemRepository::new(self.pool.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn carts(&self) -> CartRepository {
        CartRepository::new(self.pool.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Closes the pool. Later queries fail with `ConnectionFailed`.
    pub async fn close(&self) {
        debug!("Closing database pool");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Collects health, schema version and row counts.
    pub async fn status(&self) -> DbResult<DatabaseStatus> {
        let healthy = self.health_check().await;
        if !healthy {
            warn!(path = %self.path.display(), "Database failed health check");
        }

        Ok(DatabaseStatus {
            path: self.path.clone(),
            healthy,
            migrations: migrations::migration_status(&self.pool).await?,
            items: self.items().count().await?,
            users: self.users().count().await?,
            orders: self.orders().count().await?,
        })
    }
}

fn connect_options(config: &DbConfig) -> DbResult<SqliteConnectOptions> {
    let options = if config.is_in_memory() {
        SqliteConnectOptions::from_str("sqlite::memory:")
    } else {
        SqliteConnectOptions::from_str(&format!(
            "sqlite://{}?mode=rwc",
            config.database_path.display()
        ))
        .map(|o| {
            o.journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true)
        })
    }
    .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

    // SQLite leaves them off unless asked
    Ok(options.foreign_keys(true))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let config = DbConfig::in_memory();
        assert!(config.is_in_memory());

        let db = Database::new(config).await.unwrap();

        let status = db.status().await.unwrap();
        assert!(status.healthy);
        assert!(status.migrations.is_current());
        assert_eq!((status.items, status.users, status.orders), (0, 0, 0));
        assert_eq!(status.path, PathBuf::from(":memory:"));
    }

    #[tokio::test]
    async fn test_file_database_reopens() {
        let path = std::env::temp_dir().join(format!(
            "storefront-pool-test-{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert!(db.health_check().await);
        db.close().await;

        // Migrations are idempotent on reopen
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert!(db.health_check().await);
        db.close().await;

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_closed_pool_fails_health_check() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
        assert!(matches!(
            db.items().count().await,
            Err(DbError::ConnectionFailed(_))
        ));
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
    }
}
