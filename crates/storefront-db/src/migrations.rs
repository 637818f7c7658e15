//! # Schema Migrations
//!
//! The SQL files under `migrations/sqlite` are compiled into the binary and
//! applied by [`Database::new`](crate::Database::new).
//!
//! ```text
//! migrations/sqlite/
//! └── 001_initial_schema.sql
//!       items ◄──┬── cart_items ──► carts ──► users
//!                └── order_items ─► orders ─► users
//! ```
//!
//! sqlx records each applied file in `_sqlx_migrations` along with its
//! checksum, so an edited migration fails at startup instead of silently
//! drifting. Schema changes go into a new, higher-numbered file.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Embedded versus applied migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    /// Migrations compiled into this build.
    pub embedded: usize,
    /// Migrations recorded as applied in the database.
    pub applied: usize,
}

impl MigrationStatus {
    /// True when every embedded migration has been applied.
    pub fn is_current(&self) -> bool {
        self.applied >= self.embedded
    }
}

/// Applies every pending migration. Already applied files are skipped.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    let before = migration_status(pool).await?;
    if before.is_current() {
        debug!(applied = before.applied, "Schema is current");
        return Ok(());
    }

    MIGRATOR.run(pool).await?;

    info!(
        pending = before.embedded - before.applied,
        "Applied schema migrations"
    );
    Ok(())
}

/// Reads the migration bookkeeping table.
///
/// A database that has never been migrated has no bookkeeping table and
/// reports zero applied migrations.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    let has_table: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master \
         WHERE type = 'table' AND name = '_sqlx_migrations')",
    )
    .fetch_one(pool)
    .await?;

    let applied: i64 = if has_table {
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?
    } else {
        0
    };

    Ok(MigrationStatus {
        embedded: MIGRATOR.migrations.len(),
        applied: usize::try_from(applied).unwrap_or(0),
    })
}
