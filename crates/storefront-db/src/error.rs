//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ├──► repository callers (seeding, CLI diagnostics)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (storefront-core) ← What the engines see                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError::Store → CliError → JSON on stdout                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::error::ErrorKind;
use storefront_core::StoreError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// A user's cart row is missing, or a cart save targets a cart the user
    /// does not own.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Username taken, or a second cart for one user.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A cart or order entry points at an item that does not exist.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Classifies sqlx failures.
///
/// ```text
/// RowNotFound                          → NotFound
/// Database, kind UniqueViolation       → UniqueViolation { field: "username" }
///           "UNIQUE constraint failed: users.username"
/// Database, kind ForeignKeyViolation   → ForeignKeyViolation
/// Database, anything else              → QueryFailed
/// PoolTimedOut                         → PoolExhausted
/// PoolClosed                           → ConnectionFailed
/// ```
///
/// SQLite does not report the offending value, so `UniqueViolation.value`
/// stays empty here. Repositories that know it fill it in.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Row", ""),

            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    DbError::duplicate(constrained_column(db_err.message()), "")
                }
                ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation {
                    message: db_err.message().to_string(),
                },
                _ => DbError::QueryFailed(db_err.message().to_string()),
            },

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            other => DbError::Internal(other.to_string()),
        }
    }
}

/// `"UNIQUE constraint failed: users.username"` → `"username"`.
fn constrained_column(message: &str) -> String {
    message
        .rsplit(": ")
        .next()
        .and_then(|target| target.split(", ").next())
        .map(|column| column.rsplit('.').next().unwrap_or(column))
        .unwrap_or("unknown")
        .to_string()
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Hands database failures to the engines.
///
/// Unique violations keep their field and value so the account service can
/// report a taken username; everything else becomes an opaque backend error.
impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { field, value } => StoreError::Duplicate { field, value },
            other => StoreError::backend(other),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_maps_to_duplicate() {
        let store_err: StoreError = DbError::duplicate("username", "test").into();
        assert!(matches!(
            store_err,
            StoreError::Duplicate { ref field, ref value } if field == "username" && value == "test"
        ));
    }

    #[test]
    fn test_other_errors_map_to_backend() {
        let store_err: StoreError = DbError::PoolExhausted.into();
        assert!(matches!(store_err, StoreError::Backend(_)));
        assert_eq!(store_err.to_string(), "Connection pool exhausted");
    }

    #[test]
    fn test_constrained_column() {
        assert_eq!(
            constrained_column("UNIQUE constraint failed: users.username"),
            "username"
        );
        assert_eq!(
            constrained_column("UNIQUE constraint failed: cart_items.cart_id, cart_items.position"),
            "cart_id"
        );
        assert_eq!(constrained_column("garbled"), "garbled");
    }

    #[test]
    fn test_row_not_found_mapping() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
