//! # CLI Error Type
//!
//! Every failure of a subcommand ends up as a [`CliError`], printed as JSON
//! on stdout with a non-zero exit status.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront cart add --user test --item 9                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  CliResult<T>                                                    │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  CoreError::ItemNotFound("9") ──► CliError { NOT_FOUND, .. }     │  │
//! │  │  DbError::QueryFailed(..)     ──► CliError { DATABASE_ERROR, .. }│  │
//! │  │  ConfigError::Parse(..)       ──► CliError { CONFIG_ERROR, .. }  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  {"code": "NOT_FOUND", "message": "Item not found: 9"}   exit 3         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures are logged with their detail and reported with a
//! generic message.

use serde::Serialize;
use storefront_core::{CoreError, StoreError, ValidationError};
use storefront_db::DbError;

use crate::config::ConfigError;

/// Error printed by the CLI when a command fails.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "User not found: ghost"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

pub type CliResult<T> = Result<T, CliError>;

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// User or item does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The request clashes with existing state (taken username, short cart)
    Conflict,

    /// Database operation failed
    DatabaseError,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit status for this code.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::ValidationError => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::Conflict => 4,
            ErrorCode::DatabaseError => 5,
            ErrorCode::ConfigError => 6,
        }
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UserNotFound(name) => CliError::not_found("User", &name),
            CoreError::ItemNotFound(id) => CliError::not_found("Item", &id),
            e @ CoreError::InsufficientQuantity { .. } => {
                CliError::new(ErrorCode::Conflict, e.to_string())
            }
            e @ CoreError::AmountOverflow => CliError::validation(e.to_string()),
            CoreError::Validation(e @ ValidationError::Duplicate { .. }) => {
                CliError::new(ErrorCode::Conflict, e.to_string())
            }
            CoreError::Validation(e) => CliError::validation(e.to_string()),
            CoreError::Store(StoreError::Duplicate { field, value }) => CliError::new(
                ErrorCode::Conflict,
                format!("{} '{}' already exists", field, value),
            ),
            CoreError::Store(StoreError::Backend(e)) => {
                tracing::error!("Store operation failed: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            CoreError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                CliError::internal("Internal error")
            }
        }
    }
}

/// Converts database errors to CLI errors.
impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CliError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => CliError::new(
                ErrorCode::Conflict,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                CliError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            other => {
                tracing::error!("Database operation failed: {}", other);
                CliError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("Failed to encode output: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_mapping() {
        let err = CliError::from(CoreError::UserNotFound("ghost".into()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "User not found: ghost");
        assert_eq!(err.exit_code(), 3);

        let err = CliError::from(CoreError::ItemNotFound("9".into()));
        assert_eq!(err.message, "Item not found: 9");
    }

    #[test]
    fn test_validation_mapping() {
        let err = CliError::from(CoreError::Validation(ValidationError::MustBePositive {
            field: "quantity".into(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "quantity must be positive");

        let err = CliError::from(CoreError::Validation(ValidationError::Duplicate {
            field: "username".into(),
            value: "test".into(),
        }));
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[test]
    fn test_insufficient_quantity_is_conflict() {
        let err = CliError::from(CoreError::InsufficientQuantity {
            item_id: 1,
            present: 0,
            requested: 2,
        });
        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(err.message.contains("only 0 in cart"));
    }

    #[test]
    fn test_backend_errors_hide_detail() {
        let err = CliError::from(CoreError::Store(StoreError::backend(DbError::QueryFailed(
            "syntax error near SELECT".into(),
        ))));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");

        let err = CliError::from(DbError::Internal("boom".into()));
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_db_unique_violation_is_conflict() {
        let err = CliError::from(DbError::UniqueViolation {
            field: "username".into(),
            value: "test".into(),
        });
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_config_error_mapping() {
        let err = CliError::from(ConfigError::Invalid("bad".into()));
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert_eq!(err.message, "Invalid configuration: bad");
    }

    #[test]
    fn test_serialization() {
        let err = CliError::not_found("User", "ghost");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "User not found: ghost");

        let code = serde_json::to_value(ErrorCode::ValidationError).unwrap();
        assert_eq!(code, "VALIDATION_ERROR");
    }
}
