//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - What every engine operation returns            │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── StoreError       - Failures reported by a store implementation    │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                 │
//! │  └── DbError          - Database failures, mapped into StoreError      │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: DbError → StoreError → CoreError → CliError → stdout            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `UserNotFound` and `ItemNotFound` are expected outcomes, not faults. They
//! are raised before any mutation, so a failed call never leaves a partially
//! updated cart behind.

use thiserror::Error;

use crate::types::ItemId;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by the cart, order, account and catalog operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No user matches the given username or id.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// No catalog item matches the given id or name.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// The cart holds fewer units of an item than a removal asked for.
    ///
    /// Only raised under [`RemovalPolicy::RejectIfInsufficient`].
    ///
    /// [`RemovalPolicy::RejectIfInsufficient`]: crate::types::RemovalPolicy::RejectIfInsufficient
    #[error("Cannot remove {requested} of item {item_id}: only {present} in cart")]
    InsufficientQuantity {
        item_id: ItemId,
        present: usize,
        requested: i64,
    },

    /// A total or line amount does not fit in the money representation.
    #[error("Amount overflow while updating cart total")]
    AmountOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The backing store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Unexpected failure inside the core (e.g., password hashing).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns true for the "does not exist" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::UserNotFound(_) | CoreError::ItemNotFound(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value exceeds its upper bound.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: i64 },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Two fields that must agree do not.
    #[error("{field} does not match {other}")]
    Mismatch { field: String, other: String },

    /// Duplicate value (e.g., username already taken).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Store Error
// =============================================================================

/// Failure reported by a store implementation.
///
/// Stores translate their own errors into this type so the engines never
/// depend on a concrete database crate.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness rule in the store rejected the write.
    #[error("Duplicate {field}: '{value}'")]
    Duplicate { field: String, value: String },

    /// Any other storage failure.
    #[error("{0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps an arbitrary storage error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Backend(Box::new(err))
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for store trait methods.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientQuantity {
            item_id: 7,
            present: 1,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Cannot remove 3 of item 7: only 1 in cart"
        );

        let err = CoreError::UserNotFound("test".to_string());
        assert_eq!(err.to_string(), "User not found: test");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "username".to_string(),
        };
        assert_eq!(err.to_string(), "username is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 7,
        };
        assert_eq!(err.to_string(), "password must be at least 7 characters");
    }

    #[test]
    fn test_conversions_into_core_error() {
        let core_err: CoreError = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let core_err: CoreError = StoreError::backend(io).into();
        assert!(matches!(core_err, CoreError::Store(StoreError::Backend(_))));
        assert!(!core_err.is_not_found());
    }

    #[test]
    fn test_is_not_found() {
        assert!(CoreError::ItemNotFound("1".into()).is_not_found());
        assert!(CoreError::UserNotFound("bob".into()).is_not_found());
        assert!(!CoreError::AmountOverflow.is_not_found());
    }
}
