//! # Validation Module
//!
//! Input rules shared by the engines and services.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI (clap)                                                   │
//! │  └── Type validation (argument parsing)                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engines / services (Rust)                                    │
//! │  └── THIS MODULE: business rule validation, before any lookup          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE (users.username, carts.user_id)                            │
//! │  └── CHECK (items.price_cents >= 0)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_quantity, validate_username};
//!
//! validate_quantity(2).unwrap();
//! validate_username("test").unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_QUANTITY, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Account Validators
// =============================================================================

/// Canonical form of a username for storage and lookup.
pub fn normalize_username(username: &str) -> &str {
    username.trim()
}

/// Validates a username.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 64 characters
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = normalize_username(username);

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_USERNAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a password and its confirmation.
///
/// ## Rules
/// - Must not be empty
/// - At least 7 characters
/// - Must equal the confirmation exactly
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_password;
///
/// assert!(validate_password("hunter22", "hunter22").is_ok());
/// assert!(validate_password("hunter22", "hunter23").is_err());
/// assert!(validate_password("short", "short").is_err());
/// ```
pub fn validate_password(password: &str, confirm: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    if password != confirm {
        return Err(ValidationError::Mismatch {
            field: "password".to_string(),
            other: "confirm_password".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates an item name: required, at most 200 characters.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a price in cents. Zero is allowed (free items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  cart add --user test --item 1 --quantity 2                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(2) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       ├── qty > MAX_QUANTITY? → Error: "quantity must be at most .."   │
/// │       │                                                                 │
/// │       └── OK → resolve user, resolve item, mutate                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Oversized totals below the bound are still caught by the checked
/// arithmetic in [`crate::money::extend`].
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_QUANTITY {
        return Err(ValidationError::TooLarge {
            field: "quantity".to_string(),
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("test").is_ok());
        assert!(validate_username(&"a".repeat(64)).is_ok());

        assert!(matches!(
            validate_username("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_username(&"a".repeat(65)),
            Err(ValidationError::TooLong { max: 64, .. })
        ));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("1234567", "1234567").is_ok());

        assert!(matches!(
            validate_password("", ""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_password("123456", "123456"),
            Err(ValidationError::TooShort { min: 7, .. })
        ));
        assert!(matches!(
            validate_password("1234567", "7654321"),
            Err(ValidationError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Round Widget").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(matches!(
            validate_quantity(MAX_QUANTITY + 1),
            Err(ValidationError::TooLarge { max: MAX_QUANTITY, .. })
        ));
        assert!(validate_quantity(i64::MAX).is_err());
    }

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("  test "), "test");
        assert_eq!(normalize_username("test"), "test");
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(299).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }
}
