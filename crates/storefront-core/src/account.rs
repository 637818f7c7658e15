//! # Account Service
//!
//! Registration and user lookup.
//!
//! ## Registration Flow
//! ```text
//! CreateUserRequest { username, password, confirm_password }
//!      │
//!      ├── validate_username / validate_password ── → ValidationError
//!      ├── argon2 hash (random salt, PHC string)
//!      └── AccountStore::create_user ── user + empty cart, one transaction
//!               │
//!               └── username taken → ValidationError::Duplicate
//! ```

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult, StoreError, ValidationError};
use crate::store::AccountStore;
use crate::types::{NewUser, User, UserId};
use crate::validation::{normalize_username, validate_password, validate_username};

/// Registration input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Creates and looks up users.
pub struct AccountService<S> {
    store: Arc<S>,
}

impl<S: AccountStore> AccountService<S> {
    pub fn new(store: Arc<S>) -> Self {
        AccountService { store }
    }

    /// Registers a user. The returned user owns a fresh, empty cart.
    pub async fn create_user(&self, request: CreateUserRequest) -> CoreResult<User> {
        validate_username(&request.username)?;
        validate_password(&request.password, &request.confirm_password)?;

        let username = normalize_username(&request.username).to_string();
        let password_hash = hash_password(&request.password)?;

        let user = self
            .store
            .create_user(NewUser {
                username,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Duplicate { field, value } => {
                    CoreError::Validation(ValidationError::Duplicate { field, value })
                }
                other => CoreError::Store(other),
            })?;

        info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    pub async fn find_by_id(&self, id: UserId) -> CoreResult<User> {
        debug!(id, "Looking up user by id");
        self.store
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| CoreError::UserNotFound(id.to_string()))
    }

    pub async fn find_by_username(&self, username: &str) -> CoreResult<User> {
        let username = normalize_username(username);
        debug!(username, "Looking up user by username");
        self.store
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| CoreError::UserNotFound(username.to_string()))
    }
}

/// Hashes a password for storage.
fn hash_password(password: &str) -> CoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CoreError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use argon2::{PasswordHash, PasswordVerifier};

    fn request(username: &str, password: &str, confirm: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_with_empty_cart() {
        let store = MemoryStore::new();
        let accounts = AccountService::new(Arc::clone(&store));

        let user = accounts
            .create_user(request("alice", "password1", "password1"))
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        assert!(user.cart.is_empty());
        assert!(user.cart.total.is_zero());
        assert_eq!(user.cart.user_id, user.id);

        let parsed = PasswordHash::new(&user.password_hash).unwrap();
        assert!(Argon2::default()
            .verify_password(b"password1", &parsed)
            .is_ok());
    }

    #[tokio::test]
    async fn test_create_user_rejects_bad_input() {
        let store = MemoryStore::new();
        let accounts = AccountService::new(Arc::clone(&store));

        let err = accounts
            .create_user(request("", "password1", "password1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { .. })
        ));

        let err = accounts
            .create_user(request("bob", "short", "short"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::TooShort { .. })
        ));

        let err = accounts
            .create_user(request("bob", "password1", "password2"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Mismatch { .. })
        ));

        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let store = MemoryStore::seeded();
        let accounts = AccountService::new(Arc::clone(&store));

        let err = accounts
            .create_user(request("test", "password1", "password1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { ref value, .. }) if value == "test"
        ));
    }

    #[tokio::test]
    async fn test_lookups() {
        let store = MemoryStore::seeded();
        let accounts = AccountService::new(Arc::clone(&store));

        let user = accounts.find_by_username("test").await.unwrap();
        let same = accounts.find_by_id(user.id).await.unwrap();
        assert_eq!(same.username, "test");

        let padded = accounts.find_by_username("  test  ").await.unwrap();
        assert_eq!(padded.id, user.id);

        assert!(matches!(
            accounts.find_by_username("ghost").await,
            Err(CoreError::UserNotFound(_))
        ));
        assert!(matches!(
            accounts.find_by_id(4040).await,
            Err(CoreError::UserNotFound(ref id)) if id == "4040"
        ));
    }
}
