//! # User Repository
//!
//! Users are always returned together with their cart.
//!
//! ## Registration
//! ```text
//! BEGIN
//!   INSERT INTO users (username, password_hash)   ── UNIQUE(username)
//!   INSERT INTO carts (user_id, total_cents = 0)  ── UNIQUE(user_id)
//! COMMIT
//! ```

use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::cart::CartRepository;
use storefront_core::{Cart, Money, NewUser, User, UserId};

#[derive(Debug, FromRow)]
struct UserRow {
    id: UserId,
    username: String,
    password_hash: String,
}

/// Repository for user operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    pub async fn get_by_id(&self, id: UserId) -> DbResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        self.with_cart(row).await
    }

    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        debug!(username = %username, "Loading user");

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        self.with_cart(row).await
    }

    /// Creates a user and their empty cart in one transaction.
    ///
    /// ## Errors
    /// `UniqueViolation { field: "username", .. }` when the name is taken.
    pub async fn create(&self, user: &NewUser) -> DbResult<User> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?1, ?2)")
            .bind(&user.username)
            .bind(&user.password_hash)
            .execute(&mut *tx)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::UniqueViolation { .. } => DbError::duplicate("username", &user.username),
                other => other,
            })?;
        let user_id = inserted.last_insert_rowid();

        let cart = sqlx::query("INSERT INTO carts (user_id, total_cents) VALUES (?1, ?2)")
            .bind(user_id)
            .bind(Money::zero())
            .execute(&mut *tx)
            .await?;
        let cart_id = cart.last_insert_rowid();

        tx.commit().await?;

        info!(user_id, cart_id, username = %user.username, "User registered");

        Ok(User {
            id: user_id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            cart: Cart::empty(cart_id, user_id),
        })
    }

    /// Counts registered users.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn with_cart(&self, row: Option<UserRow>) -> DbResult<Option<User>> {
        let Some(row) = row else {
            return Ok(None);
        };

        let cart = CartRepository::new(self.pool.clone())
            .find_by_user(row.id)
            .await?
            .ok_or_else(|| DbError::not_found("Cart for user", row.id.to_string()))?;

        Ok(Some(User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            cart,
        }))
    }
}
