//! # Cart Repository
//!
//! Loads and saves carts.
//!
//! ## Storage Layout
//! ```text
//! carts                           cart_items
//! ┌────┬─────────┬─────────────┐  ┌─────────┬──────────┬─────────┐
//! │ id │ user_id │ total_cents │  │ cart_id │ position │ item_id │
//! ├────┼─────────┼─────────────┤  ├─────────┼──────────┼─────────┤
//! │  1 │       1 │         797 │  │       1 │        0 │       1 │
//! └────┴─────────┴─────────────┘  │       1 │        1 │       2 │
//!                                 │       1 │        2 │       1 │
//!                                 └─────────┴──────────┴─────────┘
//! ```
//!
//! A save rewrites the total and every entry of the cart inside one
//! transaction, so readers see either the old cart or the new one.

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::ITEM_COLUMNS;
use storefront_core::{Cart, CartId, Item, Money, UserId};

#[derive(Debug, FromRow)]
struct CartRow {
    id: CartId,
    user_id: UserId,
    total_cents: Money,
}

/// Repository for cart operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Loads the cart owned by a user.
    pub async fn find_by_user(&self, user_id: UserId) -> DbResult<Option<Cart>> {
        let row = sqlx::query_as::<_, CartRow>(
            "SELECT id, user_id, total_cents FROM carts WHERE user_id = ?1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Loads a cart by its own id.
    pub async fn get_by_id(&self, id: CartId) -> DbResult<Option<Cart>> {
        let row = sqlx::query_as::<_, CartRow>(
            "SELECT id, user_id, total_cents FROM carts WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Replaces the stored total and entries of a cart and returns the
    /// stored state.
    ///
    /// ## Errors
    /// `NotFound` when no cart with this id belongs to `cart.user_id`.
    pub async fn save(&self, cart: &Cart) -> DbResult<Cart> {
        debug!(
            cart_id = cart.id,
            user_id = cart.user_id,
            entries = cart.items.len(),
            total = %cart.total,
            "Saving cart"
        );

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE carts SET total_cents = ?1, updated_at = ?2 WHERE id = ?3 AND user_id = ?4",
        )
        .bind(cart.total)
        .bind(Utc::now())
        .bind(cart.id)
        .bind(cart.user_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Cart", cart.id.to_string()));
        }

        sqlx::query("DELETE FROM cart_items WHERE cart_id = ?1")
            .bind(cart.id)
            .execute(&mut *tx)
            .await?;

        for (position, item) in cart.items.iter().enumerate() {
            sqlx::query("INSERT INTO cart_items (cart_id, position, item_id) VALUES (?1, ?2, ?3)")
                .bind(cart.id)
                .bind(position as i64)
                .bind(item.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.get_by_id(cart.id)
            .await?
            .ok_or_else(|| DbError::not_found("Cart", cart.id.to_string()))
    }

    async fn hydrate(&self, row: CartRow) -> DbResult<Cart> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM cart_items ci \
             JOIN items i ON i.id = ci.item_id \
             WHERE ci.cart_id = ?1 \
             ORDER BY ci.position",
            ITEM_COLUMNS
        ))
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Cart {
            id: row.id,
            user_id: row.user_id,
            items,
            total: row.total_cents,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::{Database, DbConfig};
    use storefront_core::{Cart, Money, NewItem, NewUser};

    async fn setup() -> (Database, Cart, Vec<storefront_core::Item>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let round = db
            .items()
            .insert(&NewItem {
                name: "Round Widget".into(),
                price: Money::from_cents(299),
                description: String::new(),
            })
            .await
            .unwrap();
        let square = db
            .items()
            .insert(&NewItem {
                name: "Square Widget".into(),
                price: Money::from_cents(199),
                description: String::new(),
            })
            .await
            .unwrap();
        let user = db
            .users()
            .create(&NewUser {
                username: "test".into(),
                password_hash: "hash".into(),
            })
            .await
            .unwrap();
        (db, user.cart, vec![round, square])
    }

    #[tokio::test]
    async fn test_save_preserves_entry_order() {
        let (db, mut cart, items) = setup().await;

        cart.items = vec![items[1].clone(), items[0].clone(), items[1].clone()];
        cart.total = Money::from_cents(697);

        let saved = db.carts().save(&cart).await.unwrap();
        assert_eq!(saved, cart);

        let loaded = db.carts().find_by_user(cart.user_id).await.unwrap().unwrap();
        let ids: Vec<_> = loaded.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![items[1].id, items[0].id, items[1].id]);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_entries() {
        let (db, mut cart, items) = setup().await;

        cart.items = vec![items[0].clone(), items[0].clone()];
        cart.total = Money::from_cents(598);
        db.carts().save(&cart).await.unwrap();

        cart.items.truncate(1);
        cart.total = Money::from_cents(299);
        let saved = db.carts().save(&cart).await.unwrap();

        assert_eq!(saved.items.len(), 1);
        assert_eq!(saved.total.cents(), 299);
    }

    #[tokio::test]
    async fn test_negative_total_round_trips() {
        let (db, mut cart, _) = setup().await;

        cart.total = Money::from_cents(-299);
        let saved = db.carts().save(&cart).await.unwrap();
        assert_eq!(saved.total.to_string(), "-$2.99");
    }

    #[tokio::test]
    async fn test_save_unknown_cart() {
        let (db, _, _) = setup().await;
        let ghost = Cart::empty(999, 999);
        let err = db.carts().save(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_unknown_item_entry_rolls_back() {
        let (db, mut cart, items) = setup().await;

        cart.items = vec![items[0].clone()];
        cart.total = Money::from_cents(299);
        db.carts().save(&cart).await.unwrap();

        let mut bogus = items[0].clone();
        bogus.id = 4242;
        let mut broken = cart.clone();
        broken.items.push(bogus);
        broken.total = Money::from_cents(9999);

        let err = db.carts().save(&broken).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        let loaded = db.carts().find_by_user(cart.user_id).await.unwrap().unwrap();
        assert_eq!(loaded, cart);
    }
}
