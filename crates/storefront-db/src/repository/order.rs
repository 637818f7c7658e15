//! # Order Repository
//!
//! Inserts order snapshots and reads order history.
//!
//! ## Snapshot Pattern
//! Order entries are copied into `order_items` at submission. Nothing ever
//! updates an order afterwards, so later cart changes cannot reach it.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use crate::repository::ITEM_COLUMNS;
use storefront_core::{Item, Money, NewOrder, Order, OrderId, UserId};

#[derive(Debug, FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    total_cents: Money,
    created_at: DateTime<Utc>,
}

/// Repository for order operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts an order and its entries in one transaction.
    ///
    /// The id comes from SQLite and `created_at` is the current UTC time.
    pub async fn insert(&self, order: &NewOrder) -> DbResult<Order> {
        let created_at = Utc::now();

        debug!(
            user_id = order.user_id,
            entries = order.items.len(),
            total = %order.total,
            "Inserting order"
        );

        let mut tx = self.pool.begin().await?;

        let result =
            sqlx::query("INSERT INTO orders (user_id, total_cents, created_at) VALUES (?1, ?2, ?3)")
                .bind(order.user_id)
                .bind(order.total)
                .bind(created_at)
                .execute(&mut *tx)
                .await?;
        let order_id = result.last_insert_rowid();

        for (position, item) in order.items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO order_items (order_id, position, item_id) VALUES (?1, ?2, ?3)",
            )
            .bind(order_id)
            .bind(position as i64)
            .bind(item.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Order {
            id: order_id,
            user_id: order.user_id,
            items: order.items.clone(),
            total: order.total,
            created_at,
        })
    }

    pub async fn get_by_id(&self, id: OrderId) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, total_cents, created_at FROM orders WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// All orders of a user in insertion order.
    pub async fn find_by_user(&self, user_id: UserId) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, total_cents, created_at FROM orders \
             WHERE user_id = ?1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            orders.push(self.hydrate(row).await?);
        }

        debug!(user_id, count = orders.len(), "Loaded orders");
        Ok(orders)
    }

    /// Counts orders across all users.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn hydrate(&self, row: OrderRow) -> DbResult<Order> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM order_items oi \
             JOIN items i ON i.id = oi.item_id \
             WHERE oi.order_id = ?1 \
             ORDER BY oi.position",
            ITEM_COLUMNS
        ))
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Order {
            id: row.id,
            user_id: row.user_id,
            items,
            total: row.total_cents,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use storefront_core::{Money, NewItem, NewOrder, NewUser};

    #[tokio::test]
    async fn test_insert_and_history() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let widget = db
            .items()
            .insert(&NewItem {
                name: "Round Widget".into(),
                price: Money::from_cents(299),
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

        let first = db
            .orders()
            .insert(&NewOrder {
                user_id: user.id,
                items: vec![widget.clone(), widget.clone()],
                total: Money::from_cents(598),
            })
            .await
            .unwrap();
        let second = db
            .orders()
            .insert(&NewOrder {
                user_id: user.id,
                items: vec![],
                total: Money::zero(),
            })
            .await
            .unwrap();

        let history = db.orders().find_by_user(user.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, first.id);
        assert_eq!(history[0].items, first.items);
        assert_eq!(history[0].total.cents(), 598);
        assert_eq!(history[1].id, second.id);
        assert!(history[1].items.is_empty());

        let fetched = db.orders().get_by_id(first.id).await.unwrap().unwrap();
        assert_eq!(
            fetched.created_at.timestamp_millis(),
            first.created_at.timestamp_millis()
        );

        assert!(db.orders().find_by_user(user.id + 1).await.unwrap().is_empty());
        assert_eq!(db.orders().count().await.unwrap(), 2);
    }
}
