//! Store trait implementations for [`Database`].
//!
//! Each method delegates to a repository and converts `DbError` into the
//! core's `StoreError`.

use async_trait::async_trait;

use crate::pool::Database;
use storefront_core::error::StoreResult;
use storefront_core::{
    AccountStore, Cart, CartStore, CatalogStore, Item, ItemId, NewOrder, NewUser, Order,
    OrderStore, User, UserId,
};

#[async_trait]
impl CatalogStore for Database {
    async fn find_item_by_id(&self, id: ItemId) -> StoreResult<Option<Item>> {
        Ok(self.items().get_by_id(id).await?)
    }

    async fn find_items_by_name(&self, name: &str) -> StoreResult<Vec<Item>> {
        Ok(self.items().find_by_name(name).await?)
    }

    async fn list_items(&self) -> StoreResult<Vec<Item>> {
        Ok(self.items().list().await?)
    }
}

#[async_trait]
impl AccountStore for Database {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self.users().get_by_username(username).await?)
    }

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.users().get_by_id(id).await?)
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        Ok(self.users().create(&user).await?)
    }
}

#[async_trait]
impl CartStore for Database {
    async fn save_cart(&self, cart: &Cart) -> StoreResult<Cart> {
        Ok(self.carts().save(cart).await?)
    }
}

#[async_trait]
impl OrderStore for Database {
    async fn save_order(&self, order: NewOrder) -> StoreResult<Order> {
        Ok(self.orders().insert(&order).await?)
    }

    async fn find_orders_by_user(&self, user: &User) -> StoreResult<Vec<Order>> {
        Ok(self.orders().find_by_user(user.id).await?)
    }
}

// =============================================================================
// End-to-End Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use storefront_core::{
        AccountService, CartEngine, CartPolicy, CatalogService, CoreError, CreateUserRequest,
        OrderEngine, OrderPolicy, RemovalPolicy, ValidationError,
    };

    use crate::seed::seed_catalog;
    use crate::{Database, DbConfig};

    async fn setup() -> Arc<Database> {
        let db = Arc::new(Database::new(DbConfig::in_memory()).await.unwrap());
        seed_catalog(&db, 0).await.unwrap();
        AccountService::new(Arc::clone(&db))
            .create_user(CreateUserRequest {
                username: "test".into(),
                password: "password".into(),
                confirm_password: "password".into(),
            })
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_cart_to_order_flow() {
        let db = setup().await;
        let carts = CartEngine::new(Arc::clone(&db));
        let orders = OrderEngine::new(Arc::clone(&db));

        let cart = carts.add_to_cart("test", 1, 1).await.unwrap();
        assert_eq!(cart.total.to_string(), "$2.99");

        let cart = carts.add_to_cart("test", 2, 2).await.unwrap();
        assert_eq!(cart.total.to_string(), "$6.97");
        assert_eq!(cart.item_count(), 3);

        let order = orders.submit("test").await.unwrap();
        assert_eq!(order.total, cart.total);
        assert_eq!(order.items, cart.items);

        // The cart is kept after submit
        let user = db.users().get_by_username("test").await.unwrap().unwrap();
        assert_eq!(user.cart, cart);

        carts.remove_from_cart("test", 2, 2).await.unwrap();
        let history = orders.get_orders_for_user("test").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].items.len(), 3);
        assert_eq!(history[0].total.to_string(), "$6.97");
    }

    #[tokio::test]
    async fn test_permissive_removal_persists_negative_total() {
        let db = setup().await;
        let carts = CartEngine::new(Arc::clone(&db));

        let cart = carts.remove_from_cart("test", 1, 1).await.unwrap();
        assert_eq!(cart.total.to_string(), "-$2.99");

        let user = db.users().get_by_username("test").await.unwrap().unwrap();
        assert_eq!(user.cart.total.cents(), -299);
    }

    #[tokio::test]
    async fn test_reject_policy_against_sqlite() {
        let db = setup().await;
        let carts = CartEngine::with_policy(
            Arc::clone(&db),
            CartPolicy {
                removal_policy: RemovalPolicy::RejectIfInsufficient,
            },
        );

        carts.add_to_cart("test", 1, 1).await.unwrap();
        let err = carts.remove_from_cart("test", 1, 3).await.unwrap_err();
        assert!(matches!(err, CoreError::InsufficientQuantity { .. }));

        let user = db.users().get_by_username("test").await.unwrap().unwrap();
        assert_eq!(user.cart.item_count(), 1);
        assert_eq!(user.cart.total.cents(), 299);
    }

    #[tokio::test]
    async fn test_clear_cart_on_submit_against_sqlite() {
        let db = setup().await;
        let carts = CartEngine::new(Arc::clone(&db));
        let orders = OrderEngine::with_policy(
            Arc::clone(&db),
            OrderPolicy {
                clear_cart_on_submit: true,
            },
        );

        carts.add_to_cart("test", 2, 3).await.unwrap();
        let order = orders.submit("test").await.unwrap();
        assert_eq!(order.items.len(), 3);

        let user = db.users().get_by_username("test").await.unwrap().unwrap();
        assert!(user.cart.is_empty());
        assert!(user.cart.total.is_zero());
    }

    #[tokio::test]
    async fn test_not_found_paths() {
        let db = setup().await;
        let carts = CartEngine::new(Arc::clone(&db));
        let orders = OrderEngine::new(Arc::clone(&db));

        assert!(matches!(
            carts.add_to_cart("ghost", 1, 1).await,
            Err(CoreError::UserNotFound(_))
        ));
        assert!(matches!(
            carts.add_to_cart("test", 9_999_999, 1).await,
            Err(CoreError::ItemNotFound(_))
        ));
        assert!(matches!(
            orders.submit("ghost").await,
            Err(CoreError::UserNotFound(_))
        ));
        assert!(orders.get_orders_for_user("test").await.unwrap().is_empty());

        let user = db.users().get_by_username("test").await.unwrap().unwrap();
        assert!(user.cart.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let db = setup().await;
        let err = AccountService::new(Arc::clone(&db))
            .create_user(CreateUserRequest {
                username: "test".into(),
                password: "password".into(),
                confirm_password: "password".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { ref field, .. }) if field == "username"
        ));
    }

    #[tokio::test]
    async fn test_catalog_service_against_sqlite() {
        let db = setup().await;
        let catalog = CatalogService::new(Arc::clone(&db));

        let items = catalog.items().await.unwrap();
        assert_eq!(items[0].name, "Round Widget");
        assert_eq!(items[1].name, "Square Widget");

        let rounds = catalog.items_by_name("Round Widget").await.unwrap();
        assert_eq!(rounds.len(), 1);

        assert!(matches!(
            catalog.items_by_name("Nothing").await,
            Err(CoreError::ItemNotFound(_))
        ));
    }
}
