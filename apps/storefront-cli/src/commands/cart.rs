//! Cart commands.

use storefront_core::{Cart, ItemId};

use crate::error::CliResult;
use crate::state::AppContext;

pub async fn add_to_cart(
    ctx: &AppContext,
    username: &str,
    item_id: ItemId,
    quantity: i64,
) -> CliResult<Cart> {
    Ok(ctx.carts().add_to_cart(username, item_id, quantity).await?)
}

/// Removal follows the configured removal policy.
pub async fn remove_from_cart(
    ctx: &AppContext,
    username: &str,
    item_id: ItemId,
    quantity: i64,
) -> CliResult<Cart> {
    Ok(ctx
        .carts()
        .remove_from_cart(username, item_id, quantity)
        .await?)
}

pub async fn get_cart(ctx: &AppContext, username: &str) -> CliResult<Cart> {
    Ok(ctx.accounts().find_by_username(username).await?.cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::config::StorefrontConfig;
    use crate::error::ErrorCode;
    use storefront_core::RemovalPolicy;

    #[tokio::test]
    async fn test_add_then_remove() {
        let ctx = test_support::context(StorefrontConfig::default()).await;

        add_to_cart(&ctx, "test", 1, 1).await.unwrap();
        let cart = add_to_cart(&ctx, "test", 2, 2).await.unwrap();
        assert_eq!(cart.total.to_string(), "$6.97");

        let cart = remove_from_cart(&ctx, "test", 2, 1).await.unwrap();
        assert_eq!(cart.total.to_string(), "$4.98");
        assert_eq!(get_cart(&ctx, "test").await.unwrap(), cart);
    }

    #[tokio::test]
    async fn test_default_policy_allows_negative_total() {
        let ctx = test_support::context(StorefrontConfig::default()).await;

        let cart = remove_from_cart(&ctx, "test", 2, 1).await.unwrap();
        assert_eq!(cart.total.cents(), -199);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_configured_policy_is_used() {
        let mut config = StorefrontConfig::default();
        config.cart.removal_policy = RemovalPolicy::RejectIfInsufficient;
        let ctx = test_support::context(config).await;

        let err = remove_from_cart(&ctx, "test", 2, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(get_cart(&ctx, "test").await.unwrap().total.is_zero());
    }

    #[tokio::test]
    async fn test_unknown_item() {
        let ctx = test_support::context(StorefrontConfig::default()).await;
        let err = add_to_cart(&ctx, "test", 77, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Item not found: 77");
    }
}
