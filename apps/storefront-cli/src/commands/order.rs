//! Order commands.

use storefront_core::Order;

use crate::error::CliResult;
use crate::state::AppContext;

/// Submits the user's cart. Whether the cart is emptied afterwards depends
/// on `orders.clear_cart_on_submit`.
pub async fn submit_order(ctx: &AppContext, username: &str) -> CliResult<Order> {
    Ok(ctx.orders().submit(username).await?)
}

pub async fn get_orders(ctx: &AppContext, username: &str) -> CliResult<Vec<Order>> {
    Ok(ctx.orders().get_orders_for_user(username).await?)
}
