//! Catalog commands.

use storefront_core::{Item, ItemId};

use crate::error::CliResult;
use crate::state::AppContext;

pub async fn list_items(ctx: &AppContext) -> CliResult<Vec<Item>> {
    Ok(ctx.catalog().items().await?)
}

pub async fn get_item(ctx: &AppContext, id: ItemId) -> CliResult<Item> {
    Ok(ctx.catalog().item_by_id(id).await?)
}

/// Items whose name matches exactly. No match is a `NOT_FOUND` error.
pub async fn search_items(ctx: &AppContext, name: &str) -> CliResult<Vec<Item>> {
    Ok(ctx.catalog().items_by_name(name).await?)
}
