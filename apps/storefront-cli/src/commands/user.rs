//! User commands.

use storefront_core::{CreateUserRequest, User, UserId};
use tracing::info;

use crate::error::CliResult;
use crate::state::AppContext;

/// Registers a user. The password hash never leaves the core; the printed
/// user carries the id and the empty cart.
pub async fn create_user(
    ctx: &AppContext,
    username: String,
    password: String,
    confirm_password: String,
) -> CliResult<User> {
    let user = ctx
        .accounts()
        .create_user(CreateUserRequest {
            username,
            password,
            confirm_password,
        })
        .await?;

    info!(user_id = user.id, "Registered user");
    Ok(user)
}

pub async fn get_user(ctx: &AppContext, username: &str) -> CliResult<User> {
    Ok(ctx.accounts().find_by_username(username).await?)
}

pub async fn get_user_by_id(ctx: &AppContext, id: UserId) -> CliResult<User> {
    Ok(ctx.accounts().find_by_id(id).await?)
}
