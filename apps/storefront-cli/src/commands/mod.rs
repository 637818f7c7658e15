//! # Command Handlers
//!
//! One module per subcommand group. Handlers take the [`AppContext`] and
//! return a serializable value; [`dispatch`] turns it into JSON.
//!
//! ```text
//! Command ──► dispatch ──► user / item / cart / order / status / seed
//!                                      │
//!                                      ▼
//!                         CliResult<serde_json::Value>
//! ```

pub mod cart;
pub mod item;
pub mod order;
pub mod seed;
pub mod status;
pub mod user;

use serde::Serialize;
use serde_json::Value;

use crate::cli::{CartCommand, Command, ItemCommand, OrderCommand, UserCommand};
use crate::error::CliResult;
use crate::state::AppContext;

/// Runs one command against the context.
pub async fn dispatch(ctx: &AppContext, command: Command) -> CliResult<Value> {
    match command {
        Command::User(UserCommand::Create {
            username,
            password,
            confirm_password,
        }) => json(user::create_user(ctx, username, password, confirm_password).await?),
        Command::User(UserCommand::Show { username }) => {
            json(user::get_user(ctx, &username).await?)
        }
        Command::User(UserCommand::Get { id }) => json(user::get_user_by_id(ctx, id).await?),

        Command::Item(ItemCommand::List) => json(item::list_items(ctx).await?),
        Command::Item(ItemCommand::Show { id }) => json(item::get_item(ctx, id).await?),
        Command::Item(ItemCommand::Search { name }) => {
            json(item::search_items(ctx, &name).await?)
        }

        Command::Cart(CartCommand::Add(line)) => {
            json(cart::add_to_cart(ctx, &line.user, line.item, line.quantity).await?)
        }
        Command::Cart(CartCommand::Remove(line)) => {
            json(cart::remove_from_cart(ctx, &line.user, line.item, line.quantity).await?)
        }
        Command::Cart(CartCommand::Show { user }) => json(cart::get_cart(ctx, &user).await?),

        Command::Order(OrderCommand::Submit { user }) => {
            json(order::submit_order(ctx, &user).await?)
        }
        Command::Order(OrderCommand::History { user }) => {
            json(order::get_orders(ctx, &user).await?)
        }

        Command::Status => json(status::status(ctx).await?),
        Command::Seed { count } => json(seed::seed(ctx, count).await?),
    }
}

fn json<T: Serialize>(value: T) -> CliResult<Value> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
pub(crate) mod test_support {
    use storefront_db::{Database, DbConfig};

    use crate::config::StorefrontConfig;
    use crate::state::AppContext;

    /// In-memory context with the demo catalog and user "test".
    pub async fn context(config: StorefrontConfig) -> AppContext {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ctx = AppContext::with_database(db, &config);
        super::seed::seed(&ctx, 0).await.unwrap();
        super::user::create_user(&ctx, "test".into(), "password".into(), "password".into())
            .await
            .unwrap();
        ctx
    }
}
