//! Status command.

use storefront_db::DatabaseStatus;
use tracing::warn;

use crate::error::CliResult;
use crate::state::AppContext;

pub async fn status(ctx: &AppContext) -> CliResult<DatabaseStatus> {
    let status = ctx.db().status().await?;
    if !status.migrations.is_current() {
        warn!(
            embedded = status.migrations.embedded,
            applied = status.migrations.applied,
            "Database schema is behind this build"
        );
    }
    Ok(status)
}
