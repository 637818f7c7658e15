//! Seed command.

use storefront_db::seed::{seed_catalog, SeedReport};

use crate::error::CliResult;
use crate::state::AppContext;

pub async fn seed(ctx: &AppContext, count: usize) -> CliResult<SeedReport> {
    Ok(seed_catalog(ctx.db(), count).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use storefront_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_seed_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ctx = AppContext::with_database(db, &StorefrontConfig::default());

        let report = seed(&ctx, 3).await.unwrap();
        assert_eq!(report.inserted, 5);

        let again = seed(&ctx, 3).await.unwrap();
        assert!(again.skipped);
        assert_eq!(again.inserted, 0);
    }
}
