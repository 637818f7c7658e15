//! # Seed Data Generator
//!
//! Populates an empty catalog with demo items for development.
//!
//! ## Generated Items
//! The two widgets always come first, so they get ids 1 and 2 in a fresh
//! database:
//! - Round Widget, $2.99
//! - Square Widget, $1.99
//!
//! Further items are generated from shape × size combinations:
//! `"{Size} {Shape} Widget"`, priced $0.99 - $18.98.

use serde::Serialize;
use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;
use storefront_core::{Money, NewItem};

const DEMO_ITEMS: &[(&str, i64, &str)] = &[
    ("Round Widget", 299, "A widget that is round"),
    ("Square Widget", 199, "A widget that is square"),
];

const SHAPES: &[&str] = &[
    "Triangular",
    "Hexagonal",
    "Oval",
    "Star",
    "Spiral",
    "Cubic",
    "Conical",
    "Heart",
];

const SIZES: &[(&str, i64)] = &[
    ("Mini", 0),
    ("Small", 100),
    ("Medium", 250),
    ("Large", 500),
    ("Jumbo", 900),
];

/// Outcome of a seeding run.
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    /// Items inserted by this run.
    pub inserted: usize,
    /// True when the catalog already had items and nothing was inserted.
    pub skipped: bool,
}

/// Inserts the demo widgets plus up to `generated` extra items.
///
/// Does nothing when the catalog is not empty.
pub async fn seed_catalog(db: &Database, generated: usize) -> DbResult<SeedReport> {
    let repo = db.items();

    let existing = repo.count().await?;
    if existing > 0 {
        info!(existing, "Catalog already populated, skipping seed");
        return Ok(SeedReport {
            inserted: 0,
            skipped: true,
        });
    }

    let mut inserted = 0;
    for (name, cents, description) in DEMO_ITEMS {
        repo.insert(&NewItem {
            name: (*name).to_string(),
            price: Money::from_cents(*cents),
            description: (*description).to_string(),
        })
        .await?;
        inserted += 1;
    }

    for item in generated_items().take(generated) {
        repo.insert(&item).await?;
        inserted += 1;
    }

    info!(inserted, "Catalog seeded");
    Ok(SeedReport {
        inserted,
        skipped: false,
    })
}

/// Every shape × size combination, in a stable order.
fn generated_items() -> impl Iterator<Item = NewItem> {
    SHAPES.iter().enumerate().flat_map(|(shape_idx, shape)| {
        SIZES.iter().map(move |(size, addon)| {
            let base = 99 + ((shape_idx as i64 * 137) % 900);
            NewItem {
                name: format!("{} {} Widget", size, shape),
                price: Money::from_cents(base + addon),
                description: format!("A {} widget, {} size", shape.to_lowercase(), size.to_lowercase()),
            }
        })
    })
}
