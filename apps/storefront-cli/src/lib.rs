//! # Storefront CLI
//!
//! Command line front end for the storefront backend. Each invocation opens
//! the database, runs one command and prints the result as JSON.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Command Execution                                 │
//! │                                                                         │
//! │  1. Parse Arguments ──────────────────────────────────────────────────► │
//! │     • clap derive, global --config                                      │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • storefront.toml, then STOREFRONT_* overrides                      │
//! │                                                                         │
//! │  3. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber on stderr                                      │
//! │     • RUST_LOG wins over logging.filter                                 │
//! │                                                                         │
//! │  4. Connect to Database ──────────────────────────────────────────────► │
//! │     • SQLite with WAL mode, pending migrations applied                  │
//! │                                                                         │
//! │  5. Dispatch ─────────────────────────────────────────────────────────► │
//! │     • JSON result on stdout, or JSON error and non-zero exit            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::{StorefrontConfig, DEFAULT_LOG_FILTER};
use crate::error::CliResult;
use crate::state::AppContext;

/// Loads configuration, runs the parsed command and closes the database.
pub async fn run(cli: Cli) -> CliResult<Value> {
    let config = StorefrontConfig::load(cli.config)?;
    init_tracing(&config.logging.filter);

    debug!(
        removal_policy = %config.cart.removal_policy,
        clear_cart_on_submit = config.orders.clear_cart_on_submit,
        "Configuration loaded"
    );

    let ctx = AppContext::open(&config).await?;
    let result = commands::dispatch(&ctx, cli.command).await;
    ctx.close().await;

    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_core=trace` - Trace one crate
/// - Default: `logging.filter` from the config
///
/// Logs go to stderr so stdout stays valid JSON.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second init (tests) is harmless
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        info!("Storefront CLI starting");
    }
}
