//! # Storefront Configuration
//!
//! TOML configuration for the command line front end.
//!
//! ## Load Order
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌──────────────────────┐
//! │   Defaults   │ ─► │ storefront.toml  │ ─► │ STOREFRONT_* env     │
//! └──────────────┘    └──────────────────┘    └──────────────────────┘
//!                                                        │
//!                                                        ▼
//!                                                   validate()
//! ```
//!
//! ## Config File Location
//! - Linux: `~/.config/storefront/storefront.toml`
//! - macOS: `~/Library/Application Support/com.storefront.storefront/storefront.toml`
//! - Windows: `%APPDATA%\storefront\storefront\config\storefront.toml`
//!
//! `--config <PATH>` replaces the default location.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use storefront_core::{CartPolicy, OrderPolicy};
use storefront_db::DbConfig;

/// Default tracing filter when neither the config nor `RUST_LOG` set one.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug,sqlx=warn";

const CONFIG_FILE_NAME: &str = "storefront.toml";
const DATABASE_FILE_NAME: &str = "storefront.db";

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoConfigPath,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file, or `:memory:`. Defaults to the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}
fn default_min_connections() -> u32 {
    1
}
fn default_connect_timeout() -> u64 {
    30
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive string. `RUST_LOG` still wins when set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
///
/// ## Example Config File
/// ```toml
/// [database]
/// path = "/var/lib/storefront/storefront.db"
/// max_connections = 5
/// min_connections = 1
/// connect_timeout_secs = 30
///
/// [cart]
/// removal_policy = "permissive"   # or "clamp_at_zero", "reject_if_insufficient"
///
/// [orders]
/// clear_cart_on_submit = false
///
/// [logging]
/// filter = "info,storefront=debug,sqlx=warn"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub cart: CartPolicy,

    #[serde(default)]
    pub orders: OrderPolicy,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml), skipped when missing
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let db = &self.database;

        if db.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        if db.min_connections > db.max_connections {
            return Err(ConfigError::Invalid(format!(
                "database.min_connections ({}) exceeds max_connections ({})",
                db.min_connections, db.max_connections
            )));
        }

        if matches!(&db.path, Some(path) if path.as_os_str().is_empty()) {
            return Err(ConfigError::Invalid("database.path cannot be empty".into()));
        }

        if let Err(e) = EnvFilter::try_new(&self.logging.filter) {
            return Err(ConfigError::Invalid(format!(
                "logging.filter '{}': {}",
                self.logging.filter, e
            )));
        }

        Ok(())
    }

    /// Applies `STOREFRONT_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("STOREFRONT_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(policy) = lookup("STOREFRONT_REMOVAL_POLICY") {
            match policy.parse() {
                Ok(parsed) => self.cart.removal_policy = parsed,
                Err(e) => warn!(error = %e, "Ignoring STOREFRONT_REMOVAL_POLICY"),
            }
        }

        if let Some(clear) = lookup("STOREFRONT_CLEAR_CART_ON_SUBMIT") {
            match clear.parse::<bool>() {
                Ok(parsed) => self.orders.clear_cart_on_submit = parsed,
                Err(_) => warn!(value = %clear, "Ignoring STOREFRONT_CLEAR_CART_ON_SUBMIT"),
            }
        }

        if let Some(filter) = lookup("STOREFRONT_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Default config file location for the platform.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Database path to open: the configured one, else the platform data
    /// directory, else `storefront.db` in the working directory.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.database.path {
            return path.clone();
        }

        ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
    }

    /// Builds the pool configuration.
    pub fn to_db_config(&self) -> DbConfig {
        let path = self.database_path();
        if path.as_os_str() == ":memory:" {
            return DbConfig::in_memory();
        }

        DbConfig::new(path)
            .max_connections(self.database.max_connections)
            .min_connections(self.database.min_connections)
            .connect_timeout(Duration::from_secs(self.database.connect_timeout_secs))
    }

    pub fn cart_policy(&self) -> CartPolicy {
        self.cart
    }

    pub fn order_policy(&self) -> OrderPolicy {
        self.orders
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
