//! # Placement Configuration
//!
//! Layered configuration for the placement queue and the state store.
//!
//! ## Sources (lowest to highest precedence)
//!
//! 1. Built-in defaults
//! 2. `config/placement.toml`
//! 3. `config/placement.{environment}.toml`
//! 4. Environment variables prefixed `PLACEMENT__`, e.g. `PLACEMENT__STORE__BACKEND=postgres`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use session_placement::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let queue = &manager.config().queue;
//! println!("queue {} in {}", queue.name, queue.home_region);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use error::{ConfigError, ConfigResult};
pub use loader::{detect_environment, ConfigManager};

use crate::policy::PolicyConfig;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub queue: QueueConfig,
    pub store: StoreConfig,
}

/// Placement queue settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Name used when requesting a placement
    pub name: String,
    pub home_region: String,
    /// Rank destinations by location first; required for per-request location overrides
    pub prioritize_location: bool,
    /// Topic the engine publishes lifecycle notifications to
    pub notification_target: Option<String>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            name: "my-session-placement-queue".to_string(),
            home_region: "us-east-1".to_string(),
            prioritize_location: false,
            notification_target: None,
        }
    }
}

impl From<&QueueConfig> for PolicyConfig {
    fn from(queue: &QueueConfig) -> Self {
        PolicyConfig::new(queue.prioritize_location, queue.home_region.clone())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Postgres,
}

/// State store settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Required for the postgres backend
    pub database_url: Option<String>,
    pub table_name: String,
    pub retention_days: u32,
    pub max_connections: u32,
    pub reclaim_interval_seconds: u64,
    /// Create the table on bootstrap instead of relying on `migrations/`
    pub auto_create_schema: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            database_url: None,
            table_name: "session_placement_state".to_string(),
            retention_days: 14,
            max_connections: 5,
            reclaim_interval_seconds: 300,
            auto_create_schema: false,
        }
    }
}

impl StoreConfig {
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.retention_days))
    }

    pub fn reclaim_interval(&self) -> Duration {
        Duration::from_secs(self.reclaim_interval_seconds)
    }
}

impl PlacementConfig {
    /// Reject values that would fail later at bootstrap or submission time
    pub fn validate(&self) -> ConfigResult<()> {
        if self.queue.name.trim().is_empty() {
            return Err(ConfigError::missing_value("queue.name"));
        }
        if self.queue.home_region.trim().is_empty() {
            return Err(ConfigError::missing_value("queue.home_region"));
        }

        let store = &self.store;
        if store.backend == StoreBackend::Postgres
            && store.database_url.as_deref().map_or(true, str::is_empty)
        {
            return Err(ConfigError::missing_value("store.database_url"));
        }
        if !is_sql_identifier(&store.table_name) {
            return Err(ConfigError::invalid_value(
                "store.table_name",
                store.table_name.clone(),
                "must start with a letter or underscore and contain only ASCII letters, digits and underscores",
            ));
        }
        if store.retention_days == 0 {
            return Err(ConfigError::invalid_value(
                "store.retention_days",
                "0",
                "retention must be at least one day",
            ));
        }
        if store.max_connections == 0 {
            return Err(ConfigError::invalid_value(
                "store.max_connections",
                "0",
                "pool needs at least one connection",
            ));
        }
        if store.reclaim_interval_seconds == 0 {
            return Err(ConfigError::invalid_value(
                "store.reclaim_interval_seconds",
                "0",
                "reclaim interval must be positive",
            ));
        }

        Ok(())
    }
}

fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
