//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CENDEV_DATA_DIR` - Directory for persisted snapshots (unset: in-memory only)
//! - `CENDEV_AUTH_LATENCY_MS` - Simulated auth round trip in milliseconds (default: 1000)
//! - `CENDEV_TAX_RATE` - Sales tax rate as a decimal fraction (default: 0.10)
//! - `CENDEV_SEED_DEMO_USERS` - Seed the demo accounts into an empty directory (default: true)

use std::path::PathBuf;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::checkout::DEFAULT_TAX_RATE;

const DEFAULT_AUTH_LATENCY_MS: u64 = 1000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Where snapshots are written. `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    /// How long login and registration take to answer.
    pub auth_latency: Duration,
    /// Tax rate applied to the cart subtotal.
    pub tax_rate: Decimal,
    /// Whether to seed the demo accounts into an absent directory.
    pub seed_demo_users: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            auth_latency: Duration::from_millis(DEFAULT_AUTH_LATENCY_MS),
            tax_rate: DEFAULT_TAX_RATE,
            seed_demo_users: true,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot
    /// be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = get_optional_env(&lookup, "CENDEV_DATA_DIR").map(PathBuf::from);

        let latency_ms = get_env_or_default(
            &lookup,
            "CENDEV_AUTH_LATENCY_MS",
            &DEFAULT_AUTH_LATENCY_MS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| invalid("CENDEV_AUTH_LATENCY_MS", e))?;

        let tax_rate = get_env_or_default(&lookup, "CENDEV_TAX_RATE", &DEFAULT_TAX_RATE.to_string())
            .parse::<Decimal>()
            .map_err(|e| invalid("CENDEV_TAX_RATE", e))?;
        if tax_rate.is_sign_negative() || tax_rate > Decimal::ONE {
            return Err(invalid("CENDEV_TAX_RATE", "must be between 0 and 1"));
        }

        let seed_demo_users = parse_bool(
            "CENDEV_SEED_DEMO_USERS",
            &get_env_or_default(&lookup, "CENDEV_SEED_DEMO_USERS", "true"),
        )?;

        Ok(Self {
            data_dir,
            auth_latency: Duration::from_millis(latency_ms),
            tax_rate,
            seed_demo_users,
        })
    }

    /// Use `dir` for snapshots.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Use a different simulated auth latency.
    #[must_use]
    pub const fn with_auth_latency(mut self, latency: Duration) -> Self {
        self.auth_latency = latency;
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating empty values as unset.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Get a variable with a default value.
fn get_env_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(invalid(key, format!("expected a boolean, got '{other}'"))),
    }
}

fn invalid(key: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}
