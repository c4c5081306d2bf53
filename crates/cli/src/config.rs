//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_SEED_COUNT` - Products in a generated catalog (default: 1000)
//! - `CATALOG_PAGE_SIZE` - Products per page (default: 10)
//! - `CATALOG_RNG_SEED` - Seed for reproducible catalog generation
//! - `CATALOG_LOG_JSON` - Emit logs as JSON (default: false)
//! - `RUST_LOG` - Log filter (default: info)

use std::str::FromStr;

use thiserror::Error;

const DEFAULT_SEED_COUNT: u32 = 1000;
const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Products generated when no catalog file is given
    pub seed_count: u32,
    /// Products per page
    pub page_size: usize,
    /// Fixed RNG seed, if any
    pub rng_seed: Option<u64>,
    /// Log as JSON instead of human-readable lines
    pub log_json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            seed_count: DEFAULT_SEED_COUNT,
            page_size: DEFAULT_PAGE_SIZE,
            rng_seed: None,
            log_json: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from the environment (and `.env`, if present).
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let page_size = parse_optional(&lookup, "CATALOG_PAGE_SIZE")?.unwrap_or(defaults.page_size);
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_PAGE_SIZE".to_string(),
                "must be positive".to_string(),
            ));
        }

        Ok(Self {
            seed_count: parse_optional(&lookup, "CATALOG_SEED_COUNT")?
                .unwrap_or(defaults.seed_count),
            page_size,
            rng_seed: parse_optional(&lookup, "CATALOG_RNG_SEED")?,
            log_json: parse_optional(&lookup, "CATALOG_LOG_JSON")?.unwrap_or(defaults.log_json),
        })
    }
}

fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}
