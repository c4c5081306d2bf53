//! Top-level CLI error.

use catalog_browser_storefront::{CartError, CatalogError, ViewError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("View error: {0}")]
    View(#[from] ViewError),

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// More products than fit the id space were requested.
    #[error("Cannot generate {0} products")]
    SeedCount(u32),
}
