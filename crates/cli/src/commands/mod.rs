//! Subcommand implementations.

pub mod browse;
pub mod seed;
pub mod session;

use std::fs;

use catalog_browser_core::Product;
use catalog_browser_storefront::Catalog;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::CatalogSource;
use crate::config::CliConfig;
use crate::error::CliError;

/// Load the catalog from a JSON file, or generate one.
pub fn load_catalog(source: &CatalogSource, config: &CliConfig) -> Result<Catalog, CliError> {
    let products: Vec<Product> = if let Some(path) = &source.catalog {
        info!(path = %path.display(), "Loading catalog from file");
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    } else {
        let mut rng = match source.rng_seed.or(config.rng_seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        seed::generate(config.seed_count, &mut rng, chrono::Utc::now())?
    };

    let catalog = Catalog::new(products)?;
    info!(products = catalog.len(), "Catalog ready");
    Ok(catalog)
}
