//! Synthetic catalog generation.
//!
//! Products are spread over a fixed set of categories and brands, priced
//! between 100 and 1000, rated 3.0 to 5.0, and listed within the last 90 days.

use std::io::Write;
use std::path::Path;

use catalog_browser_core::{Price, Product, ProductId, Rating};
use chrono::{DateTime, Duration, Utc};
use rand::seq::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::CliError;

pub const CATEGORIES: &[&str] = &[
    "Electronics",
    "Apparel",
    "Home Goods",
    "Books",
    "Tools",
    "Sports",
];
pub const BRANDS: &[&str] = &["Brand A", "Brand B", "Brand C", "Brand D", "Brand E", "Brand F"];

const LISTING_WINDOW_DAYS: i64 = 90;
const IN_STOCK_PROBABILITY: f64 = 0.95;

/// Generate `count` products with ids `1..=count`.
///
/// # Errors
///
/// Returns [`CliError::SeedCount`] if `count` exceeds the id space.
pub fn generate<R: Rng + ?Sized>(
    count: u32,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<Vec<Product>, CliError> {
    let last_id = i32::try_from(count).map_err(|_| CliError::SeedCount(count))?;
    let window_secs = Duration::days(LISTING_WINDOW_DAYS).num_seconds();

    let products = (1..=last_id)
        .map(|id| {
            let category = CATEGORIES.choose(rng).copied().unwrap_or("Electronics");
            let brand = BRANDS.choose(rng).copied().unwrap_or("Brand A");
            let price = Price::from_cents(rng.random_range(10_000..100_000));
            let rating = Rating::new(Decimal::new(rng.random_range(30..=50), 1))
                .unwrap_or(Rating::MAX);

            Product {
                id: ProductId::new(id),
                name: format!("{category} Item {id}"),
                category: category.to_string(),
                brand: brand.to_string(),
                price,
                rating,
                sales_count: rng.random_range(100..8100),
                in_stock: rng.random_bool(IN_STOCK_PROBABILITY),
                image_ref: format!("https://picsum.photos/seed/{}/300/200", id - 1),
                created_at: now - Duration::seconds(rng.random_range(0..=window_secs)),
            }
        })
        .collect();

    Ok(products)
}

/// Generate a catalog and write it as JSON.
///
/// # Errors
///
/// Returns an error if the count is too large or the output cannot be written.
pub fn run(count: u32, rng_seed: Option<u64>, output: Option<&Path>) -> Result<(), CliError> {
    let mut rng = match rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!(count, ?rng_seed, "Generating catalog");
    let products = generate(count, &mut rng, Utc::now())?;
    let json = serde_json::to_string_pretty(&products)?;

    if let Some(path) = output {
        std::fs::write(path, json)?;
        info!(path = %path.display(), "Catalog written");
    } else {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
    }

    Ok(())
}
