//! Integration tests for the catalog browser.
//!
//! The tests drive the view engine and the cart ledger through their public
//! API only, the way the CLI does.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p catalog-browser-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `view_engine` - filtering, sorting and pagination scenarios
//! - `cart_ledger` - cart mutations and totals against a catalog
//! - `view_properties` - property tests over generated catalogs

#![cfg_attr(not(test), forbid(unsafe_code))]

use catalog_browser_core::{Price, Product, ProductId, Rating};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

/// Fixed reference time for listing dates.
#[must_use]
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Builder for test products with neutral defaults.
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    /// A product with the given id priced at `cents`, listed `id` days after [`epoch`].
    #[must_use]
    pub fn new(id: i32, cents: u32) -> Self {
        Self {
            product: Product {
                id: ProductId::new(id),
                name: format!("Home Item {id}"),
                category: "Home".to_string(),
                brand: "Brand A".to_string(),
                price: Price::from_cents(cents),
                rating: Rating::MAX,
                sales_count: 100,
                in_stock: true,
                image_ref: format!("https://picsum.photos/seed/{id}/300/200"),
                created_at: epoch() + Duration::days(i64::from(id)),
            },
        }
    }

    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.product.name = name.to_string();
        self
    }

    #[must_use]
    pub fn category(mut self, category: &str) -> Self {
        self.product.category = category.to_string();
        self
    }

    #[must_use]
    pub fn brand(mut self, brand: &str) -> Self {
        self.product.brand = brand.to_string();
        self
    }

    /// Rating in tenths, e.g. `45` is 4.5. Out-of-range values fall back to 0.
    #[must_use]
    pub fn rating_tenths(mut self, tenths: i64) -> Self {
        self.product.rating = Rating::new(Decimal::new(tenths, 1)).unwrap_or_default();
        self
    }

    #[must_use]
    pub fn sales(mut self, sales_count: u64) -> Self {
        self.product.sales_count = sales_count;
        self
    }

    #[must_use]
    pub fn build(self) -> Product {
        self.product
    }
}

/// Ten products with ids 1..=10 priced 10.00, 20.00, ..., 100.00.
#[must_use]
pub fn ten_priced_products() -> Vec<Product> {
    (1..=10_u32)
        .map(|i| ProductBuilder::new(i32::try_from(i).unwrap_or_default(), i * 1000).build())
        .collect()
}
