//! Fixtures shared by the unit tests.

use catalog_browser_core::{Price, Product, ProductId, Rating};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

/// Listing date of product `id` in the fixtures: one day apart, in id order.
pub fn listed(id: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
        + Duration::days(i64::from(id))
}

/// A product priced at `cents`, with neutral values elsewhere.
pub fn product(id: i32, cents: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Electronics Item {id}"),
        category: "Electronics".to_string(),
        brand: "Brand A".to_string(),
        price: Price::from_cents(cents),
        rating: Rating::MAX,
        sales_count: 100,
        in_stock: true,
        image_ref: format!("https://picsum.photos/seed/{id}/300/200"),
        created_at: listed(id),
    }
}

/// A rating given in tenths, e.g. `rating(45)` is 4.5.
pub fn rating(tenths: i64) -> Rating {
    Rating::new(Decimal::new(tenths, 1)).unwrap_or_default()
}
