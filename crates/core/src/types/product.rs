//! Catalog product record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Price, ProductId, Rating};

/// A product in the catalog.
///
/// Products are immutable once created; the catalog hands out shared
/// references and never edits a record in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identity key, unique within a catalog.
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: Price,
    pub rating: Rating,
    /// Units sold.
    #[serde(alias = "sales")]
    pub sales_count: u64,
    pub in_stock: bool,
    /// Opaque image reference (typically a URL).
    #[serde(alias = "imageUrl")]
    pub image_ref: String,
    /// When the product was listed.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Case-insensitive substring match against the product name.
    ///
    /// `needle` must already be lowercased. An empty needle matches everything.
    #[must_use]
    pub fn name_contains_lowercase(&self, needle: &str) -> bool {
        needle.is_empty() || self.name.to_lowercase().contains(needle)
    }
}
