//! Filter criteria and sort specification.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use catalog_browser_core::{Product, Rating, SortDirection, SortKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CriteriaViolation;

/// Upper bound of the default price range.
pub const DEFAULT_PRICE_CEILING: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.min && amount <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(Decimal::ZERO, DEFAULT_PRICE_CEILING)
    }
}

/// The combined filter predicate applied to the catalog.
///
/// A product matches when it satisfies every field. Within `brands` any one
/// value is enough; an empty set accepts every brand.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the product name.
    pub search_term: String,
    /// `None` accepts every category.
    pub category: Option<String>,
    pub price_range: PriceRange,
    pub brands: BTreeSet<String>,
    /// Inclusive lower bound on rating.
    pub min_rating: Decimal,
}

impl FilterCriteria {
    #[must_use]
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_price_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.price_range = PriceRange::new(min, max);
        self
    }

    #[must_use]
    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = brands.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_min_rating(mut self, min_rating: Decimal) -> Self {
        self.min_rating = min_rating;
        self
    }

    /// Check the preconditions for applying these criteria.
    ///
    /// # Errors
    ///
    /// Returns the first violated bound.
    pub fn validate(&self) -> Result<(), CriteriaViolation> {
        if self.price_range.min > self.price_range.max {
            return Err(CriteriaViolation::PriceRangeInverted {
                min: self.price_range.min,
                max: self.price_range.max,
            });
        }
        if !Rating::in_range(self.min_rating) {
            return Err(CriteriaViolation::RatingOutOfRange(self.min_rating));
        }
        Ok(())
    }

    /// Whether `product` satisfies every active field.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        Matcher::new(self).matches(product)
    }
}

/// Criteria with the search term lowercased once for a whole pass.
pub(crate) struct Matcher<'a> {
    criteria: &'a FilterCriteria,
    needle: String,
}

impl<'a> Matcher<'a> {
    pub(crate) fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            criteria,
            needle: criteria.search_term.to_lowercase(),
        }
    }

    pub(crate) fn matches(&self, product: &Product) -> bool {
        let criteria = self.criteria;
        product.name_contains_lowercase(&self.needle)
            && criteria
                .category
                .as_ref()
                .is_none_or(|category| *category == product.category)
            && criteria.price_range.contains(product.price.amount())
            && (criteria.brands.is_empty() || criteria.brands.contains(&product.brand))
            && product.rating.value() >= criteria.min_rating
    }
}

/// Sort key and direction.
///
/// With [`SortKey::Default`] the direction is ignored and normalized to
/// ascending, so two "unsorted" specs always compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawSortSpec")]
pub struct SortSpec {
    key: SortKey,
    direction: SortDirection,
}

/// Wire form of [`SortSpec`]; decoding goes through [`SortSpec::new`].
#[derive(Deserialize)]
struct RawSortSpec {
    key: SortKey,
    #[serde(default)]
    direction: SortDirection,
}

impl From<RawSortSpec> for SortSpec {
    fn from(raw: RawSortSpec) -> Self {
        Self::new(raw.key, raw.direction)
    }
}

impl SortSpec {
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        let direction = match key {
            SortKey::Default => SortDirection::Asc,
            _ => direction,
        };
        Self { key, direction }
    }

    #[must_use]
    pub const fn key(&self) -> SortKey {
        self.key
    }

    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    #[must_use]
    pub const fn is_unsorted(&self) -> bool {
        matches!(self.key, SortKey::Default)
    }

    /// Direction-aware comparator.
    ///
    /// Equal keys compare `Equal` in both directions; combined with a stable
    /// sort this keeps tied products in their filtered order.
    #[must_use]
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ascending = match self.key {
            SortKey::Default => Ordering::Equal,
            SortKey::Price => a.price.cmp(&b.price),
            SortKey::Rating => a.rating.cmp(&b.rating),
            SortKey::SalesCount => a.sales_count.cmp(&b.sales_count),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        self.direction.apply(ascending)
    }
}
