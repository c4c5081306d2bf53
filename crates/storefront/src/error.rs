//! Command errors for the view engine, cart ledger and catalog.
//!
//! All of these are input-validation failures. A command that returns one of
//! them has not changed any state.

use catalog_browser_core::ProductId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors building a [`Catalog`](crate::Catalog).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share an identity key.
    #[error("duplicate product id: {0}")]
    DuplicateProductId(ProductId),

    /// Product ids must be strictly positive.
    #[error("invalid product id: {0}")]
    InvalidProductId(ProductId),
}

/// Why a set of filter criteria was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CriteriaViolation {
    #[error("price range minimum {min} exceeds maximum {max}")]
    PriceRangeInverted { min: Decimal, max: Decimal },

    #[error("minimum rating {0} is outside [0, 5]")]
    RatingOutOfRange(Decimal),
}

/// Errors rejected by the catalog view engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// Filter criteria failed validation.
    #[error("invalid criteria: {0}")]
    InvalidCriteria(#[from] CriteriaViolation),

    /// Explicit page request beyond the available pages.
    #[error("page {requested} is out of range (1..={total_pages})")]
    PageOutOfRange { requested: usize, total_pages: usize },

    /// Page size must be at least one.
    #[error("page size must be positive")]
    InvalidPageSize,
}

/// Errors rejected by the cart ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Quantities added to the cart must be positive.
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    /// The resulting line quantity would not fit the ledger's counter.
    #[error("quantity for product {0} would overflow")]
    QuantityOverflow(ProductId),
}
