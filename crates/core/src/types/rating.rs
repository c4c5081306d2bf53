//! Product rating on a zero to five scale.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The value lies outside `[0, 5]`.
    #[error("rating must be between 0 and 5, got {0}")]
    OutOfRange(Decimal),
}

/// A rating in the inclusive range `[0, 5]`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rating(Decimal);

impl Rating {
    /// Lowest possible rating.
    pub const MIN: Self = Self(Decimal::ZERO);
    /// Highest possible rating.
    pub const MAX: Self = Self(Decimal::from_parts(5, 0, 0, false, 0));

    /// Create a new rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] if `value` is not within `[0, 5]`.
    pub fn new(value: Decimal) -> Result<Self, RatingError> {
        if Self::in_range(value) {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange(value))
        }
    }

    /// Whether `value` is an acceptable rating.
    #[must_use]
    pub fn in_range(value: Decimal) -> bool {
        value >= Self::MIN.0 && value <= Self::MAX.0
    }

    /// The underlying value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl TryFrom<Decimal> for Rating {
    type Error = RatingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for Decimal {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}
