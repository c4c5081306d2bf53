//! Core types for the catalog browser.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod rating;
pub mod sort;

pub use id::*;
pub use price::{Price, PriceError, format_amount};
pub use product::Product;
pub use rating::{Rating, RatingError};
pub use sort::{SortDirection, SortKey, SortKeyParseError};
