//! Catalog Browser Storefront library.
//!
//! Two cooperating subsystems, both pure in-memory value types:
//!
//! - [`view`] - the catalog view engine. A [`ViewState`] owns the full
//!   [`Catalog`] plus the current filter, sort and pagination criteria, and
//!   derives the visible page and total match count from them.
//! - [`cart`] - the cart ledger. A [`CartState`] records per-product
//!   quantities and computes monetary totals through a [`ProductLookup`].
//!
//! Every command takes the current state by reference and returns a fresh
//! value. Rejected commands return an error and leave the caller's state
//! untouched, so presentation layers can detect changes by comparing values.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod view;

pub use cart::{CartLine, CartLineView, CartState, CartSummary};
pub use catalog::{Catalog, FilterOptions, ProductLookup};
pub use config::ViewConfig;
pub use error::{CartError, CatalogError, CriteriaViolation, ViewError};
pub use view::{FilterCriteria, PriceRange, SortSpec, ViewState};

#[cfg(test)]
pub(crate) mod test_support;
