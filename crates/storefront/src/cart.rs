//! Cart ledger.
//!
//! A [`CartState`] is a list of (product, quantity) lines in insertion order,
//! with at most one line per product and every quantity at least 1. It never
//! copies product data: prices are resolved through a [`ProductLookup`] when
//! totals are requested, and lines whose product cannot be resolved are left
//! out of the money totals.

use std::num::NonZeroU32;

use catalog_browser_core::{Price, ProductId};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::catalog::ProductLookup;
use crate::error::CartError;

/// One ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: NonZeroU32,
}

/// The cart ledger.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Add `quantity` units of a product.
    ///
    /// Increments the existing line for the product, or appends a new one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is not positive and
    /// [`CartError::QuantityOverflow`] if the line total would not fit in a `u32`.
    #[instrument(level = "debug", skip(self))]
    pub fn add_item(&self, product_id: ProductId, quantity: i64) -> Result<Self, CartError> {
        if quantity <= 0 {
            warn!("Rejected non-positive quantity");
            return Err(CartError::InvalidQuantity(quantity));
        }
        let added = u32::try_from(quantity)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(CartError::QuantityOverflow(product_id))?;

        let mut lines = self.lines.clone();
        match lines.iter_mut().find(|line| line.product_id == product_id) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(added.get())
                    .ok_or(CartError::QuantityOverflow(product_id))?;
            }
            None => lines.push(CartLine {
                product_id,
                quantity: added,
            }),
        }

        debug!(lines = lines.len(), "Item added");
        Ok(Self { lines })
    }

    /// Remove the line for a product. Absent products are ignored.
    #[must_use]
    #[instrument(level = "debug", skip(self))]
    pub fn remove_item(&self, product_id: ProductId) -> Self {
        let lines = self
            .lines
            .iter()
            .filter(|line| line.product_id != product_id)
            .copied()
            .collect();
        Self { lines }
    }

    /// Set a line's quantity, raising anything below 1 to 1.
    ///
    /// Removal is the only way to drop a line. Absent products are ignored.
    #[must_use]
    #[instrument(level = "debug", skip(self))]
    pub fn set_quantity(&self, product_id: ProductId, quantity: i64) -> Self {
        let floored = u32::try_from(quantity.max(1))
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MAX);

        let lines = self
            .lines
            .iter()
            .map(|line| {
                if line.product_id == product_id {
                    CartLine {
                        product_id,
                        quantity: floored,
                    }
                } else {
                    *line
                }
            })
            .collect();
        Self { lines }
    }

    /// Empty the cart.
    #[must_use]
    pub const fn clear(&self) -> Self {
        Self::new()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if any.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities, resolvable or not.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// `quantity x price` for a product's line.
    ///
    /// `None` if there is no line or the product does not resolve.
    #[must_use]
    pub fn line_subtotal<L>(&self, product_id: ProductId, lookup: &L) -> Option<Price>
    where
        L: ProductLookup + ?Sized,
    {
        let line = self.line(product_id)?;
        let product = lookup.find_product_by_id(product_id)?;
        Some(product.price.times(line.quantity.get()))
    }

    /// Sum of every resolvable line subtotal, unrounded.
    #[must_use]
    pub fn grand_total<L>(&self, lookup: &L) -> Price
    where
        L: ProductLookup + ?Sized,
    {
        self.lines
            .iter()
            .filter_map(|line| {
                lookup
                    .find_product_by_id(line.product_id)
                    .map(|product| product.price.times(line.quantity.get()))
            })
            .sum()
    }

    /// Resolved lines and totals for display.
    #[must_use]
    pub fn summary<L>(&self, lookup: &L) -> CartSummary
    where
        L: ProductLookup + ?Sized,
    {
        let mut unresolved = 0;
        let lines = self
            .lines
            .iter()
            .filter_map(|line| {
                let resolved = lookup.find_product_by_id(line.product_id).map(|product| {
                    CartLineView {
                        product_id: line.product_id,
                        name: product.name.clone(),
                        image_ref: product.image_ref.clone(),
                        unit_price: product.price,
                        quantity: line.quantity.get(),
                        subtotal: product.price.times(line.quantity.get()),
                    }
                });
                if resolved.is_none() {
                    unresolved += 1;
                }
                resolved
            })
            .collect::<Vec<_>>();

        let grand_total = lines.iter().map(|line| line.subtotal).sum();

        CartSummary {
            lines,
            item_count: self.item_count(),
            grand_total,
            unresolved,
        }
    }
}

/// A cart line joined with its product, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub image_ref: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub subtotal: Price,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<CartLineView>,
    pub item_count: u64,
    pub grand_total: Price,
    /// Lines whose product is missing from the lookup.
    pub unresolved: usize,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::catalog::Catalog;
    use crate::test_support::product;

    fn id(n: i32) -> ProductId {
        ProductId::new(n)
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![product(1, 1000), product(2, 2550)]).unwrap()
    }

    #[test]
    fn test_ledger_walkthrough() {
        let catalog = catalog();

        let cart = CartState::new().add_item(id(1), 2).unwrap();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.grand_total(&catalog), Price::from_cents(2000));

        let cart = cart.add_item(id(2), 1).unwrap();
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.grand_total(&catalog), Price::from_cents(4550));

        let cart = cart.set_quantity(id(1), 5);
        assert_eq!(cart.grand_total(&catalog), Price::from_cents(7550));

        let cart = cart.remove_item(id(2));
        assert_eq!(cart.grand_total(&catalog), Price::from_cents(5000));
        assert_eq!(cart.grand_total(&catalog).to_string(), "50.00");
    }

    #[test]
    fn test_repeated_add_merges_line() {
        let cart = CartState::new()
            .add_item(id(1), 2)
            .unwrap()
            .add_item(id(1), 3)
            .unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(id(1)).unwrap().quantity.get(), 5);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let cart = CartState::new()
            .add_item(id(2), 1)
            .unwrap()
            .add_item(id(1), 1)
            .unwrap()
            .add_item(id(2), 1)
            .unwrap();
        let ids: Vec<_> = cart.lines().iter().map(|line| line.product_id).collect();
        assert_eq!(ids, vec![id(2), id(1)]);
    }

    #[test]
    fn test_add_rejects_non_positive() {
        let cart = CartState::new().add_item(id(1), 1).unwrap();
        assert_eq!(cart.add_item(id(1), 0), Err(CartError::InvalidQuantity(0)));
        assert_eq!(
            cart.add_item(id(1), -4),
            Err(CartError::InvalidQuantity(-4))
        );
        assert_eq!(cart.line(id(1)).unwrap().quantity.get(), 1);
    }

    #[test]
    fn test_add_overflow() {
        let cart = CartState::new()
            .add_item(id(1), i64::from(u32::MAX))
            .unwrap();
        assert_eq!(
            cart.add_item(id(1), 1),
            Err(CartError::QuantityOverflow(id(1)))
        );
        assert!(CartState::new().add_item(id(1), i64::MAX).is_err());
    }

    #[test]
    fn test_set_quantity_floors_at_one() {
        let cart = CartState::new().add_item(id(1), 3).unwrap();
        assert_eq!(cart.set_quantity(id(1), 0).line(id(1)).unwrap().quantity.get(), 1);
        assert_eq!(cart.set_quantity(id(1), -7).line(id(1)).unwrap().quantity.get(), 1);
        assert_eq!(cart.set_quantity(id(1), 9).line(id(1)).unwrap().quantity.get(), 9);
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let cart = CartState::new().add_item(id(1), 3).unwrap();
        assert_eq!(cart.set_quantity(id(2), 5), cart);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let cart = CartState::new().add_item(id(1), 3).unwrap();
        assert_eq!(cart.remove_item(id(9)), cart);
    }

    #[test]
    fn test_clear() {
        let cart = CartState::new()
            .add_item(id(1), 3)
            .unwrap()
            .add_item(id(2), 4)
            .unwrap();
        let cleared = cart.clear();
        assert!(cleared.is_empty());
        assert_eq!(cleared.item_count(), 0);
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_unresolvable_lines_excluded_from_totals() {
        let catalog = catalog();
        let cart = CartState::new()
            .add_item(id(1), 1)
            .unwrap()
            .add_item(id(42), 3)
            .unwrap();

        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.line_subtotal(id(42), &catalog), None);
        assert_eq!(cart.grand_total(&catalog), Price::from_cents(1000));

        let summary = cart.summary(&catalog);
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.unresolved, 1);
        assert_eq!(summary.grand_total, Price::from_cents(1000));
    }

    #[test]
    fn test_in_memory_lookup() {
        let products: HashMap<ProductId, _> = [product(5, 333)]
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        let cart = CartState::new().add_item(id(5), 3).unwrap();
        assert_eq!(
            cart.line_subtotal(id(5), &products),
            Some(Price::from_cents(999))
        );
    }

    #[test]
    fn test_summary_lines() {
        let catalog = catalog();
        let cart = CartState::new().add_item(id(2), 2).unwrap();
        let summary = cart.summary(&catalog);
        let line = &summary.lines[0];
        assert_eq!(line.unit_price, Price::from_cents(2550));
        assert_eq!(line.subtotal.to_string(), "51.00");
        assert_eq!(summary.item_count, 2);
    }
}
