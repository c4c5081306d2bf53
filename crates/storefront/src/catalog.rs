//! The immutable product set held for the session.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use catalog_browser_core::{Product, ProductId};
use serde::Serialize;
use tracing::debug;

use crate::error::CatalogError;

/// Read-only product lookup.
///
/// The cart ledger resolves prices through this capability instead of
/// holding a reference to the catalog, so it can be exercised against any
/// in-memory product set.
pub trait ProductLookup {
    /// Find a product by its identity key.
    fn find_product_by_id(&self, id: ProductId) -> Option<&Product>;
}

impl ProductLookup for [Product] {
    fn find_product_by_id(&self, id: ProductId) -> Option<&Product> {
        self.iter().find(|product| product.id == id)
    }
}

impl ProductLookup for Vec<Product> {
    fn find_product_by_id(&self, id: ProductId) -> Option<&Product> {
        self.as_slice().find_product_by_id(id)
    }
}

impl ProductLookup for HashMap<ProductId, Product> {
    fn find_product_by_id(&self, id: ProductId) -> Option<&Product> {
        self.get(&id)
    }
}

impl<T: ProductLookup + ?Sized> ProductLookup for &T {
    fn find_product_by_id(&self, id: ProductId) -> Option<&Product> {
        (**self).find_product_by_id(id)
    }
}

/// The full, unfiltered product set.
///
/// Cheap to clone: products live behind an `Arc` and are never mutated.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
    positions: Arc<HashMap<ProductId, usize>>,
}

impl Catalog {
    /// Build a catalog, preserving the given product order.
    ///
    /// # Errors
    ///
    /// Returns an error if any id is not positive or appears more than once.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut positions = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if !product.id.is_positive() {
                return Err(CatalogError::InvalidProductId(product.id));
            }
            if positions.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateProductId(product.id));
            }
        }

        debug!(products = products.len(), "Catalog loaded");

        Ok(Self {
            products: products.into(),
            positions: Arc::new(positions),
        })
    }

    /// An empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            products: Vec::<Product>::new().into(),
            positions: Arc::new(HashMap::new()),
        }
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct values for populating the filter controls.
    ///
    /// Categories keep first-seen catalog order; brands are sorted.
    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        let mut seen = HashSet::new();
        let categories = self
            .products
            .iter()
            .filter(|product| seen.insert(product.category.as_str()))
            .map(|product| product.category.clone())
            .collect();

        let brands: BTreeSet<&str> = self
            .products
            .iter()
            .map(|product| product.brand.as_str())
            .collect();

        FilterOptions {
            categories,
            brands: brands.into_iter().map(str::to_owned).collect(),
        }
    }
}

impl ProductLookup for Catalog {
    fn find_product_by_id(&self, id: ProductId) -> Option<&Product> {
        self.positions
            .get(&id)
            .and_then(|&position| self.products.get(position))
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.products, &other.products) || self.products == other.products
    }
}

impl Eq for Catalog {}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

/// Choices offered by the filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub brands: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::product;

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(vec![product(1, 1000), product(1, 2000)]);
        assert_eq!(
            result,
            Err(CatalogError::DuplicateProductId(ProductId::new(1)))
        );
    }

    #[test]
    fn test_rejects_non_positive_ids() {
        let result = Catalog::new(vec![product(0, 1000)]);
        assert_eq!(result, Err(CatalogError::InvalidProductId(ProductId::new(0))));
    }

    #[test]
    fn test_find_product_by_id() {
        let catalog = Catalog::new(vec![product(3, 1000), product(7, 2550)]).unwrap();
        let found = catalog.find_product_by_id(ProductId::new(7)).unwrap();
        assert_eq!(found.id, ProductId::new(7));
        assert!(catalog.find_product_by_id(ProductId::new(4)).is_none());
    }

    #[test]
    fn test_slice_lookup_matches_catalog_lookup() {
        let products = vec![product(3, 1000), product(7, 2550)];
        let catalog = Catalog::new(products.clone()).unwrap();
        for id in [3, 7, 9] {
            let id = ProductId::new(id);
            assert_eq!(
                products.find_product_by_id(id),
                catalog.find_product_by_id(id)
            );
        }
    }

    #[test]
    fn test_filter_options() {
        let mut items = vec![product(1, 100), product(2, 100), product(3, 100)];
        items[0].category = "Books".to_string();
        items[0].brand = "Brand C".to_string();
        items[1].category = "Apparel".to_string();
        items[1].brand = "Brand A".to_string();
        items[2].category = "Books".to_string();
        items[2].brand = "Brand B".to_string();

        let options = Catalog::new(items).unwrap().filter_options();
        assert_eq!(options.categories, vec!["Books", "Apparel"]);
        assert_eq!(options.brands, vec!["Brand A", "Brand B", "Brand C"]);
    }

    #[test]
    fn test_clones_compare_equal() {
        let catalog = Catalog::new(vec![product(1, 100)]).unwrap();
        assert_eq!(catalog.clone(), catalog);
        assert_ne!(catalog, Catalog::empty());
    }
}
