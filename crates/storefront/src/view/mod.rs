//! Catalog view engine.
//!
//! [`ViewState`] owns the catalog and the current filter, sort and
//! pagination settings, and always carries the visible page and match count
//! derived from exactly those settings. Commands return a new state; a
//! rejected command returns an error and the caller keeps its old state.
//!
//! ```
//! use catalog_browser_core::{SortDirection, SortKey};
//! use catalog_browser_storefront::{Catalog, FilterCriteria, ViewState};
//!
//! let view = ViewState::new(Catalog::empty());
//! let view = view.set_sort(SortKey::Price, SortDirection::Asc);
//! let view = view.set_filters(FilterCriteria::default()).unwrap();
//! assert_eq!(view.total_match_count(), 0);
//! assert_eq!(view.page_index(), 1);
//! ```

mod criteria;
mod pipeline;

use std::num::NonZeroUsize;
use std::sync::Arc;

use catalog_browser_core::{Product, SortDirection, SortKey};
use tracing::{debug, instrument, warn};

pub use criteria::{DEFAULT_PRICE_CEILING, FilterCriteria, PriceRange, SortSpec};

use crate::catalog::{Catalog, FilterOptions};
use crate::config::ViewConfig;
use crate::error::ViewError;

/// The catalog view: settings plus the page derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    catalog: Catalog,
    criteria: FilterCriteria,
    default_criteria: FilterCriteria,
    sort: SortSpec,
    /// 1-based.
    page_index: usize,
    page_size: NonZeroUsize,
    /// Catalog positions passing `criteria`, in `sort` order.
    matches: Arc<[usize]>,
    visible_page: Vec<Product>,
}

impl ViewState {
    /// Create a view over `catalog` with the default configuration.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        let config = ViewConfig::default();
        Self::unchecked(catalog, config).initialize()
    }

    /// Create a view over `catalog` with custom defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidCriteria`] if the default criteria are invalid.
    pub fn with_config(catalog: Catalog, config: ViewConfig) -> Result<Self, ViewError> {
        config.default_criteria.validate()?;
        Ok(Self::unchecked(catalog, config).initialize())
    }

    fn unchecked(catalog: Catalog, config: ViewConfig) -> Self {
        Self {
            catalog,
            criteria: config.default_criteria.clone(),
            default_criteria: config.default_criteria,
            sort: config.default_sort,
            page_index: 1,
            page_size: config.page_size,
            matches: Arc::from(Vec::<usize>::new()),
            visible_page: Vec::new(),
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Recompute the derived page and count from the current settings.
    ///
    /// Idempotent. A page index past the end yields an empty page.
    #[must_use]
    pub fn initialize(&self) -> Self {
        self.rederive(self.criteria.clone(), self.sort, self.page_index, self.page_size)
    }

    /// Replace the filter criteria and return to page 1.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidCriteria`] if the price range is inverted
    /// or the minimum rating is outside `[0, 5]`.
    #[instrument(level = "debug", skip_all, fields(search = %criteria.search_term))]
    pub fn set_filters(&self, criteria: FilterCriteria) -> Result<Self, ViewError> {
        if let Err(violation) = criteria.validate() {
            warn!(error = %violation, "Rejected filter criteria");
            return Err(violation.into());
        }

        let next = self.rederive(criteria, self.sort, 1, self.page_size);
        debug!(matches = next.total_match_count(), "Filters applied");
        Ok(next)
    }

    /// Restore the default criteria and return to page 1.
    #[must_use]
    pub fn reset_filters(&self) -> Self {
        self.rederive(self.default_criteria.clone(), self.sort, 1, self.page_size)
    }

    /// Replace the sort and return to page 1.
    ///
    /// With [`SortKey::Default`] the direction is ignored.
    #[must_use]
    #[instrument(level = "debug", skip(self))]
    pub fn set_sort(&self, key: SortKey, direction: SortDirection) -> Self {
        self.rederive(
            self.criteria.clone(),
            SortSpec::new(key, direction),
            1,
            self.page_size,
        )
    }

    /// Move to another page of the current results.
    ///
    /// Page 1 is always accepted, even when nothing matches. Criteria, sort
    /// and match count are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::PageOutOfRange`] if `page_index` is zero or past
    /// the last page.
    #[instrument(level = "debug", skip(self))]
    pub fn set_page(&self, page_index: usize) -> Result<Self, ViewError> {
        let total_pages = self.total_pages();
        if page_index == 0 || page_index > total_pages.max(1) {
            warn!(total_pages, "Rejected page request");
            return Err(ViewError::PageOutOfRange {
                requested: page_index,
                total_pages,
            });
        }

        let window = pipeline::page_window(self.matches.len(), page_index, self.page_size);
        Ok(Self {
            page_index,
            visible_page: self.collect_page(&self.matches, window),
            ..self.clone()
        })
    }

    /// Change the number of products per page and return to page 1.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidPageSize`] if `page_size` is zero.
    #[instrument(level = "debug", skip(self))]
    pub fn set_page_size(&self, page_size: usize) -> Result<Self, ViewError> {
        let page_size = NonZeroUsize::new(page_size).ok_or(ViewError::InvalidPageSize)?;
        let window = pipeline::page_window(self.matches.len(), 1, page_size);
        Ok(Self {
            page_index: 1,
            page_size,
            visible_page: self.collect_page(&self.matches, window),
            ..self.clone()
        })
    }

    fn rederive(
        &self,
        criteria: FilterCriteria,
        sort: SortSpec,
        page_index: usize,
        page_size: NonZeroUsize,
    ) -> Self {
        let matches: Arc<[usize]> =
            pipeline::filter_and_sort(self.catalog.products(), &criteria, &sort).into();
        let window = pipeline::page_window(matches.len(), page_index, page_size);
        let visible_page = self.collect_page(&matches, window);

        Self {
            catalog: self.catalog.clone(),
            criteria,
            default_criteria: self.default_criteria.clone(),
            sort,
            page_index,
            page_size,
            matches,
            visible_page,
        }
    }

    fn collect_page(&self, matches: &[usize], window: std::ops::Range<usize>) -> Vec<Product> {
        let products = self.catalog.products();
        matches
            .get(window)
            .unwrap_or_default()
            .iter()
            .filter_map(|&position| products.get(position).cloned())
            .collect()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Products on the current page, in display order.
    #[must_use]
    pub fn visible_page(&self) -> &[Product] {
        &self.visible_page
    }

    /// Number of products passing the criteria, regardless of pagination.
    #[must_use]
    pub fn total_match_count(&self) -> usize {
        self.matches.len()
    }

    /// Number of pages; zero when nothing matches.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        pipeline::page_count(self.matches.len(), self.page_size)
    }

    /// Every matching product in display order, across all pages.
    pub fn matching_products(&self) -> impl Iterator<Item = &Product> {
        let products = self.catalog.products();
        self.matches
            .iter()
            .filter_map(move |&position| products.get(position))
    }

    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size.get()
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub const fn sort(&self) -> SortSpec {
        self.sort
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Category and brand choices for the filter controls.
    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        self.catalog.filter_options()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::test_support::product;

    /// Ten products priced 10, 20, ..., 100.
    fn tens() -> Catalog {
        Catalog::new((1..=10).map(|i| product(i, 1000 * i.unsigned_abs())).collect()).unwrap()
    }

    fn unsorted(catalog: Catalog) -> ViewState {
        ViewState::new(catalog).set_sort(SortKey::Default, SortDirection::Asc)
    }

    fn prices(view: &ViewState) -> Vec<Decimal> {
        view.visible_page()
            .iter()
            .map(|product| product.price.amount())
            .collect()
    }

    #[test]
    fn test_defaults() {
        let view = ViewState::new(tens());
        assert_eq!(view.page_index(), 1);
        assert_eq!(view.page_size(), 10);
        assert_eq!(view.total_match_count(), 10);
        assert_eq!(
            view.sort(),
            SortSpec::new(SortKey::CreatedAt, SortDirection::Desc)
        );
        // Newest first: fixtures are listed one day apart in id order
        assert_eq!(view.visible_page()[0].id.as_i32(), 10);
    }

    #[test]
    fn test_price_window_sorted_descending() {
        let view = unsorted(tens())
            .set_page_size(2)
            .unwrap()
            .set_filters(
                FilterCriteria::default().with_price_range(Decimal::from(30), Decimal::from(70)),
            )
            .unwrap()
            .set_sort(SortKey::Price, SortDirection::Desc);

        assert_eq!(view.total_match_count(), 5);
        assert_eq!(view.total_pages(), 3);
        assert_eq!(prices(&view), vec![Decimal::from(70), Decimal::from(60)]);
    }

    #[test]
    fn test_invalid_criteria_leave_state_untouched() {
        let view = unsorted(tens()).set_page_size(3).unwrap().set_page(2).unwrap();
        let result = view.set_filters(
            FilterCriteria::default().with_price_range(Decimal::from(9), Decimal::from(1)),
        );
        assert!(matches!(result, Err(ViewError::InvalidCriteria(_))));
        assert_eq!(view.page_index(), 2);
        assert_eq!(view.criteria(), &FilterCriteria::default());
    }

    #[test]
    fn test_filters_and_sort_reset_page() {
        let view = unsorted(tens()).set_page_size(2).unwrap().set_page(4).unwrap();
        assert_eq!(view.page_index(), 4);

        let filtered = view.set_filters(FilterCriteria::default()).unwrap();
        assert_eq!(filtered.page_index(), 1);

        let sorted = view.set_sort(SortKey::Rating, SortDirection::Asc);
        assert_eq!(sorted.page_index(), 1);
    }

    #[test]
    fn test_set_page_keeps_criteria_and_sort() {
        let view = unsorted(tens())
            .set_page_size(3)
            .unwrap()
            .set_sort(SortKey::Price, SortDirection::Desc);
        let next = view.set_page(2).unwrap();

        assert_eq!(next.criteria(), view.criteria());
        assert_eq!(next.sort(), view.sort());
        assert_eq!(next.total_match_count(), view.total_match_count());
        assert_eq!(
            prices(&next),
            vec![Decimal::from(70), Decimal::from(60), Decimal::from(50)]
        );
    }

    #[test]
    fn test_set_page_out_of_range() {
        let view = unsorted(tens()).set_page_size(3).unwrap();
        assert_eq!(view.total_pages(), 4);
        assert!(view.set_page(4).is_ok());
        assert_eq!(
            view.set_page(5),
            Err(ViewError::PageOutOfRange {
                requested: 5,
                total_pages: 4
            })
        );
        assert!(matches!(
            view.set_page(0),
            Err(ViewError::PageOutOfRange { requested: 0, .. })
        ));
    }

    #[test]
    fn test_first_page_allowed_when_empty() {
        let view = ViewState::new(tens())
            .set_filters(FilterCriteria::default().with_search_term("nothing"))
            .unwrap();
        assert_eq!(view.total_match_count(), 0);
        assert_eq!(view.total_pages(), 0);
        let page = view.set_page(1).unwrap();
        assert!(page.visible_page().is_empty());
        assert!(view.set_page(2).is_err());
    }

    #[test]
    fn test_last_page_is_partial() {
        let view = unsorted(tens()).set_page_size(4).unwrap().set_page(3).unwrap();
        assert_eq!(view.visible_page().len(), 2);
        assert_eq!(prices(&view), vec![Decimal::from(90), Decimal::from(100)]);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let view = unsorted(tens()).set_page_size(3).unwrap().set_page(2).unwrap();
        let once = view.initialize();
        let twice = once.initialize();
        assert_eq!(once, view);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let view = ViewState::new(tens());
        assert_eq!(view.set_page_size(0), Err(ViewError::InvalidPageSize));
    }

    #[test]
    fn test_reset_filters() {
        let view = ViewState::new(tens())
            .set_filters(FilterCriteria::default().with_search_term("item 1"))
            .unwrap();
        assert_eq!(view.total_match_count(), 2);

        let reset = view.reset_filters();
        assert_eq!(reset.criteria(), &FilterCriteria::default());
        assert_eq!(reset.total_match_count(), 10);
    }

    #[test]
    fn test_with_config_validates_defaults() {
        let config = ViewConfig::default().with_criteria(
            FilterCriteria::default().with_min_rating(Decimal::from(6)),
        );
        assert!(matches!(
            ViewState::with_config(tens(), config),
            Err(ViewError::InvalidCriteria(_))
        ));
    }

    #[test]
    fn test_unchanged_command_yields_equal_state() {
        let view = ViewState::new(tens());
        let same = view
            .set_filters(view.criteria().clone())
            .unwrap();
        assert_eq!(same, view);
    }
}
