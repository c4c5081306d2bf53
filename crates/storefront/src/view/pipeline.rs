//! The filter, sort, paginate derivation.
//!
//! These are pure functions over catalog positions; [`ViewState`](super::ViewState)
//! caches the filtered and sorted positions so a page change only re-slices.

use std::num::NonZeroUsize;
use std::ops::Range;

use catalog_browser_core::Product;

use super::criteria::{FilterCriteria, Matcher, SortSpec};

/// Positions of matching products, in sorted order.
///
/// Filtering preserves catalog order and the sort is stable, so products
/// with equal keys keep their relative catalog order.
pub(crate) fn filter_and_sort(
    products: &[Product],
    criteria: &FilterCriteria,
    sort: &SortSpec,
) -> Vec<usize> {
    let matcher = Matcher::new(criteria);
    let mut positions: Vec<usize> = products
        .iter()
        .enumerate()
        .filter(|(_, product)| matcher.matches(product))
        .map(|(position, _)| position)
        .collect();

    if !sort.is_unsorted() {
        positions.sort_by(|&a, &b| match (products.get(a), products.get(b)) {
            (Some(a), Some(b)) => sort.compare(a, b),
            _ => std::cmp::Ordering::Equal,
        });
    }

    positions
}

/// Number of pages needed for `total` items.
pub(crate) const fn page_count(total: usize, page_size: NonZeroUsize) -> usize {
    total.div_ceil(page_size.get())
}

/// Index range of a 1-based page, clipped to `total`.
///
/// Pages past the end yield an empty range.
pub(crate) fn page_window(
    total: usize,
    page_index: usize,
    page_size: NonZeroUsize,
) -> Range<usize> {
    let size = page_size.get();
    let start = page_index.saturating_sub(1).saturating_mul(size).min(total);
    let end = start.saturating_add(size).min(total);
    start..end
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use catalog_browser_core::{SortDirection, SortKey};

    use super::*;
    use crate::test_support::product;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, size(10)), 0);
        assert_eq!(page_count(10, size(10)), 1);
        assert_eq!(page_count(11, size(10)), 2);
    }

    #[test]
    fn test_page_window_clips() {
        assert_eq!(page_window(5, 1, size(2)), 0..2);
        assert_eq!(page_window(5, 3, size(2)), 4..5);
        assert_eq!(page_window(5, 4, size(2)), 5..5);
        assert_eq!(page_window(0, 1, size(10)), 0..0);
    }

    #[test]
    fn test_unsorted_keeps_catalog_order() {
        let products = vec![product(3, 300), product(1, 100), product(2, 200)];
        let positions = filter_and_sort(
            &products,
            &FilterCriteria::default(),
            &SortSpec::default(),
        );
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_descending_sort_keeps_ties_in_order() {
        let products = vec![
            product(1, 500),
            product(2, 900),
            product(3, 500),
            product(4, 100),
            product(5, 500),
        ];
        let desc = SortSpec::new(SortKey::Price, SortDirection::Desc);
        let asc = SortSpec::new(SortKey::Price, SortDirection::Asc);

        let ids = |positions: Vec<usize>| -> Vec<i32> {
            positions
                .into_iter()
                .map(|p| products[p].id.as_i32())
                .collect()
        };

        assert_eq!(
            ids(filter_and_sort(&products, &FilterCriteria::default(), &desc)),
            vec![2, 1, 3, 5, 4]
        );
        assert_eq!(
            ids(filter_and_sort(&products, &FilterCriteria::default(), &asc)),
            vec![4, 1, 3, 5, 2]
        );
    }
}
