//! View engine defaults.
//!
//! The presentation layer may override any of these when constructing a
//! [`ViewState`](crate::ViewState). The defaults mirror the storefront's
//! listing page: newest first, ten products per page, prices up to 1000.

use std::num::NonZeroUsize;

use catalog_browser_core::{SortDirection, SortKey};

use crate::view::{FilterCriteria, SortSpec};

/// Products per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Initial criteria, sort and page size for a new view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub page_size: NonZeroUsize,
    /// Criteria applied at startup and restored by `reset_filters`.
    pub default_criteria: FilterCriteria,
    pub default_sort: SortSpec,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_criteria: FilterCriteria::default(),
            default_sort: SortSpec::new(SortKey::CreatedAt, SortDirection::Desc),
        }
    }
}

impl ViewConfig {
    /// Override the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Override the default sort.
    #[must_use]
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = sort;
        self
    }

    /// Override the default criteria.
    #[must_use]
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.default_criteria = criteria;
        self
    }
}
