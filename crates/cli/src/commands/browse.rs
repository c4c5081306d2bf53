//! One-shot browse: apply filters, sort and page, print the result.

use std::io::Write;

use catalog_browser_storefront::{FilterCriteria, PriceRange, ViewState};
use tracing::info;

use super::load_catalog;
use crate::BrowseArgs;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::render;

/// Criteria described by the command-line flags; unset bounds keep the defaults.
pub fn criteria_from_args(args: &BrowseArgs) -> FilterCriteria {
    let defaults = PriceRange::default();
    let criteria = FilterCriteria::default()
        .with_search_term(args.search.clone())
        .with_category(args.category.clone())
        .with_price_range(
            args.min_price.unwrap_or(defaults.min),
            args.max_price.unwrap_or(defaults.max),
        )
        .with_brands(args.brands.iter().cloned());

    match args.min_rating {
        Some(min_rating) => criteria.with_min_rating(min_rating),
        None => criteria,
    }
}

/// Build the view by issuing the commands in order.
///
/// # Errors
///
/// Returns the first command the engine rejects.
pub fn build_view(
    view: &ViewState,
    args: &BrowseArgs,
    page_size: usize,
) -> Result<ViewState, CliError> {
    let mut view = view.set_page_size(args.page_size.unwrap_or(page_size))?;
    view = view.set_filters(criteria_from_args(args))?;
    if let Some(key) = args.sort {
        view = view.set_sort(key, args.order);
    }
    Ok(view.set_page(args.page)?)
}

/// Run the `browse` command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or a command is rejected.
pub fn run(args: &BrowseArgs, config: &CliConfig) -> Result<(), CliError> {
    let catalog = load_catalog(&args.source, config)?;
    let view = build_view(&ViewState::new(catalog), args, config.page_size)?;

    info!(
        matches = view.total_match_count(),
        page = view.page_index(),
        sort = %view.sort().key(),
        "Browse complete"
    );

    let mut stdout = std::io::stdout().lock();
    if args.json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(view.visible_page())?)?;
    } else {
        writeln!(stdout, "{}", render::criteria(&view))?;
        writeln!(stdout, "{}", render::page(&view))?;
    }
    Ok(())
}
