//! Plain-text rendering of view and cart state.

use catalog_browser_core::Product;
use catalog_browser_storefront::{CartSummary, FilterOptions, ViewState};

/// One product as a table row.
fn row(product: &Product) -> String {
    format!(
        "{:>5}  {:<26} {:<11} {:<8} {:>9}  {:>3}  {:>5}  {}",
        product.id,
        product.name,
        product.category,
        product.brand,
        product.price.to_string(),
        product.rating.to_string(),
        product.sales_count,
        if product.in_stock { "in stock" } else { "sold out" },
    )
}

/// The visible page with a header and a pagination footer.
pub fn page(view: &ViewState) -> String {
    let mut lines = vec![format!(
        "{:>5}  {:<26} {:<11} {:<8} {:>9}  {:>3}  {:>5}  {}",
        "id", "name", "category", "brand", "price", "rat", "sales", "stock"
    )];

    if view.visible_page().is_empty() {
        lines.push("  (no products)".to_string());
    } else {
        lines.extend(view.visible_page().iter().map(row));
    }

    lines.push(format!(
        "page {}/{} - {} matching - sorted by {} {}",
        view.page_index(),
        view.total_pages().max(1),
        view.total_match_count(),
        view.sort().key(),
        view.sort().direction(),
    ));
    lines.join("\n")
}

/// The active filter criteria on one line.
pub fn criteria(view: &ViewState) -> String {
    let criteria = view.criteria();
    let brands = if criteria.brands.is_empty() {
        "any".to_string()
    } else {
        criteria
            .brands
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "search=\"{}\" category={} price={}..={} brands={} min-rating={}",
        criteria.search_term,
        criteria.category.as_deref().unwrap_or("any"),
        criteria.price_range.min,
        criteria.price_range.max,
        brands,
        criteria.min_rating,
    )
}

/// Full details of one product.
pub fn product_detail(product: &Product) -> String {
    [
        format!("#{} {}", product.id, product.name),
        format!("  price     {}", product.price),
        format!("  rating    {} / 5.0", product.rating),
        format!("  sales     {}", product.sales_count),
        format!("  category  {}", product.category),
        format!("  brand     {}", product.brand),
        format!(
            "  stock     {}",
            if product.in_stock { "in stock" } else { "sold out" }
        ),
        format!("  listed    {}", product.created_at.format("%Y-%m-%d")),
        format!("  image     {}", product.image_ref),
    ]
    .join("\n")
}

/// Category and brand choices.
pub fn filter_options(options: &FilterOptions) -> String {
    format!(
        "categories: {}\nbrands: {}",
        options.categories.join(", "),
        options.brands.join(", ")
    )
}

/// Cart lines and totals.
pub fn cart(summary: &CartSummary) -> String {
    if summary.lines.is_empty() && summary.unresolved == 0 {
        return "cart is empty".to_string();
    }

    let mut lines: Vec<String> = summary
        .lines
        .iter()
        .map(|line| {
            format!(
                "{:>5}  {:<26} {:>4} x {:>9} = {:>10}",
                line.product_id,
                line.name,
                line.quantity,
                line.unit_price.to_string(),
                line.subtotal.to_string(),
            )
        })
        .collect();

    if summary.unresolved > 0 {
        lines.push(format!(
            "  ({} line(s) reference products no longer in the catalog)",
            summary.unresolved
        ));
    }
    lines.push(format!(
        "{} item(s), total {}",
        summary.item_count, summary.grand_total
    ));
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use catalog_browser_core::{Price, ProductId, Rating};
    use catalog_browser_storefront::{CartState, Catalog};
    use chrono::{TimeZone, Utc};

    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![Product {
            id: ProductId::new(1),
            name: "Books Item 1".to_string(),
            category: "Books".to_string(),
            brand: "Brand D".to_string(),
            price: Price::from_cents(1999),
            rating: Rating::MAX,
            sales_count: 10,
            in_stock: false,
            image_ref: "img".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 9, 30, 8, 0, 0).unwrap(),
        }])
        .unwrap()
    }

    #[test]
    fn test_page_footer() {
        let text = page(&ViewState::new(catalog()));
        assert!(text.contains("Books Item 1"));
        assert!(text.contains("page 1/1 - 1 matching - sorted by createdAt desc"));
    }

    #[test]
    fn test_empty_page() {
        let text = page(&ViewState::new(Catalog::empty()));
        assert!(text.contains("(no products)"));
        assert!(text.contains("page 1/1 - 0 matching"));
    }

    #[test]
    fn test_detail() {
        let catalog = catalog();
        let text = product_detail(&catalog.products()[0]);
        assert!(text.contains("19.99"));
        assert!(text.contains("sold out"));
        assert!(text.contains("2026-09-30"));
    }

    #[test]
    fn test_cart_totals() {
        let catalog = catalog();
        let cart = CartState::new()
            .add_item(ProductId::new(1), 3)
            .unwrap()
            .add_item(ProductId::new(8), 1)
            .unwrap();
        let text = cart_text(&cart, &catalog);
        assert!(text.contains("59.97"));
        assert!(text.contains("4 item(s), total 59.97"));
        assert!(text.contains("1 line(s) reference products"));
    }

    #[test]
    fn test_empty_cart() {
        assert_eq!(cart_text(&CartState::new(), &catalog()), "cart is empty");
    }

    fn cart_text(cart: &CartState, catalog: &Catalog) -> String {
        super::cart(&cart.summary(catalog))
    }
}
