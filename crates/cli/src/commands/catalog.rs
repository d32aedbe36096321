//! Print the product catalog.

use std::io::Write;

use modesta_core::{Catalog, Category, Product, UnknownCategory};

/// Errors from the `catalog` command.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Look up a category by name, ignoring ASCII case.
///
/// Shared by `catalog --category` and the shop's `browse` command.
pub fn category(name: &str) -> Result<Category, UnknownCategory> {
    Category::ALL
        .into_iter()
        .find(|category| category.as_str().eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| UnknownCategory(name.to_owned()))
}

/// One catalog row: id, name, Arabic name, category, price and badge.
pub fn product_line(product: &Product) -> String {
    let badge = product
        .badge
        .map(|badge| format!(" [{badge}]"))
        .unwrap_or_default();
    format!(
        "{:>3}  {:<24} {:<18} {:<12} {:>10}{badge}",
        product.id.as_i32(),
        product.name,
        product.name_ar,
        product.category.as_str(),
        product.price.to_string()
    )
}

/// List products, optionally restricted to one category.
///
/// # Errors
///
/// Returns an error if the category name is not recognized or output fails.
pub fn list(only: Option<&str>, out: &mut impl Write) -> Result<(), CatalogError> {
    let catalog = Catalog::seeded();

    let products: Vec<&Product> = match only {
        Some(name) => catalog.in_category(category(name)?),
        None => catalog.products().iter().collect(),
    };

    tracing::debug!(count = products.len(), "Listing products");

    for product in products {
        writeln!(out, "{}", product_line(product))?;
    }
    Ok(())
}
