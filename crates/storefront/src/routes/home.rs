//! Home and category page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use modesta_core::{Catalog, Category, CategoryFilter, Product};

use super::LayoutView;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CspNonce;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub name_ar: String,
    pub price: String,
    pub category: String,
    pub image_url: String,
    pub badge: Option<String>,
    pub description: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            name_ar: product.name_ar.clone(),
            price: product.price.to_string(),
            category: product.category.to_string(),
            image_url: product.image_url.clone(),
            badge: product.badge.map(|badge| badge.to_string()),
            description: product.description.clone(),
        }
    }
}

/// Category card data for templates.
#[derive(Clone)]
pub struct CategoryCardView {
    pub name: String,
    pub product_count: u32,
    pub active: bool,
}

fn category_cards(catalog: &Catalog, filter: CategoryFilter) -> Vec<CategoryCardView> {
    catalog
        .categories()
        .iter()
        .map(|category| CategoryCardView {
            name: category.to_string(),
            product_count: u32::try_from(catalog.in_category(*category).len())
                .unwrap_or(u32::MAX),
            active: filter == CategoryFilter::Only(*category),
        })
        .collect()
}

fn product_views(products: &[&Product]) -> Vec<ProductView> {
    products.iter().map(|product| ProductView::from(*product)).collect()
}

/// Home page query parameters.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub category: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: LayoutView,
    pub categories: Vec<CategoryCardView>,
    pub products: Vec<ProductView>,
    pub current_category: String,
    pub return_to: String,
}

/// Category page template.
#[derive(Template, WebTemplate)]
#[template(path = "category.html")]
pub struct CategoryTemplate {
    pub layout: LayoutView,
    pub category: String,
    pub products: Vec<ProductView>,
    pub return_to: String,
}

/// Display the home page, optionally filtered by `?category=`.
///
/// `All`, a missing value, or an unrecognized name shows the full catalog.
#[instrument(skip(state, session, nonce))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    nonce: CspNonce,
    Query(query): Query<HomeQuery>,
) -> Result<HomeTemplate> {
    let filter = CategoryFilter::from_query(query.category.as_deref());
    let catalog = state.catalog();

    let return_to = match filter {
        CategoryFilter::All => "/".to_string(),
        CategoryFilter::Only(category) => format!("/?category={category}"),
    };

    Ok(HomeTemplate {
        layout: LayoutView::load(&session, nonce).await?,
        categories: category_cards(catalog, filter),
        products: product_views(&catalog.filter(filter)),
        current_category: filter.label().to_string(),
        return_to,
    })
}

/// Display a single category page.
#[instrument(skip(state, session, nonce))]
pub async fn category(
    State(state): State<AppState>,
    session: Session,
    nonce: CspNonce,
    Path(name): Path<String>,
) -> Result<CategoryTemplate> {
    let category: Category = name
        .parse()
        .map_err(|_| AppError::NotFound(format!("category {name}")))?;

    Ok(CategoryTemplate {
        layout: LayoutView::load(&session, nonce).await?,
        category: category.to_string(),
        products: product_views(&state.catalog().in_category(category)),
        return_to: format!("/category/{category}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_view_formats_price_and_badge() {
        let catalog = Catalog::seeded();
        let view = ProductView::from(&catalog.products()[0]);
        assert_eq!(view.price, "450 EGP");
        assert_eq!(view.badge.as_deref(), Some("Bestseller"));
        assert_eq!(view.category, "Abayas");
    }

    #[test]
    fn test_category_cards_mark_active_filter() {
        let catalog = Catalog::seeded();
        let cards = category_cards(&catalog, CategoryFilter::Only(Category::Niqabs));
        assert_eq!(cards.len(), 4);
        assert!(cards.iter().all(|c| c.product_count == 3));
        let active: Vec<&str> = cards
            .iter()
            .filter(|c| c.active)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(active, vec!["Niqabs"]);
    }
}
