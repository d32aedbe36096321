//! The catalog entry.

use serde::{Deserialize, Serialize};

use crate::types::{Badge, Category, Price, ProductId};

/// A product in the catalog.
///
/// Products are built once when the catalog is seeded and never change
/// afterwards. Cart lines hold their own copy, so a cart can be stored in a
/// session without a reference back into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Arabic display name.
    pub name_ar: String,
    pub price: Price,
    pub category: Category,
    pub image_url: String,
    pub badge: Option<Badge>,
    pub description: String,
}

impl Product {
    /// Create a product priced in whole Egyptian pounds.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i32,
        name: &str,
        name_ar: &str,
        pounds: i64,
        category: Category,
        image_url: &str,
        badge: Option<Badge>,
        description: &str,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.to_owned(),
            name_ar: name_ar.to_owned(),
            price: Price::egp(pounds),
            category,
            image_url: image_url.to_owned(),
            badge,
            description: description.to_owned(),
        }
    }
}
