//! The product catalog.
//!
//! A flat, ordered list of at most a dozen products. Lookups are linear scans;
//! nothing at this size warrants an index.

use crate::product::Product;
use crate::types::{Badge, Category, CategoryFilter, ProductId};

/// Read-only product catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from an ordered product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's launch collection.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Products passing `filter`, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: CategoryFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| filter.matches(product.category))
            .collect()
    }

    /// Products in a single category. Empty if the category has none.
    #[must_use]
    pub fn in_category(&self, category: Category) -> Vec<&Product> {
        self.filter(CategoryFilter::Only(category))
    }

    /// Categories in display order.
    #[must_use]
    pub const fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

fn placeholder_image(background: &str, label: &str) -> String {
    format!("https://placehold.co/300x380/{background}/white?text={label}")
}

fn seed_products() -> Vec<Product> {
    vec![
        Product::new(
            1,
            "Classic Black Abaya",
            "عباية كلاسيك سوداء",
            450,
            Category::Abayas,
            &placeholder_image("1a1a2e", "Classic+Abaya"),
            Some(Badge::Bestseller),
            "Elegant classic black abaya with premium fabric",
        ),
        Product::new(
            2,
            "Butterfly Abaya",
            "عباية فراشة",
            520,
            Category::Abayas,
            &placeholder_image("16213e", "Butterfly+Abaya"),
            Some(Badge::New),
            "Modern butterfly cut with flowing sleeves",
        ),
        Product::new(
            3,
            "Embroidered Silk Abaya",
            "عباية حرير مطرزة",
            680,
            Category::Abayas,
            &placeholder_image("0f3460", "Silk+Abaya"),
            Some(Badge::Premium),
            "Luxurious silk abaya with delicate embroidery",
        ),
        Product::new(
            4,
            "Chiffon Khimar",
            "خمار شيفون",
            180,
            Category::Khimars,
            &placeholder_image("b8a9c9", "Chiffon+Khimar"),
            None,
            "Lightweight chiffon khimar for daily wear",
        ),
        Product::new(
            5,
            "Premium Crepe Khimar",
            "خمار كريب فاخر",
            220,
            Category::Khimars,
            &placeholder_image("9c88b8", "Crepe+Khimar"),
            Some(Badge::Popular),
            "High-quality crepe fabric with beautiful drape",
        ),
        Product::new(
            6,
            "French Khimar",
            "خمار فرنسي",
            250,
            Category::Khimars,
            &placeholder_image("7b68a6", "French+Khimar"),
            Some(Badge::New),
            "Elegant French style khimar",
        ),
        Product::new(
            7,
            "Saudi Niqab",
            "نقاب سعودي",
            120,
            Category::Niqabs,
            &placeholder_image("2f4858", "Saudi+Niqab"),
            None,
            "Traditional Saudi style niqab",
        ),
        Product::new(
            8,
            "Butterfly Niqab",
            "نقاب فراشة",
            90,
            Category::Niqabs,
            &placeholder_image("34495e", "Butterfly+Niqab"),
            Some(Badge::Bestseller),
            "Comfortable butterfly niqab design",
        ),
        Product::new(
            9,
            "Single Layer Niqab",
            "نقاب طبقة واحدة",
            75,
            Category::Niqabs,
            &placeholder_image("2c3e50", "Single+Layer"),
            None,
            "Simple single layer niqab",
        ),
        Product::new(
            10,
            "Hijab Magnetic Pins Set",
            "طقم دبابيس مغناطيسية",
            45,
            Category::Accessories,
            &placeholder_image("f8a5c2", "Magnetic+Pins"),
            Some(Badge::Popular),
            "Set of 12 magnetic hijab pins",
        ),
        Product::new(
            11,
            "Silk Headband Collection",
            "مجموعة باندانا حرير",
            65,
            Category::Accessories,
            &placeholder_image("ff6b81", "Silk+Headband"),
            None,
            "Pack of 3 silk headbands",
        ),
        Product::new(
            12,
            "Premium Underscarves Pack",
            "طقم بطانات فاخرة",
            85,
            Category::Accessories,
            &placeholder_image("f78fb3", "Underscarves"),
            Some(Badge::New),
            "Set of 5 premium cotton underscarves",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::types::Price;

    #[test]
    fn test_seeded_catalog_has_unique_ids() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.len(), 12);

        let ids: HashSet<_> = catalog.products().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_find_by_id() {
        let catalog = Catalog::seeded();
        let abaya = catalog.find(ProductId::new(1)).map(|p| p.price);
        assert_eq!(abaya, Some(Price::egp(450)));
        assert!(catalog.find(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_filter_by_category_keeps_order() {
        let catalog = Catalog::seeded();
        let niqabs: Vec<i32> = catalog
            .in_category(Category::Niqabs)
            .iter()
            .map(|p| p.id.as_i32())
            .collect();
        assert_eq!(niqabs, vec![7, 8, 9]);
    }

    #[test]
    fn test_unfiltered_view_returns_everything() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.filter(CategoryFilter::All).len(), catalog.len());
    }

    #[test]
    fn test_category_without_products_is_empty() {
        let catalog = Catalog::new(
            Catalog::seeded()
                .products()
                .iter()
                .filter(|p| p.category != Category::Accessories)
                .cloned()
                .collect(),
        );
        assert!(catalog.in_category(Category::Accessories).is_empty());
        assert_eq!(catalog.in_category(Category::Abayas).len(), 3);
    }

    #[test]
    fn test_categories_in_display_order() {
        let catalog = Catalog::seeded();
        assert_eq!(
            catalog.categories(),
            &[
                Category::Abayas,
                Category::Khimars,
                Category::Niqabs,
                Category::Accessories
            ]
        );
    }
}
