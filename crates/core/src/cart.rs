//! Per-session shopping cart.
//!
//! Lines keep insertion order and are unique by product id. A line's quantity
//! is always at least one: any change that would take it to zero or below
//! removes the line instead.
//!
//! There are two distinct quantity updates: [`Cart::set_quantity`] replaces
//! the quantity outright, while [`Cart::adjust_quantity`] applies a signed
//! delta (the `+`/`-` buttons).

use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::{Price, ProductId};

/// One cart line: a product and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// What a quantity update did to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// The line now holds this quantity.
    Updated(u32),
    /// The update reached zero or below and the line was dropped.
    Removed,
    /// No line exists for the product; nothing changed.
    Missing,
}

/// A shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Cart lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The line for a product, if any.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines (not units; see [`Cart::count`]).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Add `quantity` units of a product.
    ///
    /// Increments the existing line or appends a new one. Adding zero units
    /// does nothing.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(item) = self.line_mut(product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem {
                product: product.clone(),
                quantity,
            });
        }
    }

    /// Remove a product's line. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product.id != product_id);
        self.items.len() != before
    }

    /// Set a line's quantity outright. Zero or below removes the line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> LineChange {
        if quantity <= 0 {
            return if self.remove(product_id) {
                LineChange::Removed
            } else {
                LineChange::Missing
            };
        }

        let Some(item) = self.line_mut(product_id) else {
            return LineChange::Missing;
        };
        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        LineChange::Updated(item.quantity)
    }

    /// Change a line's quantity by `delta`. A result of zero or below
    /// removes the line.
    pub fn adjust_quantity(&mut self, product_id: ProductId, delta: i64) -> LineChange {
        let Some(current) = self.get(product_id).map(|item| i64::from(item.quantity)) else {
            return LineChange::Missing;
        };
        self.set_quantity(product_id, current.saturating_add(delta))
    }

    /// Sum of line totals. Zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities across all lines. Zero for an empty cart.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product.id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn product(catalog: &Catalog, id: i32) -> Product {
        catalog.find(ProductId::new(id)).cloned().unwrap()
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let catalog = Catalog::seeded();
        let abaya = product(&catalog, 1);
        let mut cart = Cart::new();

        cart.add(&abaya, 1);
        cart.add(&abaya, 2);

        assert_eq!(cart.line_count(), 1);
        let line = cart.get(abaya.id).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.line_total(), Price::egp(1350));
        assert_eq!(cart.total(), Price::egp(1350));
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(&product(&catalog, 8), 1);
        cart.add(&product(&catalog, 2), 1);
        cart.add(&product(&catalog, 8), 1);

        let ids: Vec<i32> = cart.items().iter().map(|i| i.product.id.as_i32()).collect();
        assert_eq!(ids, vec![8, 2]);
    }

    #[test]
    fn test_count_and_total_aggregate_all_lines() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(&product(&catalog, 1), 2); // 900
        cart.add(&product(&catalog, 10), 3); // 135
        cart.add(&product(&catalog, 7), 1); // 120

        assert_eq!(cart.count(), 6);
        assert_eq!(cart.line_count(), 3);
        assert_eq!(cart.total(), Price::egp(1155));
    }

    #[test]
    fn test_add_zero_is_noop() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(&product(&catalog, 3), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_absolute() {
        let catalog = Catalog::seeded();
        let khimar = product(&catalog, 4);
        let mut cart = Cart::new();
        cart.add(&khimar, 1);

        assert_eq!(cart.set_quantity(khimar.id, 5), LineChange::Updated(5));
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes() {
        let catalog = Catalog::seeded();
        let khimar = product(&catalog, 4);
        let niqab = product(&catalog, 7);
        let mut cart = Cart::new();
        cart.add(&khimar, 2);
        cart.add(&niqab, 2);

        assert_eq!(cart.set_quantity(khimar.id, 0), LineChange::Removed);
        assert_eq!(cart.set_quantity(niqab.id, -3), LineChange::Removed);
        assert!(cart.get(khimar.id).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_adjust_quantity_relative() {
        let catalog = Catalog::seeded();
        let pins = product(&catalog, 10);
        let mut cart = Cart::new();
        cart.add(&pins, 2);

        assert_eq!(cart.adjust_quantity(pins.id, 1), LineChange::Updated(3));
        assert_eq!(cart.adjust_quantity(pins.id, -2), LineChange::Updated(1));
        assert_eq!(cart.adjust_quantity(pins.id, -1), LineChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_product_updates_are_noops() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(&product(&catalog, 1), 1);
        let before = cart.clone();

        let missing = ProductId::new(404);
        assert!(!cart.remove(missing));
        assert_eq!(cart.set_quantity(missing, 2), LineChange::Missing);
        assert_eq!(cart.adjust_quantity(missing, -1), LineChange::Missing);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear_resets_aggregates() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        for id in 1..=5 {
            cart.add(&product(&catalog, id), 2);
        }

        cart.clear();

        assert_eq!(cart.count(), 0);
        assert!(cart.total().is_zero());
        assert_eq!(cart.line_count(), 0);
    }

    #[test]
    fn test_empty_cart_aggregates() {
        let cart = Cart::new();
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_cart_survives_serialization() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(&product(&catalog, 6), 2);

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
