//! Modesta Core - Catalog, cart and checkout kernel.
//!
//! This crate provides the logical kernel shared by every Modesta surface:
//! - `storefront` - Server-rendered web storefront
//! - `cli` - Terminal storefront and catalog tools
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no HTTP,
//! no terminal handling. Each browsing session owns one [`Cart`]; the
//! [`Catalog`] is a read-only value handed to whoever needs it.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, categories and badges
//! - [`product`] - The immutable catalog entry
//! - [`catalog`] - Seeded product list with id and category lookup
//! - [`cart`] - Per-session cart with quantity and total aggregation
//! - [`checkout`] - Shipping form, order number and order snapshot
//! - [`flow`] - Screen state machine driving an in-process storefront

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod flow;
pub mod product;
pub mod types;

pub use cart::{Cart, CartItem, LineChange};
pub use catalog::Catalog;
pub use checkout::{CITIES, CheckoutError, Order, OrderNumber, ShippingDetails, ShippingForm};
pub use flow::{Action, FlowError, Outcome, Screen, ShopSession};
pub use product::Product;
pub use types::*;
