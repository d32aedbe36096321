//! Checkout: shipping details, order numbers and the order snapshot.
//!
//! Checkout is a collection step. The only validation is presence of the
//! required fields; there is no payment, no stock reservation and no order
//! ledger. Placing an order snapshots the cart and then empties it.

use core::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::cart::{Cart, CartItem};
use crate::types::Price;

/// Cities offered by the shipping form.
pub const CITIES: [&str; 4] = ["Cairo", "Alexandria", "Giza", "Other"];

/// Prefix of every order number.
pub const ORDER_NUMBER_PREFIX: &str = "MOD";

/// Order numbers carry this many digits after the prefix.
const ORDER_NUMBER_MODULUS: u64 = 100_000;

/// Errors that stop an order from being placed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("your cart is empty")]
    CartEmpty,
    /// One or more required fields were left blank.
    #[error("please fill in: {}", .missing.join(", "))]
    InvalidSubmission {
        /// Names of the blank required fields, in form order.
        missing: Vec<&'static str>,
    },
}

/// Raw shipping fields as submitted by a form or API client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShippingForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ShippingForm {
    /// Check required fields and normalize whitespace.
    ///
    /// Name, phone and address must be non-blank. City and email are kept
    /// when non-blank and dropped otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidSubmission`] listing every blank
    /// required field.
    pub fn validate(&self) -> Result<ShippingDetails, CheckoutError> {
        let required = [
            ("name", self.name.trim()),
            ("phone", self.phone.trim()),
            ("address", self.address.trim()),
        ];

        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(CheckoutError::InvalidSubmission { missing });
        }

        Ok(ShippingDetails {
            name: self.name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: non_blank(self.city.as_deref()),
            email: non_blank(self.email.as_deref()),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Validated shipping details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: Option<String>,
    pub email: Option<String>,
}

/// Display-only receipt number, `MOD-NNNNN`.
///
/// Derived from a hash of the customer name, so two customers with the same
/// name share a number. Nothing records issued numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Derive the order number for a customer name.
    #[must_use]
    pub fn from_customer_name(name: &str) -> Self {
        let digest = Sha256::digest(name.as_bytes());
        let value = digest
            .iter()
            .take(8)
            .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));
        Self(format!(
            "{ORDER_NUMBER_PREFIX}-{:05}",
            value % ORDER_NUMBER_MODULUS
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A placed order. Lives only long enough to be shown back to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub number: OrderNumber,
    pub shipping: ShippingDetails,
    pub items: Vec<CartItem>,
    pub total: Price,
    pub item_count: u32,
}

impl Order {
    /// Snapshot the cart into an order and clear the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::CartEmpty`] if the cart has no lines; the
    /// cart is left untouched in that case.
    pub fn place(shipping: ShippingDetails, cart: &mut Cart) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::CartEmpty);
        }

        let order = Self {
            number: OrderNumber::from_customer_name(&shipping.name),
            items: cart.items().to_vec(),
            total: cart.total(),
            item_count: cart.count(),
            shipping,
        };
        cart.clear();
        Ok(order)
    }
}
