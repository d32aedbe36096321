//! Session-related types.
//!
//! Each browser session owns exactly one cart. Nothing in the session is
//! shared between shoppers, so handlers never need to coordinate.

use serde::{Deserialize, Serialize};

/// One-shot notice shown on the next rendered page, then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

/// Visual style of a [`Flash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Notice,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Notice,
            message: message.into(),
        }
    }

    /// CSS modifier for the toast element.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "toast--success",
            FlashKind::Notice => "toast--notice",
        }
    }
}

/// Session keys for storefront data.
pub mod keys {
    /// Key for storing the shopper's cart.
    pub const CART: &str = "cart";

    /// Key for the pending flash notice.
    pub const FLASH: &str = "flash";
}
