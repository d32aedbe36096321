//! Core types for Modesta.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod price;

pub use category::{Badge, Category, CategoryFilter, UnknownCategory};
pub use id::*;
pub use price::{CurrencyCode, Price};
