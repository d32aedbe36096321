//! CLI command implementations.

pub mod catalog;
pub mod order_number;
pub mod shop;
