//! Print the order number for a customer name.

use std::io::{self, Write};

use modesta_core::OrderNumber;

/// Write the order number `name` would receive at checkout.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn print(name: &str, out: &mut impl Write) -> io::Result<()> {
    let number = OrderNumber::from_customer_name(name.trim());
    writeln!(out, "{number}")
}
