//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are kept in the currency's standard unit (pounds, not piastres).
/// Catalog prices are whole pounds, so display drops the fraction when it is
/// zero: `450 EGP`, `12.50 EGP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Zero in the store currency.
    pub const ZERO: Self = Self::new(Decimal::ZERO, CurrencyCode::EGP);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price of whole Egyptian pounds.
    #[must_use]
    pub fn egp(pounds: i64) -> Self {
        Self::new(Decimal::from(pounds), CurrencyCode::EGP)
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl Add for Price {
    type Output = Self;

    /// Amounts are summed in the left-hand currency; the store trades in a
    /// single currency.
    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amount.fract().is_zero() {
            write!(f, "{} {}", self.amount.trunc(), self.currency_code)
        } else {
            write!(f, "{:.2} {}", self.amount, self.currency_code)
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EGP,
    USD,
}

impl CurrencyCode {
    /// The three-letter code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EGP => "EGP",
            Self::USD => "USD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_pounds() {
        assert_eq!(Price::egp(450).to_string(), "450 EGP");
        assert_eq!(Price::ZERO.to_string(), "0 EGP");
    }

    #[test]
    fn test_display_fractional_amount() {
        let price = Price::new(Decimal::new(1250, 2), CurrencyCode::EGP);
        assert_eq!(price.to_string(), "12.50 EGP");
    }

    #[test]
    fn test_times_and_sum() {
        let line = Price::egp(450).times(3);
        assert_eq!(line, Price::egp(1350));

        let total: Price = [Price::egp(450), Price::egp(90), Price::egp(45)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::egp(585));
    }

    #[test]
    fn test_empty_sum_is_zero() {
        let total: Price = std::iter::empty().sum();
        assert!(total.is_zero());
    }
}
