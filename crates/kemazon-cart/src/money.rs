//! Money type for representing prices.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues when summing line totals. On the wire a price is a
//! plain number in major units (`100`, `49.99`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use crate::CartError;

/// Currencies a cart total can be displayed in.
///
/// Display only: prices are persisted without a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    ARS,
    USD,
    EUR,
    BRL,
    CLP,
    MXN,
}

impl Currency {
    /// Get the currency code (e.g., "ARS").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::ARS => "ARS",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::BRL => "BRL",
            Currency::CLP => "CLP",
            Currency::MXN => "MXN",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::ARS => "$",
            Currency::USD => "US$",
            Currency::EUR => "\u{20ac}",
            Currency::BRL => "R$",
            Currency::CLP => "CLP$",
            Currency::MXN => "MX$",
        }
    }

    /// Number of decimal places shown for this currency.
    pub fn decimal_places(&self) -> usize {
        match self {
            Currency::CLP => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary amount in hundredths of the major unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a Money value from cents.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Zero.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Create a Money value from whole major units.
    pub const fn from_major(units: i64) -> Self {
        Self::new(units.saturating_mul(100))
    }

    /// Create a Money value from a decimal amount, rejecting negative,
    /// non-finite or out-of-range input.
    ///
    /// ```
    /// use kemazon_cart::Money;
    /// let price = Money::from_decimal(49.99).unwrap();
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Result<Self, CartError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CartError::InvalidPrice(amount.to_string()));
        }
        let cents = (amount * 100.0).round();
        if cents >= i64::MAX as f64 {
            return Err(CartError::InvalidPrice(amount.to_string()));
        }
        Ok(Self::new(cents as i64))
    }

    /// Convert to a decimal value in major units.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn times(&self, quantity: u32) -> Money {
        Money::new(self.amount_cents.saturating_mul(i64::from(quantity)))
    }

    /// Format for display (e.g., "$49.99").
    pub fn display(&self, currency: Currency) -> String {
        let places = currency.decimal_places();
        format!("{}{:.places$}", currency.symbol(), self.to_decimal())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl FromStr for Money {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount: f64 = s
            .trim()
            .parse()
            .map_err(|_| CartError::InvalidPrice(s.to_string()))?;
        Money::from_decimal(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_decimal())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.amount_cents % 100 == 0 {
            serializer.serialize_i64(self.amount_cents / 100)
        } else {
            serializer.serialize_f64(self.to_decimal())
        }
    }
}

/// Price as it may appear on the wire: a number, or a numeric string
/// from a decimal column.
#[derive(Deserialize)]
#[serde(untagged)]
enum WirePrice {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match WirePrice::deserialize(deserializer)? {
            WirePrice::Number(n) => Money::from_decimal(n),
            WirePrice::Text(s) => s.parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(49.99).unwrap().amount_cents, 4999);
        assert_eq!(Money::from_decimal(0.1).unwrap().amount_cents, 10);
        assert!(Money::from_decimal(-1.0).is_err());
        assert!(Money::from_decimal(f64::NAN).is_err());
    }

    #[test]
    fn test_money_from_decimal_out_of_range() {
        assert!(Money::from_decimal(1e30).is_err());
        assert!(Money::from_decimal(1e17).is_err());
        assert!("1e30".parse::<Money>().is_err());
        assert_eq!(
            Money::from_decimal(1e15).unwrap().amount_cents,
            100_000_000_000_000_000
        );
    }

    #[test]
    fn test_money_parse() {
        assert_eq!("100".parse::<Money>().unwrap(), Money::from_major(100));
        assert_eq!(" 12.50 ".parse::<Money>().unwrap(), Money::new(1250));
        assert!("abc".parse::<Money>().is_err());
        assert!("-3".parse::<Money>().is_err());
    }

    #[test]
    fn test_money_times_and_sum() {
        let total: Money = [Money::from_major(50).times(2), Money::from_major(30).times(1)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_major(130));
    }

    #[test]
    fn test_money_saturates() {
        let big = Money::new(i64::MAX);
        assert_eq!(big.times(2).amount_cents, i64::MAX);
        assert_eq!((big + Money::new(1)).amount_cents, i64::MAX);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4999);
        assert_eq!(m.display(Currency::ARS), "$49.99");
        assert_eq!(m.display(Currency::CLP), "CLP$50");
        assert_eq!(m.to_string(), "49.99");
    }

    #[test]
    fn test_money_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Money::from_major(100)).unwrap(), "100");
        assert_eq!(serde_json::to_string(&Money::new(4999)).unwrap(), "49.99");
    }

    #[test]
    fn test_money_deserializes_number_or_string() {
        let n: Money = serde_json::from_str("49.99").unwrap();
        let s: Money = serde_json::from_str(r#""49.99""#).unwrap();
        assert_eq!(n, s);
        assert!(serde_json::from_str::<Money>("-5").is_err());
        assert!(serde_json::from_str::<Money>("true").is_err());
    }
}
