//! Money type for representing currency amounts
//!
//! Amounts keep the exact decimal value the provider reported. Rounding to
//! cents happens once, when a delta or a display string is produced.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

/// Largest magnitude accepted from a provider or snapshot, in currency units
const MAX_ABS_UNITS: i64 = 1_000_000_000_000_000;

/// Represents a monetary amount as an exact decimal
///
/// Serialized as a plain decimal number (`500.0`), which is how both the
/// provider export and the snapshot file carry balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Wrap a decimal amount
    ///
    /// Returns `None` when the magnitude exceeds what a budget can hold.
    pub fn new(amount: Decimal) -> Option<Self> {
        if amount.abs() > Decimal::from(MAX_ABS_UNITS) {
            return None;
        }
        Some(Self(amount))
    }

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use balance_digest::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Convert a floating point amount without rounding
    ///
    /// Uses the shortest decimal that reads back as the same `f64`, so
    /// `0.0046` stays `0.0046`. Returns `None` for NaN, infinities and
    /// out-of-range values.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Decimal::from_str(&value.to_string())
            .ok()
            .and_then(Self::new)
    }

    /// Create a zero Money amount
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The exact decimal amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Round to two decimal places, halves away from zero
    ///
    /// # Examples
    /// ```
    /// use balance_digest::models::Money;
    /// assert_eq!(Money::from_f64(0.0046).unwrap().round_to_cents(), Money::zero());
    /// assert_eq!(Money::from_f64(0.005).unwrap().round_to_cents(), Money::from_cents(1));
    /// assert_eq!(Money::from_f64(-0.005).unwrap().round_to_cents(), Money::from_cents(-1));
    /// ```
    pub fn round_to_cents(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Format with a currency symbol and comma digit grouping
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.round_to_cents().0;
        let sign = if rounded < Decimal::ZERO { "-" } else { "" };
        let digits = format!("{:.2}", rounded.abs());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
        format!("{}{}{}.{}", sign, symbol, group_thousands(whole), fraction)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value: f64 = self.0.to_string().parse().map_err(serde::ser::Error::custom)?;
        serializer.serialize_f64(value)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_f64(value)
            .ok_or_else(|| serde::de::Error::custom(format!("amount out of range: {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f64_keeps_exact_decimal() {
        assert_eq!(Money::from_f64(500.0), Some(Money::from_cents(50000)));
        assert_eq!(
            Money::from_f64(-12.345).unwrap().amount(),
            Decimal::new(-12345, 3)
        );
        assert_eq!(
            Money::from_f64(0.0046).unwrap().amount(),
            Decimal::new(46, 4)
        );
        assert_eq!(Money::from_f64(f64::NAN), None);
        assert_eq!(Money::from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_rejects_out_of_range_amounts() {
        assert_eq!(Money::from_f64(1e300), None);
        assert_eq!(Money::from_f64(-1e300), None);
        assert_eq!(Money::from_f64(1e20), None);
        assert!(Money::from_f64(1e14).is_some());

        let err = serde_json::from_str::<Money>("1e300").unwrap_err();
        assert!(err.to_string().contains("amount out of range"));
    }

    #[test]
    fn test_extreme_difference_does_not_overflow() {
        let high = Money::from_f64(1e15).unwrap();
        let low = -high;
        assert_eq!((high - low).to_string(), "$2,000,000,000,000,000.00");
        assert_eq!((low - high).to_string(), "-$2,000,000,000,000,000.00");
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(123456789).to_string(), "$1,234,567.89");
        assert_eq!(Money::from_cents(100000).to_string(), "$1,000.00");
        assert_eq!(Money::from_f64(450.0).unwrap().to_string(), "$450.00");
    }

    #[test]
    fn test_display_rounds_once() {
        assert_eq!(Money::from_f64(12.345).unwrap().to_string(), "$12.35");
        assert_eq!(Money::from_f64(12.344).unwrap().to_string(), "$12.34");
        assert_eq!(Money::from_f64(-12.345).unwrap().to_string(), "-$12.35");
        assert_eq!(Money::from_f64(-0.004).unwrap().to_string(), "$0.00");
        // 0.0046 would become 0.005 and then $0.01 if rounded in two steps
        assert_eq!(Money::from_f64(0.0046).unwrap().to_string(), "$0.00");
        assert_eq!(Money::from_f64(0.0049999).unwrap().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a - b, Money::from_cents(500));
        assert_eq!(a + b, Money::from_cents(1500));
        assert_eq!(-a, Money::from_cents(-1000));
        assert_eq!((b - a).abs(), Money::from_cents(500));
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(45000);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "450.0");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);

        let from_int: Money = serde_json::from_str("12").unwrap();
        assert_eq!(from_int, Money::from_cents(1200));

        let precise: Money = serde_json::from_str("0.0046").unwrap();
        assert_eq!(serde_json::to_string(&precise).unwrap(), "0.0046");
    }
}
