//! Money type for representing currency amounts
//!
//! Amounts are exact decimals, so split and settlement arithmetic never
//! accumulates binary floating-point error. Rounding to cents is explicit
//! and always half-away-from-zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A signed monetary amount in a single currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Largest magnitude, in cents, that a parsed or stored amount may have
    ///
    /// One trillion in currency units. Whole-cent counts stay inside `i64`,
    /// and summing any realistic number of such amounts stays inside
    /// `Decimal`'s range.
    pub const MAX_CENTS: i64 = 100_000_000_000_000;

    /// The largest amount accepted for an expense, split, or settlement
    pub fn max_amount() -> Self {
        Self::from_cents(Self::MAX_CENTS)
    }

    /// Whether the amount's magnitude is above [`Money::max_amount`]
    pub fn exceeds_max(&self) -> bool {
        self.0.abs() > Self::max_amount().0
    }

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use splitledger::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a Money amount from a decimal value
    pub const fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal value
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Round to cent precision, ties away from zero
    pub fn round_cents(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Whole cents, after rounding to cent precision
    ///
    /// `None` if the cent count does not fit in an `i64`.
    pub fn cents(&self) -> Option<i64> {
        // Rounded to 2 dp, so the scaled value is integral.
        self.round_cents()
            .0
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
    }

    /// Addition that reports overflow instead of panicking
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Subtraction that reports overflow instead of panicking
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Check if the amount is exactly zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "-$10.50", "10".
    /// Amounts above [`Money::max_amount`] in magnitude are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.strip_prefix('$').unwrap_or(rest);
        if rest.is_empty() || rest.starts_with('-') || rest.starts_with('+') {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value = Decimal::from_str(rest)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        let amount = Self(if negative { -value } else { value });
        if amount.exceeds_max() {
            return Err(MoneyParseError::TooLarge(s.to_string()));
        }
        Ok(amount)
    }

    /// Format with a currency symbol, rounded to cents
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.round_cents().0;
        if rounded < Decimal::ZERO {
            format!("-{}{:.2}", symbol, rounded.abs())
        } else {
            format!("{}{:.2}", symbol, rounded)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooLarge(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooLarge(s) => {
                write!(f, "Amount {} exceeds the maximum of {}", s, Money::max_amount())
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), Some(1050));
        assert_eq!(m, money("10.50"));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
        assert_eq!(money("3").format_with_symbol("€"), "€3.00");
    }

    #[test]
    fn test_round_cents_half_away_from_zero() {
        assert_eq!(money("10.004").round_cents(), money("10.00"));
        assert_eq!(money("0.005").round_cents(), money("0.01"));
        assert_eq!(money("-0.005").round_cents(), money("-0.01"));
        assert_eq!(money("2.675").round_cents(), money("2.68"));
        assert_eq!(money("-10.004").round_cents(), money("-10.00"));
    }

    #[test]
    fn test_cents_rounds_first() {
        assert_eq!(money("33.333").cents(), Some(3333));
        assert_eq!(money("-0.125").cents(), Some(-13));
        assert_eq!(money("7").cents(), Some(700));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), Some(1500));
        assert_eq!((a - b).cents(), Some(500));
        assert_eq!((-a).cents(), Some(-1000));
    }

    #[test]
    fn test_parse() {
        assert_eq!(money("10.50").cents(), Some(1050));
        assert_eq!(money("$10.50").cents(), Some(1050));
        assert_eq!(money("-10.50").cents(), Some(-1050));
        assert_eq!(money("-$10.50").cents(), Some(-1050));
        assert_eq!(money("10").cents(), Some(1000));
        assert_eq!(money("10.5").cents(), Some(1050));
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("--5").is_err());
    }

    #[test]
    fn test_parse_rejects_amounts_above_max() {
        assert_eq!(money("1000000000000").cents(), Some(Money::MAX_CENTS));
        assert_eq!(money("-$1000000000000").cents(), Some(-Money::MAX_CENTS));

        assert!(matches!(
            Money::parse("1000000000000.01"),
            Err(MoneyParseError::TooLarge(_))
        ));
        assert!(matches!(
            Money::parse("1000000000000000000000000000"),
            Err(MoneyParseError::TooLarge(_))
        ));
    }

    #[test]
    fn test_cents_out_of_range_is_none() {
        let huge = Money::from_decimal(Decimal::from_i128_with_scale(10_i128.pow(27), 0));
        assert!(huge.exceeds_max());
        assert_eq!(huge.cents(), None);

        let past_i64 = Money::from_decimal(Decimal::from(i64::MAX));
        assert_eq!(past_i64.cents(), None);
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_decimal(Decimal::MAX);
        assert_eq!(max.checked_add(Money::from_cents(100)), None);
        assert_eq!((-max).checked_sub(Money::from_cents(100)), None);
        assert_eq!(
            Money::from_cents(100).checked_add(Money::from_cents(50)),
            Some(Money::from_cents(150))
        );
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), Some(600));
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
