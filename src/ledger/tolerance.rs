//! Rounding and tolerance helpers shared by the ledger
//!
//! Amounts are never compared for exact equality with zero; anything within
//! one cent counts as settled.

use rust_decimal::Decimal;

use crate::models::Money;

/// One cent. Balances and transfers at or below this size are treated as zero.
pub const TOLERANCE: Money = Money::from_decimal(Decimal::from_parts(1, 0, 0, false, 2));

/// Round an amount to cent precision (half away from zero)
pub fn round_cents(amount: Money) -> Money {
    amount.round_cents()
}

/// True if `amount` is within one cent of zero
pub fn is_within_tolerance(amount: Money) -> bool {
    amount.abs() <= TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_is_one_cent() {
        assert_eq!(TOLERANCE, Money::from_cents(1));
    }

    #[test]
    fn test_is_within_tolerance() {
        assert!(is_within_tolerance(Money::zero()));
        assert!(is_within_tolerance(Money::from_cents(1)));
        assert!(is_within_tolerance(Money::from_cents(-1)));
        assert!(!is_within_tolerance(Money::from_cents(2)));
        assert!(!is_within_tolerance(Money::parse("-0.011").unwrap()));
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(
            round_cents(Money::parse("1.005").unwrap()),
            Money::from_cents(101)
        );
        assert_eq!(
            round_cents(Money::parse("-1.005").unwrap()),
            Money::from_cents(-101)
        );
    }
}
