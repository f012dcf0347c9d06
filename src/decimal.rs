use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Sub, SubAssign};
use std::str::FromStr;

use crate::errors::{LedgerError, Result};

/// Money type with 8 decimal places precision
///
/// Installment amounts are an equal split of the principal and are never
/// rounded to cents, so the extra places keep the residual of the split small.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(8))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> std::result::Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s.trim())?.round_dp(8)))
    }

    /// create from integer amount (reais, dollars, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from a float typed into a form; NaN and infinities are rejected
    pub fn try_from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(LedgerError::invalid_input(format!(
                "amount {} is not a finite number",
                value
            )));
        }
        Decimal::from_f64(value)
            .map(Money::from_decimal)
            .ok_or_else(|| {
                LedgerError::invalid_input(format!("amount {} is out of range", value))
            })
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to specified decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// absolute value
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// split into `parts` equal shares, leaving any residual unassigned
    pub fn split_even(&self, parts: u32) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        Some(*self / Decimal::from(parts))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp(8))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = (self.0 + other.0).round_dp(8);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(8))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 = (self.0 - other.0).round_dp(8);
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money((self.0 / other).round_dp(8))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + *x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_centavos() {
        let m = Money::from_str_exact("1299.90").unwrap();
        assert_eq!(m.as_decimal(), dec!(1299.90));
        assert_eq!(Money::from_str_exact("0.01").unwrap(), Money::CENT);
    }

    #[test]
    fn test_split_even_keeps_residual() {
        let share = Money::from_major(100).split_even(3).unwrap();
        assert_eq!(share.as_decimal(), dec!(33.33333333));

        let total: Money = std::iter::repeat(share).take(3).sum();
        assert_eq!(total.as_decimal(), dec!(99.99999999));
        assert!((Money::from_major(100) - total).abs() < Money::CENT);

        assert!(Money::from_major(100).split_even(0).is_none());
    }

    #[test]
    fn test_float_input() {
        assert_eq!(Money::try_from_f64(1200.0).unwrap(), Money::from_major(1200));
        assert!(Money::try_from_f64(f64::NAN).is_err());
        assert!(Money::try_from_f64(f64::INFINITY).is_err());
        assert!(matches!(
            Money::try_from_f64(f64::NEG_INFINITY),
            Err(LedgerError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_positive_excludes_zero() {
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::from_major(-5).is_positive());
        assert!(Money::CENT.is_positive());
    }
}
