use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

/// internal precision carried by every money value
pub const MONEY_PRECISION: u32 = 8;

/// monetary amount, currency agnostic
///
/// values are held at 8 decimal places; rounding to a billing scale
/// (cents etc) always goes through [`crate::rounding::AmountRounder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(MONEY_PRECISION))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(MONEY_PRECISION)))
    }

    /// create from integer amount (dollars, euros, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (cents etc), `scale` at most 28
    pub fn from_minor(amount: i64, scale: u32) -> Self {
        Money(Decimal::new(amount, scale).round_dp(MONEY_PRECISION))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// unrounded product, for callers that round once at the end
    pub fn times(&self, factor: Decimal) -> Decimal {
        self.0 * factor
    }

    /// string with exactly `scale` decimal places, e.g. "476.00"
    pub fn to_fixed(&self, scale: u32) -> String {
        let mut d = self.0.round_dp(scale);
        d.rescale(scale);
        d.to_string()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp(MONEY_PRECISION))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = (self.0 + other.0).round_dp(MONEY_PRECISION);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(MONEY_PRECISION))
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money((self.0 * other).round_dp(MONEY_PRECISION))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

/// rate type for percentages such as vat
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal (e.g., 0.19 for 19%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 19 for 19%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::from(100))
    }

    /// create from fractional percentage (e.g., 7.7 for 7.7%)
    pub fn from_percentage_decimal(p: Decimal) -> Self {
        Rate(p / Decimal::from(100))
    }

    /// get as decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
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
    fn test_minor_units() {
        assert_eq!(Money::from_minor(12_345, 2), Money::from_str_exact("123.45").unwrap());
        assert_eq!(Money::from_minor(100, 2), Money::from_major(1));

        // finer than the internal precision is rounded, not rejected
        assert_eq!(Money::from_minor(5, 20), Money::ZERO);
        assert_eq!(Money::from_minor(123_456_789, 9), Money::from_str_exact("0.12345679").unwrap());
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(Money::from_major(476).to_fixed(2), "476.00");
        assert_eq!(Money::from_str_exact("54.8").unwrap().to_fixed(2), "54.80");
        assert_eq!(Money::from_str_exact("3.14159").unwrap().to_fixed(3), "3.142");
    }

    #[test]
    fn test_sum() {
        let total: Money = vec![Money::from_major(100), Money::from_str_exact("0.5").unwrap()]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_str_exact("100.5").unwrap());
    }

    #[test]
    fn test_rate_percentage() {
        let vat = Rate::from_percentage(19);
        assert_eq!(vat.as_decimal(), dec!(0.19));
        assert_eq!(vat.as_percentage(), dec!(19));
        assert_eq!(vat.to_string(), "19%");

        let reduced = Rate::from_percentage_decimal(dec!(7.7));
        assert_eq!(reduced.as_decimal(), dec!(0.077));
    }
}
