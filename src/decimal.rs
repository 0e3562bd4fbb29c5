use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use crate::errors::{MortgageError, Result};

/// decimal places of every reported monetary value
pub const MONEY_DP: u32 = 2;

/// newton iterations stop once a step is smaller than this
const ROOT_TOLERANCE: Decimal = dec!(0.00000000000000000000000001);
const ROOT_MAX_ITERATIONS: u32 = 100;

/// reported currency amount, always rounded to cents
///
/// Internal balances are carried as raw `Decimal` and only become `Money`
/// when a row or result is emitted, so rounding never feeds back into the
/// next period's interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal, rounding half away from zero to cents
    pub fn from_decimal(d: Decimal) -> Self {
        Money(round_money(d))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> std::result::Result<Self, rust_decimal::Error> {
        Ok(Money::from_decimal(Decimal::from_str(s)?))
    }

    /// create from integer amount
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
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

// sums and differences of cent values are exact, no re-rounding needed
impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, x| acc + *x)
    }
}

/// rate type for interest rates and ratios, stored as a fraction (0.10 = 10%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 10.5 for 10.5%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p / Decimal::ONE_HUNDRED)
    }

    /// get as decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

/// serde adapter for rates written as percentages (10 for 10%)
///
/// Use with `#[serde(with = "crate::decimal::percent")]` on `Rate` fields.
pub mod percent {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Rate;

    pub fn serialize<S>(rate: &Rate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Serialize::serialize(&rate.as_percentage(), serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Rate, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Decimal as Deserialize>::deserialize(deserializer).map(Rate::from_percent)
    }
}

/// round a raw amount to cents, half away from zero
pub fn round_money(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// divide, treating any division by zero as 0
pub fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// base^n by repeated multiplication, failing on overflow
pub fn checked_powi(base: Decimal, n: u32) -> Result<Decimal> {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result
            .checked_mul(base)
            .ok_or_else(|| MortgageError::overflow("integer power"))?;
    }
    Ok(result)
}

/// n-th root of a non-negative decimal via newton's method
///
/// Values above `2^n` are first divided down by `2^n` (doubling the root each
/// time). The start is then `min(1 + (x - 1) / n, 2)`, both bounds at or above
/// the root, so the iteration descends monotonically and `guess^n` stays in range.
pub fn nth_root(x: Decimal, n: u32) -> Result<Decimal> {
    if x.is_sign_negative() && !x.is_zero() {
        return Err(MortgageError::CalculationError {
            message: format!("root of negative value {}", x),
        });
    }
    if x.is_zero() || x == Decimal::ONE || n == 1 {
        return Ok(x);
    }
    if n == 0 {
        return Err(MortgageError::CalculationError {
            message: "zeroth root is undefined".to_string(),
        });
    }

    let two = dec!(2);
    let mut x = x;
    let mut scale = Decimal::ONE;
    // 2^n beyond the decimal range means x is already below it
    if let Ok(block) = checked_powi(two, n) {
        while x > block {
            x /= block;
            scale *= two;
        }
    }

    let n_dec = Decimal::from(n);
    let mut guess = (Decimal::ONE + (x - Decimal::ONE) / n_dec).min(two);

    for _ in 0..ROOT_MAX_ITERATIONS {
        let g_n_minus_1 = checked_powi(guess, n - 1)?;
        if g_n_minus_1.is_zero() {
            break;
        }
        let g_n = g_n_minus_1
            .checked_mul(guess)
            .ok_or_else(|| MortgageError::overflow("nth root"))?;

        let delta = (g_n - x) / (n_dec * g_n_minus_1);
        guess -= delta;

        if delta.abs() < ROOT_TOLERANCE {
            break;
        }
    }

    Ok(guess * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_rounds_half_away_from_zero() {
        assert_eq!(Money::from_decimal(dec!(833.335)).to_string(), "833.34");
        assert_eq!(Money::from_decimal(dec!(833.325)).to_string(), "833.33");
        assert_eq!(Money::from_decimal(dec!(-0.005)).to_string(), "-0.01");
    }

    #[test]
    fn test_money_sum_is_exact() {
        let values = vec![Money::from_decimal(dec!(0.1)), Money::from_decimal(dec!(0.2))];
        let total: Money = values.iter().sum();
        assert_eq!(total, Money::from_decimal(dec!(0.3)));
    }

    #[test]
    fn test_rate_from_percent() {
        let rate = Rate::from_percent(dec!(10.5));
        assert_eq!(rate.as_decimal(), dec!(0.105));
        assert_eq!(rate.as_percentage(), dec!(10.5));
    }

    #[test]
    fn test_ratio_or_zero() {
        assert_eq!(ratio_or_zero(dec!(10), dec!(4)), dec!(2.5));
        assert_eq!(ratio_or_zero(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_checked_powi() {
        assert_eq!(checked_powi(dec!(1.1), 2).unwrap(), dec!(1.21));
        assert_eq!(checked_powi(dec!(7), 0).unwrap(), Decimal::ONE);
        assert!(checked_powi(dec!(1000), 20).is_err());
    }

    #[test]
    fn test_nth_root() {
        let root = nth_root(dec!(1.1), 12).unwrap();
        let back = checked_powi(root, 12).unwrap();
        assert!((back - dec!(1.1)).abs() < dec!(0.000000000000000001));

        assert_eq!(nth_root(dec!(81), 4).unwrap().round_dp(12), dec!(3));
        assert_eq!(nth_root(Decimal::ZERO, 12).unwrap(), Decimal::ZERO);
        assert!(nth_root(dec!(-1), 12).is_err());
    }

    #[test]
    fn test_nth_root_of_large_values() {
        // 1 + 1_000_000%
        let root = nth_root(dec!(10001), 12).unwrap();
        let back = checked_powi(root, 12).unwrap();
        assert!((back - dec!(10001)).abs() < dec!(0.000000001));

        assert_eq!(nth_root(dec!(4096), 12).unwrap().round_dp(20), dec!(2));
        assert_eq!(nth_root(dec!(1099511627776), 4).unwrap().round_dp(12), dec!(1024));
    }

    #[test]
    fn test_percent_serde() {
        #[derive(Serialize, Deserialize)]
        struct Quote {
            #[serde(with = "percent")]
            rate: Rate,
        }

        let quote: Quote = serde_json::from_str(r#"{ "rate": "10.5" }"#).unwrap();
        assert_eq!(quote.rate.as_decimal(), dec!(0.105));

        let value: serde_json::Value = serde_json::to_value(&quote).unwrap();
        let written: Decimal = value["rate"].as_str().unwrap().parse().unwrap();
        assert_eq!(written, dec!(10.5));
    }
}
