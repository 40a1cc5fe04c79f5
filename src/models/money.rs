//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. On the wire an amount is a JSON number in whole currency units
//! (`1200`, `12.5`), which is how budget documents have always been stored.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude accepted from user input or stored documents
    /// (ten trillion currency units)
    pub const MAX: Money = Money(1_000_000_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use budget_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.units(), 10);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    ///
    /// # Examples
    /// ```
    /// use budget_tracker::models::Money;
    /// assert_eq!(Money::from_units(3000).cents(), 300_000);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Amount in currency units as a float, for ratios and percentages
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Take `numerator / denominator` of this amount, floored to whole units
    ///
    /// Used for the percentage shares of income: `floor(income * 0.3)` is
    /// `share_floor(3, 10)`. Integer arithmetic keeps the result exact.
    pub fn share_floor(&self, numerator: i64, denominator: i64) -> Self {
        if denominator == 0 {
            return Self::zero();
        }
        let cents = (i128::from(self.0) * i128::from(numerator)).div_euclid(i128::from(denominator));
        Self(saturate(cents.div_euclid(100) * 100))
    }

    /// This amount `times` times over, saturating at the i64 range
    pub fn times(&self, times: i64) -> Self {
        Self(self.0.saturating_mul(times))
    }

    /// Multiply by a rate and round to the nearest whole unit
    ///
    /// Halves round up (toward positive infinity), so -1.5 becomes -1.
    pub fn scale_round(&self, rate: f64) -> Self {
        let units = (self.as_f64() * rate + 0.5).floor();
        Self::from_units(units as i64)
    }

    /// `self / other` as a plain ratio, 0 when `other` is zero
    pub fn ratio_to(&self, other: Money) -> f64 {
        if other.is_zero() {
            0.0
        } else {
            self.0 as f64 / other.0 as f64
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "10,50", "1.234,56", "1,234.56", "€10",
    /// "10 €", "-10.50", "10"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '€' | '$' | '£'))
            .collect();

        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(original.to_string()));
        }

        // The last separator is the decimal one, but only if it is followed by
        // at most two digits; otherwise it's a thousands separator.
        let (whole, fraction) = match s.rfind(['.', ',']) {
            Some(pos) if s.len() - pos - 1 <= 2 => (&s[..pos], &s[pos + 1..]),
            _ => (s.as_str(), ""),
        };

        let whole: String = whole.chars().filter(|c| *c != '.' && *c != ',').collect();
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(MoneyParseError::InvalidFormat(original.to_string()));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| MoneyParseError::OutOfRange(original.to_string()))?
        };

        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => {
                fraction
                    .parse::<i64>()
                    .map_err(|_| MoneyParseError::InvalidFormat(original.to_string()))?
                    * 10
            }
            _ => fraction
                .parse()
                .map_err(|_| MoneyParseError::InvalidFormat(original.to_string()))?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .filter(|c| *c <= Self::MAX.0)
            .ok_or_else(|| MoneyParseError::OutOfRange(original.to_string()))?;
        Ok(Self(if negative { -cents } else { cents }))
    }
}

fn saturate(cents: i128) -> i64 {
    i64::try_from(cents).unwrap_or(if cents < 0 { i64::MIN } else { i64::MAX })
}

impl fmt::Display for Money {
    /// Plain `1234.56` form; currency-aware output lives in `CurrencyFormat`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.units())
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let units = f64::deserialize(deserializer)?;
        if !units.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        let cents = (units * 100.0).round();
        if cents.abs() > Self::MAX.0 as f64 {
            return Err(serde::de::Error::custom("amount is out of range"));
        }
        Ok(Self(cents as i64))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount is too large: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_share_floor() {
        let income = Money::from_units(3001);
        assert_eq!(income.share_floor(1, 2), Money::from_units(1500));
        assert_eq!(income.share_floor(3, 10), Money::from_units(900));

        let with_cents = Money::from_cents(300_050);
        assert_eq!(with_cents.share_floor(1, 2), Money::from_units(1500));
        assert_eq!(Money::from_units(9).share_floor(1, 0), Money::zero());
    }

    #[test]
    fn test_scale_round() {
        assert_eq!(Money::from_units(1500).scale_round(0.85), Money::from_units(1275));
        assert_eq!(Money::from_units(3).scale_round(0.5), Money::from_units(2));
        assert_eq!(Money::from_units(-3).scale_round(0.5), Money::from_units(-1));
        assert_eq!(Money::from_units(-5).scale_round(0.5), Money::from_units(-2));
        assert_eq!(Money::from_units(900).scale_round(0.0), Money::zero());
    }

    #[test]
    fn test_ratio_to_zero_is_zero() {
        assert_eq!(Money::from_units(10).ratio_to(Money::zero()), 0.0);
        assert_eq!(Money::from_units(10).ratio_to(Money::from_units(40)), 0.25);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10,50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("€10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10 €").unwrap().cents(), 1000);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse("1.234,56").unwrap().cents(), 123_456);
        assert_eq!(Money::parse("1,234.56").unwrap().cents(), 123_456);
        assert_eq!(Money::parse("1.234").unwrap().cents(), 123_400);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("€").is_err());
        assert!(Money::parse("12.-5").is_err());
        assert!(Money::parse("10.+5").is_err());
        assert!(Money::parse("+10").is_err());
        assert!(Money::parse("--10").is_err());
    }

    #[test]
    fn test_parse_rejects_amounts_out_of_range() {
        assert!(matches!(
            Money::parse("100000000000000000"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("99999999999999999999999"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert_eq!(Money::parse("10000000000000").unwrap(), Money::MAX);
        assert!(Money::parse("10000000000000.01").is_err());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX);
        assert_eq!(huge + huge, huge);
        assert_eq!(Money::from_cents(i64::MIN) - huge, Money::from_cents(i64::MIN));
        assert_eq!(huge.times(12), huge);
        assert_eq!(Money::from_units(i64::MAX), huge);
        assert_eq!(Money::from_units(1).scale_round(1e300), huge);
        assert_eq!(huge.share_floor(1, 2).units(), i64::MAX / 200);
    }

    #[test]
    fn test_comparison() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert!(a > b);
        assert!(b < a);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization_uses_currency_units() {
        assert_eq!(serde_json::to_string(&Money::from_units(1200)).unwrap(), "1200");
        assert_eq!(serde_json::to_string(&Money::from_cents(1250)).unwrap(), "12.5");

        let whole: Money = serde_json::from_str("237").unwrap();
        assert_eq!(whole, Money::from_units(237));
        let fractional: Money = serde_json::from_str("19.99").unwrap();
        assert_eq!(fractional.cents(), 1999);

        assert!(serde_json::from_str::<Money>("1e300").is_err());
        assert!(serde_json::from_str::<Money>("-1e300").is_err());
    }
}
