//! Exact, non-negative decimal quantities for step times and costs.
//!
//! Values are stored as thousandths in a `u64`, so they are totally ordered,
//! never negative and never lose precision when summed along a path.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use thiserror::Error;

/// Number of stored units per whole unit.
const SCALE: u64 = 1_000;

/// Maximum number of fractional digits accepted when parsing.
const MAX_FRACTION_DIGITS: usize = 3;

/// A non-negative decimal with three fractional digits of precision.
///
/// Addition saturates at the representable maximum instead of wrapping.
///
/// # Examples
///
/// ```
/// use courier_core::Amount;
///
/// let total: Amount = ["1.5", "2.25"]
///     .iter()
///     .map(|raw| raw.parse::<Amount>().expect("valid amount"))
///     .sum();
/// assert_eq!(total.to_string(), "3.75");
/// assert_eq!(Amount::from_units(3) + Amount::from_millis(750), total);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct Amount(u64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Construct an amount from whole units.
    #[must_use]
    pub const fn from_units(units: u64) -> Self {
        Self(units.saturating_mul(SCALE))
    }

    /// Construct an amount from thousandths of a unit.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// The amount expressed in thousandths of a unit.
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Add two amounts, clamping at the maximum representable value.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Amount {
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "fixed-point rendering splits whole and fractional parts"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let fraction = self.0 % SCALE;
        if fraction == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{fraction:03}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

/// Errors returned when parsing an [`Amount`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountParseError {
    /// The input was empty or whitespace.
    #[error("amount must not be empty")]
    Empty,
    /// The input was not a non-negative decimal number.
    #[error("{input:?} is not a non-negative decimal")]
    Invalid {
        /// The rejected input.
        input: String,
    },
    /// The input carried more fractional digits than can be stored.
    #[error("{input:?} has more than three fractional digits")]
    TooPrecise {
        /// The rejected input.
        input: String,
    },
    /// The value does not fit in the stored representation.
    #[error("{input:?} is too large")]
    Overflow {
        /// The rejected input.
        input: String,
    },
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let input = raw.trim();
        if input.is_empty() {
            return Err(AmountParseError::Empty);
        }
        let invalid = || AmountParseError::Invalid {
            input: input.to_owned(),
        };
        let overflow = || AmountParseError::Overflow {
            input: input.to_owned(),
        };

        let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(AmountParseError::TooPrecise {
                input: input.to_owned(),
            });
        }

        let whole_units: u64 = whole.parse().map_err(|_| overflow())?;
        let mut fraction_millis = 0_u64;
        for (position, digit) in fraction.chars().enumerate() {
            let value = u64::from(digit.to_digit(10).ok_or_else(invalid)?);
            let weight = match position {
                0 => 100,
                1 => 10,
                _ => 1,
            };
            fraction_millis += value * weight;
        }

        whole_units
            .checked_mul(SCALE)
            .and_then(|millis| millis.checked_add(fraction_millis))
            .map(Self)
            .ok_or_else(overflow)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", 0)]
    #[case("12", 12_000)]
    #[case("12.5", 12_500)]
    #[case("0.05", 50)]
    #[case(" 3.125 ", 3_125)]
    fn parses_decimal_text(#[case] raw: &str, #[case] millis: u64) {
        assert_eq!(raw.parse::<Amount>(), Ok(Amount::from_millis(millis)));
    }

    #[rstest]
    #[case("")]
    #[case("-1")]
    #[case("1.2.3")]
    #[case(".5")]
    #[case("abc")]
    fn rejects_malformed_text(#[case] raw: &str) {
        assert!(raw.parse::<Amount>().is_err());
    }

    #[rstest]
    fn rejects_excess_precision() {
        assert!(matches!(
            "1.0001".parse::<Amount>(),
            Err(AmountParseError::TooPrecise { .. })
        ));
    }

    #[rstest]
    #[case(Amount::from_units(32), "32")]
    #[case(Amount::from_millis(1_500), "1.5")]
    #[case(Amount::from_millis(7), "0.007")]
    fn displays_without_trailing_zeros(#[case] amount: Amount, #[case] expected: &str) {
        assert_eq!(amount.to_string(), expected);
    }

    #[rstest]
    fn addition_saturates() {
        let max = Amount::from_millis(u64::MAX);
        assert_eq!(max + Amount::from_units(1), max);
    }
}
