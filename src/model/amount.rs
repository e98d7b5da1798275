//! Amount type for monetary values.
//!
//! This module provides the `Amount` type which wraps `Decimal` and is
//! constructed from YNAB milliunits (1 currency unit = 1000 milliunits).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a dollar amount.
///
/// This type wraps `Decimal` so that all monetary math is exact fixed-point
/// arithmetic. Values arrive from the YNAB API as milliunit integers and are
/// only converted here.
///
/// # Examples
///
/// ```
/// # use ynab_monitor::model::Amount;
/// let amount = Amount::from_milliunits(-1_500_250);
/// assert_eq!(amount.to_string(), "-$1,500.25");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates an Amount from a YNAB milliunit integer.
    pub fn from_milliunits(milliunits: i64) -> Self {
        Self::new(Decimal::new(milliunits, 3))
    }

    /// Creates an Amount from a whole number of currency units.
    pub fn from_units(units: i64) -> Self {
        Self::new(Decimal::from(units))
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Self {
        Self::new(self.value.abs())
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.value.is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.value.is_sign_negative() && !self.is_zero()
    }

    /// Returns true if the amount is within rounding noise of zero. Used by
    /// reconciliation to treat a nearly covered payment as fully covered.
    pub fn is_settled(&self) -> bool {
        self.value.abs() < Decimal::new(5, 3)
    }

    /// Returns the smaller of `self` and `other`.
    pub fn min(self, other: Self) -> Self {
        if self.value <= other.value {
            self
        } else {
            other
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let num = self.value.abs();
        write!(
            f,
            "{sign}${}",
            format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
        )
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize as a formatted string with dollar sign
        serializer.serialize_str(&self.to_string())
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount::new(self.value + rhs.value)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount::new(self.value - rhs.value)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.value += rhs.value;
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Amount) {
        self.value -= rhs.value;
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount::new(-self.value)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::default(), |acc, a| acc + a)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
