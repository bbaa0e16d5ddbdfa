//! Monetary amounts in minor currency units.
//!
//! Amounts are stored as whole subunits (satang for THB) and rendered with
//! exactly 2 decimal places through `rust_decimal`, so sums and averages
//! never touch floating point.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// An amount of money expressed in minor units.
///
/// # Examples
///
/// ```
/// use rot128_donations::Amount;
///
/// let amount = Amount::from_subunits(2879410);
/// assert_eq!(amount.to_string(), "28794.10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    /// Decimal places of the major unit.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(0);

    /// Creates an amount from minor units.
    pub const fn from_subunits(subunits: i64) -> Self {
        Amount(subunits)
    }

    /// Returns the amount in minor units.
    pub const fn subunits(self) -> i64 {
        self.0
    }

    /// Returns `true` if this amount is zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The amount in major units, e.g. `1234.56` for 123456 subunits.
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, Self::SCALE)
    }

    /// Divides evenly across `count` parts, rounding half away from zero to
    /// 2 places. Returns `None` when `count` is zero.
    pub fn average(self, count: usize) -> Option<Decimal> {
        if count == 0 {
            return None;
        }
        let avg = self.to_decimal() / Decimal::from(count as u64);
        Some(avg.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl FromStr for Amount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_decimal())
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}
