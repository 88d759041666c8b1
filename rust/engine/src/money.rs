//! Fixed-point chip accounting.
//!
//! The engine and pot arithmetic never use floating point. A [`Chips`] value
//! wraps an `i64` count of minor units (1 chip = [`MINOR_UNITS_PER_CHIP`]
//! minor units); conversion to a decimal chip amount happens only at the
//! external boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

pub const MINOR_UNITS_PER_CHIP: i64 = 10_000;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chips(pub i64);

impl Chips {
    pub const ZERO: Chips = Chips(0);

    pub fn from_minor(minor: i64) -> Chips {
        Chips(minor)
    }

    pub fn from_major(whole_chips: i64) -> Chips {
        Chips(whole_chips * MINOR_UNITS_PER_CHIP)
    }

    pub fn minor(self) -> i64 {
        self.0
    }

    pub fn to_major_f64(self) -> f64 {
        self.0 as f64 / MINOR_UNITS_PER_CHIP as f64
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn min(self, other: Chips) -> Chips {
        Chips(self.0.min(other.0))
    }

    pub fn max(self, other: Chips) -> Chips {
        Chips(self.0.max(other.0))
    }

    /// Floor division by an integer, used for rake and split-pot shares.
    pub fn div_floor(self, divisor: i64) -> Chips {
        Chips(self.0.div_euclid(divisor))
    }

    pub fn rem_floor(self, divisor: i64) -> i64 {
        self.0.rem_euclid(divisor)
    }

    /// `floor(self * percent / 100)`, used for rake.
    pub fn percent_floor(self, percent: u8) -> Chips {
        Chips((self.0 * percent as i64) / 100)
    }

    pub fn checked_sub(self, other: Chips) -> Option<Chips> {
        self.0.checked_sub(other.0).map(Chips)
    }
}

impl Add for Chips {
    type Output = Chips;
    fn add(self, rhs: Chips) -> Chips {
        Chips(self.0 + rhs.0)
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, rhs: Chips) {
        self.0 += rhs.0;
    }
}

impl Sub for Chips {
    type Output = Chips;
    fn sub(self, rhs: Chips) -> Chips {
        Chips(self.0 - rhs.0)
    }
}

impl SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Chips) {
        self.0 -= rhs.0;
    }
}

impl Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Chips {
        iter.fold(Chips::ZERO, Add::add)
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_major_f64())
    }
}
