//! Exact rational numbers for actor positions and step sizes.
//!
//! Positions must stay exact after unbounded wrap-around play, so boundary
//! tests compare reduced fractions instead of floats.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use crate::error::CoreError;

/// A reduced fraction with a strictly positive denominator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: i64,
    den: i64,
}

impl Fraction {
    pub const ZERO: Fraction = Fraction { num: 0, den: 1 };
    pub const ONE: Fraction = Fraction { num: 1, den: 1 };

    pub fn new(num: i64, den: i64) -> Result<Self, CoreError> {
        if den == 0 {
            return Err(CoreError::ZeroDenominator { numerator: num });
        }
        Self::reduced(i128::from(num), i128::from(den)).ok_or(CoreError::FractionOverflow {
            numerator: num,
            denominator: den,
        })
    }

    pub const fn from_integer(value: i64) -> Self {
        Fraction { num: value, den: 1 }
    }

    /// `num/den` must already be in lowest terms with `den > 0`.
    pub(crate) const fn raw(num: i64, den: i64) -> Self {
        Fraction { num, den }
    }

    /// Reduces in 128 bits; `None` when the reduced value does not fit `i64`.
    fn reduced(num: i128, den: i128) -> Option<Self> {
        let sign = if den < 0 { -1 } else { 1 };
        let g = gcd(num.unsigned_abs(), den.unsigned_abs()).max(1) as i128;
        Some(Fraction {
            num: i64::try_from(sign * num / g).ok()?,
            den: i64::try_from(sign * den / g).ok()?,
        })
    }

    /// Exact `self + rhs`, or `None` on overflow.
    pub fn checked_add(self, rhs: Fraction) -> Option<Self> {
        let (a, b) = (i128::from(self.num), i128::from(self.den));
        let (c, d) = (i128::from(rhs.num), i128::from(rhs.den));
        let num = a.checked_mul(d)?.checked_add(c.checked_mul(b)?)?;
        Self::reduced(num, b * d)
    }

    /// Exact `self - rhs`, or `None` on overflow.
    pub fn checked_sub(self, rhs: Fraction) -> Option<Self> {
        let (a, b) = (i128::from(self.num), i128::from(self.den));
        let (c, d) = (i128::from(rhs.num), i128::from(rhs.den));
        let num = a.checked_mul(d)?.checked_sub(c.checked_mul(b)?)?;
        Self::reduced(num, b * d)
    }

    /// Wraps into `[0, modulus)`, or `None` on overflow.
    pub fn checked_rem_euclid(self, modulus: i64) -> Option<Self> {
        let den = i128::from(self.den);
        let period = i128::from(modulus).checked_mul(den)?;
        if period == 0 {
            return None;
        }
        Self::reduced(i128::from(self.num).rem_euclid(period), den)
    }

    pub fn numerator(self) -> i64 {
        self.num
    }

    pub fn denominator(self) -> i64 {
        self.den
    }

    pub fn is_integer(self) -> bool {
        self.den == 1
    }

    pub fn to_integer(self) -> Option<i64> {
        self.is_integer().then_some(self.num)
    }

    pub fn floor(self) -> i64 {
        self.num.div_euclid(self.den)
    }

    pub fn ceil(self) -> i64 {
        -(-self.num).div_euclid(self.den)
    }

    pub fn abs(self) -> Self {
        Fraction {
            num: self.num.abs(),
            den: self.den,
        }
    }

    /// Wraps into `[0, modulus)`.
    ///
    /// # Panics
    ///
    /// Panics if `modulus` is zero or the result overflows, like the integer
    /// method of the same name.
    pub fn rem_euclid(self, modulus: i64) -> Self {
        self.checked_rem_euclid(modulus)
            .unwrap_or_else(|| panic!("fraction overflow: {self} rem_euclid {modulus}"))
    }

    /// Lossy conversion, only meant for drawing.
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::ZERO
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Fraction::from_integer(value)
    }
}

impl From<i32> for Fraction {
    fn from(value: i32) -> Self {
        Fraction::from_integer(i64::from(value))
    }
}

impl Add for Fraction {
    type Output = Fraction;

    /// Panics on overflow, like the primitive integers in debug builds.
    fn add(self, rhs: Fraction) -> Fraction {
        self.checked_add(rhs)
            .unwrap_or_else(|| panic!("fraction overflow: {self} + {rhs}"))
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        self.checked_sub(rhs)
            .unwrap_or_else(|| panic!("fraction overflow: {self} - {rhs}"))
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            num: -self.num,
            den: self.den,
        }
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        (i128::from(self.num) * i128::from(other.den))
            .cmp(&(i128::from(other.num) * i128::from(self.den)))
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl FromStr for Fraction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoreError::MalformedFraction(s.to_string());
        match s.trim().split_once('/') {
            Some((num, den)) => {
                let num = num.trim().parse().map_err(|_| malformed())?;
                let den = den.trim().parse().map_err(|_| malformed())?;
                Fraction::new(num, den)
            }
            None => s
                .trim()
                .parse()
                .map(Fraction::from_integer)
                .map_err(|_| malformed()),
        }
    }
}
