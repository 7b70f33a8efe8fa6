//! Exact rational arithmetic for draw-rate ladders.
//!
//! Weights are kept as reduced `num/den` pairs and compared by raising both
//! sides to a common denominator, never through floats, so ties between
//! rates are detected exactly.

use super::error::FractionError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A reduced fraction with a strictly positive denominator.
///
/// Arithmetic is carried out in 128 bits and narrowed back after reduction;
/// a result that does not fit in 64 bits is `FractionError::Overflow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fraction {
    num: i64,
    den: i64,
}

impl Fraction {
    pub const ZERO: Fraction = Fraction { num: 0, den: 1 };
    pub const ONE: Fraction = Fraction { num: 1, den: 1 };

    /// Builds and reduces `num/den`. A zero denominator is rejected.
    pub fn new(num: i64, den: i64) -> Result<Self, FractionError> {
        if den == 0 {
            return Err(FractionError::ZeroDenominator { num });
        }
        Self::from_wide(num.into(), den.into())
    }

    /// Whole number `n/1`.
    pub const fn whole(n: i64) -> Self {
        Self { num: n, den: 1 }
    }

    pub fn numerator(&self) -> i64 {
        self.num
    }

    pub fn denominator(&self) -> i64 {
        self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    pub fn is_negative(&self) -> bool {
        self.num < 0
    }

    pub fn to_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    // `den` must be nonzero.
    fn from_wide(num: i128, den: i128) -> Result<Self, FractionError> {
        let g = i128::try_from(gcd_wide(num, den)).map_err(|_| FractionError::Overflow)?;
        let (mut num, mut den) = (num / g, den / g);
        if den < 0 {
            num = num.checked_neg().ok_or(FractionError::Overflow)?;
            den = -den;
        }
        match (i64::try_from(num), i64::try_from(den)) {
            (Ok(num), Ok(den)) => Ok(Self { num, den }),
            _ => Err(FractionError::Overflow),
        }
    }

    fn wide(&self) -> (i128, i128) {
        (self.num.into(), self.den.into())
    }

    pub fn checked_add(self, rhs: Fraction) -> Result<Fraction, FractionError> {
        let ((a, b), (c, d)) = (self.wide(), rhs.wide());
        let num = (a * d).checked_add(c * b).ok_or(FractionError::Overflow)?;
        Self::from_wide(num, b * d)
    }

    pub fn checked_sub(self, rhs: Fraction) -> Result<Fraction, FractionError> {
        let ((a, b), (c, d)) = (self.wide(), rhs.wide());
        let num = (a * d).checked_sub(c * b).ok_or(FractionError::Overflow)?;
        Self::from_wide(num, b * d)
    }

    pub fn checked_mul(self, rhs: Fraction) -> Result<Fraction, FractionError> {
        let ((a, b), (c, d)) = (self.wide(), rhs.wide());
        Self::from_wide(a * c, b * d)
    }

    /// Raises to an integer power; negative exponents invert the base first.
    pub fn pow(self, exp: i32) -> Result<Self, FractionError> {
        let (num, den) = self.wide();
        let (base_num, base_den) = if exp < 0 {
            if num == 0 {
                return Err(FractionError::ZeroToNegativePower { exp });
            }
            (den, num)
        } else {
            (num, den)
        };
        let e = exp.unsigned_abs();
        match (base_num.checked_pow(e), base_den.checked_pow(e)) {
            (Some(n), Some(d)) => Self::from_wide(n, d),
            _ => Err(FractionError::Overflow),
        }
    }

    /// Sum of any number of fractions.
    pub fn sum<'a>(
        fractions: impl IntoIterator<Item = &'a Fraction>,
    ) -> Result<Fraction, FractionError> {
        fractions
            .into_iter()
            .try_fold(Fraction::ZERO, |acc, f| acc.checked_add(*f))
    }
}

fn gcd_wide(a: i128, b: i128) -> u128 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

/// Greatest common divisor by Euclid; `gcd(0, n) == |n|`, `gcd(0, 0) == 1`.
pub fn gcd(a: i64, b: i64) -> u64 {
    gcd_wide(a.into(), b.into()) as u64
}

/// Least common multiple of two denominators, `None` past `i64::MAX`.
pub fn lcm(a: i64, b: i64) -> Option<i64> {
    let g = i128::from(gcd(a, b));
    i64::try_from((i128::from(a) / g * i128::from(b)).abs()).ok()
}

/// Least common multiple over the denominators of every fraction given.
/// Returns `None` if the multiple does not fit in an `i64`.
pub fn lcm_of<'a>(fractions: impl IntoIterator<Item = &'a Fraction>) -> Option<i64> {
    fractions
        .into_iter()
        .try_fold(1i64, |acc, f| lcm(acc, f.den))
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplying keeps the order.
        let ((a, b), (c, d)) = (self.wide(), other.wide());
        (a * d).cmp(&(c * b))
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || FractionError::Malformed(s.to_string());
        let trimmed = s.trim();
        match trimmed.split_once('/') {
            Some((n, d)) => {
                let num = n.trim().parse::<i64>().map_err(|_| malformed())?;
                let den = d.trim().parse::<i64>().map_err(|_| malformed())?;
                Fraction::new(num, den)
            }
            None => trimmed
                .parse::<i64>()
                .map(Fraction::whole)
                .map_err(|_| malformed()),
        }
    }
}

impl TryFrom<String> for Fraction {
    type Error = FractionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Fraction> for String {
    fn from(value: Fraction) -> Self {
        value.to_string()
    }
}
