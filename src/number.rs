use core::{cmp::Ordering, fmt, ops::{Add, Mul}};

use num_integer::Integer;
use num_traits::{One, Zero};
use rust_decimal::Decimal;

use crate::error::MathsError;

/// A number held by a constant node or produced by evaluation.
///
/// Whole numbers and the results of exact arithmetic on them are kept as `Rational`, so that
/// stepping through a range never accumulates rounding error. Anything written with a decimal
/// point becomes a `Decimal`, and mixing the two produces a `Decimal`. A rational result too large
/// for `i64` also becomes a `Decimal`.
///
/// Equality and ordering compare values, so `Rational(2, 4)`, `Rational(1, 2)` and
/// `Decimal(0.5)` are all equal.
#[derive(Copy, Clone, Debug)]
pub enum Number {
    Decimal(Decimal),
    Rational(i64, i64),
}

impl Number {
    /// Converts this number to a decimal:
    ///   - For `Decimal`, this simply unwraps the variant.
    ///   - For `Rational`, this divides the numerator by the denominator after converting both to
    ///     decimals.
    ///
    /// Panics if a rational has a zero denominator; see [Number::check].
    pub fn to_decimal(&self) -> Decimal {
        match self {
            Number::Decimal(d) => *d,
            Number::Rational(numer, denom) => Decimal::from(*numer) / Decimal::from(*denom),
        }
    }

    /// Returns this number as a `Decimal` variant, for evaluation settings which ask for
    /// floating-point results.
    pub fn to_float_form(&self) -> Number {
        Number::Decimal(self.to_decimal())
    }

    /// Returns this number unchanged, or [MathsError::DivisionByZero] if it is a rational with a
    /// zero denominator.
    pub fn check(self) -> Result<Number, MathsError> {
        match self {
            Self::Rational(_, 0) => Err(MathsError::DivisionByZero),
            n => Ok(n),
        }
    }

    /// Builds a simplified rational from a wide numerator and denominator, falling back to a
    /// decimal if either part doesn't fit in an `i64`.
    fn from_wide(numer: i128, denom: i128) -> Result<Number, MathsError> {
        if denom == 0 {
            return Err(MathsError::DivisionByZero);
        }

        let gcd = numer.gcd(&denom);
        let (mut numer, mut denom) = (numer / gcd, denom / gcd);
        if denom < 0 {
            numer = -numer;
            denom = -denom;
        }

        match (i64::try_from(numer), i64::try_from(denom)) {
            (Ok(numer), Ok(denom)) => Ok(Self::Rational(numer, denom)),
            _ => {
                let numer = Decimal::try_from_i128_with_scale(numer, 0).map_err(|_| MathsError::Overflow)?;
                let denom = Decimal::try_from_i128_with_scale(denom, 0).map_err(|_| MathsError::Overflow)?;
                numer.checked_div(denom)
                    .map(|d| Self::Decimal(d.normalize()))
                    .ok_or(MathsError::Overflow)
            }
        }
    }

    /// Simplifies this number:
    ///   - For `Decimal`, this normalises away trailing zeroes.
    ///   - For `Rational`, this divides the numerator and denominator by their GCD. Also ensures
    ///     that any negative sign is on the numerator, not the denominator.
    pub(crate) fn simplify(&self) -> Number {
        match self {
            Self::Decimal(d) => Self::Decimal(d.normalize()),
            Self::Rational(_, 0) => *self,
            Self::Rational(numer, denom) => Self::from_wide(*numer as i128, *denom as i128).unwrap_or(*self),
        }
    }

    /// Adds two numbers, or returns an error if the result can't be represented.
    pub fn checked_add(self, rhs: Number) -> Result<Number, MathsError> {
        match (self.check()?, rhs.check()?) {
            (Self::Rational(ln, ld), Self::Rational(rn, rd)) => {
                let (ln, ld, rn, rd) = (ln as i128, ld as i128, rn as i128, rd as i128);
                let numer = (ln * rd).checked_add(rn * ld).ok_or(MathsError::Overflow)?;
                Self::from_wide(numer, ld * rd)
            }
            (l, r) => l.to_decimal().checked_add(r.to_decimal())
                .map(Self::Decimal)
                .ok_or(MathsError::Overflow),
        }
    }

    /// Multiplies two numbers, or returns an error if the result can't be represented.
    pub fn checked_mul(self, rhs: Number) -> Result<Number, MathsError> {
        match (self.check()?, rhs.check()?) {
            (Self::Rational(ln, ld), Self::Rational(rn, rd)) =>
                Self::from_wide(ln as i128 * rn as i128, ld as i128 * rd as i128),
            (l, r) => l.to_decimal().checked_mul(r.to_decimal())
                .map(|d| Self::Decimal(d.normalize()))
                .ok_or(MathsError::Overflow),
        }
    }

    pub fn is_positive(&self) -> bool {
        *self > Number::zero()
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Cross-multiplying avoids the precision loss of going through decimals, but is only
            // order-preserving with positive denominators
            (Self::Rational(ln, ld), Self::Rational(rn, rd)) => {
                let (ln, ld) = positive_denominator(*ln, *ld);
                let (rn, rd) = positive_denominator(*rn, *rd);
                (ln * rd).cmp(&(rn * ld))
            }
            _ => self.to_decimal().cmp(&other.to_decimal()),
        }
    }
}

fn positive_denominator(numer: i64, denom: i64) -> (i128, i128) {
    if denom < 0 {
        (-(numer as i128), -(denom as i128))
    } else {
        (numer as i128, denom as i128)
    }
}

impl From<Decimal> for Number {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        Self::Rational(i, 1)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.simplify() {
            Self::Decimal(d) => write!(f, "{}", d),
            Self::Rational(numer, 1) => write!(f, "{}", numer),
            Self::Rational(numer, denom) => write!(f, "{}/{}", numer, denom),
        }
    }
}

/// Panics if the result can't be represented, like `Decimal`'s own operators. Use
/// [Number::checked_add] where that can happen.
impl Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match self.checked_add(rhs) {
            Ok(n) => n,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Panics if the result can't be represented. Use [Number::checked_mul] where that can happen.
impl Mul for Number {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match self.checked_mul(rhs) {
            Ok(n) => n,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Zero for Number {
    fn zero() -> Self {
        Self::Rational(0, 1)
    }

    fn is_zero(&self) -> bool {
        match *self {
            Self::Decimal(d) => d.is_zero(),
            Self::Rational(n, _) => n.is_zero(),
        }
    }
}

impl One for Number {
    fn one() -> Self {
        Self::Rational(1, 1)
    }
}
