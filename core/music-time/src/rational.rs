//! core/music-time/src/rational.rs
//! Exact rational arithmetic used for every offset and duration in the engine.
//!
//! [`Rational`] is normalized on every construction: the denominator is always positive and the
//! fraction is always reduced to lowest terms. Comparisons use cross-multiplication so no
//! operation ever rounds through a float. Higher-level modules (`timespan`, `tempo`, and the
//! notation parser/formatter in `music-notation`) build on this type for every timing value.

use core::cmp::Ordering;
use core::fmt;

/// Failure modes for [`Rational`] construction and division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RationalError {
    /// A precondition on a constructor argument was violated.
    #[error("invalid argument for {field}: {reason}")]
    InvalidArgument {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable explanation.
        reason: &'static str,
    },
    /// Division where the divisor is zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Exact fraction `num/den` in lowest terms with `den > 0`.
#[derive(Debug, Clone, Copy, Eq, Hash)]
pub struct Rational {
    num: i64,
    den: i64,
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    if a == 0 { 1 } else { a }
}

impl Rational {
    /// The additive identity, `0/1`.
    pub const ZERO: Rational = Rational { num: 0, den: 1 };
    /// The multiplicative identity, `1/1`.
    pub const ONE: Rational = Rational { num: 1, den: 1 };

    /// Construct a normalized rational `num/den`.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::InvalidArgument`] when `den == 0`.
    pub fn new(num: i64, den: i64) -> Result<Self, RationalError> {
        if den == 0 {
            return Err(RationalError::InvalidArgument {
                field: "den",
                reason: "denominator must be non-zero",
            });
        }
        Ok(Self::reduce(num, den))
    }

    /// Construct an integer rational `n/1`.
    #[must_use]
    pub const fn from_integer(n: i64) -> Self {
        Self { num: n, den: 1 }
    }

    fn reduce(num: i64, den: i64) -> Self {
        if num == 0 {
            return Self::ZERO;
        }
        let sign = if den < 0 { -1 } else { 1 };
        let num = num * sign;
        let den = den * sign;
        let g = gcd(num.abs(), den);
        Self { num: num / g, den: den / g }
    }

    /// Numerator in lowest terms.
    #[must_use]
    pub const fn numerator(&self) -> i64 {
        self.num
    }

    /// Denominator in lowest terms (always positive).
    #[must_use]
    pub const fn denominator(&self) -> i64 {
        self.den
    }

    /// Informational float conversion. Never used for comparisons or invariants.
    #[must_use]
    pub fn to_double(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// `true` when this rational is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.num == 0
    }

    /// Add two rationals, short-circuiting the cross-multiply when denominators already match.
    #[must_use]
    pub fn add(self, rhs: Self) -> Self {
        if self.den == rhs.den {
            Self::reduce(self.num + rhs.num, self.den)
        } else {
            Self::reduce(self.num * rhs.den + rhs.num * self.den, self.den * rhs.den)
        }
    }

    /// Subtract two rationals, short-circuiting the cross-multiply when denominators already
    /// match.
    #[must_use]
    pub fn sub(self, rhs: Self) -> Self {
        if self.den == rhs.den {
            Self::reduce(self.num - rhs.num, self.den)
        } else {
            Self::reduce(self.num * rhs.den - rhs.num * self.den, self.den * rhs.den)
        }
    }

    /// Multiply two rationals.
    #[must_use]
    pub fn mul(self, rhs: Self) -> Self {
        Self::reduce(self.num * rhs.num, self.den * rhs.den)
    }

    /// Divide by another rational.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::DivisionByZero`] when `rhs` is zero.
    pub fn checked_div(self, rhs: Self) -> Result<Self, RationalError> {
        if rhs.num == 0 {
            return Err(RationalError::DivisionByZero);
        }
        Ok(Self::reduce(self.num * rhs.den, self.den * rhs.num))
    }

    /// Negate this rational.
    #[must_use]
    pub fn negate(self) -> Self {
        Self { num: -self.num, den: self.den }
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.num == other.num && self.den == other.den
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // den is always > 0 for both sides, so the cross-multiplication preserves sign.
        (self.num * other.den).cmp(&(other.num * self.den))
    }
}

impl core::ops::Add for Rational {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Rational::add(self, rhs)
    }
}

impl core::ops::Sub for Rational {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Rational::sub(self, rhs)
    }
}

impl core::ops::Mul for Rational {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Rational::mul(self, rhs)
    }
}

impl core::ops::Neg for Rational {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_normalizes() {
        let r = Rational::new(4, 8).unwrap();
        assert_eq!((r.numerator(), r.denominator()), (1, 2));
        let r = Rational::new(-4, -8).unwrap();
        assert_eq!((r.numerator(), r.denominator()), (1, 2));
        let r = Rational::new(4, -8).unwrap();
        assert_eq!((r.numerator(), r.denominator()), (-1, 2));
        let r = Rational::new(0, 5).unwrap();
        assert_eq!((r.numerator(), r.denominator()), (0, 1));
    }

    #[test]
    fn zero_denominator_is_invalid() {
        assert_eq!(
            Rational::new(1, 0),
            Err(RationalError::InvalidArgument { field: "den", reason: "denominator must be non-zero" })
        );
    }

    #[test]
    fn arithmetic_is_normalized() {
        let half = Rational::new(1, 2).unwrap();
        let third = Rational::new(1, 3).unwrap();
        assert_eq!(half + third, Rational::new(5, 6).unwrap());
        assert_eq!(half - third, Rational::new(1, 6).unwrap());
        assert_eq!(half * third, Rational::new(1, 6).unwrap());
        assert_eq!(half.checked_div(third).unwrap(), Rational::new(3, 2).unwrap());
    }

    #[test]
    fn division_by_zero_numerator_fails() {
        let half = Rational::new(1, 2).unwrap();
        assert_eq!(half.checked_div(Rational::ZERO), Err(RationalError::DivisionByZero));
    }

    #[test]
    fn ordering_matches_cross_product() {
        let a = Rational::new(2, 3).unwrap();
        let b = Rational::new(3, 4).unwrap();
        assert!(a < b);
        assert!(Rational::new(-1, 2).unwrap() < Rational::ZERO);
    }

    #[test]
    fn display_formats_integers_without_slash() {
        assert_eq!(Rational::from_integer(3).to_string(), "3");
        assert_eq!(Rational::new(3, 4).unwrap().to_string(), "3/4");
    }

    proptest::proptest! {
        #[test]
        fn reduced_invariant_holds(n in -1000i64..=1000, d in 1i64..=1000) {
            let r = Rational::new(n, d).unwrap();
            proptest::prop_assert!(r.denominator() > 0);
            if r.numerator() == 0 {
                proptest::prop_assert_eq!(r.denominator(), 1);
            } else {
                proptest::prop_assert_eq!(gcd(r.numerator().abs(), r.denominator()), 1);
            }
        }

        #[test]
        fn add_sub_mul_stay_normalized(
            n1 in -50i64..=50, d1 in 1i64..=50,
            n2 in -50i64..=50, d2 in 1i64..=50,
        ) {
            let a = Rational::new(n1, d1).unwrap();
            let b = Rational::new(n2, d2).unwrap();
            for r in [a + b, a - b, a * b] {
                proptest::prop_assert!(r.denominator() > 0);
                let g = gcd(r.numerator().abs().max(1), r.denominator());
                proptest::prop_assert_eq!(g, 1);
            }
        }

        #[test]
        fn ordering_agrees_with_cross_multiply(
            n1 in -50i64..=50, d1 in 1i64..=50,
            n2 in -50i64..=50, d2 in 1i64..=50,
        ) {
            let a = Rational::new(n1, d1).unwrap();
            let b = Rational::new(n2, d2).unwrap();
            let expected = (n1 * d2).cmp(&(n2 * d1));
            proptest::prop_assert_eq!(a.cmp(&b), expected);
        }
    }
}
