//! core/music-time/src/meter.rs
//! Meter (time signature), exact in quarter-note beats.

use crate::rational::Rational;
use crate::timespan::TimeSpan;

/// Time signature / meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Meter {
    pub numerator: u8,
    pub denominator: u8,
}

impl Meter {
    /// Common 4/4 meter.
    pub const FOUR_FOUR: Meter = Meter { numerator: 4, denominator: 4 };
    /// 3/4 meter.
    pub const THREE_FOUR: Meter = Meter { numerator: 3, denominator: 4 };
    /// 6/8 compound meter.
    pub const SIX_EIGHT: Meter = Meter { numerator: 6, denominator: 8 };
    /// 5/4 asymmetric meter.
    pub const FIVE_FOUR: Meter = Meter { numerator: 5, denominator: 4 };
    /// 7/8 asymmetric meter.
    pub const SEVEN_EIGHT: Meter = Meter { numerator: 7, denominator: 8 };

    /// Construct a new meter.
    ///
    /// # Panics
    ///
    /// Panics if either `numerator` or `denominator` is zero.
    #[must_use]
    pub fn new(numerator: u8, denominator: u8) -> Self {
        assert!(numerator > 0, "numerator must be > 0");
        assert!(denominator > 0, "denominator must be > 0");
        Self { numerator, denominator }
    }

    /// Exact beats per bar, normalized so a quarter note equals one beat
    /// (`numerator * 4 / denominator`, reduced).
    #[must_use]
    pub fn beats_per_bar(&self) -> Rational {
        Rational::new(i64::from(self.numerator) * 4, i64::from(self.denominator))
            .expect("denominator is a non-zero u8")
    }

    /// Length of a single bar as a [`TimeSpan`] using quarter-note beats.
    #[must_use]
    pub fn bar_span(&self) -> TimeSpan {
        TimeSpan::new(self.beats_per_bar())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn beats_per_bar_matches_common_meters() {
        assert_eq!(Meter::FOUR_FOUR.beats_per_bar(), r(4, 1));
        assert_eq!(Meter::THREE_FOUR.beats_per_bar(), r(3, 1));
        assert_eq!(Meter::SIX_EIGHT.beats_per_bar(), r(3, 1));
        assert_eq!(Meter::SEVEN_EIGHT.beats_per_bar(), r(7, 2));
    }

    #[test]
    fn bar_span_uses_exact_rational() {
        let meter = Meter::new(5, 4);
        let bar = meter.bar_span();
        assert_eq!(bar.beats(), r(5, 1));
    }
}
