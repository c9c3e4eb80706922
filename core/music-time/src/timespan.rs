//! core/music-time/src/timespan.rs
//! Time points and spans backed by exact [`Rational`] beats.

use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::rational::Rational;

/// Absolute musical time point, in beats, measured exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePoint(Rational);

/// Musical duration, in beats, measured exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSpan(Rational);

impl TimePoint {
    /// Construct a time point from a non-negative rational beat value.
    ///
    /// # Panics
    ///
    /// Panics if `beats` is negative.
    #[must_use]
    pub fn new(beats: Rational) -> Self {
        assert!(beats >= Rational::ZERO, "time point must be non-negative");
        Self(beats)
    }

    /// The origin, `0`.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Rational::ZERO)
    }

    /// Raw beat value.
    #[must_use]
    pub fn beats(&self) -> Rational {
        self.0
    }

    /// Add a span, producing a new time point.
    #[must_use]
    pub fn add_span(self, span: TimeSpan) -> Self {
        Self::new(self.0 + span.0)
    }

    /// Subtract a span if possible, returning `None` when it would go negative.
    #[must_use]
    pub fn checked_sub_span(self, span: TimeSpan) -> Option<Self> {
        (self.0 >= span.0).then(|| Self(self.0 - span.0))
    }

    /// Absolute distance to another time point.
    #[must_use]
    pub fn distance_to(self, other: TimePoint) -> TimeSpan {
        if self.0 >= other.0 { TimeSpan(self.0 - other.0) } else { TimeSpan(other.0 - self.0) }
    }
}

impl TimeSpan {
    /// Construct a span from a non-negative rational beat value.
    ///
    /// # Panics
    ///
    /// Panics if `beats` is negative.
    #[must_use]
    pub fn new(beats: Rational) -> Self {
        assert!(beats >= Rational::ZERO, "duration must be non-negative");
        Self(beats)
    }

    /// A zero-length span.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Rational::ZERO)
    }

    /// Raw beat value.
    #[must_use]
    pub fn beats(&self) -> Rational {
        self.0
    }

    /// Add two spans.
    #[must_use]
    pub fn add_span(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }

    /// Subtract a smaller span, returning `None` if it would become negative.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        (self.0 >= other.0).then(|| Self(self.0 - other.0))
    }

    /// The greater of two spans.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if self.0 >= other.0 { self } else { other }
    }
}

impl Add<TimeSpan> for TimePoint {
    type Output = TimePoint;

    fn add(self, rhs: TimeSpan) -> Self::Output {
        self.add_span(rhs)
    }
}

impl Sub<TimeSpan> for TimePoint {
    type Output = TimePoint;

    fn sub(self, rhs: TimeSpan) -> Self::Output {
        self.checked_sub_span(rhs).expect("cannot subtract span beyond origin")
    }
}

impl Sub for TimePoint {
    type Output = TimeSpan;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(self.0 >= rhs.0, "time point subtraction cannot go negative");
        TimeSpan(self.0 - rhs.0)
    }
}

impl Add for TimeSpan {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.add_span(rhs)
    }
}

impl AddAssign for TimeSpan {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for TimeSpan {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("duration cannot go negative")
    }
}

impl SubAssign for TimeSpan {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn point_span_arithmetic() {
        let start = TimePoint::new(r(4, 1));
        let span = TimeSpan::new(r(3, 2));
        let end = start + span;
        assert_eq!(end.beats(), r(11, 2));
        let original = end - span;
        assert_eq!(original.beats(), start.beats());
        let distance = end - start;
        assert_eq!(distance.beats(), r(3, 2));
    }

    #[test]
    fn timespan_add_sub() {
        let mut span = TimeSpan::new(r(2, 1));
        span += TimeSpan::new(r(1, 2));
        assert_eq!(span.beats(), r(5, 2));
        span -= TimeSpan::new(r(1, 1));
        assert_eq!(span.beats(), r(3, 2));
    }

    #[test]
    #[should_panic(expected = "cannot subtract span beyond origin")]
    fn timepoint_sub_panics_when_negative() {
        let start = TimePoint::new(r(1, 1));
        let span = TimeSpan::new(r(2, 1));
        let _ = start - span;
    }

    #[test]
    #[should_panic(expected = "time point subtraction cannot go negative")]
    fn timepoint_difference_panics_when_negative() {
        let earlier = TimePoint::new(r(1, 1));
        let later = TimePoint::new(r(1, 2));
        let _ = later - earlier;
    }
}
