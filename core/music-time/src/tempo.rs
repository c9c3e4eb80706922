//! core/music-time/src/tempo.rs
//! Tempo in integer beats per minute, with informational (non-exact) time conversions.
//!
//! Tempo itself is never part of the exactness law that governs offsets/durations: it only
//! drives informational conversions (seconds-per-beat) and the optional BPM-ramp directive
//! parsed by `music-notation`.

use crate::{meter::Meter, rational::Rational, timespan::TimeSpan};

/// Tempo definition, integer beats per minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tempo {
    bpm: u32,
}

impl Tempo {
    /// Construct a tempo in beats per minute.
    ///
    /// # Panics
    ///
    /// Panics if `bpm` is zero.
    #[must_use]
    pub fn new(bpm: u32) -> Self {
        assert!(bpm > 0, "tempo must be positive");
        Self { bpm }
    }

    /// BPM accessor.
    #[must_use]
    pub const fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Beats per second (informational only).
    #[must_use]
    pub fn beats_per_second(&self) -> f64 {
        f64::from(self.bpm) / 60.0
    }

    /// Seconds per beat (informational only).
    #[must_use]
    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / f64::from(self.bpm)
    }

    /// Seconds per bar for the supplied meter (informational only).
    #[must_use]
    pub fn seconds_per_bar(&self, meter: Meter) -> f64 {
        meter.beats_per_bar().to_double() * self.seconds_per_beat()
    }

    /// Convert a beat-based [`TimeSpan`] to seconds (informational only).
    #[must_use]
    pub fn seconds_for_span(&self, span: TimeSpan) -> f64 {
        span.beats().to_double() * self.seconds_per_beat()
    }

    /// Convert seconds to a beat-based [`TimeSpan`], rounding to the nearest 1/1000 beat.
    ///
    /// # Panics
    ///
    /// Panics if `seconds` is negative or not finite.
    #[must_use]
    pub fn span_for_seconds(&self, seconds: f64) -> TimeSpan {
        assert!(seconds.is_finite() && seconds >= 0.0, "seconds must be non-negative and finite");
        let beats = seconds / self.seconds_per_beat();
        let millis = (beats * 1000.0).round() as i64;
        TimeSpan::new(Rational::new(millis, 1000).expect("denominator is literal 1000"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn seconds_per_bar_across_meters() {
        let tempo = Tempo::new(120);
        assert!((tempo.seconds_per_bar(Meter::FOUR_FOUR) - 2.0).abs() < 1e-9);
        assert!((tempo.seconds_per_bar(Meter::THREE_FOUR) - 1.5).abs() < 1e-9);
        assert!((tempo.seconds_per_bar(Meter::SIX_EIGHT) - 1.5).abs() < 1e-9);
        assert!((tempo.seconds_per_bar(Meter::FIVE_FOUR) - 2.5).abs() < 1e-9);
        assert!((tempo.seconds_per_bar(Meter::SEVEN_EIGHT) - 1.75).abs() < 1e-9);
    }

    #[test]
    fn span_second_roundtrip() {
        let tempo = Tempo::new(90);
        let span = TimeSpan::new(r(3, 1));
        let seconds = tempo.seconds_for_span(span);
        assert!((seconds - 2.0).abs() < 1e-9);
        let roundtrip = tempo.span_for_seconds(seconds);
        assert_eq!(roundtrip.beats(), span.beats());
    }
}
