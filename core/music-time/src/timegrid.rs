//! core/music-time/src/timegrid.rs
//! Time-grid utilities for measure, beat, and subdivision alignment, built on exact rationals.

use crate::{
    meter::Meter,
    rational::Rational,
    timespan::{TimePoint, TimeSpan},
};

/// Immutable collection of aligned musical positions.
#[derive(Debug, Clone)]
pub struct TimeGrid {
    pub measures: Vec<TimePoint>,
    pub beats: Vec<TimePoint>,
    pub subdivisions: Vec<TimePoint>,
}

impl TimeGrid {
    #[must_use]
    pub fn measures(&self) -> &[TimePoint] {
        &self.measures
    }

    #[must_use]
    pub fn beats(&self) -> &[TimePoint] {
        &self.beats
    }

    #[must_use]
    pub fn subdivisions(&self) -> &[TimePoint] {
        &self.subdivisions
    }
}

/// Configuration for generating a [`TimeGrid`].
#[derive(Debug, Clone, Copy)]
pub struct GridConfig {
    pub start: TimePoint,
    pub meter: Meter,
    pub bars: u32,
    pub subdivisions_per_beat: u32,
}

impl GridConfig {
    #[must_use]
    pub fn new(start: TimePoint, meter: Meter) -> Self {
        Self { start, meter, bars: 1, subdivisions_per_beat: 1 }
    }

    #[must_use]
    pub fn bars(mut self, bars: u32) -> Self {
        assert!(bars > 0, "grid must contain at least one bar");
        self.bars = bars;
        self
    }

    #[must_use]
    pub fn subdivisions_per_beat(mut self, subdivisions: u32) -> Self {
        assert!(subdivisions > 0, "subdivisions per beat must be > 0");
        self.subdivisions_per_beat = subdivisions;
        self
    }

    #[must_use]
    pub fn build(self) -> TimeGrid {
        let bars = usize::try_from(self.bars).expect("bars fits in usize");
        let measure_span = self.meter.bar_span();
        let measures = accumulate(self.start, bars, measure_span);

        let beats_per_bar = usize::from(self.meter.numerator);
        let total_beats = beats_per_bar * bars;
        let beat_span = TimeSpan::new(Rational::new(4, i64::from(self.meter.denominator)).expect("denominator is a non-zero u8"));
        let beats = accumulate(self.start, total_beats, beat_span);

        let subdivisions_per_beat =
            usize::try_from(self.subdivisions_per_beat).expect("subdivisions fit in usize");
        let subdivision_steps = total_beats * subdivisions_per_beat;
        let subdivision_span = TimeSpan::new(
            beat_span.beats().checked_div(Rational::from_integer(self.subdivisions_per_beat as i64))
                .expect("subdivisions_per_beat is non-zero"),
        );
        let subdivisions = accumulate(self.start, subdivision_steps, subdivision_span);

        TimeGrid { measures, beats, subdivisions }
    }
}

fn accumulate(start: TimePoint, steps: usize, increment: TimeSpan) -> Vec<TimePoint> {
    let mut points = Vec::with_capacity(steps + 1);
    points.push(start);
    let mut current = start;
    for _ in 0..steps {
        current = current + increment;
        points.push(current);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn grid_small_range() {
        let grid = GridConfig::new(TimePoint::new(Rational::ZERO), Meter::FOUR_FOUR)
            .bars(2)
            .subdivisions_per_beat(2)
            .build();
        assert_eq!(grid.measures.len(), 3);
        assert_eq!(grid.beats.len(), 2 * 4 + 1);
        assert_eq!(grid.subdivisions.len(), (2 * 4 * 2) + 1);
        let last_measure = *grid.measures.last().unwrap();
        assert_eq!(last_measure.beats(), r(8, 1));
    }

    #[test]
    fn grid_moderately_large_range() {
        let grid = GridConfig::new(TimePoint::new(r(16, 1)), Meter::SEVEN_EIGHT)
            .bars(32)
            .subdivisions_per_beat(3)
            .build();
        assert_eq!(grid.measures.len(), 33);
        assert_eq!(grid.beats.len(), (32 * 7) + 1);
        assert_eq!(grid.subdivisions.len(), (32 * 7 * 3) + 1);
        let span = grid.measures.last().unwrap().beats() - grid.measures.first().unwrap().beats();
        assert_eq!(span, Meter::SEVEN_EIGHT.bar_span().beats() * Rational::from_integer(32));
    }

    #[test]
    fn grid_is_monotonic_and_exact() {
        let grid = GridConfig::new(TimePoint::new(Rational::ZERO), Meter::new(5, 8))
            .bars(7)
            .subdivisions_per_beat(3)
            .build();
        for window in grid.subdivisions.windows(2) {
            assert!(window[1].beats() > window[0].beats());
        }
    }
}
