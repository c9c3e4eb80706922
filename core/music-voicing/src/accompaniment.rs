//! core/music-voicing/src/accompaniment.rs
//! Turns a harmonized chord stream into a concrete event stream: block chords, broken-chord
//! arpeggios, and a split-point orchestration mapper that folds pitches into instrument ranges.

use music_time::Rational;

use crate::harmonization::ChordAssignment;

/// One emitted event: a pitch sounding for a span of time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccompanimentEvent {
    pub onset: Rational,
    pub duration: Rational,
    pub pitch: i32,
}

/// How an assignment's chord tones are laid out in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccompanimentStyle {
    /// Bass note plus the full chord, all sustained for the assignment's full duration.
    Block,
    /// Bass note on the first subdivision, then the remaining chord tones cycled one per
    /// subdivision; the final subdivision is shortened to fit the assignment exactly.
    Arpeggio { subdivision: Rational },
}

/// Emit events for one `ChordAssignment` per `style`.
#[must_use]
pub fn emit_assignment(assignment: &ChordAssignment, style: AccompanimentStyle) -> Vec<AccompanimentEvent> {
    let span = assignment.end - assignment.start;
    match style {
        AccompanimentStyle::Block => assignment
            .pitches
            .iter()
            .map(|&pitch| AccompanimentEvent { onset: assignment.start, duration: span, pitch })
            .collect(),
        AccompanimentStyle::Arpeggio { subdivision } => {
            emit_arpeggio(assignment, subdivision)
        }
    }
}

fn emit_arpeggio(assignment: &ChordAssignment, subdivision: Rational) -> Vec<AccompanimentEvent> {
    if assignment.pitches.is_empty() || subdivision <= Rational::ZERO {
        return Vec::new();
    }

    let span = assignment.end - assignment.start;
    let step_count = {
        let ratio = span.checked_div(subdivision).map_or(1.0, |r| r.to_double());
        (ratio.ceil() as i64).max(1)
    };

    let mut events = Vec::with_capacity(step_count as usize);
    let mut cursor = assignment.start;
    for step in 0..step_count {
        let pitch = assignment.pitches[(step as usize) % assignment.pitches.len()];
        let remaining = assignment.end - cursor;
        let duration = if subdivision < remaining { subdivision } else { remaining };
        if duration <= Rational::ZERO {
            break;
        }
        events.push(AccompanimentEvent { onset: cursor, duration, pitch });
        cursor = cursor + duration;
    }
    events
}

/// Emit events for a whole progression, concatenating each assignment's events in order.
#[must_use]
pub fn emit_progression(assignments: &[ChordAssignment], style: AccompanimentStyle) -> Vec<AccompanimentEvent> {
    assignments.iter().flat_map(|assignment| emit_assignment(assignment, style)).collect()
}

/// An instrument's playable pitch range, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrumentRange {
    pub min_pitch: i32,
    pub max_pitch: i32,
}

impl InstrumentRange {
    /// Octave-transpose `pitch` until it lies within this range; clamp if no octave fits.
    #[must_use]
    pub fn fold(self, pitch: i32) -> i32 {
        let mut folded = pitch;
        while folded < self.min_pitch {
            folded += 12;
        }
        while folded > self.max_pitch {
            folded -= 12;
        }
        folded.clamp(self.min_pitch, self.max_pitch)
    }
}

/// Splits an event stream into a bass part (pitches below `split_pitch`) and a harmony part
/// (pitches at or above it), folding each into its own instrument range.
#[must_use]
pub fn split_and_fold(
    events: &[AccompanimentEvent],
    split_pitch: i32,
    bass_range: InstrumentRange,
    harmony_range: InstrumentRange,
) -> (Vec<AccompanimentEvent>, Vec<AccompanimentEvent>) {
    let mut bass = Vec::new();
    let mut harmony = Vec::new();
    for event in events {
        if event.pitch < split_pitch {
            bass.push(AccompanimentEvent { pitch: bass_range.fold(event.pitch), ..*event });
        } else {
            harmony.push(AccompanimentEvent { pitch: harmony_range.fold(event.pitch), ..*event });
        }
    }
    (bass, harmony)
}

#[cfg(test)]
mod tests {
    use super::*;
    use music_theory::chord::ChordQuality;

    fn c_major_assignment(start: i64, end: i64) -> ChordAssignment {
        ChordAssignment {
            start: Rational::from_integer(start),
            end: Rational::from_integer(end),
            root_pc: 0,
            quality: ChordQuality::Major,
            pitches: vec![48, 52, 55],
        }
    }

    #[test]
    fn block_style_sustains_every_tone_for_the_full_span() {
        let assignment = c_major_assignment(0, 2);
        let events = emit_assignment(&assignment, AccompanimentStyle::Block);
        assert_eq!(events.len(), 3);
        for event in &events {
            assert_eq!(event.onset, Rational::ZERO);
            assert_eq!(event.duration, Rational::from_integer(2));
        }
    }

    #[test]
    fn arpeggio_shortens_its_final_step_to_fit_exactly() {
        let assignment = c_major_assignment(0, 1);
        let subdivision = Rational::new(1, 3).unwrap();
        let events = emit_assignment(&assignment, AccompanimentStyle::Arpeggio { subdivision });
        assert_eq!(events.len(), 3);
        let total: Rational = events.iter().fold(Rational::ZERO, |acc, e| acc + e.duration);
        assert_eq!(total, Rational::ONE);
    }

    #[test]
    fn split_and_fold_routes_by_pitch_and_folds_into_range() {
        let events = vec![
            AccompanimentEvent { onset: Rational::ZERO, duration: Rational::ONE, pitch: 36 },
            AccompanimentEvent { onset: Rational::ZERO, duration: Rational::ONE, pitch: 76 },
        ];
        let bass_range = InstrumentRange { min_pitch: 40, max_pitch: 60 };
        let harmony_range = InstrumentRange { min_pitch: 55, max_pitch: 72 };
        let (bass, harmony) = split_and_fold(&events, 60, bass_range, harmony_range);
        assert_eq!(bass.len(), 1);
        assert!(bass[0].pitch >= 40 && bass[0].pitch <= 60);
        assert_eq!(harmony.len(), 1);
        assert!(harmony[0].pitch >= 55 && harmony[0].pitch <= 72);
    }
}
