//! core/music-analysis/src/segment.rs
//! Walks a sorted [`NoteBuffer`], grouping consecutive equal-offset events into chord segments
//! and spelling each one against a key via roman-numeral analysis.

use music_buffer::NoteBuffer;
use music_theory::chord::{self, ChordInfo};
use music_theory::key::{KeyAnalyzer, KeySignature, MinorDominantMode, RomanNumeralChord};
use music_theory::mask::PitchClassMask;
use music_time::Rational;

/// One harmonic segment: a chord held for `duration` starting at `time`, with both the raw
/// chord identification and (when the chord root lies on one of the key's seven degrees) its
/// roman-numeral spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordSegment {
    time: Rational,
    duration: Rational,
    mask: PitchClassMask,
    chord: ChordInfo,
    roman: Option<RomanNumeralChord>,
}

impl ChordSegment {
    #[must_use]
    pub const fn time(&self) -> Rational {
        self.time
    }

    #[must_use]
    pub const fn duration(&self) -> Rational {
        self.duration
    }

    #[must_use]
    pub const fn mask(&self) -> PitchClassMask {
        self.mask
    }

    #[must_use]
    pub const fn chord(&self) -> ChordInfo {
        self.chord
    }

    #[must_use]
    pub const fn roman(&self) -> Option<RomanNumeralChord> {
        self.roman
    }
}

/// Segment a sorted buffer into [`ChordSegment`]s and spell each against `key`.
///
/// Segments are delimited by distinct onset offsets; a segment's duration is the longest
/// duration among the notes that start it. Rests (pitch `-1`) contribute to segment
/// boundaries but not to the chord mask.
///
/// # Panics
///
/// Panics (via debug assertions inside [`NoteBuffer`]) if `buffer` has not been sorted first.
#[must_use]
pub fn analyze_buffer(
    buffer: &NoteBuffer,
    key: KeySignature,
    minor_dominant_mode: MinorDominantMode,
) -> Vec<ChordSegment> {
    let mut segments = Vec::new();
    let mut index = 0;
    let len = buffer.len();

    while index < len {
        let time = buffer.get(index).offset();
        let mut duration = Rational::ZERO;
        let mut pitches = Vec::new();
        let mut cursor = index;
        while cursor < len && buffer.get(cursor).offset() == time {
            let event = buffer.get(cursor);
            if event.duration() > duration {
                duration = event.duration();
            }
            if !event.is_rest() {
                pitches.push(event.pitch());
            }
            cursor += 1;
        }

        let mask = music_theory::mask::get_mask(&pitches);
        let chord_info = chord::identify(mask);
        let roman = if pitches.is_empty() {
            None
        } else {
            KeyAnalyzer::analyze(&pitches, key, minor_dominant_mode)
        };

        segments.push(ChordSegment { time, duration, mask, chord: chord_info, roman });
        index = cursor;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use music_buffer::NoteEvent;
    use music_theory::pitch::PitchClass;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn segments_dm7_g7_cmaj7_progression_in_c_major() {
        let mut buffer = NoteBuffer::new(16).unwrap();
        for &p in &[62, 65, 69, 72] {
            buffer.add(NoteEvent::new(p, r(0, 1), r(1, 1), 0.8));
        }
        for &p in &[67, 71, 74, 77] {
            buffer.add(NoteEvent::new(p, r(1, 1), r(1, 1), 0.8));
        }
        for &p in &[60, 64, 67, 71] {
            buffer.add(NoteEvent::new(p, r(2, 1), r(1, 1), 0.8));
        }
        buffer.sort();

        let key = KeySignature::new(PitchClass::new(0).unwrap(), true);
        let segments = analyze_buffer(&buffer, key, MinorDominantMode::Natural);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].roman().unwrap().roman(), "ii7");
        assert_eq!(segments[1].roman().unwrap().roman(), "V7");
        assert_eq!(segments[2].roman().unwrap().roman(), "Imaj7");
    }

    #[test]
    fn rest_only_segment_has_empty_mask_and_no_roman() {
        let mut buffer = NoteBuffer::new(4).unwrap();
        buffer.add(NoteEvent::new(-1, r(0, 1), r(1, 4), 0.0));
        buffer.sort();

        let key = KeySignature::new(PitchClass::new(0).unwrap(), true);
        let segments = analyze_buffer(&buffer, key, MinorDominantMode::Natural);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].mask().popcount(), 0);
        assert!(segments[0].roman().is_none());
    }
}
