//! core/music-analysis/src/key_estimate.rs
//! Whole-buffer key estimation: fold every sounding pitch into one mask and score it against
//! the scale-mask tables, the same correlation [`KeyAnalyzer::identify_key`] uses per segment.

use music_buffer::NoteBuffer;
use music_theory::key::KeyIdentification;
use music_theory::mask::get_mask;

/// Estimate the most likely key for the entire buffer's pitch content, ignoring time and
/// register. Confidence is the fraction of the seven diatonic scale tones the pitch content
/// actually touches.
#[must_use]
pub fn estimate_key(buffer: &NoteBuffer) -> KeyIdentification {
    let mut pitches = Vec::with_capacity(buffer.len());
    for index in 0..buffer.len() {
        let event = buffer.get(index);
        if !event.is_rest() {
            pitches.push(event.pitch());
        }
    }
    music_theory::key::KeyAnalyzer::identify_key(get_mask(&pitches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use music_buffer::NoteEvent;
    use music_time::Rational;

    #[test]
    fn c_major_scale_is_detected_with_high_confidence() {
        let mut buffer = NoteBuffer::new(8).unwrap();
        for (index, &pitch) in [60, 62, 64, 65, 67, 69, 71].iter().enumerate() {
            buffer.add(NoteEvent::new(
                pitch,
                Rational::from_integer(index as i64),
                Rational::ONE,
                0.8,
            ));
        }
        let identification = estimate_key(&buffer);
        assert_eq!(identification.key().root().value(), 0);
        assert!(identification.key().is_major());
        assert!(identification.confidence() >= 0.8);
    }
}
