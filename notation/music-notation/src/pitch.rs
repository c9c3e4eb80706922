//! notation/music-notation/src/pitch.rs
//! Pitch-with-octave lexing: reuses the chord-symbol root lexer for the letter/accidental
//! chain, then consumes a following octave digit string.

use music_chordsym::{lex_root, normalize_accidentals};
use music_theory::pitch::{PitchClass, SpnNote};

use crate::errors::NotationError;

/// Lex a pitch token (`[A-Ga-g](#|b)*\d+`) from the start of `input`, returning its MIDI pitch
/// and the number of bytes consumed.
///
/// # Errors
///
/// Returns [`NotationError::ParseError`] when `input` does not start with a note letter, has no
/// trailing octave digits, or names an octave outside the representable MIDI range.
pub fn lex_pitch(input: &str, line: u32, col: u32) -> Result<(i32, usize), NotationError> {
    let (root_pc, consumed) =
        lex_root(input).map_err(|e| NotationError::at(line, col, e.message))?;
    let rest = &input[consumed..];
    let digit_len = rest.chars().take_while(char::is_ascii_digit).count();
    if digit_len == 0 {
        return Err(NotationError::at(line, col + consumed as u32, "pitch is missing its octave"));
    }
    let octave: i32 = rest[..digit_len]
        .parse()
        .map_err(|_| NotationError::at(line, col + consumed as u32, "octave is not a valid integer"))?;

    let pitch_class = PitchClass::new(root_pc)
        .map_err(|e| NotationError::at(line, col, e.to_string()))?;
    let spn = SpnNote::new(pitch_class, octave)
        .map_err(|e| NotationError::at(line, col, e.to_string()))?;
    Ok((spn.midi_pitch(), consumed + digit_len))
}

/// Normalize Unicode sharp/flat glyphs before lexing, mirroring `music-chordsym`'s convention.
#[must_use]
pub fn normalize(input: &str) -> String {
    normalize_accidentals(input)
}

/// Render a MIDI pitch back to its note-letter-plus-octave spelling (always using sharps, never
/// flats, per the canonical formatter convention).
#[must_use]
pub fn format_pitch(midi: i32) -> String {
    const NAMES: [&str; 12] =
        ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
    let pc = midi.rem_euclid(12) as usize;
    let octave = midi.div_euclid(12) - 1;
    format!("{}{}", NAMES[pc], octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_middle_c() {
        let (midi, consumed) = lex_pitch("C4/4", 1, 1).unwrap();
        assert_eq!(midi, 60);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn lexes_sharp_and_flat() {
        assert_eq!(lex_pitch("F#4", 1, 1).unwrap().0, 66);
        assert_eq!(lex_pitch("Bb3", 1, 1).unwrap().0, 58);
    }

    #[test]
    fn missing_octave_is_an_error() {
        assert!(lex_pitch("C", 1, 1).is_err());
    }

    #[test]
    fn format_pitch_round_trips_through_lex() {
        let (midi, _) = lex_pitch("C4", 1, 1).unwrap();
        assert_eq!(format_pitch(midi), "C4");
    }
}
