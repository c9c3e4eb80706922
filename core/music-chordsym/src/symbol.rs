//! core/music-chordsym/src/symbol.rs
//! Root-note lexing: a letter plus zero or more sharp/flat accidentals, Unicode `♯`/`♭`
//! normalized to ASCII `#`/`b`.

use crate::errors::ParseError;

/// A note letter, `C` through `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteLetter {
    /// Semitone offset from C.
    #[must_use]
    pub const fn semitone_from_c(self) -> i32 {
        match self {
            Self::C => 0,
            Self::D => 2,
            Self::E => 4,
            Self::F => 5,
            Self::G => 7,
            Self::A => 9,
            Self::B => 11,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            _ => None,
        }
    }
}

/// Normalize Unicode sharp/flat glyphs to their ASCII equivalents.
#[must_use]
pub fn normalize_accidentals(input: &str) -> String {
    input.chars().map(|c| match c {
        '\u{266f}' => '#',
        '\u{266d}' => 'b',
        other => other,
    }).collect()
}

/// Lex a root note (letter plus any number of `#`/`b` accidentals) from the start of `input`.
///
/// Returns the root's pitch class (`0..12`) and the byte offset of the remaining suffix.
///
/// # Errors
///
/// Returns [`ParseError`] when `input` is empty or does not start with a note letter.
pub fn lex_root(input: &str) -> Result<(u8, usize), ParseError> {
    let mut chars = input.char_indices();
    let (_, first) = chars.next().ok_or_else(|| ParseError::at(1, "chord symbol cannot be empty"))?;
    let letter = NoteLetter::from_char(first)
        .ok_or_else(|| ParseError::at(1, format!("invalid root note letter '{first}'")))?;

    let mut semitone = letter.semitone_from_c();
    let mut end = first.len_utf8();
    for (offset, c) in chars {
        match c {
            '#' => semitone += 1,
            'b' => semitone -= 1,
            _ => break,
        }
        end = offset + c.len_utf8();
    }
    Ok((semitone.rem_euclid(12) as u8, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_plain_letter() {
        let (pc, end) = lex_root("C7").unwrap();
        assert_eq!(pc, 0);
        assert_eq!(&"C7"[end..], "7");
    }

    #[test]
    fn lexes_sharp_and_flat_chains() {
        assert_eq!(lex_root("F#m7").unwrap().0, 6);
        assert_eq!(lex_root("Bb").unwrap().0, 10);
        assert_eq!(lex_root("Cbb").unwrap().0, 10);
    }

    #[test]
    fn normalizes_unicode_accidentals() {
        let normalized = normalize_accidentals("F\u{266f}m7");
        assert_eq!(lex_root(&normalized).unwrap().0, 6);
    }

    #[test]
    fn rejects_invalid_root() {
        assert!(lex_root("H7").is_err());
        assert!(lex_root("").is_err());
    }
}
