//! core/music-chordsym/src/parser.rs
//! The chord-symbol grammar: root, ordered suffix tokens, optional slash-bass, optional
//! polychord layers — emitting sorted MIDI pitches.

use crate::builder::{ChordBuilder, SeventhKind, TriadQuality};
use crate::errors::ParseError;
use crate::symbol::{lex_root, normalize_accidentals};

/// Static quality/seventh/sus keyword tokens, longest-first so a greedy scan never stops short
/// (e.g. `"maj7"` is tried before `"m"` would otherwise match its prefix).
const KEYWORD_TOKENS: &[(&str, fn(&mut ChordBuilder))] = &[
    ("m(maj7)", |b| {
        b.triad = TriadQuality::Minor;
        b.maj_seen = true;
        b.seventh = SeventhKind::Major;
    }),
    ("m/maj7", |b| {
        b.triad = TriadQuality::Minor;
        b.maj_seen = true;
        b.seventh = SeventhKind::Major;
    }),
    ("halfdim7", |b| {
        b.triad = TriadQuality::Diminished;
        b.degree_overrides.insert(5, 6);
        b.seventh = SeventhKind::Minor;
    }),
    ("m7b5", |b| {
        b.triad = TriadQuality::Diminished;
        b.degree_overrides.insert(5, 6);
        b.seventh = SeventhKind::Minor;
    }),
    ("mM7", |b| {
        b.triad = TriadQuality::Minor;
        b.maj_seen = true;
        b.seventh = SeventhKind::Major;
    }),
    ("maj13", |b| {
        b.maj_seen = true;
        b.add_extension(13);
    }),
    ("maj11", |b| {
        b.maj_seen = true;
        b.add_extension(11);
    }),
    ("maj9", |b| {
        b.maj_seen = true;
        b.add_extension(9);
    }),
    ("maj7", |b| {
        b.maj_seen = true;
        b.seventh = SeventhKind::Major;
    }),
    ("dim7", |b| {
        b.triad = TriadQuality::Diminished;
        b.seventh = SeventhKind::Diminished;
    }),
    ("sus2", |b| b.triad = TriadQuality::Sus2),
    ("sus4", |b| b.triad = TriadQuality::Sus4),
    ("halfdim", |b| {
        b.triad = TriadQuality::Diminished;
        b.degree_overrides.insert(5, 6);
        b.seventh = SeventhKind::Minor;
    }),
    ("6/9", |b| {
        b.sixth = true;
        b.extensions.insert(9);
    }),
    ("dim", |b| b.triad = TriadQuality::Diminished),
    ("aug", |b| b.triad = TriadQuality::Augmented),
    ("sus", |b| b.triad = TriadQuality::SusPending),
    ("min", |b| b.triad = TriadQuality::Minor),
    ("alt", |b| {
        b.seventh = SeventhKind::Dominant;
        b.degree_overrides.insert(5, 8);
        b.degree_overrides.insert(9, 13);
        b.extensions.insert(9);
    }),
    ("\u{b0}7", |b| {
        b.triad = TriadQuality::Diminished;
        b.seventh = SeventhKind::Diminished;
    }),
    ("\u{b0}", |b| b.triad = TriadQuality::Diminished),
    ("\u{f8}7", |b| {
        b.triad = TriadQuality::Diminished;
        b.degree_overrides.insert(5, 6);
        b.seventh = SeventhKind::Minor;
    }),
    ("\u{f8}", |b| {
        b.triad = TriadQuality::Diminished;
        b.degree_overrides.insert(5, 6);
        b.seventh = SeventhKind::Minor;
    }),
    ("6", |b| b.sixth = true),
    ("m", |b| b.triad = TriadQuality::Minor),
    ("-", |b| b.triad = TriadQuality::Minor),
    ("+", |b| b.triad = TriadQuality::Augmented),
];

fn natural_add_offset(degree: u8) -> i32 {
    match degree {
        2 => 2,
        4 => 5,
        5 => 7,
        6 => 9,
        9 => 14,
        11 => 17,
        13 => 21,
        _ => 0,
    }
}

fn alteration_base_offset(degree: u8) -> Option<i32> {
    match degree {
        5 => Some(7),
        9 => Some(14),
        11 => Some(17),
        13 => Some(21),
        _ => None,
    }
}

fn take_digits(s: &str) -> Option<(u8, usize)> {
    let digit_len = s.chars().take_while(char::is_ascii_digit).count();
    if digit_len == 0 {
        return None;
    }
    let digits = &s[..digit_len];
    digits.parse::<u8>().ok().map(|n| (n, digit_len))
}

/// Consume one grammar token from the start of `suffix`, mutating `builder`.
///
/// Returns the number of bytes consumed. Returns `None` when `suffix` is exhausted (not an
/// error: the caller stops the loop).
fn consume_token(builder: &mut ChordBuilder, suffix: &str) -> Result<Option<usize>, String> {
    if suffix.is_empty() {
        return Ok(None);
    }

    // Alteration / add / omit tokens are recognized by shape (a sign or keyword plus digits)
    // rather than as fixed strings, so they are tried before the static keyword table.
    if let Some(rest) = suffix.strip_prefix('#').or_else(|| suffix.strip_prefix('+')) {
        if let Some((degree, len)) = take_digits(rest) {
            if let Some(base) = alteration_base_offset(degree) {
                builder.degree_overrides.insert(degree, base + 1);
                builder.extensions.insert(degree);
                return Ok(Some(1 + len));
            }
        }
    }
    if let Some(rest) = suffix.strip_prefix('b') {
        if let Some((degree, len)) = take_digits(rest) {
            if let Some(base) = alteration_base_offset(degree) {
                builder.degree_overrides.insert(degree, base - 1);
                builder.extensions.insert(degree);
                return Ok(Some(1 + len));
            }
        }
    }
    for (keyword, prefix) in [("add", false), ("no", true), ("omit", true)] {
        if let Some(rest) = suffix.strip_prefix(keyword) {
            if let Some((degree, len)) = take_digits(rest) {
                if prefix {
                    builder.omits.insert(degree);
                } else {
                    builder.adds.push((degree, natural_add_offset(degree)));
                }
                return Ok(Some(keyword.len() + len));
            }
        }
    }

    for &(keyword, action) in KEYWORD_TOKENS {
        if suffix.starts_with(keyword) {
            action(builder);
            return Ok(Some(keyword.len()));
        }
    }
    for (digits, action) in [
        (13u8, ChordBuilder::add_extension as fn(&mut ChordBuilder, u8)),
        (11, ChordBuilder::add_extension),
        (9, ChordBuilder::add_extension),
    ] {
        if suffix.starts_with(&digits.to_string()) {
            action(builder, digits);
            return Ok(Some(digits.to_string().len()));
        }
    }
    if let Some(rest) = suffix.strip_prefix('7') {
        let _ = rest;
        if builder.seventh == SeventhKind::None {
            builder.set_seventh_from_bare_token();
        }
        return Ok(Some(1));
    }

    Err(format!("unrecognized chord token near '{suffix}'"))
}

fn strip_grouping(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '(' | ')' | ',')).collect()
}

fn split_top_level_slash(s: &str) -> (&str, Option<&str>) {
    let mut depth = 0i32;
    for (idx, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            '/' if depth == 0 => return (&s[..idx], Some(&s[idx + 1..])),
            _ => {}
        }
    }
    (s, None)
}

fn parse_layer(layer: &str, layer_index: i32) -> Result<Vec<i32>, ParseError> {
    let layer = layer.trim();
    let (root_pc, consumed) = lex_root(layer)?;
    let rest = &layer[consumed..];
    let (suffix_raw, bass_raw) = split_top_level_slash(rest);
    let suffix = strip_grouping(suffix_raw);

    let mut builder = ChordBuilder::new(root_pc);
    if suffix.trim() == "5" {
        builder.power = true;
    } else {
        let mut cursor = suffix.as_str();
        while !cursor.is_empty() {
            if cursor.starts_with(char::is_whitespace) {
                cursor = &cursor[1..];
                continue;
            }
            match consume_token(&mut builder, cursor) {
                Ok(Some(consumed)) => cursor = &cursor[consumed..],
                Ok(None) => break,
                Err(message) => return Err(ParseError::at(1, message)),
            }
        }
        builder.finalize_pending_sus();
    }

    let mut offsets = builder.resolve_offsets();
    offsets.sort_unstable();
    let mut pitches: Vec<i32> =
        offsets.iter().map(|offset| 60 + i32::from(root_pc) + offset).collect();

    if let Some(bass) = bass_raw {
        let (bass_pc, _) = lex_root(bass)?;
        pitches.retain(|p| p.rem_euclid(12) != i32::from(bass_pc));
        pitches.insert(0, 48 + i32::from(bass_pc));
    }

    for pitch in &mut pitches {
        *pitch += layer_index * 12;
    }
    Ok(pitches)
}

/// Parse a chord symbol (optionally a `|`-separated polychord) into sorted MIDI pitches.
///
/// # Errors
///
/// Returns [`ParseError`] on any lexer or grammar mismatch, with source position.
pub fn parse_pitches(input: &str) -> Result<Vec<i32>, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::at(1, "chord symbol cannot be empty"));
    }
    let normalized = normalize_accidentals(input);
    let mut all = Vec::new();
    for (index, layer) in normalized.split('|').enumerate() {
        all.extend(parse_layer(layer, index as i32)?);
    }
    all.sort_unstable();
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_major_triad() {
        assert_eq!(parse_pitches("C").unwrap(), vec![60, 64, 67]);
    }

    #[test]
    fn parses_dominant_seventh_with_flat9_and_sharp11() {
        assert_eq!(parse_pitches("C7(b9,#11)").unwrap(), vec![60, 64, 67, 70, 73, 78]);
    }

    #[test]
    fn parses_polychord_stacked_an_octave_apart() {
        assert_eq!(parse_pitches("C|G").unwrap(), vec![60, 64, 67, 79, 83, 86]);
    }

    #[test]
    fn parses_minor_seventh() {
        assert_eq!(parse_pitches("Dm7").unwrap(), vec![62, 65, 69, 72]);
    }

    #[test]
    fn parses_slash_bass_and_suppresses_its_class_above() {
        let pitches = parse_pitches("C/E").unwrap();
        assert_eq!(pitches[0], 52);
        assert!(!pitches[1..].contains(&64));
    }

    #[test]
    fn parses_sus_default_resolves_to_sus4() {
        assert_eq!(parse_pitches("Csus").unwrap(), vec![60, 65, 67]);
    }

    #[test]
    fn parses_add9_without_implying_seventh() {
        assert_eq!(parse_pitches("Cadd9").unwrap(), vec![60, 64, 67, 74]);
    }

    #[test]
    fn parses_power_chord() {
        assert_eq!(parse_pitches("C5").unwrap(), vec![60, 67]);
    }

    #[test]
    fn rejects_unrecognized_suffix() {
        assert!(parse_pitches("Cxyz").is_err());
    }
}
