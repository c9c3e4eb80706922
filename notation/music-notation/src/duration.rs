//! notation/music-notation/src/duration.rs
//! Duration-suffix lexing and formatting: numeric `/N[.]` and letter `:letter[.]` forms, both
//! expressed as a fraction of a whole note = `1` (so `/4`, the quarter note, is `1/4`).

use music_time::Rational;

use crate::errors::NotationError;

/// Letter duration names mapped to their fraction of a whole note, longest note value first so
/// a greedy match never stops short.
const LETTER_DURATIONS: &[(char, i64, i64)] = &[
    ('w', 1, 1),
    ('h', 1, 2),
    ('q', 1, 4),
    ('e', 1, 8),
    ('s', 1, 16),
    ('t', 1, 32),
];

fn dot_multiplier(dots: u32) -> Rational {
    // value * (2 - 1/2^dots); dots in {0, 1, 2} cover every form this grammar emits.
    let mut halved = Rational::ONE;
    let mut sum = Rational::ZERO;
    for _ in 0..dots {
        halved = halved.checked_div(Rational::from_integer(2)).expect("divisor is 2, never zero");
        sum = sum.add(halved);
    }
    Rational::ONE.add(sum)
}

/// Parse a numeric duration suffix body (the digits after `/`, plus any trailing dots) into a
/// duration expressed as a fraction of a whole note (`/4` is the quarter note, `1/4`).
///
/// # Errors
///
/// Returns [`NotationError::ParseError`] when `denominator` is non-positive.
pub fn numeric_duration(denominator: i64, dots: u32, line: u32, col: u32) -> Result<Rational, NotationError> {
    if denominator <= 0 {
        return Err(NotationError::at(line, col, "duration denominator must be positive"));
    }
    let base = Rational::new(1, denominator)
        .map_err(|e| NotationError::at(line, col, e.to_string()))?;
    Ok(base.mul(dot_multiplier(dots)))
}

/// Parse a letter duration (`w`, `h`, `q`, `e`, `s`, `t`), plus any trailing dots.
///
/// # Errors
///
/// Returns [`NotationError::ParseError`] when `letter` is not one of the six duration letters.
pub fn letter_duration(letter: char, dots: u32, line: u32, col: u32) -> Result<Rational, NotationError> {
    let (_, num, den) = LETTER_DURATIONS
        .iter()
        .find(|(l, _, _)| *l == letter)
        .ok_or_else(|| NotationError::at(line, col, format!("unknown duration letter '{letter}'")))?;
    let base = Rational::new(*num, *den).expect("letter duration table entries are always valid");
    Ok(base.mul(dot_multiplier(dots)))
}

/// Render `value` as a numeric `/N[.]` suffix (without the leading `/`), trying zero, one, and
/// two dots and preferring the first exact match.
#[must_use]
pub fn format_numeric(value: Rational) -> String {
    for dots in 0..=2u32 {
        let multiplier = dot_multiplier(dots);
        let unmultiplied = value.checked_div(multiplier).expect("dot multiplier is never zero");
        let reciprocal = Rational::ONE.checked_div(unmultiplied);
        if let Ok(n) = reciprocal {
            if n.denominator() == 1 && n.numerator() > 0 {
                return format!("{}{}", n.numerator(), "." .repeat(dots as usize));
            }
        }
    }
    // Fall back to the plain reciprocal when no dotted numeral form matches exactly.
    let reciprocal = Rational::ONE.checked_div(value).unwrap_or(Rational::from_integer(4));
    format!("{}", reciprocal.numerator().max(1))
}

/// Render `value` as a letter `:letter[.]` suffix (without the leading `:`), trying zero, one,
/// and two dots and preferring the first exact match; returns `None` when no letter form is
/// exact.
#[must_use]
pub fn format_letter(value: Rational) -> Option<String> {
    for dots in 0..=2u32 {
        let multiplier = dot_multiplier(dots);
        for &(letter, num, den) in LETTER_DURATIONS {
            let base = Rational::new(num, den).expect("letter duration table entries are always valid");
            if base.mul(multiplier) == value {
                return Some(format!("{letter}{}", ".".repeat(dots as usize)));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_quarter_suffix_is_one_quarter() {
        assert_eq!(numeric_duration(4, 0, 1, 1).unwrap(), Rational::new(1, 4).unwrap());
    }

    #[test]
    fn numeric_dotted_quarter_is_three_eighths() {
        let value = numeric_duration(4, 1, 1, 1).unwrap();
        assert_eq!(value, Rational::new(3, 8).unwrap());
    }

    #[test]
    fn letter_half_note_is_one_half() {
        assert_eq!(letter_duration('h', 0, 1, 1).unwrap(), Rational::new(1, 2).unwrap());
    }

    #[test]
    fn format_numeric_round_trips_quarter_and_dotted_half() {
        assert_eq!(format_numeric(Rational::new(1, 4).unwrap()), "4");
        assert_eq!(format_numeric(Rational::new(3, 4).unwrap()), "2.");
    }

    #[test]
    fn format_letter_recognizes_dotted_quarter() {
        let dotted_quarter = Rational::new(3, 8).unwrap();
        assert_eq!(format_letter(dotted_quarter), Some("q.".to_string()));
    }
}
