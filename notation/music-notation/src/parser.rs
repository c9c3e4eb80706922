//! notation/music-notation/src/parser.rs
//! The notation text grammar: `sequence := timeSignature? voice ('|' voice)*`, where `voice :=
//! element*` and `element := directive | polyphonicBlock | note | chord | rest`.

use music_articulation::{ArticulationKind, DynamicMark};
use music_buffer::NoteEvent;
use music_time::Rational;

use crate::directive::{Directive, DirectiveValue};
use crate::duration::{letter_duration, numeric_duration};
use crate::errors::NotationError;
use crate::lexer::Lexer;
use crate::ornament;
use crate::pitch::lex_pitch;

/// A parsed `N/M` time signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    pub beats: u32,
    pub unit: u32,
}

impl TimeSignature {
    /// The exact duration of one measure, as a fraction of a whole note = 1 (e.g. `3/4` time is
    /// `3 * 1/4 = 3/4`).
    #[must_use]
    pub fn measure_duration(self) -> Rational {
        Rational::new(i64::from(self.beats), i64::from(self.unit))
            .expect("unit is checked non-zero during parsing")
    }
}

/// Controls whether measure lengths are checked against the time signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub validate_measures: bool,
}

/// The result of parsing one notation text: its optional time signature, the flattened event
/// stream (in non-decreasing offset order), any directives encountered, and the cursor offsets
/// at which a measure bar `|` was consumed (used by the formatter to reinsert them).
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub time_signature: Option<TimeSignature>,
    pub events: Vec<NoteEvent>,
    pub directives: Vec<Directive>,
    pub measure_bars: Vec<Rational>,
}

const DEFAULT_VELOCITY: f32 = 0.8;

struct ParserState {
    events: Vec<NoteEvent>,
    directives: Vec<Directive>,
    tie_pending: Option<(i32, usize)>,
}

impl ParserState {
    fn new() -> Self {
        Self { events: Vec::new(), directives: Vec::new(), tie_pending: None }
    }

    fn push_note(&mut self, pitch: i32, offset: Rational, duration: Rational) {
        if let Some((pending_pitch, index)) = self.tie_pending.take() {
            if pending_pitch == pitch {
                let merged = self.events[index].duration().add(duration);
                self.events[index] = NoteEvent::new(pitch, self.events[index].offset(), merged, self.events[index].velocity());
                return;
            }
        }
        self.events.push(NoteEvent::new(pitch, offset, duration, DEFAULT_VELOCITY));
    }

    fn push_notes(&mut self, pitches: &[i32], offset: Rational, duration: Rational) {
        self.tie_pending = None;
        for &pitch in pitches {
            self.events.push(NoteEvent::new(pitch, offset, duration, DEFAULT_VELOCITY));
        }
    }

    fn push_rest(&mut self, offset: Rational, duration: Rational) {
        self.tie_pending = None;
        self.events.push(NoteEvent::new(-1, offset, duration, 0.0));
    }
}

/// Parse notation text into a [`ParsedDocument`].
///
/// # Errors
///
/// Returns [`NotationError::ParseError`] on a grammar mismatch, or
/// [`NotationError::MeasureMismatch`] when `options.validate_measures` is set and a measure's
/// length does not equal the time signature's.
pub fn parse(input: &str, options: ParseOptions) -> Result<ParsedDocument, NotationError> {
    let normalized = crate::pitch::normalize(input);
    let mut lex = Lexer::new(&normalized);
    lex.skip_whitespace();

    let time_signature = parse_time_signature(&mut lex)?;
    let mut state = ParserState::new();
    let mut cursor = Rational::ZERO;
    let mut measure_start = Rational::ZERO;
    let mut measure_index = 1u32;
    let mut measure_bars = Vec::new();

    loop {
        lex.skip_whitespace();
        if lex.is_eof() {
            break;
        }
        if lex.eat("|") {
            check_measure(options, time_signature, measure_index, measure_start, cursor)?;
            measure_bars.push(cursor);
            measure_start = cursor;
            measure_index += 1;
            continue;
        }
        cursor = parse_element(&mut lex, cursor, &mut state)?;
    }

    if cursor != measure_start {
        check_measure(options, time_signature, measure_index, measure_start, cursor)?;
    }

    Ok(ParsedDocument { time_signature, events: state.events, directives: state.directives, measure_bars })
}

fn check_measure(
    options: ParseOptions,
    time_signature: Option<TimeSignature>,
    measure_index: u32,
    measure_start: Rational,
    cursor: Rational,
) -> Result<(), NotationError> {
    if !options.validate_measures {
        return Ok(());
    }
    let Some(sig) = time_signature else {
        return Ok(());
    };
    let expected = sig.measure_duration();
    let actual = cursor.sub(measure_start);
    if actual != expected {
        return Err(NotationError::MeasureMismatch { measure: measure_index, expected, actual });
    }
    Ok(())
}

fn parse_time_signature(lex: &mut Lexer) -> Result<Option<TimeSignature>, NotationError> {
    let snapshot = *lex;
    let beats_str = lex.take_while(|c| c.is_ascii_digit());
    if beats_str.is_empty() || !lex.eat("/") {
        *lex = snapshot;
        return Ok(None);
    }
    let unit_str = lex.take_while(|c| c.is_ascii_digit());
    if unit_str.is_empty() || !(lex.eat(":") || lex.eat("|")) {
        *lex = snapshot;
        return Ok(None);
    }
    let beats: u32 = beats_str
        .parse()
        .map_err(|_| NotationError::at(lex.line(), lex.col(), "time signature beats out of range"))?;
    let unit: u32 = unit_str
        .parse()
        .map_err(|_| NotationError::at(lex.line(), lex.col(), "time signature unit out of range"))?;
    if unit == 0 {
        return Err(NotationError::at(lex.line(), lex.col(), "time signature unit must be non-zero"));
    }
    lex.skip_whitespace();
    Ok(Some(TimeSignature { beats, unit }))
}

fn parse_element(lex: &mut Lexer, cursor: Rational, state: &mut ParserState) -> Result<Rational, NotationError> {
    if lex.starts_with("@") {
        parse_directive(lex, cursor, state)?;
        return Ok(cursor);
    }
    if lex.starts_with("<<") {
        return parse_polyphonic_group(lex, cursor, state);
    }
    if lex.starts_with("[") || lex.starts_with("(") {
        return parse_chord(lex, cursor, state);
    }
    if lex.peek_char() == Some('R') {
        return parse_rest(lex, cursor, state);
    }
    parse_note(lex, cursor, state)
}

fn parse_duration_suffix(lex: &mut Lexer) -> Result<Rational, NotationError> {
    let (line, col) = (lex.line(), lex.col());
    if lex.eat("/") {
        let digits = lex.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Err(NotationError::at(line, col, "expected a numeric duration after '/'"));
        }
        let denominator: i64 = digits
            .parse()
            .map_err(|_| NotationError::at(line, col, "duration denominator out of range"))?;
        let dots = lex.take_while(|c| c == '.').len() as u32;
        numeric_duration(denominator, dots, line, col)
    } else if lex.eat(":") {
        let letter = lex
            .peek_char()
            .ok_or_else(|| NotationError::at(line, col, "expected a duration letter after ':'"))?;
        lex.advance_by(letter.len_utf8());
        let dots = lex.take_while(|c| c == '.').len() as u32;
        letter_duration(letter, dots, line, col)
    } else {
        Err(NotationError::at(line, col, "expected a duration suffix ('/N' or ':letter')"))
    }
}

fn parse_ornament_suffix(lex: &mut Lexer) -> Result<Option<ornament::Ornament>, NotationError> {
    let (line, col) = (lex.line(), lex.col());
    if !lex.eat("{") {
        return Ok(None);
    }
    let tag = lex.take_while(|c| c.is_ascii_alphabetic());
    let mut params = Vec::new();
    while lex.eat(":") {
        let sign = if lex.eat("-") { -1 } else { 1 };
        let digits = lex.take_while(|c| c.is_ascii_digit());
        let value: i32 = digits
            .parse()
            .map_err(|_| NotationError::at(line, col, "ornament parameter must be an integer"))?;
        params.push(sign * value);
    }
    if !lex.eat("}") {
        return Err(NotationError::at(lex.line(), lex.col(), "unterminated ornament suffix"));
    }
    Ok(Some(ornament::from_tag(tag, &params).ok_or_else(|| {
        NotationError::at(line, col, format!("unknown ornament tag '{tag}'"))
    })?))
}

fn parse_note(lex: &mut Lexer, cursor: Rational, state: &mut ParserState) -> Result<Rational, NotationError> {
    let (line, col) = (lex.line(), lex.col());
    let (pitch, consumed) = lex_pitch(lex.rest(), line, col)?;
    lex.advance_by(consumed);
    let duration = parse_duration_suffix(lex)?;
    let ornament = parse_ornament_suffix(lex)?;
    let tied = lex.eat("~");

    match ornament {
        Some(ornament) => {
            state.tie_pending = None;
            let base = NoteEvent::new(pitch, cursor, duration, DEFAULT_VELOCITY);
            state.events.extend(ornament.expand(base));
        }
        None => state.push_note(pitch, cursor, duration),
    }
    if tied {
        let index = state.events.len() - 1;
        state.tie_pending = Some((pitch, index));
    }
    Ok(cursor.add(duration))
}

fn parse_rest(lex: &mut Lexer, cursor: Rational, state: &mut ParserState) -> Result<Rational, NotationError> {
    lex.advance_by(1);
    let duration = parse_duration_suffix(lex)?;
    state.push_rest(cursor, duration);
    Ok(cursor.add(duration))
}

fn parse_chord(lex: &mut Lexer, cursor: Rational, state: &mut ParserState) -> Result<Rational, NotationError> {
    let closing = if lex.eat("[") { ']' } else if lex.eat("(") { ')' } else { unreachable!() };
    let mut pitches = Vec::new();
    loop {
        lex.skip_whitespace();
        if lex.peek_char() == Some(closing) {
            lex.advance_by(closing.len_utf8());
            break;
        }
        let (line, col) = (lex.line(), lex.col());
        let (pitch, consumed) = lex_pitch(lex.rest(), line, col)?;
        lex.advance_by(consumed);
        pitches.push(pitch);
    }
    if pitches.is_empty() {
        return Err(NotationError::at(lex.line(), lex.col(), "chord brackets must contain at least one pitch"));
    }
    let duration = parse_duration_suffix(lex)?;
    state.push_notes(&pitches, cursor, duration);
    Ok(cursor.add(duration))
}

fn parse_polyphonic_group(lex: &mut Lexer, cursor: Rational, state: &mut ParserState) -> Result<Rational, NotationError> {
    let group_start = cursor;
    let mut max_duration = Rational::ZERO;
    loop {
        if !lex.eat("<<") {
            break;
        }
        let mut voice_cursor = group_start;
        loop {
            lex.skip_whitespace();
            if lex.eat(">>") {
                break;
            }
            if lex.is_eof() {
                return Err(NotationError::at(lex.line(), lex.col(), "unterminated polyphonic block"));
            }
            voice_cursor = parse_element(lex, voice_cursor, state)?;
        }
        let voice_duration = voice_cursor.sub(group_start);
        if voice_duration > max_duration {
            max_duration = voice_duration;
        }
        lex.skip_whitespace();
        if !lex.starts_with("<<") {
            break;
        }
    }
    Ok(group_start.add(max_duration))
}

fn parse_directive(lex: &mut Lexer, cursor: Rational, state: &mut ParserState) -> Result<(), NotationError> {
    let (line, col) = (lex.line(), lex.col());
    lex.advance_by(1);
    let name = lex.take_while(|c| c.is_ascii_alphanumeric());
    let name_lower = name.to_ascii_lowercase();

    if let Some(mark) = DynamicMark::from_label(&name_lower) {
        state.directives.push(Directive::Dynamic { time: cursor, mark });
        return Ok(());
    }

    match name_lower.as_str() {
        "cresc" | "dim" => {
            let to = parse_optional_target_level(lex)?;
            state.directives.push(if name_lower == "cresc" {
                Directive::Crescendo { time: cursor, to }
            } else {
                Directive::Diminuendo { time: cursor, to }
            });
        }
        "bpm" => {
            lex.skip_whitespace();
            let from = parse_integer(lex, line, col)?;
            lex.skip_whitespace();
            if !lex.eat("->") {
                return Err(NotationError::at(lex.line(), lex.col(), "expected '->' in bpm ramp directive"));
            }
            lex.skip_whitespace();
            let to = parse_integer(lex, line, col)?;
            lex.skip_whitespace();
            let duration = parse_duration_suffix(lex)?;
            state.directives.push(Directive::BpmRamp {
                time: cursor,
                from: from as u32,
                to: to as u32,
                duration,
            });
        }
        _ => {
            lex.skip_whitespace();
            let value = parse_directive_value(lex, line, col)?;
            state.directives.push(Directive::Generic { time: cursor, name: name.to_string(), value });
        }
    }
    Ok(())
}

fn parse_optional_target_level(lex: &mut Lexer) -> Result<Option<DynamicMark>, NotationError> {
    let snapshot = *lex;
    lex.skip_whitespace();
    if !lex.eat("to") {
        *lex = snapshot;
        return Ok(None);
    }
    lex.skip_whitespace();
    let (line, col) = (lex.line(), lex.col());
    let label = lex.take_while(|c| c.is_ascii_alphabetic());
    DynamicMark::from_label(&label.to_ascii_lowercase())
        .map(Some)
        .ok_or_else(|| NotationError::at(line, col, format!("unknown dynamic level '{label}'")))
}

fn parse_integer(lex: &mut Lexer, line: u32, col: u32) -> Result<i64, NotationError> {
    let sign = if lex.eat("-") { -1 } else { 1 };
    let digits = lex.take_while(|c| c.is_ascii_digit());
    if digits.is_empty() {
        return Err(NotationError::at(line, col, "expected an integer"));
    }
    digits.parse::<i64>().map(|n| sign * n).map_err(|_| NotationError::at(line, col, "integer out of range"))
}

fn parse_directive_value(lex: &mut Lexer, line: u32, col: u32) -> Result<DirectiveValue, NotationError> {
    if lex.eat("\"") {
        let body = lex.take_while(|c| c != '"');
        if !lex.eat("\"") {
            return Err(NotationError::at(line, col, "unterminated quoted directive value"));
        }
        return Ok(DirectiveValue::Quoted(body.to_string()));
    }
    if matches!(lex.peek_char(), Some(c) if c.is_ascii_digit() || c == '-') {
        return Ok(DirectiveValue::Integer(parse_integer(lex, line, col)?));
    }
    let ident = lex.take_while(|c| !c.is_whitespace());
    if ident.is_empty() {
        return Err(NotationError::at(line, col, "expected a directive value"));
    }
    Ok(DirectiveValue::Identifier(ident.to_string()))
}

/// Map an articulation-suffix word to [`ArticulationKind`], used by callers wiring ornament
/// suffixes that name an articulation rather than a pitch ornament.
#[must_use]
pub fn articulation_from_word(word: &str) -> Option<ArticulationKind> {
    match word {
        "staccatissimo" => Some(ArticulationKind::Staccatissimo),
        "staccato" => Some(ArticulationKind::Staccato),
        "tenuto" => Some(ArticulationKind::Tenuto),
        "accent" => Some(ArticulationKind::Accent),
        "marcato" => Some(ArticulationKind::Marcato),
        "fermata" => Some(ArticulationKind::Fermata),
        "sforzando" => Some(ArticulationKind::Sforzando),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_sequence() {
        let doc = parse("C4/4 E4/4 G4/2", ParseOptions::default()).unwrap();
        assert_eq!(doc.events.len(), 3);
        assert_eq!(doc.events[0].pitch(), 60);
        assert_eq!(doc.events[2].duration(), Rational::new(1, 2).unwrap());
    }

    #[test]
    fn tie_merges_into_one_event() {
        let doc = parse("C4/4~ C4/4", ParseOptions::default()).unwrap();
        assert_eq!(doc.events.len(), 1);
        assert_eq!(doc.events[0].pitch(), 60);
        assert_eq!(doc.events[0].duration(), Rational::new(1, 2).unwrap());
    }

    #[test]
    fn chord_bracket_advances_cursor_by_one_shared_duration() {
        let doc = parse("[C4 E4 G4]/4 D4/4", ParseOptions::default()).unwrap();
        assert_eq!(doc.events.len(), 4);
        assert_eq!(doc.events[3].offset(), Rational::new(1, 4).unwrap());
    }

    #[test]
    fn rest_is_skipped_from_chord_grouping_but_still_emitted() {
        let doc = parse("C4/4 R/4 E4/8", ParseOptions::default()).unwrap();
        assert!(doc.events[1].is_rest());
    }

    #[test]
    fn measure_mismatch_is_reported_with_position() {
        let result = parse(
            "3/4: C4/4 E4/4 G4/4 | D4/4 F4/4",
            ParseOptions { validate_measures: true },
        );
        assert_eq!(
            result,
            Err(NotationError::MeasureMismatch {
                measure: 2,
                expected: Rational::new(3, 4).unwrap(),
                actual: Rational::new(1, 2).unwrap(),
            })
        );
    }

    #[test]
    fn measure_mismatch_is_reported_when_an_earlier_bar_is_short() {
        let result = parse("3/4: C4/4 E4/4 | G4/4 C5/4 D5/4", ParseOptions { validate_measures: true });
        assert_eq!(
            result,
            Err(NotationError::MeasureMismatch {
                measure: 1,
                expected: Rational::new(3, 4).unwrap(),
                actual: Rational::new(1, 2).unwrap(),
            })
        );
    }

    #[test]
    fn polyphonic_block_resets_cursor_per_voice_and_advances_by_the_longest() {
        let doc = parse("<< C4/4 C4/4 >> << C5/2 >> D4/4", ParseOptions::default()).unwrap();
        let last = doc.events.last().unwrap();
        assert_eq!(last.offset(), Rational::new(1, 2).unwrap());
    }

    #[test]
    fn directive_anchors_at_the_current_cursor_without_advancing_it() {
        let doc = parse("C4/4 @mf E4/4", ParseOptions::default()).unwrap();
        assert_eq!(doc.directives.len(), 1);
        assert_eq!(doc.directives[0].time(), Rational::new(1, 4).unwrap());
    }

    #[test]
    fn bpm_ramp_directive_parses_its_fields() {
        let doc = parse("@bpm 120 -> 140 /4 C4/4", ParseOptions::default()).unwrap();
        assert_eq!(
            doc.directives[0],
            Directive::BpmRamp {
                time: Rational::ZERO,
                from: 120,
                to: 140,
                duration: Rational::new(1, 4).unwrap(),
            }
        );
    }
}
