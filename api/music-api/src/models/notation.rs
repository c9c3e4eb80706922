//! DTOs for the notation-text parse/format operations.

use serde::{Deserialize, Serialize};

use super::common::RationalDto;

/// Request payload for parsing notation text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotationParseRequest {
    /// Raw notation source text.
    pub text: String,
    /// Whether to check every measure against the declared time signature.
    #[serde(default)]
    pub validate_measures: bool,
}

/// A parsed time signature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSignatureDto {
    /// Beats per measure.
    pub beats: u32,
    /// Beat unit (denominator).
    pub unit: u32,
}

/// One timed event in the flattened event stream (`pitch == -1` denotes a rest).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NoteEventDto {
    /// MIDI pitch, or `-1` for a rest.
    pub pitch: i32,
    /// Offset from the start of the sequence.
    pub offset: RationalDto,
    /// Event duration.
    pub duration: RationalDto,
    /// Normalized velocity in `[0, 1]`.
    pub velocity: f32,
}

/// A directive anchored at its cursor time, rendered back to its canonical `@name value` text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectiveDto {
    /// Cursor time at which the directive was encountered.
    pub time: RationalDto,
    /// Canonical `@name value` rendering.
    pub text: String,
}

/// Parse result: the optional time signature, flattened events, directives, and the offsets at
/// which measure bars were encountered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotationParseResponse {
    /// Time signature declared at the start of the text, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_signature: Option<TimeSignatureDto>,
    /// Flattened, offset-ordered event stream.
    pub events: Vec<NoteEventDto>,
    /// Directives encountered while parsing.
    pub directives: Vec<DirectiveDto>,
    /// Offsets at which a `|` measure bar was consumed.
    pub measure_bars: Vec<RationalDto>,
}

/// Request payload for re-rendering notation text from scratch (parse immediately followed by
/// format, exercising the round-trip in one call).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotationFormatRequest {
    /// Source notation text to parse and re-render.
    pub text: String,
    /// Prefer `:letter[.]` duration suffixes over `/N[.]` when an exact letter form exists.
    #[serde(default)]
    pub prefer_letter_durations: bool,
    /// Group simultaneous same-offset, same-duration notes into a `[...]` chord token.
    #[serde(default = "default_true")]
    pub group_chords: bool,
}

fn default_true() -> bool {
    true
}

/// Rendered notation text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotationFormatResponse {
    /// The rendered text.
    pub text: String,
}
