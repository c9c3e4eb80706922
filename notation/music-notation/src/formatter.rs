//! notation/music-notation/src/formatter.rs
//! The inverse of `parser`: renders a [`ParsedDocument`] back to notation text. Merges events and
//! directives in timeline order and reinserts measure bars at their recorded offsets. Does not
//! attempt to reconstruct `<<...>>` polyphonic block groupings; a document built from polyphony
//! round-trips its events but not its original block syntax.

use std::collections::BTreeMap;

use music_buffer::NoteEvent;
use music_time::Rational;

use crate::directive::{format_directive, Directive};
use crate::duration::{format_letter, format_numeric};
use crate::parser::ParsedDocument;
use crate::pitch::format_pitch;

/// Controls the formatter's duration spelling and chord grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Prefer `:letter[.]` duration suffixes over `/N[.]` when an exact letter form exists.
    pub prefer_letter_durations: bool,
    /// Group simultaneous same-offset, same-duration notes into a `[...]` chord token.
    pub group_chords: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { prefer_letter_durations: false, group_chords: true }
    }
}

/// Render `doc` back to notation text.
#[must_use]
pub fn format(doc: &ParsedDocument, options: FormatOptions) -> String {
    let mut tokens_by_offset: BTreeMap<RationalKey, Vec<String>> = BTreeMap::new();

    for group in group_events(&doc.events, options.group_chords) {
        let offset = group.first().map(NoteEvent::offset).unwrap_or(Rational::ZERO);
        tokens_by_offset.entry(RationalKey(offset)).or_default().push(format_event_group(&group, options));
    }
    for directive in &doc.directives {
        tokens_by_offset.entry(RationalKey(directive.time())).or_default().insert(0, format_directive(directive));
    }

    let mut out = Vec::new();
    if let Some(sig) = doc.time_signature {
        out.push(format!("{}/{}:", sig.beats, sig.unit));
    }

    let bar_set: std::collections::BTreeSet<RationalKey> =
        doc.measure_bars.iter().copied().map(RationalKey).collect();

    for (offset, tokens) in &tokens_by_offset {
        if bar_set.contains(offset) {
            out.push("|".to_string());
        }
        out.extend(tokens.iter().cloned());
    }

    out.join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct RationalKey(Rational);

fn group_events(events: &[NoteEvent], group_chords: bool) -> Vec<Vec<NoteEvent>> {
    if !group_chords {
        return events.iter().map(|e| vec![*e]).collect();
    }
    let mut groups: Vec<Vec<NoteEvent>> = Vec::new();
    for &event in events {
        if event.is_rest() {
            groups.push(vec![event]);
            continue;
        }
        if let Some(last) = groups.last_mut() {
            if let Some(head) = last.first() {
                if !head.is_rest() && head.offset() == event.offset() && head.duration() == event.duration() {
                    last.push(event);
                    continue;
                }
            }
        }
        groups.push(vec![event]);
    }
    groups
}

fn format_duration(duration: Rational, options: FormatOptions) -> String {
    if options.prefer_letter_durations {
        if let Some(letter) = format_letter(duration) {
            return format!(":{letter}");
        }
    }
    format!("/{}", format_numeric(duration))
}

fn format_event_group(group: &[NoteEvent], options: FormatOptions) -> String {
    let head = group[0];
    if head.is_rest() {
        return format!("R{}", format_duration(head.duration(), options));
    }
    let suffix = format_duration(head.duration(), options);
    if group.len() == 1 {
        return format!("{}{}", format_pitch(head.pitch()), suffix);
    }
    let pitches: Vec<String> = group.iter().map(|e| format_pitch(e.pitch())).collect();
    format!("[{}]{}", pitches.join(" "), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ParseOptions};

    fn round_trip(input: &str) {
        let doc = parse(input, ParseOptions::default()).unwrap();
        assert_eq!(format(&doc, FormatOptions::default()), input);
    }

    #[test]
    fn round_trips_plain_sequence() {
        round_trip("C4/4 E4/4 G4/2");
    }

    #[test]
    fn round_trips_dotted_durations() {
        round_trip("C4/4. E4/2.");
    }

    #[test]
    fn round_trips_a_rest() {
        round_trip("C4/4 R/4 E4/8");
    }

    #[test]
    fn round_trips_a_chord() {
        round_trip("[C4 E4 G4]/4 D4/4");
    }

    #[test]
    fn round_trips_time_signature_and_measure_bar() {
        round_trip("4/4: C4/4 E4/4 G4/4 C5/4 | D4/4 F4/4 A4/4 D5/4");
    }
}
