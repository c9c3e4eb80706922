use anyhow::{Context, Result, anyhow, bail};
use music_api::{DirectiveDto, KeySpecification, ModeDto, NoteEventDto, RationalDto, TimeSignatureDto};
use music_notation::{Directive, ParsedDocument};
use music_theory::chord::ChordQuality;
use music_theory::key::KeySignature;
use music_theory::pitch::PitchClass;
use music_time::Rational;

pub fn rational_to_dto(value: Rational) -> RationalDto {
    RationalDto { num: value.numerator(), den: value.denominator() }
}

pub fn rational_from_dto(dto: RationalDto) -> Result<Rational> {
    Rational::new(dto.num, dto.den).map_err(|e| anyhow!(e.to_string()))
}

/// Parse `N` or `N/D` into an exact [`Rational`].
pub fn parse_rational(text: &str) -> Result<Rational> {
    match text.split_once('/') {
        Some((num, den)) => {
            let num: i64 = num.trim().parse().with_context(|| format!("invalid numerator in '{text}'"))?;
            let den: i64 = den.trim().parse().with_context(|| format!("invalid denominator in '{text}'"))?;
            Rational::new(num, den).map_err(|e| anyhow!(e.to_string()))
        }
        None => {
            let num: i64 = text.trim().parse().with_context(|| format!("invalid integer '{text}'"))?;
            Ok(Rational::from_integer(num))
        }
    }
}

pub fn parse_pitch_class(input: &str) -> Result<PitchClass> {
    let (raw, consumed) = music_chordsym::lex_root(input).map_err(|e| anyhow!(e.message))?;
    if consumed != input.len() {
        bail!("unexpected trailing characters in tonic '{input}'");
    }
    PitchClass::new(raw).map_err(|e| anyhow!(e.to_string()))
}

pub fn key_signature(spec: &KeySpecification) -> Result<KeySignature> {
    let root = parse_pitch_class(&spec.tonic)?;
    Ok(KeySignature::new(root, spec.mode == ModeDto::Major))
}

pub fn quality_label(quality: ChordQuality) -> &'static str {
    match quality {
        ChordQuality::Major => "major",
        ChordQuality::Minor => "minor",
        ChordQuality::Diminished => "diminished",
        ChordQuality::Augmented => "augmented",
        ChordQuality::Major7 => "major7",
        ChordQuality::Minor7 => "minor7",
        ChordQuality::Dominant7 => "dominant7",
        ChordQuality::Diminished7 => "diminished7",
        ChordQuality::HalfDim7 => "half_dim7",
        ChordQuality::MinorMajor7 => "minor_major7",
        ChordQuality::Augmented7 => "augmented7",
        ChordQuality::Dominant7Flat5 => "dominant7_flat5",
        ChordQuality::Sus2 => "sus2",
        ChordQuality::Sus4 => "sus4",
        ChordQuality::Power => "power",
        ChordQuality::Quartal => "quartal",
        ChordQuality::Add9 => "add9",
        ChordQuality::Add11 => "add11",
        ChordQuality::Unknown => "unknown",
    }
}

pub fn time_signature_dto(doc: &ParsedDocument) -> Option<TimeSignatureDto> {
    doc.time_signature.map(|sig| TimeSignatureDto { beats: sig.beats, unit: sig.unit })
}

pub fn note_event_dtos(doc: &ParsedDocument) -> Vec<NoteEventDto> {
    doc.events
        .iter()
        .map(|event| NoteEventDto {
            pitch: event.pitch(),
            offset: rational_to_dto(event.offset()),
            duration: rational_to_dto(event.duration()),
            velocity: event.velocity(),
        })
        .collect()
}

pub fn directive_dtos(doc: &ParsedDocument) -> Vec<DirectiveDto> {
    doc.directives
        .iter()
        .map(|directive: &Directive| DirectiveDto {
            time: rational_to_dto(directive.time()),
            text: music_notation::directive::format_directive(directive),
        })
        .collect()
}

pub fn measure_bar_dtos(doc: &ParsedDocument) -> Vec<RationalDto> {
    doc.measure_bars.iter().copied().map(rational_to_dto).collect()
}
