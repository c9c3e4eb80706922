//! core/music-theory/src/function.rs
//! Per-mode roman-numeral degree tables consumed by [`crate::key::KeyAnalyzer`].

use crate::chord::ChordQuality;

/// Broad harmonic role of a scale degree within a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmonicFunction {
    Tonic,
    Subdominant,
    Dominant,
}

/// One diatonic scale degree: its interval above the key root, roman-numeral spellings, triad
/// and seventh-chord qualities, and harmonic function.
#[derive(Debug, Clone, Copy)]
pub struct DegreeEntry {
    /// Semitones above the key root.
    pub interval: u8,
    /// Roman numeral for the triad (e.g. `"ii"`, `"V"`, `"vii\u{b0}"`).
    pub triad_roman: &'static str,
    /// Roman numeral for the seventh chord (e.g. `"ii7"`, `"V7"`).
    pub seventh_roman: &'static str,
    pub triad_quality: ChordQuality,
    pub seventh_quality: ChordQuality,
    pub function: HarmonicFunction,
}

/// The seven diatonic triads/sevenths of a major key, built on each scale degree.
pub const MAJOR_DEGREES: [DegreeEntry; 7] = [
    DegreeEntry {
        interval: 0,
        triad_roman: "I",
        seventh_roman: "Imaj7",
        triad_quality: ChordQuality::Major,
        seventh_quality: ChordQuality::Major7,
        function: HarmonicFunction::Tonic,
    },
    DegreeEntry {
        interval: 2,
        triad_roman: "ii",
        seventh_roman: "ii7",
        triad_quality: ChordQuality::Minor,
        seventh_quality: ChordQuality::Minor7,
        function: HarmonicFunction::Subdominant,
    },
    DegreeEntry {
        interval: 4,
        triad_roman: "iii",
        seventh_roman: "iii7",
        triad_quality: ChordQuality::Minor,
        seventh_quality: ChordQuality::Minor7,
        function: HarmonicFunction::Tonic,
    },
    DegreeEntry {
        interval: 5,
        triad_roman: "IV",
        seventh_roman: "IVmaj7",
        triad_quality: ChordQuality::Major,
        seventh_quality: ChordQuality::Major7,
        function: HarmonicFunction::Subdominant,
    },
    DegreeEntry {
        interval: 7,
        triad_roman: "V",
        seventh_roman: "V7",
        triad_quality: ChordQuality::Major,
        seventh_quality: ChordQuality::Dominant7,
        function: HarmonicFunction::Dominant,
    },
    DegreeEntry {
        interval: 9,
        triad_roman: "vi",
        seventh_roman: "vi7",
        triad_quality: ChordQuality::Minor,
        seventh_quality: ChordQuality::Minor7,
        function: HarmonicFunction::Tonic,
    },
    DegreeEntry {
        interval: 11,
        triad_roman: "vii\u{b0}",
        seventh_roman: "vii\u{f8}7",
        triad_quality: ChordQuality::Diminished,
        seventh_quality: ChordQuality::HalfDim7,
        function: HarmonicFunction::Dominant,
    },
];

/// The seven diatonic triads/sevenths of a natural-minor key.
pub const NATURAL_MINOR_DEGREES: [DegreeEntry; 7] = [
    DegreeEntry {
        interval: 0,
        triad_roman: "i",
        seventh_roman: "i7",
        triad_quality: ChordQuality::Minor,
        seventh_quality: ChordQuality::Minor7,
        function: HarmonicFunction::Tonic,
    },
    DegreeEntry {
        interval: 2,
        triad_roman: "ii\u{b0}",
        seventh_roman: "ii\u{f8}7",
        triad_quality: ChordQuality::Diminished,
        seventh_quality: ChordQuality::HalfDim7,
        function: HarmonicFunction::Subdominant,
    },
    DegreeEntry {
        interval: 3,
        triad_roman: "III",
        seventh_roman: "IIImaj7",
        triad_quality: ChordQuality::Major,
        seventh_quality: ChordQuality::Major7,
        function: HarmonicFunction::Tonic,
    },
    DegreeEntry {
        interval: 5,
        triad_roman: "iv",
        seventh_roman: "iv7",
        triad_quality: ChordQuality::Minor,
        seventh_quality: ChordQuality::Minor7,
        function: HarmonicFunction::Subdominant,
    },
    DegreeEntry {
        interval: 7,
        triad_roman: "v",
        seventh_roman: "v7",
        triad_quality: ChordQuality::Minor,
        seventh_quality: ChordQuality::Minor7,
        function: HarmonicFunction::Dominant,
    },
    DegreeEntry {
        interval: 8,
        triad_roman: "VI",
        seventh_roman: "VImaj7",
        triad_quality: ChordQuality::Major,
        seventh_quality: ChordQuality::Major7,
        function: HarmonicFunction::Tonic,
    },
    DegreeEntry {
        interval: 10,
        triad_roman: "VII",
        seventh_roman: "VII7",
        triad_quality: ChordQuality::Major,
        seventh_quality: ChordQuality::Dominant7,
        function: HarmonicFunction::Subdominant,
    },
];

/// The natural-minor table with the fifth and seventh degrees raised to their harmonic-minor
/// form: `v` becomes a major `V` (raised leading tone as its third), and the subtonic `VII`
/// becomes a diminished `vii°` (raised leading tone as its root).
pub const HARMONIC_MINOR_DEGREES: [DegreeEntry; 7] = {
    let mut degrees = NATURAL_MINOR_DEGREES;
    degrees[4] = DegreeEntry {
        interval: 7,
        triad_roman: "V",
        seventh_roman: "V7",
        triad_quality: ChordQuality::Major,
        seventh_quality: ChordQuality::Dominant7,
        function: HarmonicFunction::Dominant,
    };
    degrees[6] = DegreeEntry {
        interval: 11,
        triad_roman: "vii\u{b0}",
        seventh_roman: "vii\u{b0}7",
        triad_quality: ChordQuality::Diminished,
        seventh_quality: ChordQuality::Diminished7,
        function: HarmonicFunction::Dominant,
    };
    degrees
};
