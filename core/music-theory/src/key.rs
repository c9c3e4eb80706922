//! core/music-theory/src/key.rs
//! Key signatures, roman-numeral chord spelling, and key identification by scale-mask
//! correlation.

use std::sync::OnceLock;

use smallvec::SmallVec;

use crate::chord::{self, ChordQuality};
use crate::function::{DegreeEntry, HARMONIC_MINOR_DEGREES, HarmonicFunction, MAJOR_DEGREES, NATURAL_MINOR_DEGREES};
use crate::mask::PitchClassMask;
use crate::pitch::PitchClass;

/// Root-0 major scale mask (Ionian): `W-W-H-W-W-W-H`.
const MAJOR_SCALE_STEPS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
/// Root-0 natural-minor scale mask (Aeolian): `W-H-W-W-H-W-W`.
const NATURAL_MINOR_SCALE_STEPS: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];

fn scale_mask(steps: &[u8; 7], root: u8) -> PitchClassMask {
    steps.iter().fold(PitchClassMask::EMPTY, |mask, &step| mask.with((root + step) % 12))
}

/// A key signature: root pitch class plus major/minor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySignature {
    root: PitchClass,
    is_major: bool,
}

impl KeySignature {
    /// Construct a key signature.
    #[must_use]
    pub const fn new(root: PitchClass, is_major: bool) -> Self {
        Self { root, is_major }
    }

    /// Key root.
    #[must_use]
    pub const fn root(self) -> PitchClass {
        self.root
    }

    /// `true` for major, `false` for (natural) minor.
    #[must_use]
    pub const fn is_major(self) -> bool {
        self.is_major
    }

    /// The 12-bit diatonic scale mask for this key.
    #[must_use]
    pub fn scale_mask(self) -> PitchClassMask {
        let steps = if self.is_major { &MAJOR_SCALE_STEPS } else { &NATURAL_MINOR_SCALE_STEPS };
        scale_mask(steps, self.root.value())
    }

    /// The seven scale-degree pitch classes in ascending order, using natural-minor steps when
    /// this key is minor.
    #[must_use]
    pub fn scale_degree_pitch_classes(self) -> [PitchClass; 7] {
        let steps = if self.is_major { &MAJOR_SCALE_STEPS } else { &NATURAL_MINOR_SCALE_STEPS };
        let mut out = [self.root; 7];
        for (i, &step) in steps.iter().enumerate() {
            out[i] = self.root.transpose(crate::pitch::ChromaticInterval::new(i32::from(step)));
        }
        out
    }
}

/// Whether `KeyAnalyzer::analyze` should treat the dominant/leading-tone degrees of a minor key
/// as natural-minor or harmonic-minor (raised 7th scale degree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinorDominantMode {
    /// `v` (minor) and `VII` (major), as written in the key signature.
    Natural,
    /// `V` (major) and `vii°` (diminished), from the raised leading tone.
    HarmonicMinor,
}

/// A chord spelled as a roman numeral within a key: its scale degree, identified quality,
/// harmonic function, and roman-numeral text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RomanNumeralChord {
    degree: u8,
    root_pc: PitchClass,
    quality: ChordQuality,
    function: HarmonicFunction,
    roman: &'static str,
}

impl RomanNumeralChord {
    /// Scale degree, `1..=7`.
    #[must_use]
    pub const fn degree(self) -> u8 {
        self.degree
    }

    /// Root pitch class of the chord (not of the key).
    #[must_use]
    pub const fn root_pc(self) -> PitchClass {
        self.root_pc
    }

    /// Identified chord quality.
    #[must_use]
    pub const fn quality(self) -> ChordQuality {
        self.quality
    }

    /// Harmonic function (tonic/subdominant/dominant).
    #[must_use]
    pub const fn function(self) -> HarmonicFunction {
        self.function
    }

    /// Roman-numeral text, e.g. `"V7"`.
    #[must_use]
    pub const fn roman(self) -> &'static str {
        self.roman
    }

    /// Spell out the chord's pitch classes using [`Self::quality`]'s interval template.
    #[must_use]
    pub fn pitch_classes(self) -> SmallVec<[PitchClass; 4]> {
        chord::offsets_for(self.quality)
            .iter()
            .map(|&step| {
                self.root_pc.transpose(crate::pitch::ChromaticInterval::new(i32::from(step)))
            })
            .collect()
    }
}

/// Outcome of [`KeyAnalyzer::identify_key`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyIdentification {
    key: KeySignature,
    confidence: f32,
}

impl KeyIdentification {
    /// The best-scoring key.
    #[must_use]
    pub const fn key(self) -> KeySignature {
        self.key
    }

    /// Fraction of the 7 diatonic scale tones present in the analyzed mask, `0.0..=1.0`.
    #[must_use]
    pub const fn confidence(self) -> f32 {
        self.confidence
    }
}

struct ScaleTables {
    major: [PitchClassMask; 12],
    natural_minor: [PitchClassMask; 12],
}

fn scale_tables() -> &'static ScaleTables {
    static TABLES: OnceLock<ScaleTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut major = [PitchClassMask::EMPTY; 12];
        let mut natural_minor = [PitchClassMask::EMPTY; 12];
        for root in 0..12u8 {
            major[root as usize] = scale_mask(&MAJOR_SCALE_STEPS, root);
            natural_minor[root as usize] = scale_mask(&NATURAL_MINOR_SCALE_STEPS, root);
        }
        ScaleTables { major, natural_minor }
    })
}

/// Key identification and roman-numeral analysis against the precomputed scale-mask tables.
pub struct KeyAnalyzer;

impl KeyAnalyzer {
    /// Score every (root, mode) pair by `popcount(mask & scale_mask)` and return the best,
    /// preferring major over minor at equal scores and the lowest root among same-mode ties.
    #[must_use]
    pub fn identify_key(mask: PitchClassMask) -> KeyIdentification {
        let tables = scale_tables();
        let mut best_root = 0u8;
        let mut best_is_major = true;
        let mut best_score = -1i32;
        for root in 0..12u8 {
            let major_score = mask.intersect(tables.major[root as usize]).popcount() as i32;
            if major_score > best_score {
                best_score = major_score;
                best_root = root;
                best_is_major = true;
            }
        }
        for root in 0..12u8 {
            let minor_score = mask.intersect(tables.natural_minor[root as usize]).popcount() as i32;
            if minor_score > best_score {
                best_score = minor_score;
                best_root = root;
                best_is_major = false;
            }
        }
        let key = KeySignature::new(PitchClass::from_wrapping(i32::from(best_root)), best_is_major);
        KeyIdentification { key, confidence: best_score as f32 / 7.0 }
    }

    /// Identify the chord formed by `pitches`, then map it onto `key`'s roman-numeral table.
    ///
    /// Returns `None` when the chord's root is not one of the key's seven diatonic degrees.
    #[must_use]
    pub fn analyze(
        pitches: &[i32],
        key: KeySignature,
        minor_dominant_mode: MinorDominantMode,
    ) -> Option<RomanNumeralChord> {
        let mask = crate::mask::get_mask(pitches);
        let info = chord::identify(mask);
        let interval = key.root().ascending_interval_to(info.root_pc());

        let degrees: &[DegreeEntry; 7] = if key.is_major() {
            &MAJOR_DEGREES
        } else {
            match minor_dominant_mode {
                MinorDominantMode::Natural => &NATURAL_MINOR_DEGREES,
                MinorDominantMode::HarmonicMinor => &HARMONIC_MINOR_DEGREES,
            }
        };

        let (degree_index, entry) =
            degrees.iter().enumerate().find(|(_, entry)| u8::from(entry.interval) == interval)?;

        let is_seventh = mask.popcount() >= 4;
        let roman = if is_seventh { entry.seventh_roman } else { entry.triad_roman };

        Some(RomanNumeralChord {
            degree: degree_index as u8 + 1,
            root_pc: info.root_pc(),
            quality: info.quality(),
            function: entry.function,
            roman,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::get_mask;

    #[test]
    fn identify_key_finds_c_major() {
        let mask = get_mask(&[60, 62, 64, 65, 67, 69, 71]);
        let result = KeyAnalyzer::identify_key(mask);
        assert_eq!(result.key().root().value(), 0);
        assert!(result.key().is_major());
        assert!(result.confidence() >= 0.8);
    }

    #[test]
    fn analyze_spells_dominant_triad_and_seventh() {
        let key = KeySignature::new(PitchClass::new(0).unwrap(), true);
        let triad = KeyAnalyzer::analyze(&[67, 71, 74], key, MinorDominantMode::Natural).unwrap();
        assert_eq!(triad.roman(), "V");

        let seventh =
            KeyAnalyzer::analyze(&[67, 71, 74, 77], key, MinorDominantMode::Natural).unwrap();
        assert_eq!(seventh.roman(), "V7");
    }

    #[test]
    fn key_signature_scale_degrees_use_natural_minor_steps() {
        let key = KeySignature::new(PitchClass::new(9).unwrap(), false);
        let degrees: Vec<u8> = key.scale_degree_pitch_classes().iter().map(|pc| pc.value()).collect();
        assert_eq!(degrees, vec![9, 11, 0, 2, 4, 5, 7]);
    }

    #[test]
    fn harmonic_minor_raises_the_dominant_and_leading_tone_chords() {
        let key = KeySignature::new(PitchClass::new(9).unwrap(), false);

        let natural_v = KeyAnalyzer::analyze(&[4, 7, 11], key, MinorDominantMode::Natural).unwrap();
        assert_eq!(natural_v.roman(), "v");
        assert_eq!(natural_v.quality(), ChordQuality::Minor);

        let raised_v =
            KeyAnalyzer::analyze(&[4, 8, 11], key, MinorDominantMode::HarmonicMinor).unwrap();
        assert_eq!(raised_v.roman(), "V");
        assert_eq!(raised_v.quality(), ChordQuality::Major);
    }
}
