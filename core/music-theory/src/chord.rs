//! core/music-theory/src/chord.rs
//! Chord templates, the 12-bit-mask chord library, and template-based identification.
//!
//! The mask -> [`ChordInfo`] table is process-wide immutable state, built once on first use
//! (see [`identify`]) and never torn down, per the concurrency model the rest of the engine
//! follows for its other lookup tables (key scale masks, the SIMD kernel choice).

use std::sync::OnceLock;

use crate::mask::PitchClassMask;
use crate::pitch::PitchClass;

/// Closed set of recognized chord qualities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Major7,
    Minor7,
    Dominant7,
    Diminished7,
    HalfDim7,
    MinorMajor7,
    Augmented7,
    Dominant7Flat5,
    Sus2,
    Sus4,
    Power,
    Quartal,
    Add9,
    Add11,
    /// No populated template produced this mask.
    Unknown,
}

/// Result of chord identification: the root pitch class plus its quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChordInfo {
    root_pc: PitchClass,
    quality: ChordQuality,
}

impl ChordInfo {
    /// Root pitch class of the identified chord.
    #[must_use]
    pub const fn root_pc(self) -> PitchClass {
        self.root_pc
    }

    /// Identified chord quality.
    #[must_use]
    pub const fn quality(self) -> ChordQuality {
        self.quality
    }
}

/// Semitone offsets from the root, in canonical enumeration order: triads, then the dyad and
/// quartal shape, then sevenths (including the flat-five dominant variant, which the published
/// tie-break order groups with the other sevenths), then add chords.
const TEMPLATES: &[(ChordQuality, &[u8])] = &[
    (ChordQuality::Major, &[0, 4, 7]),
    (ChordQuality::Minor, &[0, 3, 7]),
    (ChordQuality::Diminished, &[0, 3, 6]),
    (ChordQuality::Augmented, &[0, 4, 8]),
    (ChordQuality::Sus2, &[0, 2, 7]),
    (ChordQuality::Sus4, &[0, 5, 7]),
    (ChordQuality::Power, &[0, 7]),
    (ChordQuality::Quartal, &[0, 5, 10]),
    (ChordQuality::Major7, &[0, 4, 7, 11]),
    (ChordQuality::Minor7, &[0, 3, 7, 10]),
    (ChordQuality::Dominant7, &[0, 4, 7, 10]),
    (ChordQuality::Diminished7, &[0, 3, 6, 9]),
    (ChordQuality::HalfDim7, &[0, 3, 6, 10]),
    (ChordQuality::MinorMajor7, &[0, 3, 7, 11]),
    (ChordQuality::Augmented7, &[0, 4, 8, 10]),
    (ChordQuality::Dominant7Flat5, &[0, 4, 6, 10]),
    (ChordQuality::Add9, &[0, 2, 4, 7]),
    (ChordQuality::Add11, &[0, 4, 5, 7]),
];

fn template_mask(offsets: &[u8], root: u8) -> PitchClassMask {
    offsets.iter().fold(PitchClassMask::EMPTY, |mask, &step| mask.with((root + step) % 12))
}

fn build_table() -> Box<[Option<ChordInfo>; 4096]> {
    let mut table: Box<[Option<ChordInfo>; 4096]> = Box::new([None; 4096]);
    for &(quality, offsets) in TEMPLATES {
        for root in 0..12u8 {
            let mask = template_mask(offsets, root);
            let slot = &mut table[mask.raw() as usize];
            if slot.is_none() {
                *slot = Some(ChordInfo {
                    root_pc: PitchClass::from_wrapping(i32::from(root)),
                    quality,
                });
            }
        }
    }
    table
}

fn table() -> &'static [Option<ChordInfo>; 4096] {
    static TABLE: OnceLock<Box<[Option<ChordInfo>; 4096]>> = OnceLock::new();
    TABLE.get_or_init(build_table)
}

/// Identify the chord matching `mask`, or `Unknown` (rooted at the mask's lowest set pitch
/// class, or `C` for the empty mask) when no template populated this entry.
#[must_use]
pub fn identify(mask: PitchClassMask) -> ChordInfo {
    table()[mask.raw() as usize].unwrap_or_else(|| ChordInfo {
        root_pc: PitchClass::from_wrapping(lowest_set_bit(mask)),
        quality: ChordQuality::Unknown,
    })
}

/// Canonical semitone-offset template for `quality`, used by [`crate::key`] to spell roman
/// numerals as concrete pitch classes. `Unknown` has no template.
#[must_use]
pub fn offsets_for(quality: ChordQuality) -> &'static [u8] {
    TEMPLATES
        .iter()
        .find(|(candidate, _)| *candidate == quality)
        .map_or(&[], |(_, offsets)| *offsets)
}

fn lowest_set_bit(mask: PitchClassMask) -> i32 {
    if mask.raw() == 0 { 0 } else { mask.raw().trailing_zeros() as i32 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::get_mask;

    #[test]
    fn identifies_major_triad() {
        let info = identify(get_mask(&[60, 64, 67]));
        assert_eq!(info.root_pc().value(), 0);
        assert_eq!(info.quality(), ChordQuality::Major);
    }

    #[test]
    fn identifies_dominant_seventh() {
        let info = identify(get_mask(&[67, 71, 74, 77]));
        assert_eq!(info.root_pc().value(), 7);
        assert_eq!(info.quality(), ChordQuality::Dominant7);
    }

    #[test]
    fn identifies_dominant_seventh_flat_five() {
        let info = identify(get_mask(&[60, 64, 66, 70]));
        assert_eq!(info.root_pc().value(), 0);
        assert_eq!(info.quality(), ChordQuality::Dominant7Flat5);
    }

    #[test]
    fn every_template_mask_resolves_to_a_known_quality() {
        for &(_quality, offsets) in TEMPLATES {
            for root in 0..12u8 {
                let mask = template_mask(offsets, root);
                assert_ne!(identify(mask).quality(), ChordQuality::Unknown);
            }
        }
    }

    #[test]
    fn unpopulated_mask_is_unknown() {
        let mask = PitchClassMask::from_raw(0b1010_0000_1000);
        let info = identify(mask);
        if info.quality() == ChordQuality::Unknown {
            assert_eq!(info.root_pc().value(), lowest_set_bit(mask) as u8);
        }
    }
}
