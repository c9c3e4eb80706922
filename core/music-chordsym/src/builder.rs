//! core/music-chordsym/src/builder.rs
//! The chord-builder state machine: accumulates triad quality, seventh layer, extensions,
//! alterations, adds/omits, and slash-bass as the suffix grammar is consumed token by token.

use std::collections::{BTreeMap, BTreeSet};

/// Triad quality before any seventh/extension layering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriadQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    /// `sus` seen but not yet resolved to `Sus2`/`Sus4` by a following `2`/`4`.
    SusPending,
    Sus2,
    Sus4,
}

/// Seventh-layer quality, independent of the triad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeventhKind {
    None,
    Dominant,
    Major,
    Minor,
    Diminished,
}

/// Mutable state accumulated while parsing a single chord symbol's suffix grammar.
#[derive(Debug, Clone)]
pub struct ChordBuilder {
    pub(crate) root_pc: u8,
    pub(crate) triad: TriadQuality,
    pub(crate) seventh: SeventhKind,
    pub(crate) maj_seen: bool,
    pub(crate) sixth: bool,
    pub(crate) extensions: BTreeSet<u8>,
    pub(crate) degree_overrides: BTreeMap<u8, i32>,
    pub(crate) adds: Vec<(u8, i32)>,
    pub(crate) omits: BTreeSet<u8>,
    pub(crate) power: bool,
    pub(crate) slash_bass_pc: Option<u8>,
}

impl ChordBuilder {
    #[must_use]
    pub fn new(root_pc: u8) -> Self {
        Self {
            root_pc,
            triad: TriadQuality::Major,
            seventh: SeventhKind::None,
            maj_seen: false,
            sixth: false,
            extensions: BTreeSet::new(),
            degree_overrides: BTreeMap::new(),
            adds: Vec::new(),
            omits: BTreeSet::new(),
            power: false,
            slash_bass_pc: None,
        }
    }

    /// Resolve a still-pending `sus` to `Sus4`, the conventional default when no `2`/`4` follows.
    pub fn finalize_pending_sus(&mut self) {
        if self.triad == TriadQuality::SusPending {
            self.triad = TriadQuality::Sus4;
        }
    }

    /// Natural (un-altered) semitone offset for a scale degree, independent of triad quality.
    fn natural_offset(degree: u8) -> i32 {
        match degree {
            2 => 2,
            4 => 5,
            6 => 9,
            9 => 14,
            11 => 17,
            13 => 21,
            _ => 0,
        }
    }

    fn degree_offset(&self, degree: u8, default: i32) -> i32 {
        self.degree_overrides.get(&degree).copied().unwrap_or(default)
    }

    /// Assemble the final ascending semitone-offset set above the root (always includes `0`).
    #[must_use]
    pub fn resolve_offsets(&self) -> Vec<i32> {
        let mut offsets: BTreeSet<i32> = BTreeSet::new();
        offsets.insert(0);

        if self.power {
            offsets.insert(self.degree_offset(5, 7));
            return self.apply_adds(offsets);
        }

        match self.triad {
            TriadQuality::Major => {
                if !self.omits.contains(&3) {
                    offsets.insert(4);
                }
                if !self.omits.contains(&5) {
                    offsets.insert(self.degree_offset(5, 7));
                }
            }
            TriadQuality::Minor => {
                if !self.omits.contains(&3) {
                    offsets.insert(3);
                }
                if !self.omits.contains(&5) {
                    offsets.insert(self.degree_offset(5, 7));
                }
            }
            TriadQuality::Diminished => {
                if !self.omits.contains(&3) {
                    offsets.insert(3);
                }
                if !self.omits.contains(&5) {
                    offsets.insert(self.degree_offset(5, 6));
                }
            }
            TriadQuality::Augmented => {
                if !self.omits.contains(&3) {
                    offsets.insert(4);
                }
                if !self.omits.contains(&5) {
                    offsets.insert(self.degree_offset(5, 8));
                }
            }
            TriadQuality::Sus2 => {
                offsets.insert(Self::natural_offset(2));
                if !self.omits.contains(&5) {
                    offsets.insert(self.degree_offset(5, 7));
                }
            }
            TriadQuality::Sus4 | TriadQuality::SusPending => {
                offsets.insert(Self::natural_offset(4));
                if !self.omits.contains(&5) {
                    offsets.insert(self.degree_offset(5, 7));
                }
            }
        }

        if self.sixth {
            offsets.insert(self.degree_offset(6, Self::natural_offset(6)));
        }

        let seventh_offset = match self.seventh {
            SeventhKind::None => None,
            SeventhKind::Dominant => Some(10),
            SeventhKind::Major => Some(11),
            SeventhKind::Minor => Some(10),
            SeventhKind::Diminished => Some(9),
        };
        if let Some(offset) = seventh_offset {
            if !self.omits.contains(&7) {
                offsets.insert(offset);
            }
        }

        for &degree in &[9u8, 11, 13] {
            if self.extensions.contains(&degree) && !self.omits.contains(&degree) {
                offsets.insert(self.degree_offset(degree, Self::natural_offset(degree)));
            }
        }

        self.apply_adds(offsets)
    }

    fn apply_adds(&self, mut offsets: BTreeSet<i32>) -> Vec<i32> {
        for &(degree, offset) in &self.adds {
            if !self.omits.contains(&degree) {
                offsets.insert(offset);
            }
        }
        offsets.into_iter().collect()
    }

    /// Add the `n`-extension and every lower odd extension it implies (`9` implies `7`; `11`
    /// implies `9, 7`; `13` implies `11, 9, 7`), choosing the seventh kind the same way a bare
    /// `7` token would.
    pub fn add_extension(&mut self, n: u8) {
        if self.seventh == SeventhKind::None {
            self.set_seventh_from_bare_token();
        }
        match n {
            13 => {
                self.extensions.insert(13);
                self.extensions.insert(11);
                self.extensions.insert(9);
            }
            11 => {
                self.extensions.insert(11);
                self.extensions.insert(9);
            }
            9 => {
                self.extensions.insert(9);
            }
            _ => {}
        }
    }

    /// Resolve a bare `7` (or the seventh implied by `9`/`11`/`13`) per the triad/maj context.
    pub fn set_seventh_from_bare_token(&mut self) {
        self.seventh = if self.maj_seen {
            SeventhKind::Major
        } else if self.triad == TriadQuality::Minor {
            SeventhKind::Minor
        } else if self.triad == TriadQuality::Diminished && !self.degree_overrides.contains_key(&5) {
            SeventhKind::Diminished
        } else {
            SeventhKind::Dominant
        };
    }
}
