//! DTOs for harmonization, SATB voice-leading, and figured-bass realization.

use serde::{Deserialize, Serialize};

use super::common::{KeySpecification, RationalDto};

/// One melody note: onset, duration, and MIDI pitch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MelodyNoteDto {
    /// Onset relative to the start of the melody.
    pub onset: RationalDto,
    /// Note duration.
    pub duration: RationalDto,
    /// MIDI pitch.
    pub pitch: i32,
}

/// Request payload for the Viterbi harmonization pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarmonizeRequest {
    /// Melody to harmonize.
    pub melody: Vec<MelodyNoteDto>,
    /// Key context guiding candidate generation and transition scoring.
    pub key: KeySpecification,
}

/// One slice of the harmonized output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChordAssignmentDto {
    /// Slice start.
    pub start: RationalDto,
    /// Slice end.
    pub end: RationalDto,
    /// Root pitch class of the chosen chord.
    pub root_pc: u8,
    /// Quality label of the chosen chord.
    pub quality: String,
    /// Concrete close-position MIDI pitches of the chosen voicing.
    pub pitches: Vec<i32>,
}

/// Harmonization result: one assignment per melodic slice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarmonizeResponse {
    /// Chord assignments, in time order.
    pub assignments: Vec<ChordAssignmentDto>,
}

/// How strictly the SATB solver treats rule violations and how far it searches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolverModeDto {
    /// Any rule violation makes a transition infinitely costly.
    Strict,
    /// Rule violations are penalized but not forbidden.
    Default,
    /// Like `Default`, with a higher cost cap and loosened spacing rule.
    Relaxed,
}

/// Request payload for the SATB voice-leading DP solver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceLeadRequest {
    /// Chord progression, each entry a set of pitch classes (`0..12`) that must be present.
    pub progression: Vec<Vec<u8>>,
    /// Key root pitch class, used by the transition-cost functional-motion bonus.
    pub key_root: u8,
    /// Solver strictness/search mode.
    #[serde(default = "default_solver_mode")]
    pub mode: SolverModeDto,
}

fn default_solver_mode() -> SolverModeDto {
    SolverModeDto::Default
}

/// Solver result: one SATB quadruple per progression step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceLeadResponse {
    /// SATB voicings, `[bass, tenor, alto, soprano]`, one per progression step.
    pub voicings: Vec<[i32; 4]>,
}

/// A figure with an optional accidental override (`#`/`+` raises, `b` lowers).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FigureAccidentalDto {
    /// The figure the accidental modifies.
    pub figure: i32,
    /// The accidental symbol (`#`, `+`, or `b`).
    pub symbol: char,
}

/// Voice-leading style for figured-bass realization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VoiceLeadingStyleDto {
    /// Fold each upper voice to its closest available octave.
    Smooth,
    /// Force strictly-ascending voice order above the bass.
    Strict,
}

/// Request payload for realizing one figured-bass symbol into concrete pitches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FiguredBassRequest {
    /// Bass MIDI pitch.
    pub bass_pitch: i32,
    /// Figures above the bass (e.g. `[6]`, `[4, 2]`).
    #[serde(default)]
    pub figures: Vec<i32>,
    /// Accidental overrides keyed by figure.
    #[serde(default)]
    pub accidentals: Vec<FigureAccidentalDto>,
    /// Lowest admissible upper-voice pitch.
    pub min_pitch: i32,
    /// Highest admissible upper-voice pitch.
    pub max_pitch: i32,
    /// Previous voicing, if any, used to minimize voice movement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Vec<i32>>,
    /// Voice-leading style.
    pub style: VoiceLeadingStyleDto,
    /// Maximum semitone movement allowed per voice when `previous` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_voice_movement: Option<i32>,
}

/// Realized figured-bass voicing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FiguredBassResponse {
    /// Upper-voice MIDI pitches above the bass.
    pub voicing: Vec<i32>,
}
