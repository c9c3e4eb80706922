//! core/music-voicing/src/lib.rs
//! Voice-leading rules, the SATB voicing solver, Viterbi harmonization, figured-bass
//! realization, and accompaniment/orchestration emitters.
//!
//! ```
//! use music_theory::mask::get_mask;
//! use music_voicing::solver::{self, SolverMode};
//!
//! let progression = vec![get_mask(&[60, 64, 67]), get_mask(&[67, 71, 74, 77]), get_mask(&[60, 64, 67])];
//! let path = solver::solve(&progression, 0, SolverMode::Default).unwrap();
//! assert_eq!(path.len(), 3);
//! ```

pub mod accompaniment;
pub mod errors;
pub mod figured_bass;
pub mod harmonization;
pub mod rules;
pub mod solver;

pub use accompaniment::{AccompanimentEvent, AccompanimentStyle, InstrumentRange};
pub use errors::VoicingError;
pub use figured_bass::{FiguredBassSymbol, VoiceLeadingStyle};
pub use harmonization::{ChordAssignment, ChordCandidate, MelodyNote, MelodySlice};
pub use rules::{RuleViolations, Voicing};
pub use solver::SolverMode;
