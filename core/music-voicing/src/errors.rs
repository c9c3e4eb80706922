//! core/music-voicing/src/errors.rs
//! Domain outcomes for the voice-leading solver, harmonizer, and figured-bass realizer.
//!
//! These are not arithmetic errors: they carry enough context (cap, voice, budget) for a
//! caller to retry with relaxed options.

/// Failure modes surfaced by [`crate::solver`], [`crate::harmonization`], and
/// [`crate::figured_bass`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum VoicingError {
    /// No transition path stayed within the cost cap.
    #[error("no valid path found in {stage} (cap = {cap})")]
    NoValidPath {
        /// Which stage failed (`"voice-leading solver"`, `"harmonization"`).
        stage: &'static str,
        /// The cost cap that could not be satisfied.
        cap: f64,
    },
    /// A figured-bass voice could not reach its target pitch class within its movement budget.
    #[error("voice {voice} cannot move within a budget of {budget} semitones")]
    VoiceLeadingInfeasible {
        /// Index of the voice that could not be realized (0 = lowest upper voice).
        voice: usize,
        /// The semitone movement budget that was exceeded.
        budget: i32,
    },
}
