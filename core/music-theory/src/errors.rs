//! core/music-theory/src/errors.rs
//! Failure modes for pitch, interval, and roman-numeral construction.

/// Precondition violations raised by `music-theory` constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TheoryError {
    /// A precondition on a constructor argument was violated.
    #[error("invalid argument for {field}: {reason}")]
    InvalidArgument {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable explanation.
        reason: &'static str,
    },
}
