//! notation/music-notation/src/errors.rs
//! Notation grammar failures: lexer/parser mismatches and measure-length mismatches, both
//! reported with enough context for a caller to point a user at the offending text.

use music_time::Rational;

/// A notation-grammar or lexer failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotationError {
    /// A lexer or grammar rule did not match at the given position.
    #[error("{line}:{col}: {message}")]
    ParseError {
        /// 1-based line at which the failure occurred.
        line: u32,
        /// 1-based column at which the failure occurred.
        col: u32,
        /// Human-readable explanation.
        message: String,
    },
    /// A measure's total duration did not match its time signature.
    #[error("measure {measure}: expected {expected}, got {actual}")]
    MeasureMismatch {
        /// 1-based measure index.
        measure: u32,
        /// The time signature's required measure duration.
        expected: Rational,
        /// The duration actually accumulated before the barline.
        actual: Rational,
    },
}

impl NotationError {
    #[must_use]
    pub fn at(line: u32, col: u32, message: impl Into<String>) -> Self {
        Self::ParseError { line, col, message: message.into() }
    }
}
