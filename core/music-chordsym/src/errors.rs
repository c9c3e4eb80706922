//! core/music-chordsym/src/errors.rs
//! Chord-symbol grammar failures, reported with source position like the notation parser.

/// A chord-symbol grammar or lexer failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{col}: {message}")]
pub struct ParseError {
    /// 1-based line at which the failure occurred (chord symbols are always single-line, but
    /// the field mirrors `music-notation`'s `ParseError` shape).
    pub line: u32,
    /// 1-based column at which the failure occurred.
    pub col: u32,
    /// Human-readable explanation.
    pub message: String,
}

impl ParseError {
    #[must_use]
    pub fn at(col: u32, message: impl Into<String>) -> Self {
        Self { line: 1, col, message: message.into() }
    }
}
