//! DTOs for chord-symbol parsing and chord-mask analysis.

use serde::{Deserialize, Serialize};

/// Request payload for parsing a chord symbol (e.g. `"C7(b9,#11)"`) into MIDI pitches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChordSymbolParseRequest {
    /// The chord-symbol text.
    pub symbol: String,
}

/// Sorted MIDI pitches produced by the chord-symbol grammar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChordSymbolParseResponse {
    /// Sorted MIDI pitches.
    pub pitches: Vec<i32>,
}

/// Request payload for identifying the root and quality of an unordered pitch collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChordAnalyzeRequest {
    /// MIDI (or bare pitch-class) pitches to analyze.
    pub pitches: Vec<i32>,
}

/// Identified root pitch class and quality label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChordAnalyzeResponse {
    /// Root pitch class (`0..12`).
    pub root_pc: u8,
    /// Quality label, e.g. `"major7"`, `"half_dim7"`, `"unknown"`.
    pub quality: String,
}
