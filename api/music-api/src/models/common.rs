//! Shared value types reused across the request/response DTOs below.

use serde::{Deserialize, Serialize};

/// An exact rational value, transported as a reduced numerator/denominator pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RationalDto {
    /// Numerator (may be negative).
    pub num: i64,
    /// Denominator (always positive).
    pub den: i64,
}

/// Representation of a musical key in request/response payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeySpecification {
    /// Pitch-class tonic label (e.g., "C", "F#", "Bb").
    pub tonic: String,
    /// Requested mode (major/minor).
    pub mode: ModeDto,
}

/// Mode descriptor for API payloads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModeDto {
    /// Major key mode.
    Major,
    /// Minor key mode.
    Minor,
}
