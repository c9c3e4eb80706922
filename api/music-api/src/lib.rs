//! Public API surface for higher-level HTTP/CLI layers.

#![deny(missing_docs)]

/// Data transfer objects exposed by the API layer.
pub mod models;

pub use models::chord::{
    ChordAnalyzeRequest, ChordAnalyzeResponse, ChordSymbolParseRequest, ChordSymbolParseResponse,
};
pub use models::common::{KeySpecification, ModeDto, RationalDto};
pub use models::notation::{
    DirectiveDto, NotationFormatRequest, NotationFormatResponse, NotationParseRequest,
    NotationParseResponse, NoteEventDto, TimeSignatureDto,
};
pub use models::voicing::{
    ChordAssignmentDto, FigureAccidentalDto, FiguredBassRequest, FiguredBassResponse,
    HarmonizeRequest, HarmonizeResponse, MelodyNoteDto, SolverModeDto, VoiceLeadRequest,
    VoiceLeadResponse, VoiceLeadingStyleDto,
};
