//! notation/music-notation/src/lib.rs
//! A text grammar for monophonic/polyphonic note sequences: lexing, parsing, ornament expansion,
//! directive handling, and the inverse formatter.
//!
//! ```
//! use music_notation::{format, parse, FormatOptions, ParseOptions};
//!
//! let doc = parse("C4/4 E4/4 G4/2", ParseOptions::default()).unwrap();
//! assert_eq!(doc.events.len(), 3);
//! assert_eq!(format(&doc, FormatOptions::default()), "C4/4 E4/4 G4/2");
//! ```

pub mod directive;
pub mod duration;
pub mod errors;
pub mod formatter;
pub mod lexer;
pub mod ornament;
pub mod parser;
pub mod pitch;

pub use directive::{Directive, DirectiveValue};
pub use errors::NotationError;
pub use formatter::{format, FormatOptions};
pub use ornament::{AppoggiaturaKind, MordentKind, Ornament, TurnKind};
pub use parser::{parse, ParseOptions, ParsedDocument, TimeSignature};
