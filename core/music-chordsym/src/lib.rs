//! core/music-chordsym/src/lib.rs
//! Chord-symbol grammar parser: root + ordered suffix tokens + optional slash-bass + optional
//! polychord layers, emitting sorted MIDI pitches.
//!
//! ```
//! use music_chordsym::parse_pitches;
//!
//! assert_eq!(parse_pitches("C7(b9,#11)").unwrap(), vec![60, 64, 67, 70, 73, 78]);
//! assert_eq!(parse_pitches("C|G").unwrap(), vec![60, 64, 67, 79, 83, 86]);
//! ```

pub mod builder;
pub mod errors;
pub mod parser;
pub mod symbol;

pub use builder::{ChordBuilder, SeventhKind, TriadQuality};
pub use errors::ParseError;
pub use parser::parse_pitches;
pub use symbol::{NoteLetter, lex_root, normalize_accidentals};
