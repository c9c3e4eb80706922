//! core/music-analysis/src/lib.rs
//! Chord-stream segmentation and key estimation over a [`music_buffer::NoteBuffer`].
//!
//! ```
//! use music_analysis::estimate_key;
//! use music_buffer::{NoteBuffer, NoteEvent};
//! use music_time::Rational;
//!
//! let mut buffer = NoteBuffer::new(4).unwrap();
//! buffer.add(NoteEvent::new(60, Rational::ZERO, Rational::ONE, 0.8));
//! buffer.add(NoteEvent::new(64, Rational::ZERO, Rational::ONE, 0.8));
//! buffer.add(NoteEvent::new(67, Rational::ZERO, Rational::ONE, 0.8));
//! let key = estimate_key(&buffer);
//! assert_eq!(key.key().root().value(), 0);
//! ```

pub mod key_estimate;
pub mod segment;

pub use key_estimate::estimate_key;
pub use segment::{ChordSegment, analyze_buffer};
