//! core/music-buffer/src/lib.rs
//! SoA note buffer backed by aligned raw allocations, plus a runtime-dispatched SIMD
//! transpose kernel.
//!
//! ```
//! use music_buffer::{NoteBuffer, NoteEvent};
//! use music_time::Rational;
//!
//! let mut buffer = NoteBuffer::new(4).unwrap();
//! buffer.add(NoteEvent::new(60, Rational::ZERO, Rational::new(1, 4).unwrap(), 0.8));
//! buffer.add(NoteEvent::new(64, Rational::ZERO, Rational::new(1, 4).unwrap(), 0.8));
//! buffer.transpose(2);
//! assert_eq!(buffer.get(0).pitch(), 62);
//! ```

pub mod buffer;
pub mod errors;
pub mod simd;

pub use buffer::{NoteBuffer, NoteEvent};
pub use errors::BufferError;
