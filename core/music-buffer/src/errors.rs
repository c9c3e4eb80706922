//! core/music-buffer/src/errors.rs
//! Failure modes for aligned-buffer allocation.

/// Failure modes surfaced by [`crate::buffer::NoteBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Aligned allocation of one or more columns failed.
    #[error("out of memory allocating note buffer columns")]
    OutOfMemory,
}
