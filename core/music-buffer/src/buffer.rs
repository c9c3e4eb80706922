//! core/music-buffer/src/buffer.rs
//! SoA note buffer: six 64-byte-aligned columns behind one scoped resource, released
//! automatically on every exit path (including panics) via `Drop`.

use std::alloc::{self, Layout};
use std::ptr::NonNull;
use std::slice;

use music_theory::mask::{PitchClassMask, get_mask};
use music_time::Rational;

use crate::errors::BufferError;

const ALIGNMENT: usize = 64;

struct AlignedColumn<T> {
    ptr: NonNull<T>,
    capacity: usize,
}

impl<T> AlignedColumn<T> {
    fn layout(capacity: usize) -> Layout {
        let array = Layout::array::<T>(capacity).expect("buffer capacity overflows isize");
        array.align_to(ALIGNMENT).expect("alignment is a power of two").pad_to_align()
    }

    fn alloc(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Ok(Self { ptr: NonNull::dangling(), capacity: 0 });
        }
        let layout = Self::layout(capacity);
        // SAFETY: `layout` has non-zero size since `capacity > 0`.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw as *mut T).ok_or(BufferError::OutOfMemory)?;
        Ok(Self { ptr, capacity })
    }

    fn as_slice(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.capacity);
        // SAFETY: every index `< len <= capacity` was written by `NoteBuffer::add`.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), len) }
    }

    fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
        debug_assert!(len <= self.capacity);
        // SAFETY: same as `as_slice`, with exclusive access via `&mut self`.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), len) }
    }

    /// Write `value` at `index`, which must be `< capacity` and not yet read as initialized.
    fn write(&mut self, index: usize, value: T) {
        debug_assert!(index < self.capacity);
        // SAFETY: `index < capacity` is checked above; the slot is only ever read back after
        // `NoteBuffer::count` has been advanced past it.
        unsafe { self.ptr.as_ptr().add(index).write(value) }
    }
}

impl<T> Drop for AlignedColumn<T> {
    fn drop(&mut self) {
        if self.capacity > 0 {
            let layout = Self::layout(self.capacity);
            // SAFETY: `ptr` was allocated with this exact layout in `alloc`, and `AlignedColumn`
            // owns it uniquely, so this runs at most once.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) };
        }
    }
}

/// A single timed event. `pitch == -1` denotes a rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    pitch: i32,
    offset: Rational,
    duration: Rational,
    velocity: f32,
}

impl NoteEvent {
    /// Construct a note event.
    ///
    /// # Panics
    ///
    /// Panics if `velocity` is outside `[0, 1]`.
    #[must_use]
    pub fn new(pitch: i32, offset: Rational, duration: Rational, velocity: f32) -> Self {
        assert!((0.0..=1.0).contains(&velocity), "velocity must be in [0, 1]");
        Self { pitch, offset, duration, velocity }
    }

    #[must_use]
    pub const fn pitch(self) -> i32 {
        self.pitch
    }

    #[must_use]
    pub const fn is_rest(self) -> bool {
        self.pitch < 0
    }

    #[must_use]
    pub const fn offset(self) -> Rational {
        self.offset
    }

    #[must_use]
    pub const fn duration(self) -> Rational {
        self.duration
    }

    #[must_use]
    pub const fn velocity(self) -> f32 {
        self.velocity
    }
}

/// Mutable, bounded-capacity, ordered sequence of [`NoteEvent`]s stored SoA in aligned columns.
pub struct NoteBuffer {
    capacity: usize,
    count: usize,
    pitches: AlignedColumn<i32>,
    offsets_num: AlignedColumn<i64>,
    offsets_den: AlignedColumn<i64>,
    durations_num: AlignedColumn<i64>,
    durations_den: AlignedColumn<i64>,
    velocities: AlignedColumn<f32>,
}

impl NoteBuffer {
    /// Allocate a buffer with the given fixed capacity.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfMemory`] if any column allocation fails.
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        Ok(Self {
            capacity,
            count: 0,
            pitches: AlignedColumn::alloc(capacity)?,
            offsets_num: AlignedColumn::alloc(capacity)?,
            offsets_den: AlignedColumn::alloc(capacity)?,
            durations_num: AlignedColumn::alloc(capacity)?,
            durations_den: AlignedColumn::alloc(capacity)?,
            velocities: AlignedColumn::alloc(capacity)?,
        })
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append an event.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is already at capacity.
    pub fn add(&mut self, event: NoteEvent) {
        assert!(self.count < self.capacity, "note buffer is at capacity");
        let idx = self.count;
        self.pitches.write(idx, event.pitch);
        self.offsets_num.write(idx, event.offset.numerator());
        self.offsets_den.write(idx, event.offset.denominator());
        self.durations_num.write(idx, event.duration.numerator());
        self.durations_den.write(idx, event.duration.denominator());
        self.velocities.write(idx, event.velocity);
        self.count += 1;
    }

    /// Reset the buffer to empty without zeroing the backing columns.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Fetch the event at `index`, which must be `< len()`.
    #[must_use]
    pub fn get(&self, index: usize) -> NoteEvent {
        assert!(index < self.count, "index out of bounds");
        NoteEvent {
            pitch: self.pitches.as_slice(self.count)[index],
            offset: Rational::new(
                self.offsets_num.as_slice(self.count)[index],
                self.offsets_den.as_slice(self.count)[index],
            )
            .expect("columns were written from a normalized Rational"),
            duration: Rational::new(
                self.durations_num.as_slice(self.count)[index],
                self.durations_den.as_slice(self.count)[index],
            )
            .expect("columns were written from a normalized Rational"),
            velocity: self.velocities.as_slice(self.count)[index],
        }
    }

    /// Transpose every pitch (rests excepted) by `semitones`, dispatching to the best
    /// available SIMD kernel.
    pub fn transpose(&mut self, semitones: i32) {
        let pitches = self.pitches.as_mut_slice(self.count);
        crate::simd::transpose(pitches, semitones);
    }

    /// Reorder all six columns consistently by ascending offset.
    pub fn sort(&mut self) {
        let n = self.count;
        let mut order: Vec<usize> = (0..n).collect();
        let offsets_num = self.offsets_num.as_slice(n);
        let offsets_den = self.offsets_den.as_slice(n);
        order.sort_by(|&a, &b| {
            let ra = Rational::new(offsets_num[a], offsets_den[a]).expect("normalized offset");
            let rb = Rational::new(offsets_num[b], offsets_den[b]).expect("normalized offset");
            ra.cmp(&rb)
        });

        apply_permutation(&order, self.pitches.as_mut_slice(n));
        apply_permutation(&order, self.offsets_num.as_mut_slice(n));
        apply_permutation(&order, self.offsets_den.as_mut_slice(n));
        apply_permutation(&order, self.durations_num.as_mut_slice(n));
        apply_permutation(&order, self.durations_den.as_mut_slice(n));
        apply_permutation(&order, self.velocities.as_mut_slice(n));
    }

    /// Walk a [`Self::sort`]ed buffer and group consecutive entries sharing an offset into
    /// `(time, mask)` pairs, skipping rests.
    #[must_use]
    pub fn get_chords(&self) -> Vec<(Rational, PitchClassMask)> {
        let n = self.count;
        let offsets_num = self.offsets_num.as_slice(n);
        let offsets_den = self.offsets_den.as_slice(n);
        let pitches = self.pitches.as_slice(n);

        let mut chords = Vec::new();
        let mut i = 0;
        while i < n {
            let time = Rational::new(offsets_num[i], offsets_den[i]).expect("normalized offset");
            let mut j = i;
            let mut group = Vec::new();
            while j < n {
                let other =
                    Rational::new(offsets_num[j], offsets_den[j]).expect("normalized offset");
                if other != time {
                    break;
                }
                if pitches[j] >= 0 {
                    group.push(pitches[j]);
                }
                j += 1;
            }
            chords.push((time, get_mask(&group)));
            i = j;
        }
        chords
    }
}

/// Apply a permutation (`order[i]` is the source index that should land at position `i`)
/// in place via cycle following, without allocating a second buffer.
fn apply_permutation<T: Copy>(order: &[usize], data: &mut [T]) {
    let n = order.len();
    let mut done = vec![false; n];
    for start in 0..n {
        if done[start] {
            continue;
        }
        let mut position = start;
        let staged = data[start];
        loop {
            let source = order[position];
            if source == start {
                data[position] = staged;
                done[position] = true;
                break;
            }
            data[position] = data[source];
            done[position] = true;
            position = source;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn add_and_get_roundtrip() {
        let mut buf = NoteBuffer::new(4).unwrap();
        buf.add(NoteEvent::new(60, r(0, 1), r(1, 4), 0.8));
        buf.add(NoteEvent::new(-1, r(1, 4), r(1, 4), 0.0));
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.get(0).pitch(), 60);
        assert!(buf.get(1).is_rest());
    }

    #[test]
    #[should_panic(expected = "at capacity")]
    fn add_past_capacity_panics() {
        let mut buf = NoteBuffer::new(1).unwrap();
        buf.add(NoteEvent::new(60, r(0, 1), r(1, 4), 1.0));
        buf.add(NoteEvent::new(62, r(1, 4), r(1, 4), 1.0));
    }

    #[test]
    fn clear_resets_count_without_freeing() {
        let mut buf = NoteBuffer::new(2).unwrap();
        buf.add(NoteEvent::new(60, r(0, 1), r(1, 4), 1.0));
        buf.clear();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 2);
    }

    #[test]
    fn sort_reorders_all_columns_consistently() {
        let mut buf = NoteBuffer::new(3).unwrap();
        buf.add(NoteEvent::new(67, r(1, 2), r(1, 4), 0.5));
        buf.add(NoteEvent::new(60, r(0, 1), r(1, 4), 0.9));
        buf.add(NoteEvent::new(64, r(1, 4), r(1, 4), 0.7));
        buf.sort();
        assert_eq!(buf.get(0).pitch(), 60);
        assert_eq!(buf.get(1).pitch(), 64);
        assert_eq!(buf.get(2).pitch(), 67);
        assert_eq!(buf.get(1).velocity(), 0.7);
    }

    #[test]
    fn get_chords_groups_by_equal_offset_and_skips_rests() {
        let mut buf = NoteBuffer::new(4).unwrap();
        buf.add(NoteEvent::new(60, r(0, 1), r(1, 4), 1.0));
        buf.add(NoteEvent::new(64, r(0, 1), r(1, 4), 1.0));
        buf.add(NoteEvent::new(67, r(0, 1), r(1, 4), 1.0));
        buf.add(NoteEvent::new(-1, r(1, 4), r(1, 4), 0.0));
        let chords = buf.get_chords();
        assert_eq!(chords.len(), 2);
        assert_eq!(chords[0].0, r(0, 1));
        assert_eq!(chords[0].1.popcount(), 3);
        assert_eq!(chords[1].1.popcount(), 0);
    }
}
