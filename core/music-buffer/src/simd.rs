//! core/music-buffer/src/simd.rs
//! Runtime-dispatched pitch transposition: add a constant number of semitones to every pitch
//! in a column. Every tier obeys the same law: `pitches'[i] = pitches[i] + semitones`.

use std::sync::OnceLock;

/// Which kernel tier the current CPU supports, chosen once per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kernel {
    #[cfg(target_arch = "x86_64")]
    Avx512,
    #[cfg(target_arch = "x86_64")]
    Avx2,
    #[cfg(target_arch = "x86_64")]
    Sse2,
    #[cfg(target_arch = "aarch64")]
    Neon,
    Portable,
}

fn detect_kernel() -> Kernel {
    #[cfg(target_arch = "x86_64")]
    {
        if std::is_x86_feature_detected!("avx512f") {
            return Kernel::Avx512;
        }
        if std::is_x86_feature_detected!("avx2") {
            return Kernel::Avx2;
        }
        if std::is_x86_feature_detected!("sse2") {
            return Kernel::Sse2;
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        if std::arch::is_aarch64_feature_detected!("neon") {
            return Kernel::Neon;
        }
    }
    Kernel::Portable
}

fn kernel() -> Kernel {
    static KERNEL: OnceLock<Kernel> = OnceLock::new();
    *KERNEL.get_or_init(detect_kernel)
}

/// Add `semitones` to every entry of `pitches` in place, using the best kernel the running CPU
/// supports.
pub fn transpose(pitches: &mut [i32], semitones: i32) {
    match kernel() {
        #[cfg(target_arch = "x86_64")]
        Kernel::Avx512 => unsafe { transpose_avx512(pitches, semitones) },
        #[cfg(target_arch = "x86_64")]
        Kernel::Avx2 => unsafe { transpose_avx2(pitches, semitones) },
        #[cfg(target_arch = "x86_64")]
        Kernel::Sse2 => unsafe { transpose_sse2(pitches, semitones) },
        #[cfg(target_arch = "aarch64")]
        Kernel::Neon => unsafe { transpose_neon(pitches, semitones) },
        Kernel::Portable => transpose_portable(pitches, semitones),
    }
}

/// Safe, architecture-independent fallback: four-way unrolled scalar addition.
fn transpose_portable(pitches: &mut [i32], semitones: i32) {
    let mut chunks = pitches.chunks_exact_mut(4);
    for chunk in &mut chunks {
        chunk[0] += semitones;
        chunk[1] += semitones;
        chunk[2] += semitones;
        chunk[3] += semitones;
    }
    for pitch in chunks.into_remainder() {
        *pitch += semitones;
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512f")]
unsafe fn transpose_avx512(pitches: &mut [i32], semitones: i32) {
    use core::arch::x86_64::{_mm512_add_epi32, _mm512_loadu_si512, _mm512_set1_epi32, _mm512_storeu_si512};

    let delta = _mm512_set1_epi32(semitones);
    let mut chunks = pitches.chunks_exact_mut(16);
    for chunk in &mut chunks {
        let ptr = chunk.as_mut_ptr().cast();
        let values = _mm512_loadu_si512(ptr);
        let added = _mm512_add_epi32(values, delta);
        _mm512_storeu_si512(ptr, added);
    }
    transpose_portable(chunks.into_remainder(), semitones);
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn transpose_avx2(pitches: &mut [i32], semitones: i32) {
    use core::arch::x86_64::{_mm256_add_epi32, _mm256_loadu_si256, _mm256_set1_epi32, _mm256_storeu_si256};

    let delta = _mm256_set1_epi32(semitones);
    let mut chunks = pitches.chunks_exact_mut(8);
    for chunk in &mut chunks {
        let ptr = chunk.as_mut_ptr().cast();
        let values = _mm256_loadu_si256(ptr);
        let added = _mm256_add_epi32(values, delta);
        _mm256_storeu_si256(ptr, added);
    }
    transpose_portable(chunks.into_remainder(), semitones);
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn transpose_sse2(pitches: &mut [i32], semitones: i32) {
    use core::arch::x86_64::{_mm_add_epi32, _mm_loadu_si128, _mm_set1_epi32, _mm_storeu_si128};

    let delta = _mm_set1_epi32(semitones);
    let mut chunks = pitches.chunks_exact_mut(4);
    for chunk in &mut chunks {
        let ptr = chunk.as_mut_ptr().cast();
        let values = _mm_loadu_si128(ptr);
        let added = _mm_add_epi32(values, delta);
        _mm_storeu_si128(ptr, added);
    }
    transpose_portable(chunks.into_remainder(), semitones);
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
unsafe fn transpose_neon(pitches: &mut [i32], semitones: i32) {
    use core::arch::aarch64::{vaddq_s32, vdupq_n_s32, vld1q_s32, vst1q_s32};

    let delta = vdupq_n_s32(semitones);
    let mut chunks = pitches.chunks_exact_mut(4);
    for chunk in &mut chunks {
        let ptr = chunk.as_mut_ptr();
        let values = vld1q_s32(ptr);
        let added = vaddq_s32(values, delta);
        vst1q_s32(ptr, added);
    }
    transpose_portable(chunks.into_remainder(), semitones);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portable_kernel_adds_semitones_to_every_element() {
        let mut pitches = vec![60, 62, 64, 65, 67, 69, 71];
        let original = pitches.clone();
        transpose_portable(&mut pitches, 3);
        for (before, after) in original.iter().zip(pitches.iter()) {
            assert_eq!(*after, before + 3);
        }
    }

    #[test]
    fn dispatch_matches_portable_kernel_on_any_host() {
        let mut dispatched = vec![40, 41, 42, 43, 44, 45, 46, 47, 48, 49];
        let mut portable = dispatched.clone();
        transpose(&mut dispatched, -5);
        transpose_portable(&mut portable, -5);
        assert_eq!(dispatched, portable);
    }

    #[test]
    fn empty_slice_is_a_no_op() {
        let mut pitches: Vec<i32> = Vec::new();
        transpose(&mut pitches, 7);
        assert!(pitches.is_empty());
    }

    proptest::proptest! {
        #[test]
        fn dispatch_matches_scalar_baseline(
            len in proptest::prelude::prop_oneof![
                proptest::prelude::Just(0usize),
                proptest::prelude::Just(1usize),
                proptest::prelude::Just(15usize),
                proptest::prelude::Just(16usize),
                proptest::prelude::Just(31usize),
                proptest::prelude::Just(32usize),
                proptest::prelude::Just(10000usize),
                0usize..200usize,
            ],
            semitones in -60i32..=60,
        ) {
            let mut dispatched: Vec<i32> = (0..len as i32).collect();
            let scalar: Vec<i32> = dispatched.iter().map(|p| p + semitones).collect();
            transpose(&mut dispatched, semitones);
            proptest::prop_assert_eq!(dispatched, scalar);
        }
    }
}
