//! core/music-voicing/src/harmonization.rs
//! Pluggable Viterbi harmonization: a melody is sliced into time windows, each window gets a
//! set of chord candidates, and a single-pass DP picks the cheapest path of candidates.

use music_theory::chord::{self, ChordQuality};
use music_theory::key::KeySignature;
use music_theory::mask::{PitchClassMask, get_mask};
use music_time::Rational;

use crate::errors::VoicingError;

/// One melody note: onset, duration, and MIDI pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MelodyNote {
    pub onset: Rational,
    pub duration: Rational,
    pub pitch: i32,
}

/// A time window of the melody to harmonize with one chord, plus whether it falls on a
/// strong or weak beat (used by the default fit scorer).
#[derive(Debug, Clone, PartialEq)]
pub struct MelodySlice {
    pub start: Rational,
    pub end: Rational,
    pub pitches: Vec<i32>,
    pub is_strong_beat: bool,
}

/// A chord available to harmonize a slice: its root, quality, pitch-class mask, a concrete
/// close-position voicing, and a provider-assigned base cost.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordCandidate {
    pub root_pc: u8,
    pub quality: ChordQuality,
    pub mask: PitchClassMask,
    pub voicing: Vec<i32>,
    pub base_cost: f64,
}

/// One slice of the harmonized output: its time bounds and the chosen candidate's voicing.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordAssignment {
    pub start: Rational,
    pub end: Rational,
    pub root_pc: u8,
    pub quality: ChordQuality,
    pub pitches: Vec<i32>,
}

/// Splits a melody into harmonic-rhythm slices.
pub trait HarmonicRhythmStrategy {
    fn slices(&self, melody: &[MelodyNote]) -> Vec<MelodySlice>;
}

/// Produces the candidate chords available to harmonize one slice.
pub trait ChordCandidateProvider {
    fn candidates(&self, slice: &MelodySlice, key: KeySignature) -> Vec<ChordCandidate>;
}

/// Scores the cost of moving from one chord candidate to the next.
pub trait TransitionScorer {
    fn score(&self, prev: &ChordCandidate, curr: &ChordCandidate) -> f64;
}

/// Scores how well a candidate fits the melody pitches of its slice.
pub trait MelodyFitScorer {
    fn score(&self, slice: &MelodySlice, candidate: &ChordCandidate) -> f64;
}

/// Floors slice starts and ceilings slice ends to a one-beat grid, marking every other beat
/// (0, 2, 4, ...) as strong.
pub struct DefaultHarmonicRhythmStrategy;

impl HarmonicRhythmStrategy for DefaultHarmonicRhythmStrategy {
    fn slices(&self, melody: &[MelodyNote]) -> Vec<MelodySlice> {
        if melody.is_empty() {
            return Vec::new();
        }
        let last_beat = melody
            .iter()
            .map(|note| {
                let end = (note.onset + note.duration).to_double();
                (end.ceil() as i64) - 1
            })
            .max()
            .unwrap_or(0);

        let mut slices = Vec::new();
        for beat in 0..=last_beat {
            let start = Rational::from_integer(beat);
            let end = Rational::from_integer(beat + 1);
            let pitches: Vec<i32> = melody
                .iter()
                .filter(|note| note.onset < end && (note.onset + note.duration) > start)
                .map(|note| note.pitch)
                .collect();
            if pitches.is_empty() {
                continue;
            }
            slices.push(MelodySlice { start, end, pitches, is_strong_beat: beat % 2 == 0 });
        }
        slices
    }
}

/// Degree indices (0-based) of the primary triads, I/IV/V, which get a lower base cost.
const PRIMARY_DEGREES: [usize; 3] = [0, 3, 4];

/// Enumerates the seven diatonic triads and sevenths whose pitch-class set contains every
/// melody pitch class of the slice, with a small base cost preferring I/IV/V.
pub struct DefaultChordCandidateProvider;

impl ChordCandidateProvider for DefaultChordCandidateProvider {
    fn candidates(&self, slice: &MelodySlice, key: KeySignature) -> Vec<ChordCandidate> {
        use music_theory::function::{MAJOR_DEGREES, NATURAL_MINOR_DEGREES};

        let slice_mask = get_mask(&slice.pitches);
        let degree_roots = key.scale_degree_pitch_classes();
        let degrees = if key.is_major() { &MAJOR_DEGREES } else { &NATURAL_MINOR_DEGREES };
        let mut out = Vec::new();

        for (index, entry) in degrees.iter().enumerate() {
            let root_pc = degree_roots[index].value();
            let is_primary = PRIMARY_DEGREES.contains(&index);
            for quality in [entry.triad_quality, entry.seventh_quality] {
                let offsets = chord::offsets_for(quality);
                let mut mask = PitchClassMask::EMPTY;
                for &offset in offsets {
                    mask = mask.with((u32::from(root_pc) + u32::from(offset)) as u8 % 12);
                }
                if mask.intersect(slice_mask) != slice_mask {
                    continue;
                }
                let voicing: Vec<i32> =
                    offsets.iter().map(|&offset| 48 + i32::from(root_pc) + i32::from(offset)).collect();
                out.push(ChordCandidate {
                    root_pc,
                    quality,
                    mask,
                    voicing,
                    base_cost: if is_primary { 0.0 } else { 0.1 },
                });
            }
        }
        out
    }
}

fn harmonic_function_of(root_pc: u8, key: KeySignature) -> music_theory::function::HarmonicFunction {
    use music_theory::function::{HarmonicFunction, MAJOR_DEGREES, NATURAL_MINOR_DEGREES};

    let interval = key.root().ascending_interval_to(music_theory::pitch::PitchClass::from_wrapping(i32::from(root_pc)));
    let degrees = if key.is_major() { &MAJOR_DEGREES } else { &NATURAL_MINOR_DEGREES };
    degrees
        .iter()
        .find(|entry| entry.interval == interval)
        .map_or(HarmonicFunction::Tonic, |entry| entry.function)
}

/// Default transition scorer: root motion, functional bonus (with a regressive D->S
/// penalty), and a common-tone bonus, clamped at zero.
pub struct DefaultTransitionScorer {
    pub key: KeySignature,
}

impl TransitionScorer for DefaultTransitionScorer {
    fn score(&self, prev: &ChordCandidate, curr: &ChordCandidate) -> f64 {
        use music_theory::function::HarmonicFunction;

        let interval = (i32::from(curr.root_pc) - i32::from(prev.root_pc)).rem_euclid(12);
        let root_motion = match interval {
            5 | 7 => 0.0,
            2 | 10 => 0.1,
            4 | 8 => 0.2,
            0 => 0.3,
            _ => 0.5,
        };

        let prev_fn = harmonic_function_of(prev.root_pc, self.key);
        let curr_fn = harmonic_function_of(curr.root_pc, self.key);
        let functional_bonus = match (prev_fn, curr_fn) {
            (HarmonicFunction::Tonic, HarmonicFunction::Subdominant) => -0.1,
            (HarmonicFunction::Subdominant, HarmonicFunction::Dominant) => -0.2,
            (HarmonicFunction::Dominant, HarmonicFunction::Tonic) => -0.3,
            (HarmonicFunction::Dominant, HarmonicFunction::Subdominant) => 0.3,
            _ => 0.0,
        };

        let common_tone_bonus = -0.05 * f64::from(prev.mask.intersect(curr.mask).popcount());

        (root_motion + functional_bonus + common_tone_bonus).max(0.0)
    }
}

/// Default melody-fit scorer: per-note penalties for pitches not covered by the candidate's
/// mask, heavier on strong beats.
pub struct DefaultMelodyFitScorer;

impl MelodyFitScorer for DefaultMelodyFitScorer {
    fn score(&self, slice: &MelodySlice, candidate: &ChordCandidate) -> f64 {
        let per_note_penalty = if slice.is_strong_beat { 0.5 } else { 0.2 };
        let mut cost = candidate.base_cost;
        for &pitch in &slice.pitches {
            let pc = (pitch.rem_euclid(12)) as u8;
            if !candidate.mask.contains(pc) {
                cost += per_note_penalty;
            }
        }
        cost
    }
}

/// Run the Viterbi harmonization pipeline over `melody`.
///
/// # Errors
///
/// Returns [`VoicingError::NoValidPath`] when no slice has a single viable candidate (an
/// empty candidate list at any position makes the whole path unreachable).
pub fn harmonize(
    melody: &[MelodyNote],
    key: KeySignature,
    rhythm: &dyn HarmonicRhythmStrategy,
    provider: &dyn ChordCandidateProvider,
    transition: &dyn TransitionScorer,
    fit: &dyn MelodyFitScorer,
) -> Result<Vec<ChordAssignment>, VoicingError> {
    let slices = rhythm.slices(melody);
    if slices.is_empty() {
        return Ok(Vec::new());
    }

    let candidates: Vec<Vec<ChordCandidate>> =
        slices.iter().map(|slice| provider.candidates(slice, key)).collect();

    let mut dp: Vec<Vec<(f64, Option<usize>)>> = Vec::with_capacity(slices.len());
    let first_costs: Vec<(f64, Option<usize>)> =
        candidates[0].iter().map(|c| (fit.score(&slices[0], c), None)).collect();
    dp.push(first_costs);

    for i in 1..slices.len() {
        let mut row = Vec::with_capacity(candidates[i].len());
        for curr in &candidates[i] {
            let mut best = f64::INFINITY;
            let mut best_back = None;
            for (k, prev) in candidates[i - 1].iter().enumerate() {
                let (prev_cost, _) = dp[i - 1][k];
                if !prev_cost.is_finite() {
                    continue;
                }
                let cost = prev_cost + transition.score(prev, curr) + fit.score(&slices[i], curr);
                if cost < best {
                    best = cost;
                    best_back = Some(k);
                }
            }
            row.push((best, best_back));
        }
        dp.push(row);
    }

    let last_row = dp.last().expect("slices is non-empty");
    let (best_index, &(best_cost, _)) = last_row
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.0.partial_cmp(&b.0).unwrap())
        .ok_or(VoicingError::NoValidPath { stage: "harmonization", cap: f64::INFINITY })?;

    if !best_cost.is_finite() {
        return Err(VoicingError::NoValidPath { stage: "harmonization", cap: f64::INFINITY });
    }

    let mut path_indices = vec![0usize; slices.len()];
    path_indices[slices.len() - 1] = best_index;
    for i in (1..slices.len()).rev() {
        path_indices[i - 1] = dp[i][path_indices[i]]
            .1
            .ok_or(VoicingError::NoValidPath { stage: "harmonization", cap: f64::INFINITY })?;
    }

    Ok(path_indices
        .iter()
        .enumerate()
        .map(|(i, &idx)| {
            let candidate = &candidates[i][idx];
            ChordAssignment {
                start: slices[i].start,
                end: slices[i].end,
                root_pc: candidate.root_pc,
                quality: candidate.quality,
                pitches: candidate.voicing.clone(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use music_theory::pitch::PitchClass;

    fn key_c_major() -> KeySignature {
        KeySignature::new(PitchClass::new(0).unwrap(), true)
    }

    #[test]
    fn harmonizes_three_note_melody_into_three_assignments() {
        let melody = vec![
            MelodyNote { onset: Rational::ZERO, duration: Rational::ONE, pitch: 60 },
            MelodyNote { onset: Rational::ONE, duration: Rational::ONE, pitch: 67 },
            MelodyNote { onset: Rational::from_integer(2), duration: Rational::from_integer(2), pitch: 60 },
        ];
        let key = key_c_major();
        let assignments = harmonize(
            &melody,
            key,
            &DefaultHarmonicRhythmStrategy,
            &DefaultChordCandidateProvider,
            &DefaultTransitionScorer { key },
            &DefaultMelodyFitScorer,
        )
        .unwrap();
        assert_eq!(assignments.len(), 3);
        assert!(assignments[0].root_pc == 0 || assignments[0].root_pc == 9);
    }

    #[test]
    fn empty_melody_yields_no_assignments() {
        let key = key_c_major();
        let assignments = harmonize(
            &[],
            key,
            &DefaultHarmonicRhythmStrategy,
            &DefaultChordCandidateProvider,
            &DefaultTransitionScorer { key },
            &DefaultMelodyFitScorer,
        )
        .unwrap();
        assert!(assignments.is_empty());
    }
}
