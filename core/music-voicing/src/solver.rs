//! core/music-voicing/src/solver.rs
//! Enumerates legal SATB voicings for a chord progression and finds the least-cost path
//! through them via dynamic programming, fanning the inner loop out over `rayon` once
//! branching grows large enough to be worth it.

use music_theory::mask::PitchClassMask;
use rayon::prelude::*;

use crate::errors::VoicingError;
use crate::rules::{Voicing, transition_cost};

/// Standard SATB vocal ranges, inclusive, in MIDI pitch.
const BASS_RANGE: (i32, i32) = (40, 60); // E2..C4
const TENOR_RANGE: (i32, i32) = (48, 67); // C3..G4
const ALTO_RANGE: (i32, i32) = (55, 74); // G3..D5
const SOPRANO_RANGE: (i32, i32) = (60, 81); // C4..A5

/// How strictly the solver treats rule violations and how far it searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverMode {
    /// Any rule violation makes a transition infinitely costly.
    Strict,
    /// Rule violations are penalized but not forbidden.
    Default,
    /// Like `Default`, with a higher cost cap and loosened spacing rule.
    Relaxed,
}

impl SolverMode {
    fn max_transition_cost(self) -> f64 {
        match self {
            SolverMode::Strict | SolverMode::Default => 500.0,
            SolverMode::Relaxed => 2000.0,
        }
    }

    fn spacing_limit(self) -> i32 {
        match self {
            SolverMode::Strict | SolverMode::Default => 12,
            SolverMode::Relaxed => 19,
        }
    }
}

/// Threshold (previous branching × current branching) above which the inner DP loop fans out
/// over a thread pool instead of running sequentially.
const PARALLEL_THRESHOLD: usize = 1000;

/// Every SATB quadruple for `mask` in which voices stay within their standard ranges, strictly
/// ascend, respect `spacing_limit`, and collectively represent every pitch class in `mask` at
/// least once.
fn enumerate_voicings(mask: PitchClassMask, spacing_limit: i32) -> Vec<Voicing> {
    let mut voicings = Vec::new();
    for bass in BASS_RANGE.0..=BASS_RANGE.1 {
        if !mask.contains((bass.rem_euclid(12)) as u8) {
            continue;
        }
        for tenor in TENOR_RANGE.0.max(bass + 1)..=TENOR_RANGE.1 {
            if !mask.contains((tenor.rem_euclid(12)) as u8) {
                continue;
            }
            for alto in ALTO_RANGE.0.max(tenor + 1)..=ALTO_RANGE.1 {
                if !mask.contains((alto.rem_euclid(12)) as u8) || alto - tenor > spacing_limit {
                    continue;
                }
                for soprano in SOPRANO_RANGE.0.max(alto + 1)..=SOPRANO_RANGE.1 {
                    if soprano - alto > spacing_limit {
                        continue;
                    }
                    let voicing = [bass, tenor, alto, soprano];
                    if covers_every_pitch_class(voicing, mask) {
                        voicings.push(voicing);
                    }
                }
            }
        }
    }
    voicings
}

fn covers_every_pitch_class(voicing: Voicing, mask: PitchClassMask) -> bool {
    let mut covered = PitchClassMask::EMPTY;
    for pitch in voicing {
        covered = covered.with((pitch.rem_euclid(12)) as u8);
    }
    covered.intersect(mask) == mask
}

/// Solve a chord progression: find the least-cost SATB voicing path.
///
/// # Errors
///
/// Returns [`VoicingError::NoValidPath`] when every path through the candidate voicings
/// exceeds `mode`'s cost cap.
pub fn solve(
    progression: &[PitchClassMask],
    key_root: u8,
    mode: SolverMode,
) -> Result<Vec<Voicing>, VoicingError> {
    if progression.is_empty() {
        return Ok(Vec::new());
    }

    let cap = mode.max_transition_cost();
    let spacing_limit = mode.spacing_limit();
    let candidates: Vec<Vec<Voicing>> =
        progression.iter().map(|&mask| enumerate_voicings(mask, spacing_limit)).collect();

    let mut dp: Vec<Vec<f64>> = vec![vec![0.0; candidates[0].len()]];
    let mut backpointer: Vec<Vec<Option<usize>>> = vec![vec![None; candidates[0].len()]];

    for i in 1..candidates.len() {
        let prev_costs = &dp[i - 1];
        let prev_candidates = &candidates[i - 1];
        let curr_candidates = &candidates[i];

        let branching = prev_candidates.len() * curr_candidates.len();
        let row: Vec<(f64, Option<usize>)> = if branching > PARALLEL_THRESHOLD {
            curr_candidates
                .par_iter()
                .map(|&curr| best_predecessor(prev_candidates, prev_costs, curr, key_root, mode, cap))
                .collect()
        } else {
            curr_candidates
                .iter()
                .map(|&curr| best_predecessor(prev_candidates, prev_costs, curr, key_root, mode, cap))
                .collect()
        };

        dp.push(row.iter().map(|(cost, _)| *cost).collect());
        backpointer.push(row.iter().map(|(_, back)| *back).collect());
    }

    let last_row = dp.last().expect("progression is non-empty");
    let (best_index, &best_cost) = last_row
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
        .ok_or(VoicingError::NoValidPath { stage: "voice-leading solver", cap })?;

    if !best_cost.is_finite() {
        return Err(VoicingError::NoValidPath { stage: "voice-leading solver", cap });
    }

    let mut path_indices = vec![0usize; candidates.len()];
    path_indices[candidates.len() - 1] = best_index;
    for i in (1..candidates.len()).rev() {
        path_indices[i - 1] =
            backpointer[i][path_indices[i]].ok_or(VoicingError::NoValidPath { stage: "voice-leading solver", cap })?;
    }

    Ok(path_indices.iter().zip(candidates.iter()).map(|(&idx, cands)| cands[idx]).collect())
}

fn best_predecessor(
    prev_candidates: &[Voicing],
    prev_costs: &[f64],
    curr: Voicing,
    key_root: u8,
    mode: SolverMode,
    cap: f64,
) -> (f64, Option<usize>) {
    let mut best = f64::INFINITY;
    let mut best_back = None;
    for (k, &prev) in prev_candidates.iter().enumerate() {
        if !prev_costs[k].is_finite() {
            continue;
        }
        let (violations, _) = crate::rules::check_transition(prev, curr, key_root);
        if mode == SolverMode::Strict && !violations.is_empty() {
            continue;
        }
        let step_cost = transition_cost(prev, curr, key_root, 1.0);
        if step_cost > cap {
            continue;
        }
        let total = prev_costs[k] + step_cost;
        if total < best {
            best = total;
            best_back = Some(k);
        }
    }
    (best, best_back)
}

#[cfg(test)]
mod tests {
    use super::*;
    use music_theory::mask::get_mask;

    #[test]
    fn solves_cmaj_g7_cmaj_progression() {
        let progression = vec![
            get_mask(&[60, 64, 67]),
            get_mask(&[67, 71, 74, 77]),
            get_mask(&[60, 64, 67]),
        ];
        let path = solve(&progression, 0, SolverMode::Default).unwrap();
        assert_eq!(path.len(), 3);
        for voicing in &path {
            assert!(voicing[0] < voicing[1] && voicing[1] < voicing[2] && voicing[2] < voicing[3]);
        }
    }

    #[test]
    fn strict_mode_never_returns_a_violating_transition() {
        let progression = vec![get_mask(&[60, 64, 67]), get_mask(&[62, 65, 69])];
        if let Ok(path) = solve(&progression, 0, SolverMode::Strict) {
            let (violations, _) = crate::rules::check_transition(path[0], path[1], 0);
            assert!(violations.is_empty());
        }
    }
}
