//! core/music-voicing/src/figured_bass.rs
//! Realizes a figured-bass symbol into a concrete set of MIDI pitches above its bass note.

use std::collections::HashMap;

use music_time::Rational;

use crate::errors::VoicingError;

/// A bass note annotated with figures (e.g. `[6]`, `[6, 4]`, `[7]`) and optional accidentals
/// keyed by figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FiguredBassSymbol {
    pub bass_pitch: i32,
    pub figures: Vec<i32>,
    pub accidentals: HashMap<i32, char>,
    pub time: Rational,
    pub duration: Rational,
}

/// Default generic-interval-above-bass semitone offsets, unadjusted by key or accidental.
fn default_interval_offset(interval: i32) -> i32 {
    match interval {
        2 => 2,
        3 => 4,
        4 => 5,
        5 => 7,
        6 => 9,
        7 => 11,
        9 => 14,
        _ => 0,
    }
}

fn accidental_adjustment(accidental: char) -> i32 {
    match accidental {
        '#' | '+' => 1,
        'b' => -1,
        _ => 0,
    }
}

/// Map a sorted figure set to the generic intervals it implies above the bass, per standard
/// figured-bass abbreviation.
fn intervals_for_figures(figures: &[i32]) -> &'static [i32] {
    let mut sorted = figures.to_vec();
    sorted.sort_unstable();
    match sorted.as_slice() {
        [] => &[3, 5],
        [6] => &[3, 6],
        [6, 4] | [4, 6] => &[4, 6],
        [7] => &[3, 5, 7],
        [6, 5] | [5, 6] => &[3, 5, 6],
        [4, 3] | [3, 4] => &[3, 4, 6],
        [4, 2] | [2, 4] => &[2, 4, 6],
        [2] => &[2, 4, 6],
        _ => &[3, 5],
    }
}

/// How strictly upper-voice motion is constrained when a previous voicing is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceLeadingStyle {
    /// Each voice moves to the closest octave of its target pitch class.
    Smooth,
    /// Same as `Smooth`, but disallows voice crossing in the result.
    Strict,
}

/// Realize `symbol` into concrete upper-voice pitches folded into `[min_pitch, max_pitch]`.
///
/// When `previous` is `Some`, each voice (matched by index) moves to the octave of its target
/// pitch class closest to its previous pitch, subject to `max_voice_movement` if given.
///
/// # Errors
///
/// Returns [`VoicingError::VoiceLeadingInfeasible`] when a voice cannot reach its target
/// pitch class within `max_voice_movement` semitones.
pub fn realize(
    symbol: &FiguredBassSymbol,
    min_pitch: i32,
    max_pitch: i32,
    previous: Option<&[i32]>,
    style: VoiceLeadingStyle,
    max_voice_movement: Option<i32>,
) -> Result<Vec<i32>, VoicingError> {
    let intervals = intervals_for_figures(&symbol.figures);
    let bass_pc = symbol.bass_pitch.rem_euclid(12);

    let target_pcs: Vec<i32> = intervals
        .iter()
        .map(|&interval| {
            let mut offset = default_interval_offset(interval);
            if let Some(&accidental) = symbol.accidentals.get(&interval) {
                offset += accidental_adjustment(accidental);
            }
            (bass_pc + offset).rem_euclid(12)
        })
        .collect();

    let mut voices = Vec::with_capacity(target_pcs.len());
    for (index, &pc) in target_pcs.iter().enumerate() {
        let pitch = match previous.and_then(|prev| prev.get(index)) {
            Some(&anchor) => closest_octave(pc, anchor, max_voice_movement, index)?,
            None => fold_into_range(pc, min_pitch, max_pitch),
        };
        voices.push(pitch);
    }

    if style == VoiceLeadingStyle::Strict {
        for i in 1..voices.len() {
            while voices[i] <= voices[i - 1] {
                voices[i] += 12;
            }
        }
        voices.sort_unstable();
    }

    Ok(voices)
}

fn fold_into_range(pc: i32, min_pitch: i32, max_pitch: i32) -> i32 {
    let mut pitch = pc + 12 * (min_pitch / 12);
    while pitch < min_pitch {
        pitch += 12;
    }
    while pitch > max_pitch {
        pitch -= 12;
    }
    pitch.clamp(min_pitch, max_pitch)
}

fn closest_octave(
    pc: i32,
    anchor: i32,
    max_voice_movement: Option<i32>,
    voice_index: usize,
) -> Result<i32, VoicingError> {
    let base = pc + 12 * (anchor / 12);
    let candidates = [base - 12, base, base + 12];
    let best = candidates
        .into_iter()
        .min_by_key(|&candidate| (candidate - anchor).abs())
        .expect("exactly three candidates");

    if let Some(budget) = max_voice_movement {
        if (best - anchor).abs() > budget {
            return Err(VoicingError::VoiceLeadingInfeasible { voice: voice_index, budget });
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfigured_bass_realizes_a_root_position_triad() {
        let symbol = FiguredBassSymbol {
            bass_pitch: 48,
            figures: vec![],
            accidentals: HashMap::new(),
            time: Rational::ZERO,
            duration: Rational::new(1, 4).unwrap(),
        };
        let voices = realize(&symbol, 52, 72, None, VoiceLeadingStyle::Smooth, None).unwrap();
        let pcs: Vec<i32> = voices.iter().map(|p| p.rem_euclid(12)).collect();
        assert_eq!(pcs, vec![4, 7]);
    }

    #[test]
    fn sharp_six_raises_the_sixth_above_the_bass() {
        let mut accidentals = HashMap::new();
        accidentals.insert(6, '#');
        let symbol = FiguredBassSymbol {
            bass_pitch: 48,
            figures: vec![6],
            accidentals,
            time: Rational::ZERO,
            duration: Rational::new(1, 4).unwrap(),
        };
        let voices = realize(&symbol, 52, 72, None, VoiceLeadingStyle::Smooth, None).unwrap();
        let pcs: Vec<i32> = voices.iter().map(|p| p.rem_euclid(12)).collect();
        assert_eq!(pcs, vec![4, 10]);
    }

    #[test]
    fn infeasible_movement_is_reported_with_voice_and_budget() {
        let symbol = FiguredBassSymbol {
            bass_pitch: 48,
            figures: vec![],
            accidentals: HashMap::new(),
            time: Rational::ZERO,
            duration: Rational::new(1, 4).unwrap(),
        };
        let previous = vec![40, 43];
        let result = realize(&symbol, 40, 80, Some(&previous), VoiceLeadingStyle::Smooth, Some(1));
        assert!(matches!(result, Err(VoicingError::VoiceLeadingInfeasible { budget: 1, .. })));
    }

    #[test]
    fn strict_style_produces_strictly_ascending_voices() {
        let symbol = FiguredBassSymbol {
            bass_pitch: 48,
            figures: vec![7],
            accidentals: HashMap::new(),
            time: Rational::ZERO,
            duration: Rational::new(1, 4).unwrap(),
        };
        let voices = realize(&symbol, 48, 84, None, VoiceLeadingStyle::Strict, None).unwrap();
        assert!(voices.windows(2).all(|w| w[0] < w[1]));
    }
}
