//! core/music-voicing/src/rules.rs
//! Pairwise voice-leading rule checker: given two SATB voicings, reports which classical
//! part-writing rules a transition violates and the weighted penalty that follows from them.

use bitflags::bitflags;

/// A concrete SATB voicing, ascending: `[bass, tenor, alto, soprano]`.
pub type Voicing = [i32; 4];

bitflags! {
    /// Which part-writing rules a transition violates. Each bit carries a fixed penalty
    /// weight via [`RuleViolations::penalty`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RuleViolations: u32 {
        const PARALLEL_FIFTHS          = 1 << 0;
        const PARALLEL_OCTAVES         = 1 << 1;
        const HIDDEN_FIFTHS            = 1 << 2;
        const HIDDEN_OCTAVES           = 1 << 3;
        const VOICE_CROSSING           = 1 << 4;
        const VOICE_OVERLAP            = 1 << 5;
        const AUGMENTED_INTERVAL       = 1 << 6;
        const LARGE_LEAP               = 1 << 7;
        const UNRESOLVED_LEADING_TONE  = 1 << 8;
        const DOUBLED_LEADING_TONE     = 1 << 9;
        const EXCESSIVE_SPACING        = 1 << 10;
    }
}

impl RuleViolations {
    /// Canonical weight for a single violation flag. Panics if called with anything other
    /// than exactly one set bit.
    #[must_use]
    pub fn weight(self) -> f64 {
        match self {
            Self::PARALLEL_FIFTHS => 100.0,
            Self::PARALLEL_OCTAVES => 100.0,
            Self::HIDDEN_FIFTHS => 30.0,
            Self::HIDDEN_OCTAVES => 30.0,
            Self::VOICE_CROSSING => 50.0,
            Self::VOICE_OVERLAP => 40.0,
            Self::AUGMENTED_INTERVAL => 60.0,
            Self::LARGE_LEAP => 25.0,
            Self::UNRESOLVED_LEADING_TONE => 45.0,
            Self::DOUBLED_LEADING_TONE => 55.0,
            Self::EXCESSIVE_SPACING => 20.0,
            _ => unreachable!("weight() is only called per-flag by penalty()"),
        }
    }

    /// Sum of the canonical weights of every set flag.
    #[must_use]
    pub fn penalty(self) -> f64 {
        self.iter().map(RuleViolations::weight).sum()
    }
}

const BASS: usize = 0;
const TENOR: usize = 1;
const ALTO: usize = 2;
const SOPRANO: usize = 3;

fn interval_class(a: i32, b: i32) -> i32 {
    (b - a).rem_euclid(12)
}

fn is_perfect(interval_class: i32) -> bool {
    interval_class == 0 || interval_class == 7
}

/// Check a transition between two voicings against every rule, returning the violated-rule
/// set and its summed penalty.
#[must_use]
pub fn check_transition(prev: Voicing, curr: Voicing, key_root: u8) -> (RuleViolations, f64) {
    let mut flags = RuleViolations::empty();

    for i in 0..4 {
        for j in (i + 1)..4 {
            let prev_class = interval_class(prev[i], prev[j]);
            let curr_class = interval_class(curr[i], curr[j]);
            let moved_i = curr[i] != prev[i];
            let moved_j = curr[j] != prev[j];
            let same_direction = (curr[i] - prev[i]).signum() == (curr[j] - prev[j]).signum();
            if is_perfect(prev_class)
                && prev_class == curr_class
                && moved_i
                && moved_j
                && same_direction
            {
                if curr_class == 7 {
                    flags |= RuleViolations::PARALLEL_FIFTHS;
                } else {
                    flags |= RuleViolations::PARALLEL_OCTAVES;
                }
            }
        }
    }

    {
        let soprano_leap = (curr[SOPRANO] - prev[SOPRANO]).abs();
        let same_direction =
            (curr[BASS] - prev[BASS]).signum() == (curr[SOPRANO] - prev[SOPRANO]).signum();
        let curr_class = interval_class(curr[BASS], curr[SOPRANO]);
        let was_parallel = prev[BASS] != curr[BASS] || prev[SOPRANO] != curr[SOPRANO];
        if same_direction && soprano_leap > 2 && was_parallel {
            if curr_class == 7 {
                flags |= RuleViolations::HIDDEN_FIFTHS;
            } else if curr_class == 0 {
                flags |= RuleViolations::HIDDEN_OCTAVES;
            }
        }
    }

    if !(curr[BASS] < curr[TENOR] && curr[TENOR] < curr[ALTO] && curr[ALTO] < curr[SOPRANO]) {
        flags |= RuleViolations::VOICE_CROSSING;
    }

    for &(lower, upper) in &[(BASS, TENOR), (TENOR, ALTO), (ALTO, SOPRANO)] {
        if curr[lower] > prev[upper] || curr[upper] < prev[lower] {
            flags |= RuleViolations::VOICE_OVERLAP;
        }
    }

    for voice in 0..4 {
        let delta = (curr[voice] - prev[voice]).abs();
        if delta == 6 {
            flags |= RuleViolations::AUGMENTED_INTERVAL;
        }
        if delta > 12 {
            flags |= RuleViolations::LARGE_LEAP;
        }
    }

    let leading_tone_pc = (u32::from(key_root) + 11) % 12;
    for &voice in &[BASS, SOPRANO] {
        let prev_pc = prev[voice].rem_euclid(12) as u32;
        if prev_pc == leading_tone_pc {
            let resolved = curr[voice] - prev[voice] == 1;
            if !resolved {
                flags |= RuleViolations::UNRESOLVED_LEADING_TONE;
            }
        }
    }

    let leading_tone_count =
        curr.iter().filter(|&&pitch| pitch.rem_euclid(12) as u32 == leading_tone_pc).count();
    if leading_tone_count > 1 {
        flags |= RuleViolations::DOUBLED_LEADING_TONE;
    }

    if curr[ALTO] - curr[TENOR] > 12 || curr[SOPRANO] - curr[ALTO] > 12 {
        flags |= RuleViolations::EXCESSIVE_SPACING;
    }

    let penalty = flags.penalty();
    (flags, penalty)
}

/// Sum of absolute semitone displacements across all four voices.
#[must_use]
pub fn smoothness_cost(prev: Voicing, curr: Voicing) -> i32 {
    (0..4).map(|i| (curr[i] - prev[i]).abs()).sum()
}

/// Combined cost of a transition: rule penalty plus `smoothness_weight` times the smoothness
/// cost.
#[must_use]
pub fn transition_cost(prev: Voicing, curr: Voicing, key_root: u8, smoothness_weight: f64) -> f64 {
    let (_, penalty) = check_transition(prev, curr, key_root);
    penalty + smoothness_weight * f64::from(smoothness_cost(prev, curr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_octaves_regression_anchor() {
        let prev: Voicing = [60, 64, 67, 72];
        let curr: Voicing = [62, 65, 69, 74];
        let (flags, _) = check_transition(prev, curr, 0);
        assert!(flags.contains(RuleViolations::PARALLEL_OCTAVES));
    }

    #[test]
    fn no_violations_on_clean_resolution() {
        let prev: Voicing = [60, 64, 67, 72];
        let curr: Voicing = [60, 64, 67, 71];
        let (flags, penalty) = check_transition(prev, curr, 0);
        assert!(flags.is_empty());
        assert_eq!(penalty, 0.0);
    }

    #[test]
    fn voice_crossing_detected_when_not_ascending() {
        let prev: Voicing = [48, 55, 60, 67];
        let curr: Voicing = [48, 62, 60, 67];
        let (flags, _) = check_transition(prev, curr, 0);
        assert!(flags.contains(RuleViolations::VOICE_CROSSING));
    }

    #[test]
    fn smoothness_cost_sums_absolute_displacement() {
        let prev: Voicing = [48, 55, 60, 67];
        let curr: Voicing = [50, 55, 62, 65];
        assert_eq!(smoothness_cost(prev, curr), 2 + 0 + 2 + 2);
    }
}
