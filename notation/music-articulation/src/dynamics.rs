//! notation/music-articulation/src/dynamics.rs
//! Dynamics and hairpins.

/// Dynamic markings. Steady levels are ordered from softest to loudest and ranked by
/// [`Self::intensity`]; the accent-style marks (`Sf`, `Sfz`, `Fp`, `Rf`) are momentary and do
/// not participate in that ordering (`intensity` reuses the nearest steady level's rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DynamicMark {
    Pppp,
    Ppp,
    Pp,
    P,
    Mp,
    Mf,
    F,
    Ff,
    Fff,
    Ffff,
    /// Sforzando: a sudden, single-note accent.
    Sf,
    /// Sforzato: a stronger sudden accent than `Sf`.
    Sfz,
    /// Forte-piano: loud attack immediately dropping to piano.
    Fp,
    /// Rinforzando: a brief, localized reinforcement.
    Rf,
}

impl DynamicMark {
    /// Human-readable shorthand (e.g. "mf").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            DynamicMark::Pppp => "pppp",
            DynamicMark::Ppp => "ppp",
            DynamicMark::Pp => "pp",
            DynamicMark::P => "p",
            DynamicMark::Mp => "mp",
            DynamicMark::Mf => "mf",
            DynamicMark::F => "f",
            DynamicMark::Ff => "ff",
            DynamicMark::Fff => "fff",
            DynamicMark::Ffff => "ffff",
            DynamicMark::Sf => "sf",
            DynamicMark::Sfz => "sfz",
            DynamicMark::Fp => "fp",
            DynamicMark::Rf => "rf",
        }
    }

    /// Parse a dynamics token from the external notation grammar.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "pppp" => Some(DynamicMark::Pppp),
            "ppp" => Some(DynamicMark::Ppp),
            "pp" => Some(DynamicMark::Pp),
            "p" => Some(DynamicMark::P),
            "mp" => Some(DynamicMark::Mp),
            "mf" => Some(DynamicMark::Mf),
            "f" => Some(DynamicMark::F),
            "ff" => Some(DynamicMark::Ff),
            "fff" => Some(DynamicMark::Fff),
            "ffff" => Some(DynamicMark::Ffff),
            "sf" => Some(DynamicMark::Sf),
            "sfz" => Some(DynamicMark::Sfz),
            "fp" => Some(DynamicMark::Fp),
            "rf" => Some(DynamicMark::Rf),
            _ => None,
        }
    }

    /// Intensity rank among the ten steady levels (0 softest, 9 loudest). Accent-style marks
    /// report the rank of the steady level they momentarily depart from.
    #[must_use]
    pub const fn intensity(self) -> u8 {
        match self {
            DynamicMark::Pppp => 0,
            DynamicMark::Ppp => 1,
            DynamicMark::Pp => 2,
            DynamicMark::P => 3,
            DynamicMark::Mp => 4,
            DynamicMark::Mf => 5,
            DynamicMark::F | DynamicMark::Fp | DynamicMark::Rf => 6,
            DynamicMark::Ff | DynamicMark::Sf => 7,
            DynamicMark::Fff | DynamicMark::Sfz => 8,
            DynamicMark::Ffff => 9,
        }
    }

    /// Convert an intensity rank back into the steady [`DynamicMark`] at that rank.
    #[must_use]
    pub const fn from_intensity(intensity: u8) -> Option<Self> {
        match intensity {
            0 => Some(DynamicMark::Pppp),
            1 => Some(DynamicMark::Ppp),
            2 => Some(DynamicMark::Pp),
            3 => Some(DynamicMark::P),
            4 => Some(DynamicMark::Mp),
            5 => Some(DynamicMark::Mf),
            6 => Some(DynamicMark::F),
            7 => Some(DynamicMark::Ff),
            8 => Some(DynamicMark::Fff),
            9 => Some(DynamicMark::Ffff),
            _ => None,
        }
    }
}

impl PartialOrd for DynamicMark {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DynamicMark {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.intensity().cmp(&other.intensity())
    }
}

/// Hairpin shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hairpin {
    Crescendo,
    Decrescendo,
}

/// Keyframe describing a dynamic mark at a relative offset (beats or seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicProfilePoint {
    pub offset: f64,
    pub mark: DynamicMark,
}

/// Helpers for building simple dynamic profiles.
pub struct DynamicProfile;

impl DynamicProfile {
    /// Evenly distribute a linear ramp between two dynamics over `duration` units.
    ///
    /// Returns `steps` keyframes including both endpoints.
    #[must_use]
    pub fn ramp(
        start: DynamicMark,
        end: DynamicMark,
        duration: f64,
        steps: usize,
    ) -> Vec<DynamicProfilePoint> {
        assert!(steps >= 2, "ramp requires at least two steps");
        assert!(
            duration >= 0.0 && duration.is_finite(),
            "duration must be non-negative and finite"
        );
        let mut points = Vec::with_capacity(steps);
        let start_intensity = start.intensity() as f64;
        let end_intensity = end.intensity() as f64;
        let denom = (steps - 1) as f64;
        for i in 0..steps {
            let t = i as f64 / denom;
            let offset = duration * t;
            let intensity = start_intensity + (end_intensity - start_intensity) * t;
            let mark = DynamicMark::from_intensity(intensity.round() as u8).expect("valid dynamic");
            points.push(DynamicProfilePoint { offset, mark });
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_intensity() {
        assert!(DynamicMark::Ppp < DynamicMark::Pp);
        assert!(DynamicMark::Ff < DynamicMark::Fff);
        assert_eq!(DynamicMark::Mf.intensity(), 5);
        assert_eq!(DynamicMark::from_intensity(5), Some(DynamicMark::Mf));
    }

    #[test]
    fn ramp_profile_includes_endpoints() {
        let ramp = DynamicProfile::ramp(DynamicMark::P, DynamicMark::Ff, 4.0, 3);
        assert_eq!(ramp.len(), 3);
        assert_eq!(ramp.first().unwrap().mark, DynamicMark::P);
        assert_eq!(ramp.last().unwrap().mark, DynamicMark::Ff);
        assert!((ramp[1].offset - 2.0).abs() < 1e-9);
    }
}
