//! notation/music-notation/src/ornament.rs
//! Ornament expansion: each tagged variant turns one base note into a finite event sequence
//! that fits exactly within `base.offset .. base.offset + base.duration`.

use music_articulation::ArticulationKind;
use music_buffer::NoteEvent;
use music_time::Rational;

/// Which neighbor a mordent or turn's auxiliary note approaches from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MordentKind {
    Upper,
    Lower,
}

/// Whether a turn visits its neighbors upper-then-lower or lower-then-upper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    Normal,
    Inverted,
}

/// How much of the base note's duration an appoggiatura's neighbor tone consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppoggiaturaKind {
    Long,
    Short,
}

/// A tagged ornament descriptor. `expand` turns it plus a base note into a concrete event
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ornament {
    Trill {
        interval: i32,
        speed: u32,
        upper_start: bool,
        terminating_turn: bool,
    },
    Mordent {
        kind: MordentKind,
        interval: i32,
        alternations: u32,
    },
    Turn {
        kind: TurnKind,
        interval: i32,
    },
    Appoggiatura {
        kind: AppoggiaturaKind,
        interval: i32,
    },
    Articulation(ArticulationKind),
}

fn slot(base: &NoteEvent, index: i64, slot_count: i64, pitch: i32) -> NoteEvent {
    let slot_duration = base
        .duration()
        .checked_div(Rational::from_integer(slot_count))
        .expect("slot_count is always positive");
    let offset = base.offset().add(slot_duration.mul(Rational::from_integer(index)));
    NoteEvent::new(pitch, offset, slot_duration, base.velocity())
}

impl Ornament {
    /// Expand this ornament applied to `base` into a finite event sequence. For
    /// [`Ornament::Articulation`], returns a single event with scaled duration/velocity rather
    /// than adding notes.
    #[must_use]
    pub fn expand(&self, base: NoteEvent) -> Vec<NoteEvent> {
        match *self {
            Ornament::Trill { interval, speed, upper_start, terminating_turn } => {
                expand_trill(&base, interval, speed, upper_start, terminating_turn)
            }
            Ornament::Mordent { kind, interval, alternations } => {
                expand_mordent(&base, kind, interval, alternations)
            }
            Ornament::Turn { kind, interval } => expand_turn(&base, kind, interval),
            Ornament::Appoggiatura { kind, interval } => expand_appoggiatura(&base, kind, interval),
            Ornament::Articulation(articulation) => vec![expand_articulation(&base, articulation)],
        }
    }
}

fn expand_trill(
    base: &NoteEvent,
    interval: i32,
    speed: u32,
    upper_start: bool,
    terminating_turn: bool,
) -> Vec<NoteEvent> {
    let granularity = Rational::ONE
        .checked_div(Rational::from_integer(i64::from(speed) * 4))
        .unwrap_or(Rational::ONE);
    let total_slots = base
        .duration()
        .checked_div(granularity)
        .map_or(1, |r| r.to_double().floor() as i64)
        .max(1);

    let mut events = Vec::with_capacity(total_slots as usize);
    let alternate_count = if terminating_turn && total_slots >= 2 { total_slots - 2 } else { total_slots };

    for i in 0..alternate_count {
        let on_main = if upper_start { i % 2 == 1 } else { i % 2 == 0 };
        let pitch = if on_main { base.pitch() } else { base.pitch() + interval };
        events.push(slot(base, i, total_slots, pitch));
    }

    if terminating_turn && total_slots >= 2 {
        events.push(slot(base, alternate_count, total_slots, base.pitch() + interval));
        events.push(slot(base, alternate_count + 1, total_slots, base.pitch()));
    }

    events
}

fn expand_mordent(base: &NoteEvent, kind: MordentKind, interval: i32, alternations: u32) -> Vec<NoteEvent> {
    let neighbor = match kind {
        MordentKind::Upper => base.pitch() + interval,
        MordentKind::Lower => base.pitch() - interval,
    };
    let repeats = alternations.max(1);
    let slot_count = 2 * i64::from(repeats) + 1;

    let mut events = Vec::with_capacity(slot_count as usize);
    for i in 0..slot_count {
        let pitch = if i % 2 == 0 { base.pitch() } else { neighbor };
        events.push(slot(base, i, slot_count, pitch));
    }
    events
}

fn expand_turn(base: &NoteEvent, kind: TurnKind, interval: i32) -> Vec<NoteEvent> {
    let upper = base.pitch() + interval;
    let lower = base.pitch() - interval;
    let pitches = match kind {
        TurnKind::Normal => [upper, base.pitch(), lower, base.pitch()],
        TurnKind::Inverted => [lower, base.pitch(), upper, base.pitch()],
    };
    pitches.iter().enumerate().map(|(i, &pitch)| slot(base, i as i64, 4, pitch)).collect()
}

fn expand_appoggiatura(base: &NoteEvent, kind: AppoggiaturaKind, interval: i32) -> Vec<NoteEvent> {
    let neighbor_pitch = base.pitch() + interval;
    match kind {
        AppoggiaturaKind::Long => vec![slot(base, 0, 2, neighbor_pitch), slot(base, 1, 2, base.pitch())],
        AppoggiaturaKind::Short => {
            let short_slots = 8i64;
            let neighbor = slot(base, 0, short_slots, neighbor_pitch);
            let remainder_duration = base.duration().sub(neighbor.duration());
            let remainder = NoteEvent::new(
                base.pitch(),
                base.offset().add(neighbor.duration()),
                remainder_duration,
                base.velocity(),
            );
            vec![neighbor, remainder]
        }
    }
}

fn expand_articulation(base: &NoteEvent, articulation: ArticulationKind) -> NoteEvent {
    let duration = base.duration().mul(Rational::new(
        (articulation.duration_scale() * 1000.0).round() as i64,
        1000,
    ).expect("scale factor denominator is a nonzero literal"));
    let velocity = ((f64::from(base.velocity()) * articulation.velocity_scale()) as f32).clamp(0.0, 1.0);
    NoteEvent::new(base.pitch(), base.offset(), duration, velocity)
}

/// Build an ornament from its notation-grammar tag (`tr`, `mord`, `turn`, `app`) and colon
/// parameters, applying each ornament kind's documented defaults for any parameter omitted.
#[must_use]
pub fn from_tag(tag: &str, params: &[i32]) -> Option<Ornament> {
    let param = |index: usize, default: i32| params.get(index).copied().unwrap_or(default);
    match tag {
        "tr" => Some(Ornament::Trill {
            interval: param(0, 2),
            speed: param(1, 4).max(1) as u32,
            upper_start: param(2, 1) != 0,
            terminating_turn: param(3, 0) != 0,
        }),
        "mord" => Some(Ornament::Mordent {
            kind: if param(0, 1) == 0 { MordentKind::Lower } else { MordentKind::Upper },
            interval: param(1, 2),
            alternations: param(2, 1).max(1) as u32,
        }),
        "turn" => Some(Ornament::Turn {
            kind: if param(0, 0) == 0 { TurnKind::Normal } else { TurnKind::Inverted },
            interval: param(1, 2),
        }),
        "app" => Some(Ornament::Appoggiatura {
            kind: if param(0, 0) == 0 { AppoggiaturaKind::Long } else { AppoggiaturaKind::Short },
            interval: param(1, 2),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_note() -> NoteEvent {
        NoteEvent::new(60, Rational::ZERO, Rational::ONE, 0.8)
    }

    #[test]
    fn mordent_produces_three_events_for_a_single_alternation() {
        let events = Ornament::Mordent { kind: MordentKind::Upper, interval: 2, alternations: 1 }
            .expand(base_note());
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].pitch(), 60);
        assert_eq!(events[1].pitch(), 62);
        assert_eq!(events[2].pitch(), 60);
        let total: Rational = events.iter().fold(Rational::ZERO, |acc, e| acc.add(e.duration()));
        assert_eq!(total, Rational::ONE);
    }

    #[test]
    fn turn_visits_four_pitches_in_canonical_order() {
        let events = Ornament::Turn { kind: TurnKind::Normal, interval: 2 }.expand(base_note());
        let pitches: Vec<i32> = events.iter().map(NoteEvent::pitch).collect();
        assert_eq!(pitches, vec![62, 60, 58, 60]);
    }

    #[test]
    fn turn_never_extends_past_the_base_span() {
        let base = base_note();
        let events = Ornament::Turn { kind: TurnKind::Inverted, interval: 1 }.expand(base);
        let last = events.last().unwrap();
        assert!(last.offset().add(last.duration()) <= base.offset().add(base.duration()));
    }

    #[test]
    fn appoggiatura_long_splits_into_two_equal_halves() {
        let events = Ornament::Appoggiatura { kind: AppoggiaturaKind::Long, interval: 2 }.expand(base_note());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].duration(), Rational::new(1, 2).unwrap());
        assert_eq!(events[1].duration(), Rational::new(1, 2).unwrap());
    }

    #[test]
    fn articulation_scales_duration_and_velocity_without_adding_events() {
        let events = Ornament::Articulation(ArticulationKind::Staccato).expand(base_note());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].duration(), Rational::new(1, 2).unwrap());
    }

    #[test]
    fn articulation_velocity_clamps_into_unit_range() {
        let loud = NoteEvent::new(60, Rational::ZERO, Rational::ONE, 0.9);
        let events = Ornament::Articulation(ArticulationKind::Marcato).expand(loud);
        assert!(events[0].velocity() <= 1.0);
    }
}
