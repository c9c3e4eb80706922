//! notation/music-notation/src/directive.rs
//! `@name value` directives: dynamics, crescendo/diminuendo ramps, BPM ramps, and a generic
//! fallback for anything else.

use music_articulation::DynamicMark;
use music_time::Rational;

/// A directive value: a bare identifier, an integer, or a quoted string.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveValue {
    Identifier(String),
    Integer(i64),
    Quoted(String),
}

/// A parsed directive, anchored at the cursor time it was encountered.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// A steady dynamic level, e.g. `@mf`.
    Dynamic { time: Rational, mark: DynamicMark },
    /// `@cresc [to level]`.
    Crescendo { time: Rational, to: Option<DynamicMark> },
    /// `@dim [to level]`.
    Diminuendo { time: Rational, to: Option<DynamicMark> },
    /// `@bpm N -> M /duration`.
    BpmRamp { time: Rational, from: u32, to: u32, duration: Rational },
    /// Any other `@name value` directive.
    Generic { time: Rational, name: String, value: DirectiveValue },
}

impl Directive {
    /// The cursor time at which this directive was encountered.
    #[must_use]
    pub fn time(&self) -> Rational {
        match self {
            Directive::Dynamic { time, .. }
            | Directive::Crescendo { time, .. }
            | Directive::Diminuendo { time, .. }
            | Directive::BpmRamp { time, .. }
            | Directive::Generic { time, .. } => *time,
        }
    }
}

/// Render a directive back to its canonical `@name value` textual form.
#[must_use]
pub fn format_directive(directive: &Directive) -> String {
    match directive {
        Directive::Dynamic { mark, .. } => format!("@{}", mark.label()),
        Directive::Crescendo { to, .. } => match to {
            Some(mark) => format!("@cresc to {}", mark.label()),
            None => "@cresc".to_string(),
        },
        Directive::Diminuendo { to, .. } => match to {
            Some(mark) => format!("@dim to {}", mark.label()),
            None => "@dim".to_string(),
        },
        Directive::BpmRamp { from, to, duration, .. } => {
            format!("@bpm {from} -> {to} /{}", crate::duration::format_numeric(*duration))
        }
        Directive::Generic { name, value, .. } => match value {
            DirectiveValue::Identifier(id) => format!("@{name} {id}"),
            DirectiveValue::Integer(n) => format!("@{name} {n}"),
            DirectiveValue::Quoted(s) => format!("@{name} \"{s}\""),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_plain_dynamic() {
        let directive = Directive::Dynamic { time: Rational::ZERO, mark: DynamicMark::Mf };
        assert_eq!(format_directive(&directive), "@mf");
    }

    #[test]
    fn formats_crescendo_with_target() {
        let directive =
            Directive::Crescendo { time: Rational::ZERO, to: Some(DynamicMark::Ff) };
        assert_eq!(format_directive(&directive), "@cresc to ff");
    }

    #[test]
    fn formats_bpm_ramp() {
        let directive = Directive::BpmRamp {
            time: Rational::ZERO,
            from: 120,
            to: 140,
            duration: Rational::ONE,
        };
        assert_eq!(format_directive(&directive), "@bpm 120 -> 140 /4");
    }
}
