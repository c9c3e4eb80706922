//! core/music-time/src/lib.rs
//! Exact rational time algebra plus meter/tempo/time-grid utilities built on top of it.
//!
//! [`Rational`] is the exact fraction type every offset and duration in the engine is expressed
//! in. [`Meter`], [`Tempo`], [`TimeGrid`] and [`TimePoint`]/[`TimeSpan`] are the ambient timing
//! vocabulary layered on top, used by the notation parser/formatter for cursor tracking and
//! measure validation.
//!
//! ```
//! use music_time::{Rational, TimePoint, TimeSpan};
//!
//! let start = TimePoint::new(Rational::ZERO);
//! let quarter = TimeSpan::new(Rational::new(1, 4).unwrap());
//! let after_two_quarters = start + quarter + quarter;
//! assert_eq!(after_two_quarters.beats(), Rational::new(1, 2).unwrap());
//! ```

pub mod meter;
pub mod rational;
pub mod tempo;
pub mod timegrid;
pub mod timespan;

pub use meter::Meter;
pub use rational::{Rational, RationalError};
pub use tempo::Tempo;
pub use timegrid::{GridConfig, TimeGrid};
pub use timespan::{TimePoint, TimeSpan};
