//! Sequence domain module

mod rates;
mod segment;

pub use rates::{PlaybackRates, NORMAL_RATE};
pub use segment::{Sequence, SequenceId, SoundSegment};
