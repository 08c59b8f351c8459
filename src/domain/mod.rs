//! Domain layer - Core timer logic
//!
//! Contains value objects, the session state machine, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod sequence;
pub mod session;

// Re-export common types
pub use config::{AppConfig, SchedulerConfig, SegmentConfig};
pub use error::*;
pub use sequence::{PlaybackRates, Sequence, SequenceId, SoundSegment};
pub use session::{Phase, SessionLength, SessionSnapshot, SessionState};
