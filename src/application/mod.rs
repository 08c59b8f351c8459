//! Application layer - Use cases and port interfaces
//!
//! Contains the sequencing engine and trait definitions
//! for external system interactions.

pub mod player;
pub mod ports;
pub mod scheduler;

// Re-export use cases
pub use player::SequencePlayer;
pub use scheduler::{PhaseScheduler, WarningCallback, TICK_INTERVAL};
