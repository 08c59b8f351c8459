//! Hang Timer - interval timer with audio cues
//!
//! This crate provides a sequencing engine that plays named sound segments,
//! alternates between activity and break phases, and fires notifications at
//! phase transitions over a fixed total duration.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Sequences, playback rates, the session state machine, config, and errors
//! - **Application**: Port interfaces (traits), the sequence player, and the phase scheduler
//! - **Infrastructure**: Adapter implementations (rodio, notify-rust, tokio and virtual clocks, TOML config)
//! - **CLI**: Command-line interface, argument parsing, logging, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
