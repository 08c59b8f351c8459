//! Infrastructure layer - Adapter implementations
//!
//! Concrete implementations of the port interfaces: rodio playback,
//! desktop notifications, tokio and virtual clocks, and the TOML config store.
//! Adapters report failures found after a call returned via [`AdapterWarnings`].

pub mod audio;
pub mod clock;
pub mod config;
pub mod notification;
pub mod warnings;

// Re-export adapters
pub use audio::{
    create_audio_port, ClipLibrary, NoOpAudioPort, PlaybackRequest, RodioAudioPort,
    TimelineAudioPort,
};
pub use clock::{TokioClock, VirtualClock};
pub use config::XdgConfigStore;
pub use notification::{
    create_notifier, NoOpNotifier, NotificationRequest, NotifyRustNotifier, TimelineNotifier,
};
pub use warnings::AdapterWarnings;
