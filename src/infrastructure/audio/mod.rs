//! Audio infrastructure adapters

mod library;
mod noop;
mod rodio;
mod timeline;

pub use library::{ClipLibrary, CLIP_EXTENSIONS};
pub use noop::NoOpAudioPort;
pub use rodio::RodioAudioPort;
pub use timeline::{PlaybackRequest, TimelineAudioPort};

use tracing::warn;

use crate::application::ports::{AudioError, AudioPort};
use crate::infrastructure::warnings::AdapterWarnings;

/// Create an audio port based on whether audio is enabled.
///
/// Falls back to silence when the output device can't be opened; the error
/// is returned alongside so the caller can surface it. Failures during
/// playback go to `warnings`.
pub fn create_audio_port(
    enabled: bool,
    library: ClipLibrary,
    warnings: AdapterWarnings,
) -> (Box<dyn AudioPort>, Option<AudioError>) {
    if !enabled {
        return (Box::new(NoOpAudioPort::new()), None);
    }

    match RodioAudioPort::new(library, warnings) {
        Ok(port) => (Box::new(port), None),
        Err(e) => {
            warn!(error = %e, "audio unavailable, continuing silently");
            (Box::new(NoOpAudioPort::new()), Some(e))
        }
    }
}
