//! Audio port for playing sound clips
//!
//! The scheduler only names clips; how they are stored and decoded is up to
//! the adapter. Calls are fire-and-forget: they return once playback has been
//! handed off, not when it ends.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::SessionWarning;

/// Errors that can occur when starting playback
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No clip with this name could be found
    #[error("Sound clip not found: {clip}")]
    AssetMissing { clip: String },

    /// The audio subsystem refused to play
    #[error("Playback setup failed: {0}")]
    PlaybackSetupFailed(String),
}

impl From<AudioError> for SessionWarning {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::AssetMissing { clip } => SessionWarning::AssetMissing { clip },
            AudioError::PlaybackSetupFailed(msg) => SessionWarning::PlaybackSetupFailed(msg),
        }
    }
}

/// Port trait for clip playback.
///
/// Starting a clip replaces whatever was playing before.
#[async_trait]
pub trait AudioPort: Send + Sync {
    /// Play a clip from its beginning at normal speed
    async fn play_from_start(&self, clip: &str) -> Result<(), AudioError>;

    /// Play `duration` of a clip starting at `start_offset`, at `rate`.
    ///
    /// The clip content consumed is `duration`; at a rate above 1.0 it
    /// finishes after `duration / rate` of wall-clock time.
    async fn play_segment(
        &self,
        clip: &str,
        start_offset: Duration,
        duration: Duration,
        rate: f32,
    ) -> Result<(), AudioError>;

    /// Stop any in-progress playback
    async fn stop(&self) -> Result<(), AudioError>;
}

/// Blanket implementation for boxed audio ports
#[async_trait]
impl AudioPort for Box<dyn AudioPort> {
    async fn play_from_start(&self, clip: &str) -> Result<(), AudioError> {
        self.as_ref().play_from_start(clip).await
    }

    async fn play_segment(
        &self,
        clip: &str,
        start_offset: Duration,
        duration: Duration,
        rate: f32,
    ) -> Result<(), AudioError> {
        self.as_ref()
            .play_segment(clip, start_offset, duration, rate)
            .await
    }

    async fn stop(&self) -> Result<(), AudioError> {
        self.as_ref().stop().await
    }
}

/// Shared audio ports, so a caller can keep a handle to the adapter
#[async_trait]
impl<T: AudioPort + ?Sized> AudioPort for Arc<T> {
    async fn play_from_start(&self, clip: &str) -> Result<(), AudioError> {
        self.as_ref().play_from_start(clip).await
    }

    async fn play_segment(
        &self,
        clip: &str,
        start_offset: Duration,
        duration: Duration,
        rate: f32,
    ) -> Result<(), AudioError> {
        self.as_ref()
            .play_segment(clip, start_offset, duration, rate)
            .await
    }

    async fn stop(&self) -> Result<(), AudioError> {
        self.as_ref().stop().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_errors_become_warnings() {
        let warning: SessionWarning = AudioError::AssetMissing {
            clip: "beep".to_string(),
        }
        .into();
        assert_eq!(
            warning,
            SessionWarning::AssetMissing {
                clip: "beep".to_string()
            }
        );

        let warning: SessionWarning = AudioError::PlaybackSetupFailed("no device".to_string()).into();
        assert!(warning.to_string().contains("no device"));
    }
}
