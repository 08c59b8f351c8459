//! Timeline audio adapter
//!
//! Records every playback request instead of playing it. Drives the dry-run
//! output and lets tests assert exactly what was asked of the audio port.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{AudioError, AudioPort};

/// One request made to the audio port
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackRequest {
    FromStart {
        clip: String,
    },
    Segment {
        clip: String,
        start_offset: Duration,
        duration: Duration,
        rate: f32,
    },
    Stop,
}

impl PlaybackRequest {
    /// Clip named by the request, if any
    pub fn clip(&self) -> Option<&str> {
        match self {
            Self::FromStart { clip } | Self::Segment { clip, .. } => Some(clip),
            Self::Stop => None,
        }
    }
}

/// Audio port that records requests
#[derive(Debug, Default)]
pub struct TimelineAudioPort {
    requests: Mutex<Vec<PlaybackRequest>>,
    missing: HashSet<String>,
    /// Every clip request fails with this setup error
    setup_failure: Option<String>,
}

impl TimelineAudioPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `clips` as missing assets: requests for them are recorded but
    /// fail with [`AudioError::AssetMissing`]
    pub fn with_missing<I, S>(clips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            missing: clips.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Behave like an unusable output device: clip requests are recorded but
    /// fail with [`AudioError::PlaybackSetupFailed`]
    pub fn with_setup_failure(reason: impl Into<String>) -> Self {
        Self {
            setup_failure: Some(reason.into()),
            ..Self::default()
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<PlaybackRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// All requests so far
    pub fn requests(&self) -> Vec<PlaybackRequest> {
        self.lock().clone()
    }

    /// Requests since the last drain
    pub fn drain(&self) -> Vec<PlaybackRequest> {
        std::mem::take(&mut *self.lock())
    }

    fn record(&self, request: PlaybackRequest) -> Result<(), AudioError> {
        let clip = request.clip().map(str::to_string);
        self.lock().push(request);

        let Some(clip) = clip else {
            return Ok(());
        };
        if let Some(ref reason) = self.setup_failure {
            return Err(AudioError::PlaybackSetupFailed(reason.clone()));
        }
        if self.missing.contains(&clip) {
            return Err(AudioError::AssetMissing { clip });
        }
        Ok(())
    }
}

#[async_trait]
impl AudioPort for TimelineAudioPort {
    async fn play_from_start(&self, clip: &str) -> Result<(), AudioError> {
        self.record(PlaybackRequest::FromStart {
            clip: clip.to_string(),
        })
    }

    async fn play_segment(
        &self,
        clip: &str,
        start_offset: Duration,
        duration: Duration,
        rate: f32,
    ) -> Result<(), AudioError> {
        self.record(PlaybackRequest::Segment {
            clip: clip.to_string(),
            start_offset,
            duration,
            rate,
        })
    }

    async fn stop(&self) -> Result<(), AudioError> {
        self.record(PlaybackRequest::Stop)
    }
}
