//! No-op audio adapter
//!
//! Used when audio is muted or no output device is available. The session
//! still runs on time; it is just silent.

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{AudioError, AudioPort};

/// Audio port that plays nothing
pub struct NoOpAudioPort;

impl NoOpAudioPort {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpAudioPort {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioPort for NoOpAudioPort {
    async fn play_from_start(&self, _clip: &str) -> Result<(), AudioError> {
        Ok(())
    }

    async fn play_segment(
        &self,
        _clip: &str,
        _start_offset: Duration,
        _duration: Duration,
        _rate: f32,
    ) -> Result<(), AudioError> {
        Ok(())
    }

    async fn stop(&self) -> Result<(), AudioError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_returns_ok() {
        let audio = NoOpAudioPort::new();
        assert!(audio.play_from_start("beep").await.is_ok());
        assert!(audio
            .play_segment("10brazil", Duration::ZERO, Duration::from_secs(8), 1.25)
            .await
            .is_ok());
        assert!(audio.stop().await.is_ok());
    }
}
