//! Rodio-based audio adapter
//!
//! Decodes clips from a [`ClipLibrary`] and plays them on a dedicated audio
//! thread. rodio's output stream can't leave the thread that opened it, so
//! the port only sends decoded sources over a channel.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::debug;

use crate::application::ports::{AudioError, AudioPort};
use crate::domain::SessionWarning;
use crate::infrastructure::warnings::AdapterWarnings;

use super::library::ClipLibrary;

type BoxedSource = Box<dyn Source<Item = i16> + Send>;

enum AudioCommand {
    Play(BoxedSource),
    Stop,
}

/// Part of a clip to play
#[derive(Debug, Clone, Copy)]
struct Window {
    start_offset: Duration,
    duration: Duration,
    rate: f32,
}

/// Audio port implementation using rodio
pub struct RodioAudioPort {
    library: ClipLibrary,
    commands: Mutex<Sender<AudioCommand>>,
}

impl RodioAudioPort {
    /// Open the default output device on a new audio thread.
    ///
    /// Playback failures found on that thread go to `warnings`.
    pub fn new(library: ClipLibrary, warnings: AdapterWarnings) -> Result<Self, AudioError> {
        let (commands, receiver) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);

        thread::Builder::new()
            .name("hang-timer-audio".to_string())
            .spawn(move || run_audio_thread(receiver, ready_tx, warnings))
            .map_err(|e| AudioError::PlaybackSetupFailed(e.to_string()))?;

        ready_rx.recv().map_err(|_| {
            AudioError::PlaybackSetupFailed("Audio thread exited during setup".to_string())
        })??;

        Ok(Self {
            library,
            commands: Mutex::new(commands),
        })
    }

    fn send(&self, command: AudioCommand) -> Result<(), AudioError> {
        self.commands
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .send(command)
            .map_err(|_| AudioError::PlaybackSetupFailed("Audio thread has stopped".to_string()))
    }

    async fn play(&self, clip: &str, window: Option<Window>) -> Result<(), AudioError> {
        let path = self
            .library
            .resolve(clip)
            .ok_or_else(|| AudioError::AssetMissing {
                clip: clip.to_string(),
            })?;

        debug!(clip, path = %path.display(), ?window, "decoding clip");

        // File I/O and decoder probing stay off the scheduling task
        let source = tokio::task::spawn_blocking(move || open_source(&path, window))
            .await
            .map_err(|e| AudioError::PlaybackSetupFailed(format!("Task join error: {}", e)))??;

        self.send(AudioCommand::Play(source))
    }
}

#[async_trait]
impl AudioPort for RodioAudioPort {
    async fn play_from_start(&self, clip: &str) -> Result<(), AudioError> {
        self.play(clip, None).await
    }

    async fn play_segment(
        &self,
        clip: &str,
        start_offset: Duration,
        duration: Duration,
        rate: f32,
    ) -> Result<(), AudioError> {
        let window = Window {
            start_offset,
            duration,
            rate,
        };
        self.play(clip, Some(window)).await
    }

    async fn stop(&self) -> Result<(), AudioError> {
        self.send(AudioCommand::Stop)
    }
}

/// Decode a clip and trim it to `window`
fn open_source(path: &Path, window: Option<Window>) -> Result<BoxedSource, AudioError> {
    let file = File::open(path)
        .map_err(|e| AudioError::PlaybackSetupFailed(format!("{}: {}", path.display(), e)))?;
    let decoder = Decoder::new(BufReader::new(file))
        .map_err(|e| AudioError::PlaybackSetupFailed(format!("{}: {}", path.display(), e)))?;

    let source: BoxedSource = match window {
        None => Box::new(decoder),
        Some(w) => Box::new(
            decoder
                .skip_duration(w.start_offset)
                .take_duration(w.duration)
                .speed(w.rate),
        ),
    };
    Ok(source)
}

/// Owns the output stream; one sink per clip, replaced on every command
fn run_audio_thread(
    commands: Receiver<AudioCommand>,
    ready: SyncSender<Result<(), AudioError>>,
    warnings: AdapterWarnings,
) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            let _ = ready.send(Err(AudioError::PlaybackSetupFailed(e.to_string())));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    let mut current: Option<Sink> = None;
    while let Ok(command) = commands.recv() {
        if let Some(sink) = current.take() {
            sink.stop();
        }

        match command {
            AudioCommand::Play(source) => match Sink::try_new(&handle) {
                Ok(sink) => {
                    sink.append(source);
                    current = Some(sink);
                }
                Err(e) => warnings.report(SessionWarning::PlaybackSetupFailed(format!(
                    "failed to open audio sink: {}",
                    e
                ))),
            },
            AudioCommand::Stop => {}
        }
    }

    debug!("audio thread exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_source_reports_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beep.mp3");
        std::fs::write(&path, b"not audio").unwrap();

        let err = open_source(&path, None).err().unwrap();
        assert!(matches!(err, AudioError::PlaybackSetupFailed(_)));
    }

    // Note: These tests require audio hardware and may not work in CI
    // They are marked as ignored by default

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn missing_clip_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let audio = RodioAudioPort::new(ClipLibrary::new(dir.path()), AdapterWarnings::detached()).unwrap();

        let err = audio.play_from_start("beep").await.unwrap_err();
        assert_eq!(
            err,
            AudioError::AssetMissing {
                clip: "beep".to_string()
            }
        );
    }

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn stop_without_playback_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let audio = RodioAudioPort::new(ClipLibrary::new(dir.path()), AdapterWarnings::detached()).unwrap();
        assert!(audio.stop().await.is_ok());
    }
}
