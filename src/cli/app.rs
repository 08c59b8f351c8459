//! Session runners: real time and dry run

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::application::PhaseScheduler;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::{Phase, SessionSnapshot, SessionWarning};
use crate::infrastructure::{
    create_audio_port, create_notifier, AdapterWarnings, ClipLibrary, PlaybackRequest,
    TimelineAudioPort, TimelineNotifier, TokioClock, VirtualClock,
};

use super::args::SessionOptions;
use super::presenter::Presenter;
use super::signals::{ShutdownReason, ShutdownSignal};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Minimum time to stay alive after completion so the stop cue is heard
const COMPLETION_LINGER: Duration = Duration::from_secs(2);

/// How a real-time session ended
enum SessionEnd {
    Completed(SessionSnapshot),
    Stopped(ShutdownReason),
}

/// Load and merge configuration: defaults < file < cli
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
) -> Result<AppConfig, ConfigError> {
    let file_config = store.load().await?;

    Ok(AppConfig::defaults().merge(file_config).merge(cli_config))
}

/// Validate merged configuration into session options
pub fn resolve_options(config: &AppConfig) -> Result<SessionOptions, ConfigError> {
    let scheduler = config.to_scheduler_config()?;
    let sounds_dir = config
        .sounds_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(ClipLibrary::default_dir);

    Ok(SessionOptions {
        scheduler,
        sounds_dir,
        audio: config.audio_or_default(),
        notify: config.notify_or_default(),
    })
}

/// Run one session in real time until it completes or is interrupted
pub async fn run_session(options: SessionOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let mut shutdown = match ShutdownSignal::listen() {
        Ok(signal) => signal,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let library = ClipLibrary::new(&options.sounds_dir);
    if options.audio {
        let missing = library.missing(options.scheduler.clip_names());
        if !missing.is_empty() {
            presenter.warn(&format!(
                "Missing clips in {}: {}",
                library.root().display(),
                missing.join(", ")
            ));
        }
    }

    // Scheduler and adapters share one warning channel
    let (warning_tx, mut warnings) = mpsc::unbounded_channel::<SessionWarning>();
    let adapter_warnings = AdapterWarnings::new(warning_tx.clone());

    let (audio, audio_error) = create_audio_port(options.audio, library, adapter_warnings.clone());
    if let Some(e) = audio_error {
        presenter.warn(&format!("{}; continuing without sound", e));
    }
    let notifier = create_notifier(options.notify, adapter_warnings);

    let linger = if options.notify {
        COMPLETION_LINGER.max(options.scheduler.notification_delay + Duration::from_millis(500))
    } else {
        COMPLETION_LINGER
    };
    let total_secs = options.scheduler.length.as_secs();

    let (clock, mut timers) = TokioClock::new();
    let mut scheduler = PhaseScheduler::new(audio, notifier, Arc::new(clock), options.scheduler)
        .with_warning_callback(Box::new(move |warning: &SessionWarning| {
            let _ = warning_tx.send(warning.clone());
        }));
    let mut snapshots = scheduler.subscribe();

    presenter.info(&format!("Session of {}s, Ctrl+C to stop", total_secs));
    presenter.start_session(total_secs);
    scheduler.start().await;

    let end = loop {
        tokio::select! {
            Some(fired) = timers.recv() => scheduler.handle_timer(fired).await,
            Some(warning) = warnings.recv() => presenter.warn(&warning.to_string()),
            Ok(()) = snapshots.changed() => {
                let snapshot = *snapshots.borrow_and_update();
                presenter.update_session(&snapshot);
                if snapshot.phase == Phase::Completed {
                    break SessionEnd::Completed(snapshot);
                }
            }
            Some(reason) = shutdown.recv() => break SessionEnd::Stopped(reason),
        }
    };

    match end {
        SessionEnd::Completed(snapshot) => {
            presenter.finish_session("completed");
            presenter.success(&format!(
                "Session complete after {}s",
                snapshot.elapsed_seconds
            ));

            debug!(linger_ms = linger.as_millis() as u64, "waiting for final cues");
            tokio::select! {
                _ = tokio::time::sleep(linger) => {}
                _ = shutdown.recv() => {}
            }
        }
        SessionEnd::Stopped(reason) => {
            scheduler.stop().await;
            let snapshot = scheduler.snapshot();
            presenter.finish_session("stopped");
            presenter.info(&format!(
                "Stopped by {} at {}s during {}",
                reason, snapshot.elapsed_seconds, snapshot.phase
            ));
        }
    }

    while let Ok(warning) = warnings.try_recv() {
        presenter.warn(&warning.to_string());
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Run the session on a virtual clock and print its timeline
pub async fn run_dry_run(options: SessionOptions) -> ExitCode {
    let presenter = Presenter::new();
    let show_audio = options.audio;
    let show_notifications = options.notify;

    let clock = Arc::new(VirtualClock::new());
    let audio = Arc::new(TimelineAudioPort::new());
    let notifier = Arc::new(TimelineNotifier::new());
    let mut scheduler = PhaseScheduler::new(
        Arc::clone(&audio),
        Arc::clone(&notifier),
        clock.clone(),
        options.scheduler,
    );

    let mut last = scheduler.snapshot();
    scheduler.start().await;

    loop {
        let now = clock.now();
        let snapshot = scheduler.snapshot();
        if snapshot.phase != last.phase {
            let event = match snapshot.phase {
                Phase::Completed => format!("■ completed at elapsed {}s", snapshot.elapsed_seconds),
                phase => format!("▶ {} (elapsed {}s)", phase, snapshot.elapsed_seconds),
            };
            presenter.timeline(now, &event);
        }
        last = snapshot;

        for request in audio.drain() {
            if show_audio {
                presenter.timeline(now, &describe_playback(&request));
            }
        }
        for notification in notifier.drain() {
            if show_notifications {
                presenter.timeline(
                    now + notification.delay,
                    &format!("✉ {}: {}", notification.title, notification.body),
                );
            }
        }

        let Some(fired) = clock.pop_due(Duration::MAX) else {
            break;
        };
        scheduler.handle_timer(fired).await;
    }

    ExitCode::from(EXIT_SUCCESS)
}

fn describe_playback(request: &PlaybackRequest) -> String {
    match request {
        PlaybackRequest::FromStart { clip } => format!("♪ {}", clip),
        PlaybackRequest::Segment {
            clip,
            start_offset,
            duration,
            rate,
        } => format!(
            "♪ {} from {:.3}s for {:.3}s at {}x",
            clip,
            start_offset.as_secs_f64(),
            duration.as_secs_f64(),
            rate
        ),
        PlaybackRequest::Stop => "■ stop audio".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;
    use tempfile::TempDir;

    #[test]
    fn resolve_options_uses_defaults() {
        let options = resolve_options(&AppConfig::defaults()).unwrap();
        assert_eq!(options.scheduler.length.as_secs(), 60);
        assert_eq!(options.sounds_dir, ClipLibrary::default_dir());
        assert!(options.audio);
        assert!(options.notify);
    }

    #[test]
    fn resolve_options_rejects_invalid_total() {
        let config = AppConfig {
            total_duration: Some("soon".to_string()),
            ..AppConfig::defaults()
        };
        assert!(resolve_options(&config).is_err());
    }

    #[tokio::test]
    async fn cli_config_wins_over_file() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        store
            .save(&AppConfig {
                total_duration: Some("2m".to_string()),
                notify: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();

        let cli = AppConfig {
            total_duration: Some("30s".to_string()),
            ..Default::default()
        };
        let merged = load_merged_config(&store, cli).await.unwrap();

        assert_eq!(merged.total_duration, Some("30s".to_string()));
        assert_eq!(merged.notify, Some(false));
        assert_eq!(merged.stop_cue, Some("stop".to_string()));
    }

    #[test]
    fn describe_segment_playback() {
        let request = PlaybackRequest::Segment {
            clip: "10brazil".to_string(),
            start_offset: Duration::ZERO,
            duration: Duration::from_secs(8),
            rate: 1.25,
        };
        assert_eq!(
            describe_playback(&request),
            "♪ 10brazil from 0.000s for 8.000s at 1.25x"
        );
    }
}
