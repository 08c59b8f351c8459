//! Application configuration value object

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::{ConfigError, SequenceError, SessionLengthParseError};
use crate::domain::sequence::{PlaybackRates, Sequence, SequenceId, SoundSegment};
use crate::domain::session::SessionLength;

use super::scheduler::{SchedulerConfig, DEFAULT_STOP_CUE};

/// One segment as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    pub clip: String,
    /// Seconds the segment occupies (fractions allowed)
    pub duration: f64,
    /// Seconds into the clip where playback begins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<f64>,
}

impl SegmentConfig {
    fn from_segment(segment: &SoundSegment) -> Self {
        Self {
            clip: segment.name().to_string(),
            duration: segment.duration().as_secs_f64(),
            start_offset: segment.start_offset().map(|d| d.as_secs_f64()),
        }
    }

    fn to_segment(&self) -> Result<SoundSegment, SequenceError> {
        SoundSegment::from_secs_f64(self.clip.clone(), self.duration, self.start_offset)
    }
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub total_duration: Option<String>,
    pub sounds_dir: Option<String>,
    pub audio: Option<bool>,
    pub notify: Option<bool>,
    pub stop_cue: Option<String>,
    pub rates: Option<BTreeMap<String, f32>>,
    pub preroll: Option<Vec<SegmentConfig>>,
    pub activity: Option<Vec<SegmentConfig>>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            total_duration: Some(SessionLength::default().to_string()),
            sounds_dir: None,
            audio: Some(true),
            notify: Some(true),
            stop_cue: Some(DEFAULT_STOP_CUE.to_string()),
            rates: Some(
                PlaybackRates::default()
                    .iter()
                    .map(|(clip, rate)| (clip.to_string(), rate))
                    .collect(),
            ),
            preroll: Some(
                Sequence::default_preroll()
                    .segments()
                    .iter()
                    .map(SegmentConfig::from_segment)
                    .collect(),
            ),
            activity: Some(
                Sequence::default_activity()
                    .segments()
                    .iter()
                    .map(SegmentConfig::from_segment)
                    .collect(),
            ),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this. Rate tables merge
    /// per clip, so overriding one clip keeps the others.
    pub fn merge(self, other: Self) -> Self {
        Self {
            total_duration: other.total_duration.or(self.total_duration),
            sounds_dir: other.sounds_dir.or(self.sounds_dir),
            audio: other.audio.or(self.audio),
            notify: other.notify.or(self.notify),
            stop_cue: other.stop_cue.or(self.stop_cue),
            rates: merge_rates(self.rates, other.rates),
            preroll: other.preroll.or(self.preroll),
            activity: other.activity.or(self.activity),
        }
    }

    /// Get total duration as parsed SessionLength, or default if not set/invalid
    pub fn total_duration_or_default(&self) -> SessionLength {
        self.total_duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get audio setting, or true if not set
    pub fn audio_or_default(&self) -> bool {
        self.audio.unwrap_or(true)
    }

    /// Get notify setting, or true if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(true)
    }

    /// Validate and convert into the scheduler's configuration.
    /// Unlike the `*_or_default` getters, invalid values are errors here.
    pub fn to_scheduler_config(&self) -> Result<SchedulerConfig, ConfigError> {
        let mut config = SchedulerConfig::default();

        if let Some(ref total) = self.total_duration {
            config.length = total
                .parse()
                .map_err(|e: SessionLengthParseError| ConfigError::ValidationError {
                    key: "total_duration".to_string(),
                    message: e.to_string(),
                })?;
        }

        if let Some(ref cue) = self.stop_cue {
            if cue.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    key: "stop_cue".to_string(),
                    message: "Clip name must not be empty".to_string(),
                });
            }
            config.stop_cue = cue.clone();
        }

        if let Some(ref rates) = self.rates {
            config.rates =
                PlaybackRates::from_map(rates.clone()).map_err(|e| validation("rates", e))?;
        }

        if let Some(ref segments) = self.preroll {
            config.preroll = build_sequence(SequenceId::PreRoll, segments)?;
        }

        if let Some(ref segments) = self.activity {
            config.activity = build_sequence(SequenceId::Activity, segments)?;
        }

        Ok(config)
    }
}

fn merge_rates(
    base: Option<BTreeMap<String, f32>>,
    other: Option<BTreeMap<String, f32>>,
) -> Option<BTreeMap<String, f32>> {
    match (base, other) {
        (Some(mut base), Some(other)) => {
            base.extend(other);
            Some(base)
        }
        (base, other) => other.or(base),
    }
}

fn build_sequence(id: SequenceId, segments: &[SegmentConfig]) -> Result<Sequence, ConfigError> {
    let segments = segments
        .iter()
        .map(SegmentConfig::to_segment)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| validation(id.as_str(), e))?;

    Sequence::new(id, segments).map_err(|e| validation(id.as_str(), e))
}

fn validation(key: &str, err: SequenceError) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.total_duration, Some("1m".to_string()));
        assert!(config.sounds_dir.is_none());
        assert_eq!(config.audio, Some(true));
        assert_eq!(config.notify, Some(true));
        assert_eq!(config.stop_cue, Some("stop".to_string()));
        assert_eq!(config.rates.as_ref().unwrap().get("10brazil"), Some(&1.25));
        assert_eq!(config.preroll.as_ref().unwrap().len(), 1);
        assert_eq!(config.activity.as_ref().unwrap().len(), 4);
    }

    #[test]
    fn defaults_convert_to_default_scheduler_config() {
        let config = AppConfig::defaults().to_scheduler_config().unwrap();
        assert_eq!(config, SchedulerConfig::default());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.total_duration.is_none());
        assert!(config.audio.is_none());
        assert!(config.rates.is_none());
        assert!(config.activity.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            total_duration: Some("1m".to_string()),
            sounds_dir: Some("/base".to_string()),
            notify: Some(true),
            ..Default::default()
        };

        let other = AppConfig {
            total_duration: Some("2m".to_string()),
            sounds_dir: None, // Should not override
            notify: Some(false),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.total_duration, Some("2m".to_string()));
        assert_eq!(merged.sounds_dir, Some("/base".to_string()));
        assert_eq!(merged.notify, Some(false));
    }

    #[test]
    fn merge_keeps_default_rates_for_other_clips() {
        let mut rates = BTreeMap::new();
        rates.insert("beep".to_string(), 1.5);
        let file = AppConfig {
            rates: Some(rates),
            ..Default::default()
        };

        let scheduler = AppConfig::defaults()
            .merge(file)
            .to_scheduler_config()
            .unwrap();

        assert_eq!(scheduler.rates.rate_for("10brazil"), 1.25);
        assert_eq!(scheduler.rates.rate_for("beep"), 1.5);
        let brazil = scheduler.activity.get(0).unwrap();
        assert_eq!(brazil.slot_length(1.25), Duration::from_millis(6400));
    }

    #[test]
    fn merge_overrides_rate_per_clip() {
        let mut rates = BTreeMap::new();
        rates.insert("10brazil".to_string(), 2.0);
        let merged = AppConfig::defaults().merge(AppConfig {
            rates: Some(rates),
            ..Default::default()
        });

        assert_eq!(merged.rates.unwrap().get("10brazil"), Some(&2.0));
    }

    #[test]
    fn total_duration_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            total_duration: Some("forever".to_string()),
            ..Default::default()
        };
        assert_eq!(config.total_duration_or_default().as_secs(), 60);
    }

    #[test]
    fn boolean_defaults() {
        let config = AppConfig::empty();
        assert!(config.audio_or_default());
        assert!(config.notify_or_default());
    }

    #[test]
    fn empty_config_converts_to_defaults() {
        let config = AppConfig::empty().to_scheduler_config().unwrap();
        assert_eq!(config, SchedulerConfig::default());
    }

    #[test]
    fn custom_activity_sequence() {
        let config = AppConfig {
            activity: Some(vec![
                SegmentConfig {
                    clip: "hang".to_string(),
                    duration: 7.0,
                    start_offset: Some(1.5),
                },
                SegmentConfig {
                    clip: "rest".to_string(),
                    duration: 3.0,
                    start_offset: None,
                },
            ]),
            ..Default::default()
        };

        let scheduler = config.to_scheduler_config().unwrap();
        assert_eq!(scheduler.activity.len(), 2);
        let first = scheduler.activity.get(0).unwrap();
        assert_eq!(first.name(), "hang");
        assert_eq!(first.start_offset(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn empty_sequence_fails_validation() {
        let config = AppConfig {
            preroll: Some(Vec::new()),
            ..Default::default()
        };
        let err = config.to_scheduler_config().unwrap_err();
        assert!(err.to_string().contains("preroll"));
    }

    #[test]
    fn invalid_total_duration_fails_validation() {
        let config = AppConfig {
            total_duration: Some("1s".to_string()),
            ..Default::default()
        };
        let err = config.to_scheduler_config().unwrap_err();
        assert!(err.to_string().contains("total_duration"));
    }

    #[test]
    fn invalid_rate_fails_validation() {
        let mut rates = BTreeMap::new();
        rates.insert("beep".to_string(), -2.0);
        let config = AppConfig {
            rates: Some(rates),
            ..Default::default()
        };
        assert!(config.to_scheduler_config().is_err());
    }
}
