//! Domain error types

use thiserror::Error;

use crate::domain::sequence::SequenceId;

/// Error when parsing a session length string
#[derive(Debug, Clone, Error)]
#[error("Invalid session length: \"{input}\". Expected <number>s, <number>m, or <number>m<number>s longer than 2s (e.g., 45s, 1m, 1m30s)")]
pub struct SessionLengthParseError {
    pub input: String,
}

/// Error when a sequence or segment definition is invalid
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SequenceError {
    #[error("Sequence '{0}' has no segments")]
    Empty(SequenceId),

    #[error("Segment clip name must not be empty")]
    EmptyClipName,

    #[error("Segment '{clip}' has invalid duration {value}; must be a positive number of seconds")]
    InvalidDuration { clip: String, value: f64 },

    #[error("Segment '{clip}' has invalid start offset {value}; must be zero or more seconds")]
    InvalidOffset { clip: String, value: f64 },

    #[error("Clip '{clip}' has invalid playback rate {value}; must be a positive number")]
    InvalidRate { clip: String, value: f32 },
}

/// Non-fatal problem surfaced while a session runs.
/// None of these interrupt the schedule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionWarning {
    #[error("Sound clip not found: {clip}")]
    AssetMissing { clip: String },

    #[error("Audio playback failed: {0}")]
    PlaybackSetupFailed(String),

    #[error("Notification not delivered: {0}")]
    NotificationDenied(String),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_error_mentions_input() {
        let err = SessionLengthParseError {
            input: "1h".to_string(),
        };
        assert!(err.to_string().contains("\"1h\""));
    }

    #[test]
    fn empty_sequence_error_names_sequence() {
        let err = SequenceError::Empty(SequenceId::PreRoll);
        assert_eq!(err.to_string(), "Sequence 'preroll' has no segments");
    }

    #[test]
    fn warning_display() {
        let warning = SessionWarning::AssetMissing {
            clip: "beep".to_string(),
        };
        assert_eq!(warning.to_string(), "Sound clip not found: beep");
    }
}
