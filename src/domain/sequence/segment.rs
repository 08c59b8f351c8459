//! Sound segment and sequence value objects

use std::fmt;
use std::time::Duration;

use crate::domain::error::SequenceError;

/// Stable identity of a sequence.
///
/// Sequences are compared by id, never by their contents, so two phases may
/// share the same list of segments without ambiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceId {
    /// Countdown played once before the first activity phase
    PreRoll,
    /// Cues played during activity and break phases
    Activity,
}

impl SequenceId {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PreRoll => "preroll",
            Self::Activity => "activity",
        }
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One audio cue in a sequence.
/// Equal iff name, duration and start offset are all equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoundSegment {
    name: String,
    duration: Duration,
    start_offset: Option<Duration>,
}

impl SoundSegment {
    /// Create a segment that plays its clip from the beginning
    pub fn new(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            duration,
            start_offset: None,
        }
    }

    /// Create a segment that starts `start_offset` into its clip
    pub fn with_offset(name: impl Into<String>, duration: Duration, start_offset: Duration) -> Self {
        Self {
            name: name.into(),
            duration,
            start_offset: Some(start_offset),
        }
    }

    /// Build a segment from fractional seconds, as found in config files
    pub fn from_secs_f64(
        name: impl Into<String>,
        duration_secs: f64,
        start_offset_secs: Option<f64>,
    ) -> Result<Self, SequenceError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SequenceError::EmptyClipName);
        }

        let duration = Duration::try_from_secs_f64(duration_secs)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or_else(|| SequenceError::InvalidDuration {
                clip: name.clone(),
                value: duration_secs,
            })?;

        let start_offset = start_offset_secs
            .map(|secs| {
                Duration::try_from_secs_f64(secs).map_err(|_| SequenceError::InvalidOffset {
                    clip: name.clone(),
                    value: secs,
                })
            })
            .transpose()?;

        Ok(Self {
            name,
            duration,
            start_offset,
        })
    }

    /// Clip name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time the segment occupies in the schedule at normal speed
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Offset into the clip at which playback begins, if any
    pub fn start_offset(&self) -> Option<Duration> {
        self.start_offset
    }

    /// Wall-clock time the segment lasts when its clip plays at `rate`
    pub fn slot_length(&self, rate: f32) -> Duration {
        self.duration.div_f64(f64::from(rate))
    }
}

/// Ordered, immutable, non-empty list of segments with a stable identity
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    id: SequenceId,
    segments: Vec<SoundSegment>,
}

impl Sequence {
    /// Create a sequence. Fails if `segments` is empty.
    pub fn new(id: SequenceId, segments: Vec<SoundSegment>) -> Result<Self, SequenceError> {
        if segments.is_empty() {
            return Err(SequenceError::Empty(id));
        }
        Ok(Self { id, segments })
    }

    /// Countdown cue played once before the workout starts
    pub fn default_preroll() -> Self {
        Self {
            id: SequenceId::PreRoll,
            segments: vec![SoundSegment::new("321beep", Duration::from_secs(3))],
        }
    }

    /// Cues for one activity (or break) period
    pub fn default_activity() -> Self {
        let beep = SoundSegment::new("beep", Duration::from_millis(660));
        Self {
            id: SequenceId::Activity,
            segments: vec![
                SoundSegment::new("10brazil", Duration::from_secs(8)),
                beep.clone(),
                beep.clone(),
                beep,
            ],
        }
    }

    pub fn id(&self) -> SequenceId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: construction rejects empty sequences
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SoundSegment> {
        self.segments.get(index)
    }

    pub fn segments(&self) -> &[SoundSegment] {
        &self.segments
    }
}
