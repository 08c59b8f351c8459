//! Validated scheduler configuration

use std::collections::BTreeSet;
use std::time::Duration;

use crate::domain::sequence::{PlaybackRates, Sequence, SequenceId};
use crate::domain::session::SessionLength;

/// Clip played when the session completes
pub const DEFAULT_STOP_CUE: &str = "stop";

/// Delay before phase and completion notifications are shown
pub const NOTIFICATION_DELAY: Duration = Duration::from_secs(1);

/// Everything the scheduler needs to run a session.
/// Built once, never mutated while a session runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    pub length: SessionLength,
    pub preroll: Sequence,
    pub activity: Sequence,
    pub rates: PlaybackRates,
    pub stop_cue: String,
    pub notification_delay: Duration,
}

impl SchedulerConfig {
    /// Sequence bound to `id`
    pub fn sequence(&self, id: SequenceId) -> &Sequence {
        match id {
            SequenceId::PreRoll => &self.preroll,
            SequenceId::Activity => &self.activity,
        }
    }

    /// Every clip a session may ask the audio port to play
    pub fn clip_names(&self) -> BTreeSet<&str> {
        self.preroll
            .segments()
            .iter()
            .chain(self.activity.segments())
            .map(|s| s.name())
            .chain(std::iter::once(self.stop_cue.as_str()))
            .collect()
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            length: SessionLength::default(),
            preroll: Sequence::default_preroll(),
            activity: Sequence::default_activity(),
            rates: PlaybackRates::default(),
            stop_cue: DEFAULT_STOP_CUE.to_string(),
            notification_delay: NOTIFICATION_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_lookup_by_id() {
        let config = SchedulerConfig::default();
        assert_eq!(config.sequence(SequenceId::PreRoll).id(), SequenceId::PreRoll);
        assert_eq!(config.sequence(SequenceId::Activity).id(), SequenceId::Activity);
    }

    #[test]
    fn clip_names_are_deduplicated() {
        let config = SchedulerConfig::default();
        let names: Vec<_> = config.clip_names().into_iter().collect();
        assert_eq!(names, vec!["10brazil", "321beep", "beep", "stop"]);
    }
}
