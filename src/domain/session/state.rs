//! Session state machine

use std::fmt;

use crate::domain::sequence::SequenceId;

/// Session phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    PreRoll,
    Activity,
    Break,
    Completed,
}

impl Phase {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PreRoll => "pre-roll",
            Self::Activity => "activity",
            Self::Break => "break",
            Self::Completed => "completed",
        }
    }

    /// Sequence that plays while in this phase.
    /// Break reuses the activity cues.
    pub const fn sequence(&self) -> Option<SequenceId> {
        match self {
            Self::PreRoll => Some(SequenceId::PreRoll),
            Self::Activity | Self::Break => Some(SequenceId::Activity),
            Self::Idle | Self::Completed => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only view of a session, published to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub is_running: bool,
    pub elapsed_seconds: u32,
    pub phase: Phase,
}

/// Session state owned by the scheduler.
///
/// State machine:
///   IDLE -> PRE-ROLL (begin)
///   PRE-ROLL -> ACTIVITY (enter_activity)
///   ACTIVITY <-> BREAK (flip_phase)
///   any running phase -> COMPLETED (complete)
///   any -> IDLE (clear)
///
/// `halt` freezes the session in whatever phase it is in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    is_running: bool,
    elapsed_seconds: u32,
    phase: Phase,
    sequence_index: usize,
}

impl SessionState {
    /// Create an idle session
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sequence_index(&self) -> usize {
        self.sequence_index
    }

    /// Whether a new session may begin from here
    pub fn can_begin(&self) -> bool {
        !self.is_running && self.phase != Phase::Completed
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            is_running: self.is_running,
            elapsed_seconds: self.elapsed_seconds,
            phase: self.phase,
        }
    }

    /// Start a fresh session in pre-roll
    pub fn begin(&mut self) {
        debug_assert!(self.can_begin(), "begin called while {}", self.phase);
        self.is_running = true;
        self.elapsed_seconds = 0;
        self.phase = Phase::PreRoll;
        self.sequence_index = 0;
    }

    /// Count one elapsed second, returning the new total
    pub fn tick(&mut self) -> u32 {
        debug_assert!(self.is_running, "tick while stopped");
        self.elapsed_seconds += 1;
        self.elapsed_seconds
    }

    /// Move to the next segment, returning the new index
    pub fn advance_index(&mut self) -> usize {
        self.sequence_index += 1;
        self.sequence_index
    }

    /// Pre-roll finished
    pub fn enter_activity(&mut self) {
        assert_eq!(
            self.phase,
            Phase::PreRoll,
            "activity can only follow pre-roll"
        );
        self.phase = Phase::Activity;
        self.sequence_index = 0;
    }

    /// Swap activity and break, returning the new phase
    pub fn flip_phase(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Activity => Phase::Break,
            Phase::Break => Phase::Activity,
            other => panic!("cannot flip phase from {other}"),
        };
        self.sequence_index = 0;
        self.phase
    }

    /// Total duration reached
    pub fn complete(&mut self) {
        self.is_running = false;
        self.phase = Phase::Completed;
    }

    /// Stop without changing phase or elapsed time
    pub fn halt(&mut self) {
        self.is_running = false;
    }

    /// Back to idle with zeroed counters
    pub fn clear(&mut self) {
        debug_assert!(!self.is_running, "clear while running");
        self.elapsed_seconds = 0;
        self.sequence_index = 0;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let state = SessionState::new();
        assert!(!state.is_running());
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.elapsed_seconds(), 0);
        assert!(state.can_begin());
    }

    #[test]
    fn begin_enters_preroll() {
        let mut state = SessionState::new();
        state.begin();
        assert!(state.is_running());
        assert_eq!(state.phase(), Phase::PreRoll);
        assert_eq!(state.sequence_index(), 0);
        assert!(!state.can_begin());
    }

    #[test]
    fn full_cycle() {
        let mut state = SessionState::new();
        state.begin();
        state.advance_index();
        state.enter_activity();
        assert_eq!(state.phase(), Phase::Activity);
        assert_eq!(state.sequence_index(), 0);

        assert_eq!(state.flip_phase(), Phase::Break);
        assert_eq!(state.flip_phase(), Phase::Activity);

        state.tick();
        state.complete();
        assert!(!state.is_running());
        assert_eq!(state.phase(), Phase::Completed);
        assert!(!state.can_begin());

        state.clear();
        assert_eq!(state, SessionState::new());
    }

    #[test]
    #[should_panic(expected = "activity can only follow pre-roll")]
    fn enter_activity_outside_preroll_panics() {
        let mut state = SessionState::new();
        state.enter_activity();
    }

    #[test]
    #[should_panic(expected = "cannot flip phase")]
    fn flip_from_preroll_panics() {
        let mut state = SessionState::new();
        state.begin();
        state.flip_phase();
    }

    #[test]
    fn halt_keeps_phase_and_elapsed() {
        let mut state = SessionState::new();
        state.begin();
        state.advance_index();
        state.enter_activity();
        state.tick();
        state.tick();
        state.halt();

        assert!(!state.is_running());
        assert_eq!(state.phase(), Phase::Activity);
        assert_eq!(state.elapsed_seconds(), 2);
        assert!(state.can_begin());
    }

    #[test]
    fn phase_sequence_binding() {
        assert_eq!(Phase::PreRoll.sequence(), Some(SequenceId::PreRoll));
        assert_eq!(Phase::Activity.sequence(), Some(SequenceId::Activity));
        assert_eq!(Phase::Break.sequence(), Some(SequenceId::Activity));
        assert_eq!(Phase::Idle.sequence(), None);
        assert_eq!(Phase::Completed.sequence(), None);
    }

    #[test]
    fn phase_display() {
        assert_eq!(Phase::PreRoll.to_string(), "pre-roll");
        assert_eq!(Phase::Break.to_string(), "break");
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut state = SessionState::new();
        state.begin();
        let snapshot = state.snapshot();
        assert!(snapshot.is_running);
        assert_eq!(snapshot.phase, Phase::PreRoll);
        assert_eq!(snapshot.elapsed_seconds, 0);
    }
}
