//! Clock port: the single timer source behind a session
//!
//! Timers don't call back into the scheduler directly. An expired timer is
//! delivered as a [`TimerFired`] value to whoever drives the scheduler, which
//! passes it to `PhaseScheduler::handle_timer`.

use std::fmt;
use std::time::Duration;

/// What an armed timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// One-second elapsed-time tick
    Tick,
    /// The current segment's slot has run out
    SegmentFinished,
}

/// Identifies one armed timer. Never reused by a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// An expired timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub handle: TimerHandle,
    pub kind: TimerKind,
}

/// Port for arming and cancelling single-shot timers.
///
/// Times are measured from the clock's creation.
pub trait Clock: Send + Sync {
    /// Time since the clock was created
    fn now(&self) -> Duration;

    /// Arm a timer that fires once the clock reads `deadline`.
    /// A deadline already passed fires right away.
    fn at(&self, deadline: Duration, kind: TimerKind) -> TimerHandle;

    /// Arm a timer that fires once after `delay`
    fn after(&self, delay: Duration, kind: TimerKind) -> TimerHandle {
        self.at(self.now() + delay, kind)
    }

    /// Cancel a pending timer. Unknown or already-fired handles are ignored.
    fn cancel(&self, handle: TimerHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_display() {
        assert_eq!(TimerHandle::new(7).to_string(), "timer#7");
    }

    #[test]
    fn handles_order_by_id() {
        assert!(TimerHandle::new(1) < TimerHandle::new(2));
        assert_eq!(TimerHandle::new(3).id(), 3);
    }
}
