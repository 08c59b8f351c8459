//! Virtual clock
//!
//! Time only moves when the driver says so. Used for deterministic tests and
//! for dry runs that print a whole session instantly.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{Clock, TimerFired, TimerHandle, TimerKind};

#[derive(Debug, Default)]
struct Inner {
    now: Duration,
    next_id: u64,
    /// Keyed by (deadline, id) so equal deadlines fire in arming order
    pending: BTreeMap<(Duration, u64), TimerKind>,
}

/// Manually advanced clock
#[derive(Debug, Default)]
pub struct VirtualClock {
    inner: Mutex<Inner>,
}

impl VirtualClock {
    /// Create a clock at time zero with nothing pending
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current virtual time since creation
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.lock().pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline.
    pub fn pop_due(&self, until: Duration) -> Option<TimerFired> {
        let mut inner = self.lock();
        let (&(deadline, id), _) = inner.pending.iter().next()?;
        if deadline > until {
            return None;
        }

        let kind = inner.pending.remove(&(deadline, id))?;
        inner.now = inner.now.max(deadline);
        Some(TimerFired {
            handle: TimerHandle::new(id),
            kind,
        })
    }

    /// Move the clock forward to `t` without firing anything
    pub fn advance_to(&self, t: Duration) {
        let mut inner = self.lock();
        inner.now = inner.now.max(t);
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Duration {
        VirtualClock::now(self)
    }

    fn at(&self, deadline: Duration, kind: TimerKind) -> TimerHandle {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        let deadline = deadline.max(inner.now);
        inner.pending.insert((deadline, id), kind);
        TimerHandle::new(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        self.lock().pending.retain(|&(_, id), _| id != handle.id());
    }
}
