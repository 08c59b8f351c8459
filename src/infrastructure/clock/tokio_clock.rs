//! Real-time clock backed by tokio timers

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::application::ports::{Clock, TimerFired, TimerHandle, TimerKind};

/// Clock that sleeps on the tokio runtime.
///
/// Each armed timer is a task that sleeps and then sends a [`TimerFired`] on
/// the channel returned by [`TokioClock::new`]. Must be used from within a
/// tokio runtime.
pub struct TokioClock {
    origin: Instant,
    next_id: AtomicU64,
    tasks: Mutex<HashMap<TimerHandle, JoinHandle<()>>>,
    sender: mpsc::UnboundedSender<TimerFired>,
}

impl TokioClock {
    /// Create a clock and the receiver its timers fire into
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerFired>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let clock = Self {
            origin: Instant::now(),
            next_id: AtomicU64::new(0),
            tasks: Mutex::new(HashMap::new()),
            sender,
        };
        (clock, receiver)
    }

    fn tasks(&self) -> std::sync::MutexGuard<'_, HashMap<TimerHandle, JoinHandle<()>>> {
        self.tasks.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn at(&self, deadline: Duration, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let sender = self.sender.clone();
        let wake_at = self.origin + deadline;

        let task = tokio::spawn(async move {
            tokio::time::sleep_until(wake_at).await;
            // Receiver gone means the session loop has exited
            let _ = sender.send(TimerFired { handle, kind });
        });

        let mut tasks = self.tasks();
        tasks.retain(|_, t| !t.is_finished());
        tasks.insert(handle, task);
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Some(task) = self.tasks().remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioClock {
    fn drop(&mut self) {
        for (_, task) in self.tasks().drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn timer_fires_after_delay() {
        let (clock, mut rx) = TokioClock::new();
        let handle = clock.after(Duration::from_secs(1), TimerKind::Tick);

        let fired = rx.recv().await.unwrap();
        assert_eq!(fired.handle, handle);
        assert_eq!(fired.kind, TimerKind::Tick);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_does_not_fire() {
        let (clock, mut rx) = TokioClock::new();
        let cancelled = clock.after(Duration::from_secs(1), TimerKind::Tick);
        let kept = clock.after(Duration::from_secs(2), TimerKind::SegmentFinished);
        clock.cancel(cancelled);

        let fired = rx.recv().await.unwrap();
        assert_eq!(fired.handle, kept);
    }

    #[tokio::test(start_paused = true)]
    async fn absolute_deadline_is_measured_from_creation() {
        let (clock, mut rx) = TokioClock::new();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(clock.now() >= Duration::from_millis(300));

        let handle = clock.at(Duration::from_secs(1), TimerKind::Tick);
        let fired = rx.recv().await.unwrap();

        assert_eq!(fired.handle, handle);
        assert!(clock.now() >= Duration::from_secs(1));
        assert!(clock.now() < Duration::from_millis(1300));
    }

    #[tokio::test(start_paused = true)]
    async fn timers_fire_in_deadline_order() {
        let (clock, mut rx) = TokioClock::new();
        let late = clock.after(Duration::from_millis(1500), TimerKind::Tick);
        let early = clock.after(Duration::from_millis(660), TimerKind::SegmentFinished);

        assert_eq!(rx.recv().await.unwrap().handle, early);
        assert_eq!(rx.recv().await.unwrap().handle, late);
    }
}
