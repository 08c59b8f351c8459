//! Phase scheduler use case
//!
//! Owns the session state and decides, for each expired timer, what plays
//! next, when to flip between activity and break, and when the session is
//! complete.
//!
//! The scheduler is driven from a single task: commands (`start`, `stop`,
//! `reset`) and expired timers (`handle_timer`) all take `&mut self`, so no
//! two of them ever run concurrently. Timers that were cancelled but still
//! arrive (for example already queued on a channel) are recognised by their
//! handle and ignored.
//!
//! Tick deadlines sit on a fixed one-second grid starting when pre-roll ends.
//! When a segment completion is handled while the tick is already due, the
//! tick runs first, so completion at the end marker always wins a tie.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::{
    Phase, SchedulerConfig, SequenceId, SessionSnapshot, SessionState, SessionWarning,
};

use super::player::SequencePlayer;
use super::ports::{AudioPort, Clock, NotificationPort, TimerFired, TimerHandle, TimerKind};

/// Interval of the elapsed-time tick
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Callback for non-fatal warnings
pub type WarningCallback = Box<dyn Fn(&SessionWarning) + Send + Sync>;

/// Notification shown for each phase change
struct Announcement {
    title: &'static str,
    body: &'static str,
}

const BREAK_TIME: Announcement = Announcement {
    title: "Break Time",
    body: "The activity period has ended. Starting break.",
};

const ACTIVITY_TIME: Announcement = Announcement {
    title: "Activity Time",
    body: "The break period has ended. Starting activity.",
};

const COMPLETED: Announcement = Announcement {
    title: "Timer Completed",
    body: "The timer has completed its full sequence.",
};

/// The armed elapsed-time tick
#[derive(Debug, Clone, Copy)]
struct PendingTick {
    handle: TimerHandle,
    deadline: Duration,
}

/// Phase scheduler: the session state machine
pub struct PhaseScheduler<A, N>
where
    A: AudioPort,
    N: NotificationPort,
{
    audio: Arc<A>,
    notifier: N,
    clock: Arc<dyn Clock>,
    player: SequencePlayer<A>,
    config: SchedulerConfig,
    state: SessionState,
    tick: Option<PendingTick>,
    /// Clock time at which elapsed second zero began
    tick_origin: Option<Duration>,
    snapshots: watch::Sender<SessionSnapshot>,
    on_warning: Option<WarningCallback>,
}

impl<A, N> PhaseScheduler<A, N>
where
    A: AudioPort,
    N: NotificationPort,
{
    /// Create an idle scheduler
    pub fn new(audio: A, notifier: N, clock: Arc<dyn Clock>, config: SchedulerConfig) -> Self {
        let audio = Arc::new(audio);
        let player =
            SequencePlayer::new(Arc::clone(&audio), Arc::clone(&clock), config.rates.clone());
        let state = SessionState::new();
        let (snapshots, _) = watch::channel(state.snapshot());

        Self {
            audio,
            notifier,
            clock,
            player,
            config,
            state,
            tick: None,
            tick_origin: None,
            snapshots,
            on_warning: None,
        }
    }

    /// Report warnings to `callback` as well as the log
    pub fn with_warning_callback(mut self, callback: WarningCallback) -> Self {
        self.on_warning = Some(callback);
        self
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Begin a session with the pre-roll countdown.
    ///
    /// Ignored while running, and after completion until `reset`.
    pub async fn start(&mut self) {
        if !self.state.can_begin() {
            debug!(phase = %self.state.phase(), running = self.state.is_running(), "start ignored");
            return;
        }

        self.state.begin();
        info!(length = %self.config.length, "session started");
        self.publish();

        self.play_current(SequenceId::PreRoll).await;
    }

    /// Stop the session: cancel every timer and silence playback. Idempotent.
    pub async fn stop(&mut self) {
        self.cancel_timers();
        let was_running = self.state.is_running();
        self.state.halt();

        if let Err(e) = self.audio.stop().await {
            self.report(e.into());
        }

        if was_running {
            info!(elapsed = self.state.elapsed_seconds(), phase = %self.state.phase(), "session stopped");
        }
        self.publish();
    }

    /// Stop, then return to idle with elapsed time cleared
    pub async fn reset(&mut self) {
        self.stop().await;
        self.state.clear();
        debug!("session reset");
        self.publish();
    }

    /// Feed an expired timer into the state machine.
    /// Timers this scheduler no longer has pending are ignored.
    pub async fn handle_timer(&mut self, fired: TimerFired) {
        match fired.kind {
            TimerKind::Tick => {
                if self.tick.map(|t| t.handle) != Some(fired.handle) {
                    debug!(handle = %fired.handle, "stale tick ignored");
                    return;
                }
                self.tick = None;
                self.on_tick().await;
            }
            TimerKind::SegmentFinished => {
                if !self.player.take_completion(fired.handle) {
                    debug!(handle = %fired.handle, "stale segment completion ignored");
                    return;
                }
                self.run_due_tick().await;
                self.on_segment_finished().await;
            }
        }
    }

    /// Run the tick now if its deadline has passed but it hasn't been
    /// delivered yet. Its queued timer is then stale.
    async fn run_due_tick(&mut self) {
        let Some(tick) = self.tick else {
            return;
        };
        if self.clock.now() < tick.deadline {
            return;
        }

        debug!(handle = %tick.handle, "due tick runs before segment completion");
        self.clock.cancel(tick.handle);
        self.tick = None;
        self.on_tick().await;
    }

    async fn on_tick(&mut self) {
        if !self.state.is_running() {
            return;
        }

        let elapsed = self.state.tick();
        debug!(elapsed, "tick");

        if elapsed >= self.config.length.end_marker() {
            self.complete().await;
        } else {
            self.publish();
            self.arm_tick();
        }
    }

    async fn on_segment_finished(&mut self) {
        if !self.state.is_running() {
            return;
        }

        let phase = self.state.phase();
        let sequence = phase
            .sequence()
            .unwrap_or_else(|| unreachable!("segment finished while {phase}"));

        let index = self.state.advance_index();
        if index < self.config.sequence(sequence).len() {
            self.play_current(sequence).await;
            return;
        }

        match phase {
            Phase::PreRoll => {
                let origin = self
                    .player
                    .finished_at()
                    .unwrap_or_else(|| self.clock.now());
                self.tick_origin = Some(origin);
                self.state.enter_activity();
                info!("pre-roll finished, activity started");
                self.publish();
                self.play_current(SequenceId::Activity).await;
                self.arm_tick();
            }
            Phase::Activity | Phase::Break => {
                let next = self.state.flip_phase();
                info!(phase = %next, elapsed = self.state.elapsed_seconds(), "phase changed");
                self.publish();
                self.play_current(SequenceId::Activity).await;

                let announcement = if next == Phase::Break {
                    BREAK_TIME
                } else {
                    ACTIVITY_TIME
                };
                self.announce(announcement).await;
            }
            Phase::Idle | Phase::Completed => unreachable!("segment finished while {phase}"),
        }
    }

    /// Hard stop at the end marker. Wins over any segment boundary.
    async fn complete(&mut self) {
        self.cancel_timers();
        self.state.complete();
        info!(elapsed = self.state.elapsed_seconds(), "session completed");
        self.publish();

        if let Err(e) = self.audio.play_from_start(&self.config.stop_cue).await {
            self.report(e.into());
        }
        self.announce(COMPLETED).await;
    }

    async fn play_current(&mut self, id: SequenceId) {
        let sequence = self.config.sequence(id);
        if let Err(e) = self.player.play(sequence, self.state.sequence_index()).await {
            self.report(e.into());
        }
    }

    async fn announce(&self, announcement: Announcement) {
        if let Err(e) = self
            .notifier
            .schedule_notification(
                announcement.title,
                announcement.body,
                self.config.notification_delay,
            )
            .await
        {
            self.report(e.into());
        }
    }

    /// Arm the tick that brings elapsed time to its next whole second
    fn arm_tick(&mut self) {
        if let Some(previous) = self.tick.take() {
            self.clock.cancel(previous.handle);
        }

        let origin = match self.tick_origin {
            Some(origin) => origin,
            None => {
                let origin = self.clock.now();
                self.tick_origin = Some(origin);
                origin
            }
        };
        let deadline = origin + TICK_INTERVAL * (self.state.elapsed_seconds() + 1);
        self.tick = Some(PendingTick {
            handle: self.clock.at(deadline, TimerKind::Tick),
            deadline,
        });
    }

    fn cancel_timers(&mut self) {
        if let Some(tick) = self.tick.take() {
            self.clock.cancel(tick.handle);
        }
        self.tick_origin = None;
        self.player.cancel();
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.snapshot());
    }

    fn report(&self, warning: SessionWarning) {
        warn!(%warning, "session warning");
        if let Some(ref callback) = self.on_warning {
            callback(&warning);
        }
    }
}
