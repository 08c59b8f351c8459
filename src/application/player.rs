//! Sequence player
//!
//! Plays one segment of a sequence and arms the timer that ends its slot.
//! Advancement is time-driven: the completion timer is armed before the audio
//! port is called, so a clip that fails to play still occupies its slot.
//!
//! A segment played right after a completion starts at that completion's
//! deadline, not at the moment it was handled, so late handling never
//! shifts later slots.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::{PlaybackRates, Sequence};

use super::ports::{AudioError, AudioPort, Clock, TimerHandle, TimerKind};

/// An armed slot timer
#[derive(Debug, Clone, Copy)]
struct Slot {
    handle: TimerHandle,
    deadline: Duration,
}

/// Drives playback of individual segments
pub struct SequencePlayer<A: AudioPort> {
    audio: Arc<A>,
    clock: Arc<dyn Clock>,
    rates: PlaybackRates,
    pending: Option<Slot>,
    /// Deadline of the completion just taken; the next slot starts there
    finished_at: Option<Duration>,
}

impl<A: AudioPort> SequencePlayer<A> {
    pub fn new(audio: Arc<A>, clock: Arc<dyn Clock>, rates: PlaybackRates) -> Self {
        Self {
            audio,
            clock,
            rates,
            pending: None,
            finished_at: None,
        }
    }

    /// Play segment `index` of `sequence`, replacing any pending completion.
    ///
    /// Returns the audio port's error, if any; the completion timer is armed
    /// either way.
    ///
    /// # Panics
    /// If `index` is out of bounds. The scheduler never asks for that.
    pub async fn play(&mut self, sequence: &Sequence, index: usize) -> Result<(), AudioError> {
        let segment = sequence.get(index).unwrap_or_else(|| {
            panic!(
                "segment index {} out of bounds for sequence '{}' of length {}",
                index,
                sequence.id(),
                sequence.len()
            )
        });

        let rate = self.rates.rate_for(segment.name());
        let slot = segment.slot_length(rate);

        let starts_at = self
            .finished_at
            .take()
            .unwrap_or_else(|| self.clock.now());
        let deadline = starts_at + slot;
        self.cancel_pending();
        self.pending = Some(Slot {
            handle: self.clock.at(deadline, TimerKind::SegmentFinished),
            deadline,
        });

        debug!(
            sequence = %sequence.id(),
            index,
            clip = segment.name(),
            rate,
            slot_ms = slot.as_millis() as u64,
            "playing segment"
        );

        match segment.start_offset() {
            Some(offset) => {
                self.audio
                    .play_segment(segment.name(), offset, segment.duration(), rate)
                    .await
            }
            None if self.rates.is_adjusted(segment.name()) => {
                self.audio
                    .play_segment(segment.name(), Duration::ZERO, segment.duration(), rate)
                    .await
            }
            None => self.audio.play_from_start(segment.name()).await,
        }
    }

    /// Whether `handle` is this player's pending completion.
    /// Clears it if so, and the next `play` starts at its deadline.
    pub fn take_completion(&mut self, handle: TimerHandle) -> bool {
        match self.pending {
            Some(slot) if slot.handle == handle => {
                self.pending = None;
                self.finished_at = Some(slot.deadline);
                true
            }
            _ => false,
        }
    }

    /// Deadline of the completion just taken, until the next `play`
    pub fn finished_at(&self) -> Option<Duration> {
        self.finished_at
    }

    /// Cancel the pending completion timer, if any
    pub fn cancel(&mut self) {
        self.cancel_pending();
        self.finished_at = None;
    }

    fn cancel_pending(&mut self) {
        if let Some(slot) = self.pending.take() {
            self.clock.cancel(slot.handle);
        }
    }
}
