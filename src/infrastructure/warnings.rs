//! Late adapter failures
//!
//! Playback and notification delivery finish after the port call has
//! returned. Failures found then are sent here so the session loop can still
//! show them.

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::SessionWarning;

/// Sender for failures that surface after a port call returned.
/// Detached by default: failures are only logged.
#[derive(Debug, Clone, Default)]
pub struct AdapterWarnings {
    sender: Option<mpsc::UnboundedSender<SessionWarning>>,
}

impl AdapterWarnings {
    /// Forward failures into `sender`
    pub fn new(sender: mpsc::UnboundedSender<SessionWarning>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Log only
    pub fn detached() -> Self {
        Self::default()
    }

    /// Log `warning` and forward it. Usable from any thread.
    pub fn report(&self, warning: SessionWarning) {
        warn!(%warning, "adapter failure after call returned");
        if let Some(ref sender) = self.sender {
            // Receiver gone means the session loop has exited
            let _ = sender.send(warning);
        }
    }
}
