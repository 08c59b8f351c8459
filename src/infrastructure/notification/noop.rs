//! No-op notification adapter
//!
//! Used when notifications are disabled.

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{NotificationError, NotificationPort};

/// Notifier that shows nothing
pub struct NoOpNotifier;

impl NoOpNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationPort for NoOpNotifier {
    async fn schedule_notification(
        &self,
        _title: &str,
        _body: &str,
        _delay: Duration,
    ) -> Result<(), NotificationError> {
        Ok(())
    }
}
