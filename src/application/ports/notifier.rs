//! Notification port interface

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::SessionWarning;

/// Notification errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Notification permission denied: {0}")]
    Denied(String),

    #[error("Failed to show notification: {0}")]
    SendFailed(String),
}

impl From<NotificationError> for SessionWarning {
    fn from(err: NotificationError) -> Self {
        SessionWarning::NotificationDenied(err.to_string())
    }
}

/// Port for local notifications
#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Schedule a notification to appear after `delay`.
    ///
    /// Fire-and-forget: an `Ok` means the request was accepted, not that the
    /// notification was seen.
    async fn schedule_notification(
        &self,
        title: &str,
        body: &str,
        delay: Duration,
    ) -> Result<(), NotificationError>;
}

/// Blanket implementation for boxed notifier types
#[async_trait]
impl NotificationPort for Box<dyn NotificationPort> {
    async fn schedule_notification(
        &self,
        title: &str,
        body: &str,
        delay: Duration,
    ) -> Result<(), NotificationError> {
        self.as_ref().schedule_notification(title, body, delay).await
    }
}

#[async_trait]
impl<T: NotificationPort + ?Sized> NotificationPort for Arc<T> {
    async fn schedule_notification(
        &self,
        title: &str,
        body: &str,
        delay: Duration,
    ) -> Result<(), NotificationError> {
        self.as_ref().schedule_notification(title, body, delay).await
    }
}
