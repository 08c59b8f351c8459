//! Timeline notification adapter
//!
//! Records scheduled notifications instead of showing them.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{NotificationError, NotificationPort};

/// One scheduled notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub delay: Duration,
}

/// Notifier that records requests
#[derive(Debug, Default)]
pub struct TimelineNotifier {
    requests: Mutex<Vec<NotificationRequest>>,
    denied: bool,
}

impl TimelineNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifier whose every request is recorded, then refused
    pub fn denied() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            denied: true,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<NotificationRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// All requests so far
    pub fn requests(&self) -> Vec<NotificationRequest> {
        self.lock().clone()
    }

    /// Requests since the last drain
    pub fn drain(&self) -> Vec<NotificationRequest> {
        std::mem::take(&mut *self.lock())
    }
}

#[async_trait]
impl NotificationPort for TimelineNotifier {
    async fn schedule_notification(
        &self,
        title: &str,
        body: &str,
        delay: Duration,
    ) -> Result<(), NotificationError> {
        self.lock().push(NotificationRequest {
            title: title.to_string(),
            body: body.to_string(),
            delay,
        });

        if self.denied {
            return Err(NotificationError::Denied("permission not granted".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_requests() {
        let notifier = TimelineNotifier::new();
        notifier
            .schedule_notification("Break Time", "rest", Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(notifier.requests()[0].title, "Break Time");
        assert_eq!(notifier.requests()[0].delay, Duration::from_secs(1));
        assert_eq!(notifier.drain().len(), 1);
        assert!(notifier.requests().is_empty());
    }

    #[tokio::test]
    async fn denied_notifier_fails() {
        let notifier = TimelineNotifier::denied();
        let err = notifier
            .schedule_notification("Break Time", "rest", Duration::ZERO)
            .await
            .unwrap_err();

        assert!(matches!(err, NotificationError::Denied(_)));
        assert_eq!(notifier.requests().len(), 1);
    }
}
