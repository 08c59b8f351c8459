//! Cross-platform notification adapter using notify-rust
//!
//! Works on Windows, macOS, and Linux.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{NotificationError, NotificationPort};
use crate::infrastructure::warnings::AdapterWarnings;

/// Freedesktop icon shown with every notification
const ICON_NAME: &str = "alarm-symbolic";

/// Cross-platform notifier using notify-rust
pub struct NotifyRustNotifier {
    /// Application name for notifications
    app_name: String,
    /// Where delivery failures go once the request has been accepted
    warnings: AdapterWarnings,
}

impl NotifyRustNotifier {
    /// Create a new notify-rust notifier
    pub fn new() -> Self {
        Self {
            app_name: "Hang Timer".to_string(),
            warnings: AdapterWarnings::detached(),
        }
    }

    /// Report delivery failures of scheduled notifications to `warnings`
    pub fn with_warnings(mut self, warnings: AdapterWarnings) -> Self {
        self.warnings = warnings;
        self
    }

    /// Show a notification right away, blocking the calling thread
    fn show(app_name: &str, title: &str, body: &str) -> Result<(), NotificationError> {
        notify_rust::Notification::new()
            .appname(app_name)
            .summary(title)
            .body(body)
            .icon(ICON_NAME)
            .show()
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        Ok(())
    }

    /// Show a notification now and wait for the result.
    /// Used where delivery must be confirmed, such as `check`.
    pub async fn show_now(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        let app_name = self.app_name.clone();
        let title = title.to_owned();
        let body = body.to_owned();

        // notify-rust operations can block, so run in spawn_blocking
        tokio::task::spawn_blocking(move || Self::show(&app_name, &title, &body))
            .await
            .map_err(|e| NotificationError::SendFailed(format!("Task join error: {}", e)))?
    }
}

impl Default for NotifyRustNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationPort for NotifyRustNotifier {
    async fn schedule_notification(
        &self,
        title: &str,
        body: &str,
        delay: Duration,
    ) -> Result<(), NotificationError> {
        let app_name = self.app_name.clone();
        let title = title.to_owned();
        let body = body.to_owned();

        debug!(%title, delay_ms = delay.as_millis() as u64, "scheduling notification");

        tokio::spawn(deliver(delay, self.warnings.clone(), move || {
            Self::show(&app_name, &title, &body)
        }));

        Ok(())
    }
}

/// Wait out `delay`, then run `show` off the async threads
async fn deliver<F>(delay: Duration, warnings: AdapterWarnings, show: F)
where
    F: FnOnce() -> Result<(), NotificationError> + Send + 'static,
{
    tokio::time::sleep(delay).await;
    let error = match tokio::task::spawn_blocking(show).await {
        Ok(Ok(())) => return,
        Ok(Err(e)) => e,
        Err(e) => NotificationError::SendFailed(format!("Task join error: {}", e)),
    };
    warnings.report(error.into());
}
