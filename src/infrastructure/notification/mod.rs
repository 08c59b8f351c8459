//! Notification infrastructure module
//!
//! Desktop notifications use notify-rust (cross-platform).

mod noop;
mod notify_rust;
mod timeline;

pub use noop::NoOpNotifier;
pub use notify_rust::NotifyRustNotifier;
pub use timeline::{NotificationRequest, TimelineNotifier};

use crate::application::ports::NotificationPort;
use crate::infrastructure::warnings::AdapterWarnings;

/// Create a notifier based on whether notifications are enabled.
/// Delivery failures go to `warnings`.
pub fn create_notifier(enabled: bool, warnings: AdapterWarnings) -> Box<dyn NotificationPort> {
    if enabled {
        Box::new(NotifyRustNotifier::new().with_warnings(warnings))
    } else {
        Box::new(NoOpNotifier::new())
    }
}
