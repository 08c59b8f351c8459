//! Configuration domain module

mod app_config;
mod scheduler;

pub use app_config::{AppConfig, SegmentConfig};
pub use scheduler::{SchedulerConfig, DEFAULT_STOP_CUE, NOTIFICATION_DELAY};
