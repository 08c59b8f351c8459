//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! logging setup, and the session runners.

pub mod app;
pub mod args;
pub mod check_cmd;
pub mod config_cmd;
pub mod logging;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_dry_run, run_session, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, SessionOptions};
pub use presenter::Presenter;
