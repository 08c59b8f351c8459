//! Session domain module

mod length;
mod state;

pub use length::{SessionLength, COMPLETION_LEAD_SECS, DEFAULT_SESSION_SECS};
pub use state::{Phase, SessionSnapshot, SessionState};
