//! Clock adapters
//!
//! `TokioClock` for real sessions, `VirtualClock` for tests and dry runs.

mod tokio_clock;
mod virtual_clock;

pub use tokio_clock::TokioClock;
pub use virtual_clock::VirtualClock;
