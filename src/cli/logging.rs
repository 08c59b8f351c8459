//! Tracing subscriber setup

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor `--verbose` is given
const DEFAULT_DIRECTIVE: &str = "warn";

/// Filter directive for a `--verbose` count, if it overrides the default
fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("warn,hang_timer=info"),
        _ => Some("info,hang_timer=debug"),
    }
}

/// Install the global subscriber, logging to stderr
pub fn init_logging(verbose: u8) {
    let filter = match verbosity_directive(verbose) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    };

    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    // A subscriber may already be set in tests
    let _ = tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_by_default() {
        assert_eq!(verbosity_directive(0), None);
    }

    #[test]
    fn verbose_raises_crate_level() {
        assert!(verbosity_directive(1).unwrap().contains("hang_timer=info"));
        assert!(verbosity_directive(3).unwrap().contains("hang_timer=debug"));
    }
}
