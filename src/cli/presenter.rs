//! CLI presenter for output formatting

use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::{Phase, SessionSnapshot};

/// Presenter for CLI output formatting
pub struct Presenter {
    progress: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { progress: None }
    }

    /// Show a progress bar for a session of `total_secs`
    pub fn start_session(&mut self, total_secs: u32) {
        let bar = ProgressBar::new(u64::from(total_secs));
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} {msg:<12} [{bar:24.cyan/dim}] {pos:>3}s / {len}s")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .progress_chars("█▓░");
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(120));
        self.progress = Some(bar);
    }

    /// Reflect a new session snapshot in the progress bar
    pub fn update_session(&self, snapshot: &SessionSnapshot) {
        if let Some(ref bar) = self.progress {
            bar.set_position(u64::from(snapshot.elapsed_seconds));
            bar.set_message(phase_label(snapshot.phase).to_string());
        }
    }

    /// Finish the progress bar, keeping it on screen with a final message
    pub fn finish_session(&mut self, message: &str) {
        if let Some(bar) = self.progress.take() {
            bar.abandon_with_message(message.to_string());
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        self.line(format!("{} {}", "ℹ".cyan(), message));
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        self.line(format!("{} {}", "✓".green(), message));
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        self.line(format!("{} {}", "⚠".yellow(), message));
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        self.line(format!("{} {}", "✗".red(), message));
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print one dry-run timeline entry to stdout
    pub fn timeline(&self, at: Duration, event: &str) {
        println!("{} {}", format_offset(at).dimmed(), event);
    }

    /// Status lines go above the progress bar while it is drawn
    fn line(&self, text: String) {
        match self.progress {
            Some(ref bar) => bar.suspend(|| eprintln!("{}", text)),
            None => eprintln!("{}", text),
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Colored label for a phase
pub fn phase_label(phase: Phase) -> ColoredString {
    match phase {
        Phase::Idle => phase.as_str().dimmed(),
        Phase::PreRoll => phase.as_str().yellow(),
        Phase::Activity => phase.as_str().green().bold(),
        Phase::Break => phase.as_str().blue(),
        Phase::Completed => phase.as_str().cyan(),
    }
}

/// Format a session offset as `[MM:SS.mmm]`
pub fn format_offset(at: Duration) -> String {
    let millis = at.as_millis();
    format!(
        "[{:02}:{:02}.{:03}]",
        millis / 60_000,
        (millis / 1000) % 60,
        millis % 1000
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_offset_at_start() {
        assert_eq!(format_offset(Duration::ZERO), "[00:00.000]");
    }

    #[test]
    fn format_offset_with_fraction() {
        assert_eq!(format_offset(Duration::from_millis(9_400)), "[00:09.400]");
    }

    #[test]
    fn format_offset_past_a_minute() {
        assert_eq!(format_offset(Duration::from_millis(61_050)), "[01:01.050]");
    }

    #[test]
    fn phase_label_uses_phase_name() {
        colored::control::set_override(false);
        assert_eq!(phase_label(Phase::Break).to_string(), "break");
        assert_eq!(phase_label(Phase::PreRoll).to_string(), "pre-roll");
    }

    #[test]
    fn update_without_session_is_harmless() {
        let presenter = Presenter::new();
        presenter.update_session(&SessionSnapshot::default());
    }
}
