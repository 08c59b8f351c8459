//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::SchedulerConfig;

/// Hang Timer - interval timer with audio cues
#[derive(Parser, Debug)]
#[command(name = "hang-timer")]
#[command(version)]
#[command(about = "Interval timer that plays audio cues for activity/break sessions")]
#[command(long_about = None)]
pub struct Cli {
    /// Total session length (e.g., 45s, 1m, 2m30s)
    #[arg(short = 't', long, value_name = "TIME")]
    pub total: Option<String>,

    /// Directory containing the sound clips
    #[arg(short = 's', long, value_name = "DIR")]
    pub sounds: Option<String>,

    /// Run without audio
    #[arg(short = 'm', long)]
    pub mute: bool,

    /// Don't show desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Print the session timeline instantly instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Verify sound clips and send a test notification
    Check,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Resolved options for running or checking a session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub scheduler: SchedulerConfig,
    pub sounds_dir: PathBuf,
    pub audio: bool,
    pub notify: bool,
}

/// Valid scalar config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["total_duration", "sounds_dir", "audio", "notify", "stop_cue"];

/// Prefix for per-clip playback rate keys (`rates.<clip>`)
pub const RATE_KEY_PREFIX: &str = "rates.";

/// Clip named by a `rates.<clip>` key
pub fn rate_key_clip(key: &str) -> Option<&str> {
    key.strip_prefix(RATE_KEY_PREFIX)
        .filter(|clip| !clip.trim().is_empty())
}

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key) || rate_key_clip(key).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["hang-timer"]);
        assert!(cli.total.is_none());
        assert!(cli.sounds.is_none());
        assert!(!cli.mute);
        assert!(!cli.no_notify);
        assert!(!cli.dry_run);
        assert_eq!(cli.verbose, 0);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_total() {
        let cli = Cli::parse_from(["hang-timer", "-t", "2m"]);
        assert_eq!(cli.total, Some("2m".to_string()));
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["hang-timer", "--mute", "--no-notify", "--dry-run", "-vv"]);
        assert!(cli.mute);
        assert!(cli.no_notify);
        assert!(cli.dry_run);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_parses_sounds_dir() {
        let cli = Cli::parse_from(["hang-timer", "--sounds", "/tmp/clips"]);
        assert_eq!(cli.sounds, Some("/tmp/clips".to_string()));
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["hang-timer", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["hang-timer", "config", "set", "total_duration", "90s"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "total_duration");
            assert_eq!(value, "90s");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_parses_check() {
        let cli = Cli::parse_from(["hang-timer", "check", "-v"]);
        assert!(matches!(cli.command, Some(Commands::Check)));
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("total_duration"));
        assert!(is_valid_config_key("stop_cue"));
        assert!(is_valid_config_key("rates.10brazil"));
        assert!(!is_valid_config_key("rates."));
        assert!(!is_valid_config_key("duration"));
    }

    #[test]
    fn rate_key_names_clip() {
        assert_eq!(rate_key_clip("rates.beep"), Some("beep"));
        assert_eq!(rate_key_clip("notify"), None);
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
