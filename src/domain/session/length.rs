//! Session length value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::SessionLengthParseError;

/// Default session length (60 seconds)
pub const DEFAULT_SESSION_SECS: u32 = 60;

/// The session completes this many seconds before its nominal length
pub const COMPLETION_LEAD_SECS: u32 = 2;

/// Total length of a session in whole seconds.
/// Always longer than [`COMPLETION_LEAD_SECS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionLength {
    seconds: u32,
}

impl SessionLength {
    /// Create a length from seconds, rejecting values the end marker can't fit in
    pub fn from_secs(secs: u32) -> Result<Self, SessionLengthParseError> {
        if secs <= COMPLETION_LEAD_SECS {
            return Err(SessionLengthParseError {
                input: format!("{}s", secs),
            });
        }
        Ok(Self { seconds: secs })
    }

    pub const fn as_secs(&self) -> u32 {
        self.seconds
    }

    /// Elapsed second at which the session completes
    pub const fn end_marker(&self) -> u32 {
        self.seconds - COMPLETION_LEAD_SECS
    }
}

impl Default for SessionLength {
    fn default() -> Self {
        Self {
            seconds: DEFAULT_SESSION_SECS,
        }
    }
}

impl FromStr for SessionLength {
    type Err = SessionLengthParseError;

    /// Supported formats: "45s", "1m", "1m30s", "90s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SessionLengthParseError {
            input: s.to_string(),
        };
        let input = s.trim().to_lowercase();

        let mut minutes: u32 = 0;
        let mut seconds: u32 = 0;
        let mut current_num = String::new();
        let mut found_any = false;

        for ch in input.chars() {
            match ch {
                '0'..='9' => current_num.push(ch),
                'm' if !current_num.is_empty() => {
                    minutes = current_num.parse().map_err(|_| err())?;
                    current_num.clear();
                    found_any = true;
                }
                's' if !current_num.is_empty() => {
                    seconds = current_num.parse().map_err(|_| err())?;
                    current_num.clear();
                    found_any = true;
                }
                _ => return Err(err()),
            }
        }

        if !current_num.is_empty() || !found_any {
            return Err(err());
        }

        let total = minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .ok_or_else(err)?;

        Self::from_secs(total).map_err(|_| err())
    }
}

impl fmt::Display for SessionLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.seconds / 60;
        let seconds = self.seconds % 60;

        if minutes == 0 {
            write!(f, "{}s", seconds)
        } else if seconds == 0 {
            write!(f, "{}m", minutes)
        } else {
            write!(f, "{}m{}s", minutes, seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seconds_only() {
        let l: SessionLength = "45s".parse().unwrap();
        assert_eq!(l.as_secs(), 45);
    }

    #[test]
    fn parse_minutes_and_seconds() {
        let l: SessionLength = "1m30s".parse().unwrap();
        assert_eq!(l.as_secs(), 90);
    }

    #[test]
    fn parse_case_insensitive_with_whitespace() {
        let l: SessionLength = "  2M ".parse().unwrap();
        assert_eq!(l.as_secs(), 120);
    }

    #[test]
    fn parse_rejects_too_short() {
        assert!("2s".parse::<SessionLength>().is_err());
        assert!("0m".parse::<SessionLength>().is_err());
        assert!("3s".parse::<SessionLength>().is_ok());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<SessionLength>().is_err());
        assert!("60".parse::<SessionLength>().is_err());
        assert!("1h".parse::<SessionLength>().is_err());
        assert!("99999999999s".parse::<SessionLength>().is_err());
    }

    #[test]
    fn end_marker_is_two_seconds_early() {
        assert_eq!(SessionLength::default().end_marker(), 58);
        assert_eq!(SessionLength::from_secs(3).unwrap().end_marker(), 1);
    }

    #[test]
    fn display_round_trips_common_forms() {
        assert_eq!(SessionLength::default().to_string(), "1m");
        assert_eq!(SessionLength::from_secs(45).unwrap().to_string(), "45s");
        assert_eq!(SessionLength::from_secs(150).unwrap().to_string(), "2m30s");
    }
}
