//! Per-clip playback rates

use std::collections::BTreeMap;

use crate::domain::error::SequenceError;

/// Rate used for clips without an entry
pub const NORMAL_RATE: f32 = 1.0;

/// Fixed playback rates keyed by clip name.
///
/// Rates are configuration, not computed: a clip listed here always plays at
/// its rate, whichever sequence it appears in.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRates {
    rates: BTreeMap<String, f32>,
}

impl PlaybackRates {
    /// No adjusted clips; everything plays at normal speed
    pub fn empty() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    /// Build from a name -> rate map, validating every rate
    pub fn from_map(rates: BTreeMap<String, f32>) -> Result<Self, SequenceError> {
        for (clip, rate) in &rates {
            if !rate.is_finite() || *rate <= 0.0 {
                return Err(SequenceError::InvalidRate {
                    clip: clip.clone(),
                    value: *rate,
                });
            }
        }
        Ok(Self { rates })
    }

    /// Rate for `clip`, or [`NORMAL_RATE`]
    pub fn rate_for(&self, clip: &str) -> f32 {
        self.rates.get(clip).copied().unwrap_or(NORMAL_RATE)
    }

    /// Whether `clip` plays at something other than normal speed
    pub fn is_adjusted(&self, clip: &str) -> bool {
        (self.rate_for(clip) - NORMAL_RATE).abs() > f32::EPSILON
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.rates.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for PlaybackRates {
    /// `10brazil` plays at 1.25x
    fn default() -> Self {
        let mut rates = BTreeMap::new();
        rates.insert("10brazil".to_string(), 1.25);
        Self { rates }
    }
}
