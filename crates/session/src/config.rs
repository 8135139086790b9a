//! Session configuration
//!
//! Every field carries a serde default, so a config file only needs to name
//! what it changes. The defaults reproduce the reference calibration: two
//! venues, 66 zero-intelligence traders, 10 market makers, one arbitrageur,
//! continuous matching with a 100-unit observation delay.

use crate::error::{SessionError, SessionResult};
use hermes_regulator::MatchingMode;
use serde::{Deserialize, Serialize};

/// Full description of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Venue names, one independent book per venue
    #[serde(default = "default_venues")]
    pub venues: Vec<String>,
    /// Session length in simulated time units
    #[serde(default = "default_session_length")]
    pub session_length: f64,
    /// Observation delay served to latency-limited participants
    #[serde(default = "default_nbbo_delay")]
    pub nbbo_delay: f64,
    /// Matching regime
    #[serde(default = "default_matching")]
    pub matching: MatchingMode,
    /// Number of zero-intelligence traders
    #[serde(default = "default_zero_intelligence")]
    pub zero_intelligence: usize,
    /// Number of ladder market makers
    #[serde(default = "default_market_makers")]
    pub market_makers: usize,
    /// Poisson arrival intensity per zero-intelligence trader
    #[serde(default = "default_zi_intensity")]
    pub zi_intensity: f64,
    /// Poisson arrival intensity per market maker
    #[serde(default = "default_mm_intensity")]
    pub mm_intensity: f64,
    /// Opening reference price
    #[serde(default = "default_initial_price")]
    pub initial_price: i64,
    /// Weight of the current price in the reference recurrence
    #[serde(default = "default_mean_reversion")]
    pub mean_reversion: f64,
    /// Reference-price shock standard deviation
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    /// Private gain draw standard deviation
    #[serde(default = "default_sigma")]
    pub sigma_utility: f64,
    /// Zero-intelligence position bound
    #[serde(default = "default_q_max")]
    pub q_max: i64,
    /// Shading draw bounds, inclusive
    #[serde(default)]
    pub shading_min: i64,
    #[serde(default)]
    pub shading_max: i64,
    /// Market-maker ladder: rungs per side
    #[serde(default = "default_mm_num_orders")]
    pub mm_num_orders: usize,
    /// Market-maker ladder: distance between adjacent rungs
    #[serde(default = "default_mm_tick_gap")]
    pub mm_tick_gap: i64,
    /// Market-maker ladder: distance between the central bid and ask
    #[serde(default = "default_mm_spread")]
    pub mm_spread: i64,
    /// Grid step for the volatility resample
    #[serde(default = "default_resample_interval")]
    pub resample_interval: f64,
    /// Master seed; drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            venues: default_venues(),
            session_length: default_session_length(),
            nbbo_delay: default_nbbo_delay(),
            matching: default_matching(),
            zero_intelligence: default_zero_intelligence(),
            market_makers: default_market_makers(),
            zi_intensity: default_zi_intensity(),
            mm_intensity: default_mm_intensity(),
            initial_price: default_initial_price(),
            mean_reversion: default_mean_reversion(),
            sigma: default_sigma(),
            sigma_utility: default_sigma(),
            q_max: default_q_max(),
            shading_min: 0,
            shading_max: 0,
            mm_num_orders: default_mm_num_orders(),
            mm_tick_gap: default_mm_tick_gap(),
            mm_spread: default_mm_spread(),
            resample_interval: default_resample_interval(),
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Loads a configuration from a JSON file. Missing fields take their
    /// defaults; validation happens when the session is built.
    pub fn from_file(path: &str) -> SessionResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| SessionError::InvalidConfig(format!("{path}: {source}")))?;
        serde_json::from_str(&text)
            .map_err(|source| SessionError::InvalidConfig(format!("{path}: {source}")))
    }

    /// Rejects configurations the session could not run to completion.
    pub fn validate(&self) -> SessionResult<()> {
        if self.venues.is_empty() {
            return Err(invalid("at least one venue is required"));
        }
        if self.session_length <= 0.0 {
            return Err(invalid("session_length must be positive"));
        }
        if self.nbbo_delay < 0.0 {
            return Err(invalid("nbbo_delay must not be negative"));
        }
        if self.zero_intelligence > 0 && self.zi_intensity <= 0.0 {
            return Err(invalid("zi_intensity must be positive"));
        }
        if self.market_makers > 0 && self.mm_intensity <= 0.0 {
            return Err(invalid("mm_intensity must be positive"));
        }
        if self.initial_price < 0 {
            return Err(invalid("initial_price must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.mean_reversion) {
            return Err(invalid("mean_reversion must lie in [0, 1]"));
        }
        if self.sigma < 0.0 || self.sigma_utility < 0.0 {
            return Err(invalid("standard deviations must not be negative"));
        }
        if self.q_max < 1 {
            return Err(invalid("q_max must be at least 1"));
        }
        if self.shading_min < 0 || self.shading_min > self.shading_max {
            return Err(invalid("shading bounds must satisfy 0 <= min <= max"));
        }
        if self.mm_tick_gap < 1 {
            return Err(invalid("mm_tick_gap must be at least 1"));
        }
        if self.mm_spread < 0 {
            return Err(invalid("mm_spread must not be negative"));
        }
        if self.resample_interval <= 0.0 {
            return Err(invalid("resample_interval must be positive"));
        }
        if let MatchingMode::Batch { interval } = self.matching {
            if interval <= 0.0 {
                return Err(invalid("batch interval must be positive"));
            }
        }
        Ok(())
    }
}

fn invalid(message: &str) -> SessionError {
    SessionError::InvalidConfig(message.to_string())
}

fn default_venues() -> Vec<String> {
    vec!["New York".to_string(), "Chicago".to_string()]
}

fn default_session_length() -> f64 {
    12_000.0
}

fn default_nbbo_delay() -> f64 {
    100.0
}

fn default_matching() -> MatchingMode {
    MatchingMode::Continuous
}

fn default_zero_intelligence() -> usize {
    66
}

fn default_market_makers() -> usize {
    10
}

fn default_zi_intensity() -> f64 {
    0.005
}

fn default_mm_intensity() -> f64 {
    0.0005
}

fn default_initial_price() -> i64 {
    10_000
}

fn default_mean_reversion() -> f64 {
    0.05
}

fn default_sigma() -> f64 {
    (5e6f64).sqrt()
}

fn default_q_max() -> i64 {
    10
}

fn default_mm_num_orders() -> usize {
    10
}

fn default_mm_tick_gap() -> i64 {
    50
}

fn default_mm_spread() -> i64 {
    2_000
}

fn default_resample_interval() -> f64 {
    100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"zero_intelligence": 5, "seed": 7}"#).unwrap();
        assert_eq!(config.zero_intelligence, 5);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.venues.len(), 2);
        assert_eq!(config.matching, MatchingMode::Continuous);
    }

    #[test]
    fn test_batch_mode_round_trips_through_json() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"matching": {"kind": "batch", "interval": 500.0}}"#).unwrap();
        assert_eq!(config.matching, MatchingMode::Batch { interval: 500.0 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = SessionConfig::default();
        config.session_length = 0.0;
        assert!(config.validate().is_err());

        let mut config = SessionConfig::default();
        config.venues.clear();
        assert!(config.validate().is_err());

        let mut config = SessionConfig::default();
        config.zi_intensity = 0.0;
        assert!(config.validate().is_err());

        let mut config = SessionConfig::default();
        config.matching = MatchingMode::Batch { interval: 0.0 };
        assert!(config.validate().is_err());
    }
}
