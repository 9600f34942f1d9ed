//! User configuration for a quiz session
//!
//! The configuration holds how many rounds a game lasts and how long the
//! player has to answer each question. It outlives individual games: resetting
//! a game never touches it. The round count is the only value the settings
//! screen can change, and out-of-range requests are clamped rather than
//! rejected.

use std::time::Duration;

use garde::Validate;
use serde::{Deserialize, Serialize};

use super::Error;
use crate::constants::{
    rounds::{DEFAULT_ROUNDS, MAX_ROUNDS, MIN_ROUNDS},
    timer::DEFAULT_TIME_LIMIT,
};

type ValidationResult = garde::Result;

/// Validates that a duration falls within specified bounds.
///
/// # Errors
///
/// Returns a `garde::Error` if the duration is outside the inclusive range
/// `[MIN_SECONDS, MAX_SECONDS]`.
fn validate_duration<const MIN_SECONDS: u64, const MAX_SECONDS: u64>(
    field: &'static str,
    val: &Duration,
) -> ValidationResult {
    if (MIN_SECONDS..=MAX_SECONDS).contains(&val.as_secs()) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "{field} is outside of the bounds [{MIN_SECONDS},{MAX_SECONDS}]",
        )))
    }
}

/// Validates the time limit for answering a question
fn validate_time_limit(val: &Duration) -> ValidationResult {
    validate_duration::<
        { crate::constants::timer::MIN_TIME_LIMIT },
        { crate::constants::timer::MAX_TIME_LIMIT },
    >("time_limit", val)
}

/// Session-wide quiz settings
#[serde_with::serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Configuration {
    /// Number of rounds a game is played for
    #[garde(range(min = MIN_ROUNDS, max = MAX_ROUNDS))]
    round_count: usize,
    /// Time the player has to answer a single question
    #[garde(custom(|v, _| validate_time_limit(v)))]
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    time_limit: Duration,
}

impl Default for Configuration {
    /// Ten rounds of ten seconds each
    fn default() -> Self {
        Self {
            round_count: DEFAULT_ROUNDS,
            time_limit: Duration::from_secs(DEFAULT_TIME_LIMIT),
        }
    }
}

impl Configuration {
    /// Creates a configuration from explicit values
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the round count or the time limit is
    /// out of bounds.
    pub fn new(round_count: usize, time_limit: Duration) -> Result<Self, Error> {
        let configuration = Self {
            round_count,
            time_limit,
        };
        configuration.validate()?;
        Ok(configuration)
    }

    /// Parses a configuration from JSON, filling missing fields with defaults
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] for unparsable input and
    /// [`Error::Invalid`] for out of bounds values.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let configuration: Self = serde_json::from_str(json)?;
        configuration.validate()?;
        Ok(configuration)
    }

    /// Number of rounds a game is played for
    pub fn round_count(&self) -> usize {
        self.round_count
    }

    /// Time the player has to answer a single question
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Stores a new round count, clamped to the allowed range
    ///
    /// Returns the value that was actually stored.
    pub fn set_round_count(&mut self, requested: usize) -> usize {
        let round_count = requested.clamp(MIN_ROUNDS, MAX_ROUNDS);
        if round_count != requested {
            tracing::debug!(requested, round_count, "clamped round count");
        }
        self.round_count = round_count;
        round_count
    }

    /// Returns a copy of this configuration with the round count replaced
    ///
    /// The value is clamped the same way as [`Configuration::set_round_count`].
    #[must_use]
    pub fn with_round_count(mut self, requested: usize) -> Self {
        self.set_round_count(requested);
        self
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let configuration = Configuration::default();

        assert_eq!(configuration.round_count(), 10);
        assert_eq!(configuration.time_limit(), Duration::from_secs(10));
        assert!(configuration.validate().is_ok());
    }

    #[test]
    fn test_set_round_count_clamps_high() {
        let mut configuration = Configuration::default();
        assert_eq!(configuration.set_round_count(25), MAX_ROUNDS);
        assert_eq!(configuration.round_count(), 20);
    }

    #[test]
    fn test_set_round_count_clamps_low() {
        let mut configuration = Configuration::default();
        assert_eq!(configuration.set_round_count(0), MIN_ROUNDS);
        assert_eq!(configuration.round_count(), 1);
    }

    #[test]
    fn test_set_round_count_in_range() {
        let mut configuration = Configuration::default();
        assert_eq!(configuration.set_round_count(7), 7);
        assert_eq!(configuration.round_count(), 7);
    }

    #[test]
    fn test_with_round_count() {
        let configuration = Configuration::default().with_round_count(100);
        assert_eq!(configuration.round_count(), MAX_ROUNDS);
        assert_eq!(configuration.time_limit(), Duration::from_secs(10));
    }

    #[test]
    fn test_new_validates() {
        assert!(Configuration::new(5, Duration::from_secs(15)).is_ok());
        assert!(matches!(
            Configuration::new(21, Duration::from_secs(15)),
            Err(Error::Invalid(_))
        ));
        assert!(matches!(
            Configuration::new(5, Duration::from_secs(4)),
            Err(Error::Invalid(_))
        ));
        assert!(matches!(
            Configuration::new(5, Duration::from_secs(61)),
            Err(Error::Invalid(_))
        ));
    }

    #[test]
    fn test_from_json_partial() {
        let configuration = Configuration::from_json(r#"{"round_count":3}"#).unwrap();

        assert_eq!(configuration.round_count(), 3);
        assert_eq!(configuration.time_limit(), Duration::from_secs(10));
    }

    #[test]
    fn test_from_json_time_limit_in_seconds() {
        let configuration =
            Configuration::from_json(r#"{"round_count":4,"time_limit":30}"#).unwrap();
        assert_eq!(configuration.time_limit(), Duration::from_secs(30));
    }

    #[test]
    fn test_from_json_out_of_bounds() {
        assert!(matches!(
            Configuration::from_json(r#"{"round_count":0}"#),
            Err(Error::Invalid(_))
        ));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Configuration::from_json("round_count = 3"),
            Err(Error::Malformed(_))
        ));
    }

    #[test]
    fn test_validate_time_limit_bounds() {
        assert!(validate_time_limit(&Duration::from_secs(5)).is_ok());
        assert!(validate_time_limit(&Duration::from_secs(60)).is_ok());
        assert!(validate_time_limit(&Duration::from_secs(61)).is_err());
    }
}
