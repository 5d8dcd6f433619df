//! Configuration for driver runs and seed resolution.

use std::num::ParseIntError;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Environment variable consulted for the run seed when none is passed.
pub const SEED_ENV_VAR: &str = "QUICKPROP_SEED";

/// Passing trials required by default.
pub const DEFAULT_MAX_SUCCESS: usize = 100;

/// Size reached at the final trial when `max_size` is left at 0.
pub const DEFAULT_MAX_SIZE: usize = 100;

/// Discards allowed per required success when `max_discarded` is left at 0.
pub const DISCARD_RATIO: usize = 5;

/// Shrink searches are abandoned after this long unless configured otherwise.
pub const DEFAULT_SHRINK_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_success must be greater than 0")]
    InvalidMaxSuccess,

    #[error("shrink timeout must be greater than 0 (use None to disable it)")]
    InvalidShrinkTimeout,

    #[error("invalid seed {value:?} in {}: {source}", SEED_ENV_VAR)]
    InvalidSeed {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Limits and seed for one driver run.
///
/// Zero in `max_discarded` or `max_size` selects the default derived value,
/// see [`CheckConfig::effective_max_discarded`] and
/// [`CheckConfig::effective_max_size`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Number of passing trials after which the property is accepted
    pub max_success: usize,
    /// Discards tolerated before giving up (0 = `max_success * 5`)
    pub max_discarded: usize,
    /// Size parameter reached on the last trial (0 = 100)
    pub max_size: usize,
    /// Wall-clock budget for shrinking; `None` shrinks until a local minimum
    pub shrink_timeout: Option<Duration>,
    /// Explicit seed, taking precedence over the environment
    pub seed: Option<u32>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            max_success: DEFAULT_MAX_SUCCESS,
            max_discarded: 0,
            max_size: 0,
            shrink_timeout: Some(DEFAULT_SHRINK_TIMEOUT),
            seed: None,
        }
    }
}

impl CheckConfig {
    /// Create a configuration with validation
    pub fn new(
        max_success: usize,
        max_discarded: usize,
        max_size: usize,
        shrink_timeout: Option<Duration>,
        seed: Option<u32>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            max_success,
            max_discarded,
            max_size,
            shrink_timeout,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_success == 0 {
            return Err(ConfigError::InvalidMaxSuccess);
        }
        if self.shrink_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidShrinkTimeout);
        }
        Ok(())
    }

    pub fn with_max_success(mut self, max_success: usize) -> Self {
        self.max_success = max_success;
        self
    }

    pub fn with_max_discarded(mut self, max_discarded: usize) -> Self {
        self.max_discarded = max_discarded;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_shrink_timeout(mut self, timeout: Duration) -> Self {
        self.shrink_timeout = Some(timeout);
        self
    }

    /// Let shrinking run until no candidate fails
    pub fn without_shrink_timeout(mut self) -> Self {
        self.shrink_timeout = None;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn effective_max_discarded(&self) -> usize {
        if self.max_discarded == 0 {
            self.max_success.saturating_mul(DISCARD_RATIO)
        } else {
            self.max_discarded
        }
    }

    pub fn effective_max_size(&self) -> usize {
        if self.max_size == 0 {
            DEFAULT_MAX_SIZE
        } else {
            self.max_size
        }
    }
}

/// Resolve the seed for a run: explicit seed, then [`SEED_ENV_VAR`], then
/// the wall clock.
pub fn resolve_seed(explicit: Option<u32>) -> Result<u32, ConfigError> {
    let env_value = std::env::var(SEED_ENV_VAR).ok();
    resolve_seed_from(explicit, env_value.as_deref())
}

/// Seed resolution with the environment value supplied by the caller.
pub fn resolve_seed_from(explicit: Option<u32>, env_value: Option<&str>) -> Result<u32, ConfigError> {
    if let Some(seed) = explicit {
        return Ok(seed);
    }
    match env_value {
        Some(value) => value
            .trim()
            .parse::<u32>()
            .map_err(|source| ConfigError::InvalidSeed {
                value: value.to_string(),
                source,
            }),
        None => Ok(clock_seed()),
    }
}

fn clock_seed() -> u32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    // Truncation keeps the low bits, which change every second.
    secs as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_config_defaults() {
        let config = CheckConfig::default();
        assert_eq!(config.max_success, 100);
        assert_eq!(config.effective_max_discarded(), 500);
        assert_eq!(config.effective_max_size(), 100);
        assert_eq!(config.shrink_timeout, Some(Duration::from_secs(30)));
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_limits_are_kept() {
        let config = CheckConfig::default()
            .with_max_success(10)
            .with_max_discarded(3)
            .with_max_size(7);
        assert_eq!(config.effective_max_discarded(), 3);
        assert_eq!(config.effective_max_size(), 7);

        let config = CheckConfig::default().with_max_success(10);
        assert_eq!(config.effective_max_discarded(), 50);
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            CheckConfig::new(0, 0, 0, None, None),
            Err(ConfigError::InvalidMaxSuccess)
        );
        assert_eq!(
            CheckConfig::new(10, 0, 0, Some(Duration::ZERO), None),
            Err(ConfigError::InvalidShrinkTimeout)
        );
        assert!(CheckConfig::new(10, 0, 0, None, Some(3)).is_ok());
    }

    #[test]
    fn test_explicit_seed_wins() {
        assert_eq!(resolve_seed_from(Some(5), Some("9")), Ok(5));
        assert_eq!(resolve_seed_from(Some(5), Some("garbage")), Ok(5));
    }

    #[test]
    fn test_env_seed_parsing() {
        assert_eq!(resolve_seed_from(None, Some("1234")), Ok(1234));
        assert_eq!(resolve_seed_from(None, Some(" 77\n")), Ok(77));

        let error = resolve_seed_from(None, Some("not-a-number")).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidSeed { ref value, .. } if value == "not-a-number"));
        assert!(error.to_string().contains(SEED_ENV_VAR));

        assert!(resolve_seed_from(None, Some("-1")).is_err());
        assert!(resolve_seed_from(None, Some("4294967296")).is_err());
    }

    #[test]
    fn test_clock_seed_without_env() {
        assert!(resolve_seed_from(None, None).is_ok());
    }
}
