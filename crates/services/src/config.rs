use std::env;

use quiz_core::QuizSettings;

use crate::error::ConfigError;

pub const SEED_VAR: &str = "QUIZ_SEED";
pub const MAX_ATTEMPTS_VAR: &str = "QUIZ_MAX_ATTEMPTS";
pub const FUZZY_THRESHOLD_VAR: &str = "QUIZ_FUZZY_THRESHOLD";

/// Settings for one quiz session plus an optional rng seed.
///
/// Without a seed the session draws from OS entropy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub settings: QuizSettings,
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            settings: QuizSettings::standard(),
            seed: None,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Reads `QUIZ_SEED`, `QUIZ_MAX_ATTEMPTS` and `QUIZ_FUZZY_THRESHOLD`.
    /// Unset or blank variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but does not parse or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`SessionConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(seed) = parsed::<u64>(&lookup, SEED_VAR, "unsigned integer")? {
            config.seed = Some(seed);
        }
        if let Some(attempts) = parsed::<u32>(&lookup, MAX_ATTEMPTS_VAR, "unsigned integer")? {
            config.settings = config.settings.with_max_attempts(attempts)?;
        }
        if let Some(threshold) = parsed::<f64>(&lookup, FUZZY_THRESHOLD_VAR, "number")? {
            config.settings = config.settings.with_fuzzy_threshold(threshold)?;
        }
        Ok(config)
    }
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Invalid {
            var,
            expected,
            raw: raw.clone(),
        })
}
