use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("max attempts must be > 0")]
    InvalidMaxAttempts,

    #[error("numeric epsilon must be finite and > 0, got {0}")]
    InvalidNumericEpsilon(f64),

    #[error("fuzzy threshold must be in (0, 1], got {0}")]
    InvalidFuzzyThreshold(f64),

    #[error("keyword distance must be <= 4, got {0}")]
    InvalidKeywordDistance(usize),

    #[error("symbol tolerance must be in (0, 0.25), got {0}")]
    InvalidSymbolTolerance(f64),
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Tuning knobs shared by the generator and the grader.
///
/// Deserialized values go through the same checks as [`QuizSettings::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSettings")]
pub struct QuizSettings {
    max_attempts: u32,
    numeric_epsilon: f64,
    fuzzy_threshold: f64,
    keyword_distance: usize,
    symbol_tolerance: f64,
}

#[derive(Deserialize)]
struct RawSettings {
    max_attempts: u32,
    numeric_epsilon: f64,
    fuzzy_threshold: f64,
    keyword_distance: usize,
    symbol_tolerance: f64,
}

impl TryFrom<RawSettings> for QuizSettings {
    type Error = SettingsError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        Self::new(
            raw.max_attempts,
            raw.numeric_epsilon,
            raw.fuzzy_threshold,
            raw.keyword_distance,
            raw.symbol_tolerance,
        )
    }
}

impl QuizSettings {
    /// The settings every topic was authored against:
    /// - 32 draws before a constrained generator falls back
    /// - exact numeric comparison up to 1e-9
    /// - 85% similarity for free-text explanations
    /// - keywords may be two edits away
    /// - placed symbols must total within 0.01
    #[must_use]
    pub fn standard() -> Self {
        Self {
            max_attempts: 32,
            numeric_epsilon: 1e-9,
            fuzzy_threshold: 0.85,
            keyword_distance: 2,
            symbol_tolerance: 0.01,
        }
    }

    /// # Errors
    ///
    /// Returns a `SettingsError` naming the first out-of-range value.
    pub fn new(
        max_attempts: u32,
        numeric_epsilon: f64,
        fuzzy_threshold: f64,
        keyword_distance: usize,
        symbol_tolerance: f64,
    ) -> Result<Self, SettingsError> {
        let settings = Self {
            max_attempts,
            numeric_epsilon,
            fuzzy_threshold,
            keyword_distance,
            symbol_tolerance,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns a `SettingsError` naming the first out-of-range value.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_attempts == 0 {
            return Err(SettingsError::InvalidMaxAttempts);
        }
        if !self.numeric_epsilon.is_finite() || self.numeric_epsilon <= 0.0 {
            return Err(SettingsError::InvalidNumericEpsilon(self.numeric_epsilon));
        }
        if !(self.fuzzy_threshold > 0.0 && self.fuzzy_threshold <= 1.0) {
            return Err(SettingsError::InvalidFuzzyThreshold(self.fuzzy_threshold));
        }
        if self.keyword_distance > 4 {
            return Err(SettingsError::InvalidKeywordDistance(self.keyword_distance));
        }
        if !(self.symbol_tolerance > 0.0 && self.symbol_tolerance < 0.25) {
            return Err(SettingsError::InvalidSymbolTolerance(self.symbol_tolerance));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SettingsError::InvalidMaxAttempts` for zero.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Result<Self, SettingsError> {
        self.max_attempts = max_attempts;
        self.validate()?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `SettingsError::InvalidFuzzyThreshold` outside (0, 1].
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Result<Self, SettingsError> {
        self.fuzzy_threshold = threshold;
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn numeric_epsilon(&self) -> f64 {
        self.numeric_epsilon
    }

    #[must_use]
    pub fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    #[must_use]
    pub fn keyword_distance(&self) -> usize {
        self.keyword_distance
    }

    #[must_use]
    pub fn symbol_tolerance(&self) -> f64 {
        self.symbol_tolerance
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_settings_are_valid() {
        assert!(QuizSettings::standard().validate().is_ok());
        assert_eq!(QuizSettings::default(), QuizSettings::standard());
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(
            QuizSettings::new(0, 1e-9, 0.85, 2, 0.01).unwrap_err(),
            SettingsError::InvalidMaxAttempts
        );
        assert!(matches!(
            QuizSettings::new(5, f64::NAN, 0.85, 2, 0.01).unwrap_err(),
            SettingsError::InvalidNumericEpsilon(_)
        ));
        assert!(matches!(
            QuizSettings::new(5, 1e-9, 1.5, 2, 0.01).unwrap_err(),
            SettingsError::InvalidFuzzyThreshold(_)
        ));
        assert!(matches!(
            QuizSettings::new(5, 1e-9, 0.85, 9, 0.01).unwrap_err(),
            SettingsError::InvalidKeywordDistance(9)
        ));
        assert!(matches!(
            QuizSettings::new(5, 1e-9, 0.85, 2, 0.5).unwrap_err(),
            SettingsError::InvalidSymbolTolerance(_)
        ));
    }

    #[test]
    fn deserializing_validates() {
        let json = serde_json::to_string(&QuizSettings::standard()).unwrap();
        let back: QuizSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, QuizSettings::standard());

        let bad = json.replace("\"max_attempts\":32", "\"max_attempts\":0");
        assert_ne!(bad, json);
        let err = serde_json::from_str::<QuizSettings>(&bad).unwrap_err();
        assert!(err.to_string().contains("max attempts must be > 0"), "{err}");
    }

    #[test]
    fn builder_methods_revalidate() {
        let settings = QuizSettings::standard().with_max_attempts(5).unwrap();
        assert_eq!(settings.max_attempts(), 5);
        assert!(QuizSettings::standard().with_fuzzy_threshold(0.0).is_err());
    }
}
