use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key selecting one question generator, e.g. `addition-subtraction`.
///
/// Any non-empty kebab-case string parses; whether a generator exists for it is
/// decided by the catalogue at generation time.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    /// Creates a `TopicId` without checking its shape.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({})", self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── FromStr ───────────────────────────────────────────────────────────────────

/// Error type for parsing a topic id from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTopicError {
    raw: String,
}

impl fmt::Display for ParseTopicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid topic id: {:?}", self.raw)
    }
}

impl std::error::Error for ParseTopicError {}

impl FromStr for TopicId {
    type Err = ParseTopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let well_formed = !trimmed.is_empty()
            && !trimmed.starts_with('-')
            && !trimmed.ends_with('-')
            && trimmed
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if well_formed {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ParseTopicError { raw: s.to_string() })
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kebab_case_ids() {
        let id: TopicId = " 3d-pythagoras-trig ".parse().unwrap();
        assert_eq!(id.as_str(), "3d-pythagoras-trig");
        assert_eq!(id.to_string(), "3d-pythagoras-trig");
        assert_eq!(format!("{id:?}"), "TopicId(3d-pythagoras-trig)");
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!("".parse::<TopicId>().is_err());
        assert!("Fractions".parse::<TopicId>().is_err());
        assert!("-fractions".parse::<TopicId>().is_err());
        assert!("fractions of amount".parse::<TopicId>().is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = TopicId::new("fractions");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"fractions\"");
    }
}
