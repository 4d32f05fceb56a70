use chrono::{DateTime, Utc};

/// Where history records and session summaries get their timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    /// Every reading returns the same instant.
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// 2023-11-14T22:13:20Z
const TEST_EPOCH_SECONDS: i64 = 1_700_000_000;

/// Stable instant for tests and saved-session fixtures.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(TEST_EPOCH_SECONDS, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::Fixed(fixed_now())
}
