use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// End-of-practice totals for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub topic: String,
    /// Records in the history, graded or not.
    pub questions: usize,
    /// Records with feedback.
    pub graded: usize,
    /// Correct units across graded records.
    pub score: u32,
    /// Units across graded records.
    pub units: u32,
    pub started_at: DateTime<Utc>,
}

impl QuizSummary {
    /// Whole-number percentage of correct units, 0 when nothing was graded.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.units == 0 {
            return 0;
        }
        (f64::from(self.score) * 100.0 / f64::from(self.units)).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    fn summary(score: u32, units: u32) -> QuizSummary {
        QuizSummary {
            topic: "addition-subtraction".into(),
            questions: 3,
            graded: 2,
            score,
            units,
            started_at: fixed_now(),
        }
    }

    #[test]
    fn percent_rounds_and_handles_nothing_graded() {
        assert_eq!(summary(2, 3).percent(), 67);
        assert_eq!(summary(4, 4).percent(), 100);
        assert_eq!(summary(0, 0).percent(), 0);
    }
}
