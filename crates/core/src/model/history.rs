use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::input::Snapshot;
use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryError {
    #[error("submit an answer before moving on")]
    FeedbackRequired,

    #[error("already at the first question")]
    AtStart,

    #[error("cursor {cursor} is outside a history of {len} records")]
    CursorOutOfRange { cursor: usize, len: usize },

    #[error("history has no records")]
    Empty,
}

/// Why a question became the live one.
///
/// Only `Generated` clears per-question view state; moving the cursor over
/// existing records restores them as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installed {
    Generated,
    Restored,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub question: Question,
    #[serde(default)]
    pub snapshot: Snapshot,
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    #[must_use]
    pub fn new(question: Question, created_at: DateTime<Utc>) -> Self {
        Self {
            question,
            snapshot: Snapshot::default(),
            created_at,
        }
    }
}

//
// ─── HISTORY ───────────────────────────────────────────────────────────────────
//

/// Ordered question records and the cursor of the live one.
///
/// Always holds at least one record and `cursor < records.len()`. Transitions
/// take `&self` and return the next history, so a rejected transition leaves
/// the caller's value untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHistory")]
pub struct History {
    cursor: usize,
    records: Vec<HistoryRecord>,
}

#[derive(Deserialize)]
struct RawHistory {
    cursor: usize,
    records: Vec<HistoryRecord>,
}

impl TryFrom<RawHistory> for History {
    type Error = HistoryError;

    fn try_from(raw: RawHistory) -> Result<Self, Self::Error> {
        Self::from_parts(raw.cursor, raw.records)
    }
}

impl History {
    #[must_use]
    pub fn start(question: Question, at: DateTime<Utc>) -> Self {
        Self {
            cursor: 0,
            records: vec![HistoryRecord::new(question, at)],
        }
    }

    /// # Errors
    ///
    /// Returns `HistoryError::Empty` for no records and
    /// `HistoryError::CursorOutOfRange` when the cursor points past the end.
    pub fn from_parts(cursor: usize, records: Vec<HistoryRecord>) -> Result<Self, HistoryError> {
        if records.is_empty() {
            return Err(HistoryError::Empty);
        }
        if cursor >= records.len() {
            return Err(HistoryError::CursorOutOfRange {
                cursor,
                len: records.len(),
            });
        }
        Ok(Self { cursor, records })
    }

    // ─── Accessors ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Never true for a constructed history.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    #[must_use]
    pub fn live(&self) -> &HistoryRecord {
        &self.records[self.cursor]
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.live().question
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.live().snapshot
    }

    /// The only way to edit a snapshot: the one under the cursor.
    pub fn live_snapshot_mut(&mut self) -> &mut Snapshot {
        &mut self.records[self.cursor].snapshot
    }

    #[must_use]
    pub fn at_tail(&self) -> bool {
        self.cursor + 1 == self.records.len()
    }

    #[must_use]
    pub fn can_rewind(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.snapshot().has_feedback()
    }

    /// Correct units and graded units over every record with feedback.
    #[must_use]
    pub fn score(&self) -> (u32, u32) {
        self.records
            .iter()
            .filter_map(|r| r.snapshot.feedback.as_ref())
            .fold((0, 0), |(score, units), feedback| {
                (score + feedback.score_delta(), units + feedback.units_graded())
            })
    }

    #[must_use]
    pub fn graded(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.snapshot.has_feedback())
            .count()
    }

    // ─── Transitions ───────────────────────────────────────────────────────────

    /// Moves forward: replays the next record if there is one, otherwise
    /// appends a freshly generated question.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::FeedbackRequired` when the live record has not
    /// been graded yet. `generate` is not called in that case.
    pub fn advance(
        &self,
        at: DateTime<Utc>,
        generate: impl FnOnce() -> Question,
    ) -> Result<(Self, Installed), HistoryError> {
        if !self.can_advance() {
            return Err(HistoryError::FeedbackRequired);
        }
        let mut next = self.clone();
        if self.at_tail() {
            next.records.push(HistoryRecord::new(generate(), at));
            next.cursor += 1;
            Ok((next, Installed::Generated))
        } else {
            next.cursor += 1;
            Ok((next, Installed::Restored))
        }
    }

    /// # Errors
    ///
    /// Returns `HistoryError::AtStart` at cursor 0.
    pub fn rewind(&self) -> Result<(Self, Installed), HistoryError> {
        if !self.can_rewind() {
            return Err(HistoryError::AtStart);
        }
        let mut next = self.clone();
        next.cursor -= 1;
        Ok((next, Installed::Restored))
    }

    /// Drops every record after the cursor and appends a new question there.
    ///
    /// Unlike `advance`, no feedback is required: the live record is kept as
    /// it is and the abandoned forward branch is discarded.
    #[must_use]
    pub fn branch(&self, at: DateTime<Utc>, generate: impl FnOnce() -> Question) -> (Self, Installed) {
        let mut next = self.clone();
        next.records.truncate(self.cursor + 1);
        next.records.push(HistoryRecord::new(generate(), at));
        next.cursor = next.records.len() - 1;
        (next, Installed::Generated)
    }

    /// Jumps straight to the newest record without generating anything.
    #[must_use]
    pub fn seek_tail(&self) -> (Self, Installed) {
        let mut next = self.clone();
        next.cursor = next.records.len() - 1;
        (next, Installed::Restored)
    }
}
