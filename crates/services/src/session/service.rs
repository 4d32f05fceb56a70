use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use quiz_core::generator::{self, TopicEntry};
use quiz_core::model::{
    Board, GradeResult, History, HistoryError, Installed, LearnerInput, Question, Snapshot, Token,
    TopicId,
};
use quiz_core::{ChaChaSource, Clock, Draws, GenerateError, QuizSettings, RandomSource, grade};

use super::events::{Transition, TransitionListener};
use super::summary::QuizSummary;
use crate::config::SessionConfig;
use crate::error::SessionError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

struct Live {
    topic: &'static TopicEntry,
    history: History,
    started_at: DateTime<Utc>,
}

enum State {
    Idle,
    Live(Live),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner practising one topic.
///
/// Owns the random source, the settings, the clock and the question history.
/// Learner edits only ever touch the record under the cursor; navigation swaps
/// in a new `History` only when the transition succeeds.
pub struct QuizSession {
    settings: QuizSettings,
    source: Box<dyn RandomSource>,
    clock: Clock,
    state: State,
    focused_part: usize,
    listener: Option<Arc<dyn TransitionListener + Send + Sync>>,
}

impl QuizSession {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let source = match config.seed {
            Some(seed) => ChaChaSource::seeded(seed),
            None => ChaChaSource::from_entropy(),
        };
        Self {
            settings: config.settings,
            source: Box::new(source),
            clock: Clock::default(),
            state: State::Idle,
            focused_part: 0,
            listener: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the random source, e.g. with a `ScriptedSource` in tests.
    #[must_use]
    pub fn with_source(mut self, source: impl RandomSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn TransitionListener + Send + Sync>) -> Self {
        self.listener = Some(listener);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    // ─── Lifecycle ─────────────────────────────────────────────────────────────

    /// Starts a fresh history for `topic`, discarding any previous one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Generate` for a topic with no generator. The
    /// current session is kept in that case.
    pub fn start(&mut self, topic: &TopicId) -> Result<(), SessionError> {
        let entry = lookup(topic)?;
        let now = self.clock.now();
        let question = {
            let mut draws = Draws::new(self.source.as_mut(), self.settings.max_attempts());
            entry.question(&mut draws)
        };
        self.state = State::Live(Live {
            topic: entry,
            history: History::start(question, now),
            started_at: now,
        });
        self.focused_part = 0;
        self.notify(Transition::Started);
        Ok(())
    }

    /// Replaces the session with a previously exported history for `topic`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Generate` for an unknown topic and
    /// `SessionError::Persist` for malformed JSON or an out-of-range cursor.
    pub fn restore_json(&mut self, topic: &TopicId, json: &str) -> Result<(), SessionError> {
        let entry = lookup(topic)?;
        let history: History = serde_json::from_str(json)?;
        let started_at = history
            .records()
            .first()
            .map_or_else(|| self.clock.now(), |record| record.created_at);
        self.state = State::Live(Live {
            topic: entry,
            history,
            started_at,
        });
        self.focused_part = 0;
        self.notify(Transition::Restored);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start`, or `SessionError::Persist`.
    pub fn export_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(self.history()?)?)
    }

    // ─── Learner edits ─────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start`.
    pub fn set_answer(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.input_mut()?.answer = text.into();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start` and
    /// `SessionError::NoSuchPart` when the live question has no part `part`.
    pub fn set_part_answer(
        &mut self,
        part: usize,
        text: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.sub_part_count(part)?;
        self.input_mut()?.set_part(part, text);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start`, and `NoSuchPart` or
    /// `NoSuchSubPart` when the live question has nowhere to put the text.
    pub fn set_sub_part_answer(
        &mut self,
        part: usize,
        sub: usize,
        text: impl Into<String>,
    ) -> Result<(), SessionError> {
        if sub >= self.sub_part_count(part)? {
            return Err(SessionError::NoSuchSubPart { part, sub });
        }
        self.input_mut()?.set_sub_part(part, sub, text);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start`.
    pub fn set_frequency(
        &mut self,
        row: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.input_mut()?.frequencies.insert(row.into(), value.into());
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start`.
    pub fn set_key(&mut self, value: impl Into<String>) -> Result<(), SessionError> {
        self.input_mut()?.key = value.into();
        Ok(())
    }

    /// Drops a token on a row of the live question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Token` when the question does not accept the token
    /// there; the snapshot is unchanged.
    pub fn place_token(&mut self, row: &str, token: Token) -> Result<(), SessionError> {
        let live = self.live_mut()?;
        let mut input = live.history.snapshot().input.clone();
        input.place_token(live.history.question(), row, token)?;
        live.history.live_snapshot_mut().input = input;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::Token` when there is no such token; the snapshot is unchanged.
    pub fn remove_token(
        &mut self,
        row: &str,
        board: Board,
        index: usize,
    ) -> Result<Token, SessionError> {
        Ok(self.input_mut()?.remove_token(row, board, index)?)
    }

    #[must_use]
    pub fn focused_part(&self) -> usize {
        self.focused_part
    }

    /// Moves the view focus to a part of the live question. Out-of-range
    /// indices are ignored.
    pub fn focus_part(&mut self, part: usize) {
        let parts = self.question().map_or(0, |q| q.parts().len());
        if part < parts {
            self.focused_part = part;
        }
    }

    // ─── Grading ───────────────────────────────────────────────────────────────

    /// Grades the live input and stores the feedback, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start` and
    /// `SessionError::Grade` for a malformed question.
    pub fn submit(&mut self) -> Result<GradeResult, SessionError> {
        let settings = self.settings;
        let live = self.live_mut()?;
        let result = grade(
            live.history.question(),
            &live.history.snapshot().input,
            &settings,
        )?;
        live.history.live_snapshot_mut().feedback = Some(result.clone());
        self.notify(Transition::Submitted);
        Ok(result)
    }

    /// Replaces the live input wholesale, then grades it.
    ///
    /// # Errors
    ///
    /// See [`QuizSession::submit`].
    pub fn submit_input(&mut self, input: LearnerInput) -> Result<GradeResult, SessionError> {
        *self.input_mut()? = input;
        self.submit()
    }

    // ─── Navigation ────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `HistoryError::FeedbackRequired` (wrapped) when the live question
    /// has not been submitted. Nothing changes in that case.
    pub fn advance(&mut self) -> Result<Installed, SessionError> {
        let at = self.clock.now();
        let max_attempts = self.settings.max_attempts();
        let State::Live(live) = &mut self.state else {
            return Err(SessionError::NotStarted);
        };
        let entry = live.topic;
        let source = self.source.as_mut();
        let (next, installed) = live.history.advance(at, || {
            entry.question(&mut Draws::new(source, max_attempts))
        })?;
        live.history = next;
        Ok(self.install(installed, Transition::Advanced))
    }

    /// # Errors
    ///
    /// Returns `HistoryError::AtStart` (wrapped) on the first question.
    pub fn rewind(&mut self) -> Result<Installed, SessionError> {
        let live = self.live_mut()?;
        let (next, installed) = live.history.rewind()?;
        live.history = next;
        Ok(self.install(installed, Transition::Rewound))
    }

    /// Discards every record after the cursor and appends a new question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start`.
    pub fn branch(&mut self) -> Result<Installed, SessionError> {
        let at = self.clock.now();
        let max_attempts = self.settings.max_attempts();
        let State::Live(live) = &mut self.state else {
            return Err(SessionError::NotStarted);
        };
        let entry = live.topic;
        let source = self.source.as_mut();
        let (next, installed) = live
            .history
            .branch(at, || entry.question(&mut Draws::new(source, max_attempts)));
        live.history = next;
        Ok(self.install(installed, Transition::Branched))
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start`.
    pub fn go_to_latest(&mut self) -> Result<Installed, SessionError> {
        let live = self.live_mut()?;
        let (next, installed) = live.history.seek_tail();
        live.history = next;
        Ok(self.install(installed, Transition::JumpedToLatest))
    }

    // ─── Views ─────────────────────────────────────────────────────────────────

    #[must_use]
    pub fn is_started(&self) -> bool {
        matches!(self.state, State::Live(_))
    }

    #[must_use]
    pub fn topic(&self) -> Option<&'static TopicEntry> {
        self.live().map(|live| live.topic)
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start`.
    pub fn history(&self) -> Result<&History, SessionError> {
        self.live().map(|live| &live.history).ok_or(SessionError::NotStarted)
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.live().map(|live| live.history.question())
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.live().map(|live| live.history.snapshot())
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.live().map(|live| live.history.cursor())
    }

    /// Number of records, 0 before `start`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live().map_or(0, |live| live.history.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn can_rewind(&self) -> bool {
        self.live().is_some_and(|live| live.history.can_rewind())
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.live().is_some_and(|live| live.history.can_advance())
    }

    /// Correct units and graded units so far.
    #[must_use]
    pub fn score(&self) -> (u32, u32) {
        self.live().map_or((0, 0), |live| live.history.score())
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start`.
    pub fn summary(&self) -> Result<QuizSummary, SessionError> {
        let live = self.live().ok_or(SessionError::NotStarted)?;
        let (score, units) = live.history.score();
        Ok(QuizSummary {
            topic: live.topic.id.to_string(),
            questions: live.history.len(),
            graded: live.history.graded(),
            score,
            units,
            started_at: live.started_at,
        })
    }

    // ─── Internals ─────────────────────────────────────────────────────────────

    fn live(&self) -> Option<&Live> {
        match &self.state {
            State::Live(live) => Some(live),
            State::Idle => None,
        }
    }

    fn live_mut(&mut self) -> Result<&mut Live, SessionError> {
        match &mut self.state {
            State::Live(live) => Ok(live),
            State::Idle => Err(SessionError::NotStarted),
        }
    }

    /// Sub-part count of `part` on the live question.
    fn sub_part_count(&self, part: usize) -> Result<usize, SessionError> {
        let question = self.question().ok_or(SessionError::NotStarted)?;
        question
            .parts()
            .get(part)
            .map(|p| p.sub_parts.len())
            .ok_or(SessionError::NoSuchPart { part })
    }

    fn input_mut(&mut self) -> Result<&mut LearnerInput, SessionError> {
        Ok(&mut self.live_mut()?.history.live_snapshot_mut().input)
    }

    fn install(&mut self, installed: Installed, transition: Transition) -> Installed {
        if installed == Installed::Generated {
            self.focused_part = 0;
        }
        self.notify(transition);
        installed
    }

    fn notify(&self, transition: Transition) {
        let Some(live) = self.live() else {
            return;
        };
        let cursor = live.history.cursor();
        debug!(
            topic = live.topic.id,
            %transition,
            cursor,
            records = live.history.len(),
            "session transition"
        );
        if let Some(listener) = &self.listener {
            listener.on_transition(transition, cursor);
        }
    }
}

fn lookup(topic: &TopicId) -> Result<&'static TopicEntry, SessionError> {
    generator::lookup(topic.as_str())
        .ok_or_else(|| GenerateError::UnknownTopic(topic.to_string()).into())
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("settings", &self.settings)
            .field("clock", &self.clock)
            .field("topic", &self.topic().map(|entry| entry.id))
            .field("cursor", &self.cursor())
            .field("len", &self.len())
            .field("focused_part", &self.focused_part)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::ScriptedSource;
    use quiz_core::time::fixed_clock;

    fn session() -> QuizSession {
        QuizSession::new(SessionConfig::seeded(7)).with_clock(fixed_clock())
    }

    fn topic(id: &str) -> TopicId {
        TopicId::new(id)
    }

    #[test]
    fn idle_session_rejects_edits() {
        let mut s = session();
        assert!(matches!(s.set_answer("3"), Err(SessionError::NotStarted)));
        assert!(matches!(s.advance(), Err(SessionError::NotStarted)));
        assert!(s.question().is_none());
        assert_eq!(s.len(), 0);
        assert!(!s.can_advance());
    }

    #[test]
    fn unknown_topic_keeps_session_idle() {
        let mut s = session();
        let err = s.start(&topic("long-division-of-polynomials")).unwrap_err();
        assert!(matches!(err, SessionError::Generate(GenerateError::UnknownTopic(_))));
        assert!(!s.is_started());
    }

    #[test]
    fn scripted_addition_grades_typed_answers() {
        // a = 7, b = 4, '+'
        let mut s = session().with_source(ScriptedSource::new([0.55, 0.3, 0.9]));
        s.start(&topic("addition-subtraction")).unwrap();
        assert_eq!(s.question().and_then(Question::prompt), Some("7 + 4 = ?"));

        s.set_answer("12").unwrap();
        assert!(!s.submit().unwrap().all_correct());
        s.set_answer("11.0").unwrap();
        assert!(s.submit().unwrap().all_correct());
        assert_eq!(s.score(), (1, 1));
    }

    #[test]
    fn advance_needs_feedback() {
        let mut s = session();
        s.start(&topic("addition-subtraction")).unwrap();
        let err = s.advance().unwrap_err();
        assert!(matches!(err, SessionError::History(HistoryError::FeedbackRequired)));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn focus_resets_only_for_new_questions() {
        let mut s = session();
        s.start(&topic("simultaneous-equations")).unwrap();
        s.focus_part(1);
        s.submit().unwrap();
        assert_eq!(s.advance().unwrap(), Installed::Generated);
        assert_eq!(s.focused_part(), 0);

        s.focus_part(1);
        assert_eq!(s.rewind().unwrap(), Installed::Restored);
        assert_eq!(s.focused_part(), 1);
    }

    #[test]
    fn part_answers_must_name_an_existing_part() {
        let mut s = session();
        s.start(&topic("simultaneous-equations")).unwrap();
        s.set_part_answer(1, "3").unwrap();
        let before = s.snapshot().cloned();

        for part in [2, 99_999_999_999, usize::MAX] {
            let err = s.set_part_answer(part, "x").unwrap_err();
            assert!(matches!(err, SessionError::NoSuchPart { part: p } if p == part));
        }
        let err = s.set_sub_part_answer(0, 0, "x").unwrap_err();
        assert!(matches!(err, SessionError::NoSuchSubPart { part: 0, sub: 0 }));
        let err = s.set_sub_part_answer(usize::MAX, usize::MAX, "x").unwrap_err();
        assert!(matches!(err, SessionError::NoSuchPart { .. }));
        assert_eq!(s.snapshot().cloned(), before);
    }

    #[test]
    fn scalar_questions_have_no_parts_to_answer() {
        let mut s = session();
        assert!(matches!(s.set_part_answer(0, "x"), Err(SessionError::NotStarted)));
        s.start(&topic("addition-subtraction")).unwrap();
        assert!(matches!(
            s.set_part_answer(0, "x"),
            Err(SessionError::NoSuchPart { part: 0 })
        ));
    }

    #[test]
    fn rejected_token_leaves_snapshot_alone() {
        let mut s = session();
        s.start(&topic("addition-subtraction")).unwrap();
        s.set_answer("5").unwrap();
        let before = s.snapshot().cloned();
        let err = s.place_token("Monday", "full".parse().unwrap()).unwrap_err();
        assert!(matches!(err, SessionError::Token(_)));
        assert_eq!(s.snapshot().cloned(), before);
    }
}
