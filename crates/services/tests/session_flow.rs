use std::sync::{Arc, Mutex};

use quiz_core::model::{HistoryError, Installed, TopicId};
use quiz_core::time::fixed_clock;
use quiz_services::{QuizSession, SessionConfig, SessionError, Transition};

fn started(topic: &str, seed: u64) -> QuizSession {
    let mut session = QuizSession::new(SessionConfig::seeded(seed)).with_clock(fixed_clock());
    session.start(&TopicId::new(topic)).unwrap();
    session
}

/// Submits whatever is typed and moves on.
fn submit_and_advance(session: &mut QuizSession) -> Installed {
    session.submit().unwrap();
    session.advance().unwrap()
}

#[test]
fn rewind_then_advance_replays_the_same_record() {
    let mut session = started("fractions", 11);
    submit_and_advance(&mut session);
    submit_and_advance(&mut session);
    assert_eq!(session.cursor(), Some(2));
    assert_eq!(session.len(), 3);

    let latest = session.question().cloned();
    let first = session.history().unwrap().records()[0].question.clone();

    assert_eq!(session.rewind().unwrap(), Installed::Restored);
    assert_eq!(session.rewind().unwrap(), Installed::Restored);
    assert_eq!(session.question(), Some(&first));
    assert!(matches!(
        session.rewind(),
        Err(SessionError::History(HistoryError::AtStart))
    ));

    assert_eq!(session.advance().unwrap(), Installed::Restored);
    assert_eq!(session.advance().unwrap(), Installed::Restored);
    assert_eq!(session.question().cloned(), latest);
    assert_eq!(session.len(), 3);
}

#[test]
fn replayed_records_keep_their_input_and_feedback() {
    let mut session = started("addition-subtraction", 3);
    session.set_answer("not a number").unwrap();
    session.submit().unwrap();
    let graded = session.snapshot().cloned();
    session.advance().unwrap();

    session.rewind().unwrap();
    assert_eq!(session.snapshot().cloned(), graded);
}

#[test]
fn branch_drops_the_forward_records() {
    let mut session = started("ratio", 5);
    submit_and_advance(&mut session);
    submit_and_advance(&mut session);
    session.rewind().unwrap();
    session.rewind().unwrap();
    assert_eq!(session.len(), 3);

    assert_eq!(session.branch().unwrap(), Installed::Generated);
    assert_eq!(session.len(), 2);
    assert_eq!(session.cursor(), Some(1));
    assert!(!session.can_advance());
}

#[test]
fn go_to_latest_restores_the_tail() {
    let mut session = started("exchange-rates", 9);
    submit_and_advance(&mut session);
    submit_and_advance(&mut session);
    session.rewind().unwrap();
    session.rewind().unwrap();

    assert_eq!(session.go_to_latest().unwrap(), Installed::Restored);
    assert_eq!(session.cursor(), Some(2));
}

#[test]
fn export_then_restore_gives_an_equal_history() {
    let mut session = started("area-perimeter", 21);
    session.set_answer("12").unwrap();
    submit_and_advance(&mut session);
    session.set_answer("8").unwrap();
    session.rewind().unwrap();

    let json = session.export_json().unwrap();
    let mut restored = QuizSession::new(SessionConfig::seeded(1)).with_clock(fixed_clock());
    restored.restore_json(&TopicId::new("area-perimeter"), &json).unwrap();

    assert_eq!(restored.history().unwrap(), session.history().unwrap());
    assert_eq!(restored.cursor(), Some(0));
    assert_eq!(restored.summary().unwrap(), session.summary().unwrap());
}

#[test]
fn restore_rejects_a_cursor_past_the_end() {
    let session = started("area-perimeter", 2);
    let mut json: serde_json::Value = serde_json::from_str(&session.export_json().unwrap()).unwrap();
    json["cursor"] = serde_json::json!(4);

    let mut restored = QuizSession::new(SessionConfig::default());
    let err = restored
        .restore_json(&TopicId::new("area-perimeter"), &json.to_string())
        .unwrap_err();
    assert!(matches!(err, SessionError::Persist(_)));
    assert!(!restored.is_started());
}

#[test]
fn summary_counts_graded_units() {
    let mut session = started("simultaneous-equations", 4);
    session.submit().unwrap();
    session.advance().unwrap();

    let summary = session.summary().unwrap();
    assert_eq!(summary.topic, "simultaneous-equations");
    assert_eq!(summary.questions, 2);
    assert_eq!(summary.graded, 1);
    assert_eq!(summary.units, 2);
    assert_eq!(summary.score, 0);
    assert_eq!(summary.started_at, quiz_core::time::fixed_now());
}

#[test]
fn listener_sees_each_committed_transition() {
    let seen: Arc<Mutex<Vec<(Transition, usize)>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let mut session = QuizSession::new(SessionConfig::seeded(8))
        .with_clock(fixed_clock())
        .with_listener(Arc::new(move |transition: Transition, cursor: usize| {
            sink.lock().unwrap().push((transition, cursor));
        }));

    session.start(&TopicId::new("addition-subtraction")).unwrap();
    assert!(session.advance().is_err());
    session.submit().unwrap();
    session.advance().unwrap();
    session.rewind().unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (Transition::Started, 0),
            (Transition::Submitted, 0),
            (Transition::Advanced, 1),
            (Transition::Rewound, 0),
        ]
    );
}
