use quiz_core::grader::canonical_groups;
use quiz_core::model::{
    Board, Cell, Expected, Question, SymbolToken, TallyGroup, Token, TopicId,
};
use quiz_core::time::fixed_clock;
use quiz_services::{QuizSession, SessionConfig, SessionError};

/// Restarts the pictograms topic until the completion layout comes up: a tally
/// chart with blank tallies plus a pictogram to fill.
fn completion_session() -> QuizSession {
    let mut session = QuizSession::new(SessionConfig::seeded(2024)).with_clock(fixed_clock());
    for _ in 0..500 {
        session.start(&TopicId::new("pictograms")).unwrap();
        let question = session.question().unwrap();
        let blank_tally = question
            .tally_chart()
            .is_some_and(|chart| chart.rows.iter().any(|row| row.tally.is_none()));
        if blank_tally && question.pictogram().is_some() {
            return session;
        }
    }
    panic!("no completion question in 500 draws");
}

fn fill_correctly(session: &mut QuizSession, question: &Question) {
    let chart = question.tally_chart().unwrap();
    for row in &chart.rows {
        let count = row.inferred_count().unwrap();
        if row.tally.is_none() {
            for marks in canonical_groups(count) {
                let group = TallyGroup::new(marks).unwrap();
                session.place_token(&row.label, Token::Tally(group)).unwrap();
            }
        }
        if row.frequency.is_none() {
            session.set_frequency(row.label.as_str(), count.to_string()).unwrap();
        }
    }

    let Some(Expected::Pictogram { rows, .. }) = &question.parts()[1].answer else {
        panic!("second part should build the pictogram");
    };
    for target in rows {
        let whole = target.symbols.trunc() as usize;
        for _ in 0..whole {
            session
                .place_token(&target.label, Token::Symbol(SymbolToken::Full))
                .unwrap();
        }
        if target.symbols.fract() > 0.0 {
            session
                .place_token(&target.label, Token::Symbol(SymbolToken::Half))
                .unwrap();
        }
    }
}

#[test]
fn correctly_completed_charts_score_every_unit() {
    let mut session = completion_session();
    let question = session.question().unwrap().clone();
    fill_correctly(&mut session, &question);

    let result = session.submit().unwrap();
    assert!(result.all_correct(), "{result:?}");
    assert_eq!(result.units_graded(), 2);
    assert!(result.units.iter().all(|unit| !unit.rows.is_empty()));
}

#[test]
fn tally_groups_out_of_order_are_marked_per_row() {
    let mut session = completion_session();
    let question = session.question().unwrap().clone();
    fill_correctly(&mut session, &question);

    // Every completion layout leaves at least one tally of 3 or more marks blank.
    let row = question
        .tally_chart()
        .unwrap()
        .rows
        .iter()
        .find(|row| row.tally.is_none())
        .expect("a blank tally row");
    let count = row.inferred_count().unwrap();
    assert!(count >= 2, "{row:?}");

    // Same total, but a single mark drawn ahead of the gates.
    while session.remove_token(&row.label, Board::Tally, 0).is_ok() {}
    let single = std::iter::once(1).chain(canonical_groups(count - 1));
    for marks in single {
        let group = TallyGroup::new(marks).unwrap();
        session.place_token(&row.label, Token::Tally(group)).unwrap();
    }

    let result = session.submit().unwrap();
    let tally = result.unit("a").unwrap();
    assert!(!tally.ok);
    let feedback = tally
        .rows
        .iter()
        .find(|f| f.row == row.label && f.cell == Cell::Tally)
        .unwrap();
    assert!(!feedback.ok);
    assert!(feedback.message.contains("gates of 5 first"), "{}", feedback.message);
    assert!(result.unit("b").unwrap().ok);
}

#[test]
fn tokens_on_prefilled_rows_are_rejected() {
    let mut session = completion_session();
    let question = session.question().unwrap().clone();
    let filled = question
        .tally_chart()
        .unwrap()
        .rows
        .iter()
        .find(|row| row.tally.is_some())
        .unwrap();
    let before = session.snapshot().cloned();

    let err = session
        .place_token(&filled.label, Token::Tally(TallyGroup::GATE))
        .unwrap_err();
    assert!(matches!(err, SessionError::Token(_)));
    assert_eq!(session.snapshot().cloned(), before);
}
