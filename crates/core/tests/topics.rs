use quiz_core::generator::{self, topics};
use quiz_core::model::{FractionTask, LearnerInput, Question, TopicId};
use quiz_core::{ChaChaSource, Draws, QuizSettings, ScriptedSource, generate, grade};

const ROUNDS: usize = 40;

fn questions(id: &str, seed: u64) -> Vec<Question> {
    let mut source = ChaChaSource::seeded(seed);
    let mut draws = Draws::new(&mut source, QuizSettings::standard().max_attempts());
    let topic = TopicId::new(id);
    (0..ROUNDS)
        .map(|_| generate(&topic, &mut draws).unwrap())
        .collect()
}

#[test]
fn catalogue_covers_every_grade_in_order() {
    let all = topics();
    assert_eq!(all.len(), 123);
    assert_eq!(all[0].id, "addition-subtraction");
    assert_eq!(all[all.len() - 1].id, "conditional-probability");
    assert!(all.windows(2).all(|pair| pair[0].grade <= pair[1].grade));
    for grade in 1..=7 {
        assert!(generator::by_grade(grade).next().is_some(), "grade {grade}");
    }

    let mut ids: Vec<&str> = all.iter().map(|entry| entry.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), all.len(), "topic ids are unique");
}

#[test]
fn every_topic_generates_gradable_questions() {
    let settings = QuizSettings::standard();
    for (n, entry) in topics().iter().enumerate() {
        for question in questions(entry.id, n as u64) {
            assert_eq!(question.validate(), Ok(()), "{}: {question:?}", entry.id);
            let result = grade(&question, &LearnerInput::default(), &settings).unwrap();
            assert!(result.units_graded() > 0, "{}", entry.id);
        }
    }
}

#[test]
fn typing_the_expected_scalar_answer_is_always_correct() {
    let settings = QuizSettings::standard();
    for (n, entry) in topics().iter().enumerate() {
        for question in questions(entry.id, 1000 + n as u64) {
            let Some(answer) = question.scalar_answer() else {
                continue;
            };
            if !question.parts().is_empty() {
                continue;
            }
            let input = LearnerInput::with_answer(answer.to_string());
            let result = grade(&question, &input, &settings).unwrap();
            assert!(result.all_correct(), "{}: {answer} for {:?}", entry.id, question.prompt());
        }
    }
}

#[test]
fn simplified_fractions_are_lowest_terms_of_the_same_value() {
    let mut checked = 0;
    for question in questions("fractions", 77).into_iter().chain(questions("fractions", 78)) {
        let Question::Fraction(q) = question else {
            continue;
        };
        let FractionTask::Simplify { fraction } = q.task else {
            continue;
        };
        let reduced = fraction.reduced();
        assert!(reduced.is_reduced());
        assert!(reduced.same_value(fraction));
        assert_eq!(q.answer, reduced.into());
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn unknown_topics_are_reported() {
    let mut source = ScriptedSource::new([0.5]);
    let mut draws = Draws::new(&mut source, 4);
    let err = generate(&TopicId::new("knitting"), &mut draws).unwrap_err();
    assert_eq!(err.to_string(), "unknown topic: knitting");
}

#[test]
fn scripted_addition() {
    // a = 7, b = 4, '+'
    let mut source = ScriptedSource::new([0.55, 0.3, 0.9]);
    let mut draws = Draws::new(&mut source, 4);
    let question = generate(&TopicId::new("addition-subtraction"), &mut draws).unwrap();
    assert_eq!(question.prompt(), Some("7 + 4 = ?"));

    let settings = QuizSettings::standard();
    for (typed, ok) in [("11", true), ("11.0", true), ("12", false)] {
        let result = grade(&question, &LearnerInput::with_answer(typed), &settings).unwrap();
        assert_eq!(result.all_correct(), ok, "{typed}");
    }
}
