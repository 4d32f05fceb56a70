//! Procedural question generation.
//!
//! Every topic is a plain function from a [`Draws`] handle to a [`Question`].
//! The catalogue maps topic ids to those functions; nothing else in the crate
//! needs to know which family a topic belongs to.

use thiserror::Error;

use crate::model::{Question, TopicId};
use crate::random::Draws;

mod algebra;
mod arithmetic;
mod catalog;
pub mod charts;
mod coordinates;
mod fractions;
mod measures;
mod money;
mod ratio;
mod statistics;
mod time;

pub use catalog::TopicEntry;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerateError {
    #[error("unknown topic: {0}")]
    UnknownTopic(String),
}

/// Every topic, in grade and menu order.
#[must_use]
pub fn topics() -> &'static [TopicEntry] {
    catalog::CATALOG
}

#[must_use]
pub fn lookup(id: &str) -> Option<&'static TopicEntry> {
    catalog::CATALOG.iter().find(|entry| entry.id == id)
}

pub fn by_grade(grade: u8) -> impl Iterator<Item = &'static TopicEntry> {
    catalog::CATALOG.iter().filter(move |entry| entry.grade == grade)
}

/// Generates one question for `topic`.
///
/// # Errors
///
/// Returns `GenerateError::UnknownTopic` when no generator is registered for the id.
pub fn generate(topic: &TopicId, draws: &mut Draws<'_>) -> Result<Question, GenerateError> {
    let entry =
        lookup(topic.as_str()).ok_or_else(|| GenerateError::UnknownTopic(topic.to_string()))?;
    Ok(entry.question(draws))
}

//
// ─── SHARED WORDING ────────────────────────────────────────────────────────────
//

pub(crate) const NAMES: &[&str] = &[
    "Alex", "Sam", "Jordan", "Taylor", "Casey", "Avery", "Robin", "Charlie", "Drew", "Riley",
    "Morgan", "Quinn", "Harper", "Logan", "Jamie",
];

pub(crate) const DESTINATIONS: &[&str] = &[
    "a friend's house",
    "school",
    "the shop",
    "the park",
    "the library",
    "the cinema",
    "swimming practice",
    "football training",
    "a cafe",
    "the museum",
];

pub(crate) const DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, Expected, FractionTask};
    use crate::random::{ChaChaSource, ScriptedSource};

    #[test]
    fn catalogue_covers_every_grade() {
        assert_eq!(topics().len(), 123);
        let per_grade: Vec<usize> = (1..=7).map(|g| by_grade(g).count()).collect();
        assert_eq!(per_grade, vec![13, 17, 20, 20, 23, 13, 17]);
    }

    #[test]
    fn topic_ids_are_unique_and_parse() {
        let mut ids: Vec<&str> = topics().iter().map(|t| t.id).collect();
        for id in &ids {
            assert!(id.parse::<TopicId>().is_ok(), "{id}");
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 123);
    }

    #[test]
    fn unknown_topic_is_an_error() {
        let mut source = ScriptedSource::default();
        let mut draws = Draws::new(&mut source, 4);
        let err = generate(&TopicId::new("alchemy"), &mut draws).unwrap_err();
        assert_eq!(err, GenerateError::UnknownTopic("alchemy".into()));
    }

    #[test]
    fn every_topic_generates_valid_questions() {
        let mut source = ChaChaSource::seeded(2024);
        let mut draws = Draws::new(&mut source, 32);
        for entry in topics() {
            for _ in 0..60 {
                let question = entry.question(&mut draws);
                if let Err(err) = question.validate() {
                    panic!("{} produced an invalid question: {err}\n{question:?}", entry.id);
                }
            }
        }
    }

    #[test]
    fn scripted_addition_matches_scenario() {
        let mut source = ScriptedSource::new([0.5, 0.25, 0.9]);
        let mut draws = Draws::new(&mut source, 32);
        let question = generate(&TopicId::new("addition-subtraction"), &mut draws).unwrap();
        assert_eq!(question.prompt(), Some("7 + 4 = ?"));
        assert_eq!(question.scalar_answer(), Some(&Answer::int(11)));
    }

    #[test]
    fn fraction_topic_only_emits_reduced_simplify_answers() {
        let mut source = ChaChaSource::seeded(11);
        let mut draws = Draws::new(&mut source, 32);
        let fractions = lookup("fractions").unwrap();
        for _ in 0..300 {
            if let Question::Fraction(q) = fractions.question(&mut draws) {
                if let FractionTask::Simplify { fraction } = q.task {
                    let expected = Answer::from(fraction.reduced());
                    assert_eq!(q.answer, expected);
                }
            }
        }
    }

    #[test]
    fn coordinate_parts_are_points_or_values() {
        let mut source = ChaChaSource::seeded(5);
        let mut draws = Draws::new(&mut source, 32);
        let coordinates = lookup("coordinates").unwrap();
        for _ in 0..20 {
            let question = coordinates.question(&mut draws);
            assert!(matches!(question, Question::Coordinate(_)));
            assert!(question.parts().iter().all(|p| matches!(
                p.answer,
                Some(Expected::Point { .. } | Expected::Value { .. })
            )));
        }
    }
}
