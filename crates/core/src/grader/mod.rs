//! Grading of learner input against a generated question.
//!
//! The question is split into units: one for a scalar answer, otherwise one per
//! part with its own answer plus one per sub-part. Each unit gets a verdict and a
//! message; completion units also carry per-row feedback.

use thiserror::Error;
use tracing::debug;

use crate::model::{
    Expected, GradeResult, LearnerInput, Question, QuestionError, UnitGrade,
};
use crate::settings::QuizSettings;

mod compare;
pub mod matcher;
mod tokens;

pub use tokens::canonical_groups;

use compare::Verdict;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GradeError {
    #[error("cannot grade a malformed question: {0}")]
    Question(#[from] QuestionError),
}

/// Grades `input` against `question`. Never mutates either.
///
/// # Errors
///
/// Returns `GradeError::Question` when the question fails validation. A wrong or
/// missing learner answer is a failing unit, never an error.
pub fn grade(
    question: &Question,
    input: &LearnerInput,
    settings: &QuizSettings,
) -> Result<GradeResult, GradeError> {
    question.validate()?;

    let mut units = Vec::new();
    if let Some(answer) = question.scalar_answer() {
        let verdict = compare::compare_value(answer, &input.answer, settings.numeric_epsilon());
        units.push(from_verdict("answer", verdict));
    }

    for (i, part) in question.parts().iter().enumerate() {
        let label = part_label(i);
        if let Some(expected) = &part.answer {
            units.push(grade_expected(
                &label,
                expected,
                input.part_text(i),
                question,
                input,
                settings,
            ));
        }
        for (j, sub) in part.sub_parts.iter().enumerate() {
            let sub_label = format!("{label}.{}", roman(j + 1));
            units.push(grade_expected(
                &sub_label,
                &sub.answer,
                input.sub_part_text(i, j),
                question,
                input,
                settings,
            ));
        }
    }

    let result = GradeResult { units };
    debug!(
        kind = question.kind(),
        score = result.score_delta(),
        units = result.units_graded(),
        "graded question"
    );
    Ok(result)
}

fn grade_expected(
    label: &str,
    expected: &Expected,
    text: &str,
    question: &Question,
    input: &LearnerInput,
    settings: &QuizSettings,
) -> UnitGrade {
    match expected {
        Expected::Value { value } => from_verdict(
            label,
            compare::compare_value(value, text, settings.numeric_epsilon()),
        ),
        Expected::Point { x, y } => from_verdict(
            label,
            compare::compare_point(*x, *y, text, settings.numeric_epsilon()),
        ),
        Expected::Explanation(fault) => {
            let given = text.trim();
            let verdict = if given.is_empty() {
                Verdict::missing(&fault.text)
            } else if matcher::explains(
                fault,
                given,
                settings.fuzzy_threshold(),
                settings.keyword_distance(),
            ) {
                Verdict::correct(given)
            } else {
                Verdict::wrong(given, &fault.text)
            };
            from_verdict(label, verdict)
        }
        // Validation guarantees the chart exists for the two completion kinds.
        Expected::TallyChart => match question.tally_chart() {
            Some(chart) => tokens::grade_tally_chart(label, chart, input, settings),
            None => missing_chart(label),
        },
        Expected::Pictogram { rows, key } => match question.pictogram() {
            Some(chart) => tokens::grade_pictogram(
                label,
                chart,
                rows,
                *key,
                input,
                settings,
            ),
            None => missing_chart(label),
        },
    }
}

fn from_verdict(label: &str, verdict: Verdict) -> UnitGrade {
    UnitGrade {
        label: label.to_string(),
        ok: verdict.ok,
        message: verdict.message,
        rows: Vec::new(),
    }
}

fn missing_chart(label: &str) -> UnitGrade {
    UnitGrade {
        label: label.to_string(),
        ok: false,
        message: "There is no chart to complete".to_string(),
        rows: Vec::new(),
    }
}

/// `a`, `b`, ... `z`, then `aa`, `ab`, ...
fn part_label(index: usize) -> String {
    let letter = |i: usize| char::from(b'a' + (i % 26) as u8);
    if index < 26 {
        letter(index).to_string()
    } else {
        format!("{}{}", letter(index / 26 - 1), letter(index))
    }
}

fn roman(mut n: usize) -> String {
    const NUMERALS: [(usize, &str); 9] = [
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}
