use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::chart::{PictogramChart, Table, TallyChart};
use crate::model::value::{Answer, Fraction};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// A question that breaks the shape rules. This is a programming error in a
/// generator or in persisted data, never a learner mistake.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question has no answer surface")]
    NoAnswerSurface,

    #[error("question has both a scalar answer and parts")]
    AmbiguousAnswerSurface,

    #[error("part {index} has neither an answer nor sub-parts")]
    EmptyPart { index: usize },

    #[error("non-finite number in {field}")]
    NonFinite { field: &'static str },

    #[error("tally row {row} has neither a tally nor a frequency")]
    EmptyTallyRow { row: String },

    #[error("part expects a tally chart with blanks but the question has none")]
    MissingTallyChart,

    #[error("part expects a pictogram but the question has none")]
    MissingPictogram,

    #[error("pictogram row {row} does not exist")]
    UnknownRow { row: String },

    #[error("pictogram row {row} is already filled in")]
    PrefilledRow { row: String },

    #[error("pictogram key must be > 0")]
    ZeroKey,

    #[error("fraction has a zero denominator")]
    ZeroDenominator,
}

//
// ─── EXPECTED ANSWERS ──────────────────────────────────────────────────────────
//

/// How a part is graded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Expected {
    /// Numeric or normalized-text comparison against the part's text input.
    Value { value: Answer },
    /// A coordinate pair typed as `x,y` or `(x, y)`.
    Point { x: f64, y: f64 },
    /// Free-text description of an injected fault.
    Explanation(FaultExplanation),
    /// Every blank cell of the question's tally chart.
    TallyChart,
    /// The listed pictogram rows, built from symbol tokens.
    Pictogram {
        rows: Vec<SymbolTarget>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<u32>,
    },
}

impl Expected {
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::Value {
            value: Answer::int(value),
        }
    }

    #[must_use]
    pub fn num(value: f64) -> Self {
        Self::Value {
            value: Answer::num(value),
        }
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Value {
            value: Answer::text(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaultKind {
    /// The frequency column disagrees with the tally marks.
    Frequency,
    /// A pictogram row does not match the key.
    Symbol,
}

/// The reference answer for "what is wrong with this chart".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultExplanation {
    pub text: String,
    pub row: String,
    pub fault: FaultKind,
    /// Numbers a correct explanation may mention.
    pub valid_numbers: Vec<f64>,
    /// Every row label of the chart, used to spot which row the learner names.
    pub row_labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolTarget {
    pub label: String,
    pub symbols: f64,
}

//
// ─── PARTS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPart {
    pub question: String,
    pub answer: Expected,
}

impl SubPart {
    #[must_use]
    pub fn new(question: impl Into<String>, answer: Expected) -> Self {
        Self {
            question: question.into(),
            answer,
        }
    }
}

/// An independently gradable piece of a question. Sub-parts cannot nest further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Expected>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_parts: Vec<SubPart>,
}

impl Part {
    #[must_use]
    pub fn new(question: impl Into<String>, answer: Expected) -> Self {
        Self {
            question: question.into(),
            answer: Some(answer),
            sub_parts: Vec::new(),
        }
    }

    /// A heading part graded only through its sub-parts.
    #[must_use]
    pub fn grouped(question: impl Into<String>, sub_parts: Vec<SubPart>) -> Self {
        Self {
            question: question.into(),
            answer: None,
            sub_parts,
        }
    }
}

//
// ─── QUESTION KINDS ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleQuestion {
    pub prompt: String,
    pub answer: Answer,
    /// Fraction to typeset next to the prompt, when the prompt talks about one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraction: Option<Fraction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPartQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub parts: Vec<Part>,
}

/// A table plus either one scalar answer or a list of parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub table: Table,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pictogram: Option<PictogramChart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Answer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictogramQuestion {
    pub prompt: String,
    pub chart: PictogramChart,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clues: Vec<String>,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderDirection {
    SmallestFirst,
    BiggestFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CloserTarget {
    Half,
    One,
}

impl CloserTarget {
    #[must_use]
    pub fn as_fraction(self) -> Fraction {
        match self {
            CloserTarget::Half => Fraction::new(1, 2),
            CloserTarget::One => Fraction::new(1, 1),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CloserTarget::Half => "1/2",
            CloserTarget::One => "1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "kebab-case")]
pub enum FractionTask {
    Simplify {
        fraction: Fraction,
    },
    /// `given = x / denominator`, solve for `x`.
    FindEquivalent {
        given: Fraction,
        denominator: u32,
    },
    Compare {
        first: Fraction,
        second: Fraction,
    },
    FindNonEquivalent {
        target: Fraction,
        candidates: Vec<Fraction>,
    },
    Order {
        fractions: Vec<Fraction>,
        direction: OrderDirection,
    },
    CloserTo {
        target: CloserTarget,
        first: Fraction,
        second: Fraction,
    },
}

impl FractionTask {
    fn fractions(&self) -> Vec<Fraction> {
        match self {
            FractionTask::Simplify { fraction } => vec![*fraction],
            FractionTask::FindEquivalent { given, denominator } => {
                vec![*given, Fraction::new(1, *denominator)]
            }
            FractionTask::Compare { first, second }
            | FractionTask::CloserTo { first, second, .. } => vec![*first, *second],
            FractionTask::FindNonEquivalent { target, candidates } => {
                std::iter::once(*target).chain(candidates.iter().copied()).collect()
            }
            FractionTask::Order { fractions, .. } => fractions.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionQuestion {
    pub prompt: String,
    pub task: FractionTask,
    pub answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    pub label: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateQuestion {
    pub points: Vec<LabeledPoint>,
    pub parts: Vec<Part>,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One generated question. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Question {
    Simple(SimpleQuestion),
    MultiPart(MultiPartQuestion),
    Tabular(TabularQuestion),
    Pictogram(PictogramQuestion),
    Fraction(FractionQuestion),
    Coordinate(CoordinateQuestion),
}

impl Question {
    #[must_use]
    pub fn simple(prompt: impl Into<String>, answer: Answer) -> Self {
        Self::Simple(SimpleQuestion {
            prompt: prompt.into(),
            answer,
            fraction: None,
        })
    }

    #[must_use]
    pub fn multi_part(prompt: Option<String>, parts: Vec<Part>) -> Self {
        Self::MultiPart(MultiPartQuestion { prompt, parts })
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Question::Simple(_) => "simple",
            Question::MultiPart(_) => "multi-part",
            Question::Tabular(_) => "tabular",
            Question::Pictogram(_) => "pictogram",
            Question::Fraction(_) => "fraction",
            Question::Coordinate(_) => "coordinate",
        }
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        match self {
            Question::Simple(q) => Some(&q.prompt),
            Question::MultiPart(q) => q.prompt.as_deref(),
            Question::Tabular(q) => q.prompt.as_deref(),
            Question::Pictogram(q) => Some(&q.prompt),
            Question::Fraction(q) => Some(&q.prompt),
            Question::Coordinate(_) => None,
        }
    }

    /// The single scalar answer, for questions graded as one unit.
    #[must_use]
    pub fn scalar_answer(&self) -> Option<&Answer> {
        match self {
            Question::Simple(q) => Some(&q.answer),
            Question::Fraction(q) => Some(&q.answer),
            Question::Tabular(q) => q.answer.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn parts(&self) -> &[Part] {
        match self {
            Question::MultiPart(q) => &q.parts,
            Question::Tabular(q) => &q.parts,
            Question::Pictogram(q) => &q.parts,
            Question::Coordinate(q) => &q.parts,
            Question::Simple(_) | Question::Fraction(_) => &[],
        }
    }

    #[must_use]
    pub fn tally_chart(&self) -> Option<&TallyChart> {
        match self {
            Question::Tabular(TabularQuestion {
                table: Table::Tally(chart),
                ..
            }) => Some(chart),
            _ => None,
        }
    }

    #[must_use]
    pub fn pictogram(&self) -> Option<&PictogramChart> {
        match self {
            Question::Tabular(q) => q.pictogram.as_ref(),
            Question::Pictogram(q) => Some(&q.chart),
            _ => None,
        }
    }

    /// Checks that exactly one answer surface exists and every expected value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first `QuestionError` found.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if let Some(chart) = self.tally_chart() {
            for row in &chart.rows {
                if row.tally.is_none() && row.frequency.is_none() {
                    return Err(QuestionError::EmptyTallyRow {
                        row: row.label.clone(),
                    });
                }
            }
        }
        if let Some(chart) = self.pictogram() {
            validate_pictogram(chart)?;
        }

        match self {
            Question::Simple(q) => check_answer(&q.answer, "answer"),
            Question::Fraction(q) => {
                if q.task.fractions().iter().any(|f| f.denominator == 0) {
                    return Err(QuestionError::ZeroDenominator);
                }
                check_answer(&q.answer, "answer")
            }
            Question::Tabular(q) => match (&q.answer, q.parts.is_empty()) {
                (Some(_), false) => Err(QuestionError::AmbiguousAnswerSurface),
                (None, true) => Err(QuestionError::NoAnswerSurface),
                (Some(answer), true) => check_answer(answer, "answer"),
                (None, false) => self.validate_parts(),
            },
            Question::MultiPart(_) | Question::Pictogram(_) | Question::Coordinate(_) => {
                self.validate_parts()
            }
        }
    }

    fn validate_parts(&self) -> Result<(), QuestionError> {
        let parts = self.parts();
        if parts.is_empty() {
            return Err(QuestionError::NoAnswerSurface);
        }
        for (index, part) in parts.iter().enumerate() {
            if part.answer.is_none() && part.sub_parts.is_empty() {
                return Err(QuestionError::EmptyPart { index });
            }
            if let Some(expected) = &part.answer {
                self.validate_expected(expected)?;
            }
            for sub in &part.sub_parts {
                self.validate_expected(&sub.answer)?;
            }
        }
        Ok(())
    }

    fn validate_expected(&self, expected: &Expected) -> Result<(), QuestionError> {
        match expected {
            Expected::Value { value } => check_answer(value, "part answer"),
            Expected::Point { x, y } => {
                if x.is_finite() && y.is_finite() {
                    Ok(())
                } else {
                    Err(QuestionError::NonFinite { field: "point" })
                }
            }
            Expected::Explanation(fault) => {
                if fault.valid_numbers.iter().all(|n| n.is_finite()) {
                    Ok(())
                } else {
                    Err(QuestionError::NonFinite {
                        field: "valid numbers",
                    })
                }
            }
            Expected::TallyChart => match self.tally_chart() {
                Some(chart) if chart.has_blanks() => Ok(()),
                _ => Err(QuestionError::MissingTallyChart),
            },
            Expected::Pictogram { rows, .. } => {
                let chart = self.pictogram().ok_or(QuestionError::MissingPictogram)?;
                for target in rows {
                    let row = chart
                        .row(&target.label)
                        .ok_or_else(|| QuestionError::UnknownRow {
                            row: target.label.clone(),
                        })?;
                    if row.symbols.is_some() {
                        return Err(QuestionError::PrefilledRow {
                            row: target.label.clone(),
                        });
                    }
                    if !target.symbols.is_finite() {
                        return Err(QuestionError::NonFinite {
                            field: "symbol target",
                        });
                    }
                }
                Ok(())
            }
        }
    }
}

fn check_answer(answer: &Answer, field: &'static str) -> Result<(), QuestionError> {
    if answer.is_finite() {
        Ok(())
    } else {
        Err(QuestionError::NonFinite { field })
    }
}

fn validate_pictogram(chart: &PictogramChart) -> Result<(), QuestionError> {
    if chart.key == 0 {
        return Err(QuestionError::ZeroKey);
    }
    if chart
        .rows
        .iter()
        .filter_map(|row| row.symbols)
        .any(|s| !s.is_finite())
    {
        return Err(QuestionError::NonFinite {
            field: "pictogram row",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::chart::{GridTable, PictogramRow, SymbolShape, TallyRow};

    fn grid() -> Table {
        Table::Grid(GridTable {
            title: None,
            headers: vec!["Colour".into(), "Red".into()],
            rows: vec![vec!["Number".into(), "4".into()]],
        })
    }

    #[test]
    fn simple_question_with_finite_answer_is_valid() {
        let q = Question::simple("7 + 4 = ?", Answer::int(11));
        assert!(q.validate().is_ok());
        assert_eq!(q.kind(), "simple");
        assert_eq!(q.prompt(), Some("7 + 4 = ?"));
    }

    #[test]
    fn non_finite_answers_are_rejected() {
        let q = Question::simple("1 ÷ 0", Answer::num(f64::INFINITY));
        assert_eq!(
            q.validate().unwrap_err(),
            QuestionError::NonFinite { field: "answer" }
        );
    }

    #[test]
    fn tabular_needs_exactly_one_surface() {
        let both = Question::Tabular(TabularQuestion {
            prompt: None,
            table: grid(),
            pictogram: None,
            answer: Some(Answer::text("1/5")),
            parts: vec![Part::new("a", Expected::int(1))],
        });
        assert_eq!(
            both.validate().unwrap_err(),
            QuestionError::AmbiguousAnswerSurface
        );

        let neither = Question::Tabular(TabularQuestion {
            prompt: None,
            table: grid(),
            pictogram: None,
            answer: None,
            parts: Vec::new(),
        });
        assert_eq!(neither.validate().unwrap_err(), QuestionError::NoAnswerSurface);
    }

    #[test]
    fn tally_rows_need_one_known_cell() {
        let q = Question::Tabular(TabularQuestion {
            prompt: None,
            table: Table::Tally(TallyChart {
                rows: vec![TallyRow {
                    label: "Monday".into(),
                    tally: None,
                    frequency: None,
                }],
            }),
            pictogram: None,
            answer: None,
            parts: vec![Part::new("Complete the tally chart.", Expected::TallyChart)],
        });
        assert!(matches!(
            q.validate().unwrap_err(),
            QuestionError::EmptyTallyRow { .. }
        ));
    }

    #[test]
    fn pictogram_targets_must_be_blank_rows() {
        let chart = PictogramChart {
            key: 6,
            symbol: SymbolShape::Circle,
            rows: vec![
                PictogramRow {
                    label: "Monday".into(),
                    symbols: Some(2.0),
                },
                PictogramRow {
                    label: "Tuesday".into(),
                    symbols: None,
                },
            ],
            has_quarters: false,
            key_shown: true,
        };
        let target = |label: &str| Expected::Pictogram {
            rows: vec![SymbolTarget {
                label: label.into(),
                symbols: 2.5,
            }],
            key: None,
        };
        let ok = Question::Pictogram(PictogramQuestion {
            prompt: "Complete it".into(),
            chart: chart.clone(),
            clues: Vec::new(),
            parts: vec![Part::new("Complete", target("Tuesday"))],
        });
        assert!(ok.validate().is_ok());

        let prefilled = Question::Pictogram(PictogramQuestion {
            prompt: "Complete it".into(),
            chart,
            clues: Vec::new(),
            parts: vec![Part::new("Complete", target("Monday"))],
        });
        assert!(matches!(
            prefilled.validate().unwrap_err(),
            QuestionError::PrefilledRow { .. }
        ));
    }

    #[test]
    fn grouped_part_without_sub_parts_is_empty() {
        let q = Question::multi_part(None, vec![Part::grouped("Write down", Vec::new())]);
        assert_eq!(q.validate().unwrap_err(), QuestionError::EmptyPart { index: 0 });
    }

    #[test]
    fn questions_are_tagged_by_kind() {
        let q = Question::Fraction(FractionQuestion {
            prompt: "Simplify 8/12".into(),
            task: FractionTask::Simplify {
                fraction: Fraction::new(8, 12),
            },
            answer: Answer::text("2/3"),
        });
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["kind"], "fraction");
        assert_eq!(json["task"]["task"], "simplify");
        let back: Question = serde_json::from_value(json).unwrap();
        assert_eq!(back, q);
    }
}
