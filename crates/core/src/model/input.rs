use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::grade::GradeResult;
use crate::model::question::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// A drag-token placement or removal that the question does not allow.
///
/// The snapshot is left untouched whenever one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TokenError {
    #[error("quarter symbols are not allowed on this pictogram")]
    QuartersNotAllowed,

    #[error("tally groups hold 1 to 5 marks, got {0}")]
    InvalidGroupSize(u8),

    #[error("row {row} does not accept {board} tokens")]
    NotDroppable { row: String, board: Board },

    #[error("row {row} has no {board} token at index {index}")]
    IndexOutOfRange {
        row: String,
        board: Board,
        index: usize,
    },

    #[error("unknown row: {0}")]
    UnknownRow(String),
}

//
// ─── TOKENS ────────────────────────────────────────────────────────────────────
//

/// A bundle of tally marks; a full gate is 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TallyGroup(u8);

impl TallyGroup {
    pub const GATE: TallyGroup = TallyGroup(5);

    /// # Errors
    ///
    /// Returns `TokenError::InvalidGroupSize` outside `1..=5`.
    pub fn new(marks: u8) -> Result<Self, TokenError> {
        if (1..=5).contains(&marks) {
            Ok(Self(marks))
        } else {
            Err(TokenError::InvalidGroupSize(marks))
        }
    }

    #[must_use]
    pub fn marks(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for TallyGroup {
    type Error = TokenError;

    fn try_from(marks: u8) -> Result<Self, Self::Error> {
        Self::new(marks)
    }
}

impl From<TallyGroup> for u8 {
    fn from(group: TallyGroup) -> Self {
        group.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolToken {
    Full,
    Half,
    Quarter,
}

impl SymbolToken {
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            SymbolToken::Full => 1.0,
            SymbolToken::Half => 0.5,
            SymbolToken::Quarter => 0.25,
        }
    }
}

/// Which token map a row lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Board {
    Tally,
    Pictogram,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Board::Tally => f.write_str("tally"),
            Board::Pictogram => f.write_str("pictogram"),
        }
    }
}

impl FromStr for Board {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tally" => Ok(Board::Tally),
            "pictogram" | "picto" => Ok(Board::Pictogram),
            other => Err(format!("unknown board: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "board", content = "token")]
pub enum Token {
    Tally(TallyGroup),
    Symbol(SymbolToken),
}

impl Token {
    #[must_use]
    pub fn board(self) -> Board {
        match self {
            Token::Tally(_) => Board::Tally,
            Token::Symbol(_) => Board::Pictogram,
        }
    }
}

/// Accepts `1`..`5` for tally groups and `full`, `half`, `quarter` for symbols.
impl FromStr for Token {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_lowercase();
        match raw.as_str() {
            "full" => Ok(Token::Symbol(SymbolToken::Full)),
            "half" => Ok(Token::Symbol(SymbolToken::Half)),
            "quarter" => Ok(Token::Symbol(SymbolToken::Quarter)),
            digits => {
                let marks: u8 = digits.parse().map_err(|_| format!("unknown token: {raw}"))?;
                TallyGroup::new(marks)
                    .map(Token::Tally)
                    .map_err(|e| e.to_string())
            }
        }
    }
}

//
// ─── LEARNER INPUT ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartInput {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_parts: Vec<String>,
}

/// Everything the learner has typed or dropped for one question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerInput {
    #[serde(default)]
    pub answer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<PartInput>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub frequencies: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tally_tokens: BTreeMap<String, Vec<TallyGroup>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub symbol_tokens: BTreeMap<String, Vec<SymbolToken>>,
}

impl LearnerInput {
    #[must_use]
    pub fn with_answer(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            ..Self::default()
        }
    }

    fn part_mut(&mut self, part: usize) -> &mut PartInput {
        if self.parts.len() <= part {
            self.parts.resize_with(part.saturating_add(1), PartInput::default);
        }
        &mut self.parts[part]
    }

    pub fn set_part(&mut self, part: usize, text: impl Into<String>) {
        self.part_mut(part).text = text.into();
    }

    pub fn set_sub_part(&mut self, part: usize, sub: usize, text: impl Into<String>) {
        let entry = self.part_mut(part);
        if entry.sub_parts.len() <= sub {
            entry.sub_parts.resize(sub.saturating_add(1), String::new());
        }
        entry.sub_parts[sub] = text.into();
    }

    /// Text typed for a part, empty when nothing was entered.
    #[must_use]
    pub fn part_text(&self, part: usize) -> &str {
        self.parts.get(part).map_or("", |p| p.text.as_str())
    }

    #[must_use]
    pub fn sub_part_text(&self, part: usize, sub: usize) -> &str {
        self.parts
            .get(part)
            .and_then(|p| p.sub_parts.get(sub))
            .map_or("", String::as_str)
    }

    #[must_use]
    pub fn frequency(&self, row: &str) -> &str {
        self.frequencies.get(row).map_or("", String::as_str)
    }

    /// Drops a token onto a row, after checking the question allows it there.
    ///
    /// # Errors
    ///
    /// Returns a `TokenError` and leaves the input unchanged when the row is
    /// unknown, already filled in, or the token is illegal for the chart.
    pub fn place_token(
        &mut self,
        question: &Question,
        row: &str,
        token: Token,
    ) -> Result<(), TokenError> {
        match token {
            Token::Tally(group) => {
                let chart = question
                    .tally_chart()
                    .ok_or_else(|| TokenError::UnknownRow(row.to_string()))?;
                let cell = chart
                    .row(row)
                    .ok_or_else(|| TokenError::UnknownRow(row.to_string()))?;
                if cell.tally.is_some() {
                    return Err(TokenError::NotDroppable {
                        row: row.to_string(),
                        board: Board::Tally,
                    });
                }
                self.tally_tokens
                    .entry(row.to_string())
                    .or_default()
                    .push(group);
            }
            Token::Symbol(symbol) => {
                let chart = question
                    .pictogram()
                    .ok_or_else(|| TokenError::UnknownRow(row.to_string()))?;
                let cell = chart
                    .row(row)
                    .ok_or_else(|| TokenError::UnknownRow(row.to_string()))?;
                if cell.symbols.is_some() {
                    return Err(TokenError::NotDroppable {
                        row: row.to_string(),
                        board: Board::Pictogram,
                    });
                }
                if symbol == SymbolToken::Quarter && !chart.has_quarters {
                    return Err(TokenError::QuartersNotAllowed);
                }
                self.symbol_tokens
                    .entry(row.to_string())
                    .or_default()
                    .push(symbol);
            }
        }
        Ok(())
    }

    /// Removes the token at `index` from a row and returns it.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::IndexOutOfRange` when the row holds no such token.
    pub fn remove_token(&mut self, row: &str, board: Board, index: usize) -> Result<Token, TokenError> {
        let out_of_range = || TokenError::IndexOutOfRange {
            row: row.to_string(),
            board,
            index,
        };
        match board {
            Board::Tally => {
                let tokens = self.tally_tokens.get_mut(row).ok_or_else(out_of_range)?;
                if index >= tokens.len() {
                    return Err(out_of_range());
                }
                let removed = tokens.remove(index);
                if tokens.is_empty() {
                    self.tally_tokens.remove(row);
                }
                Ok(Token::Tally(removed))
            }
            Board::Pictogram => {
                let tokens = self.symbol_tokens.get_mut(row).ok_or_else(out_of_range)?;
                if index >= tokens.len() {
                    return Err(out_of_range());
                }
                let removed = tokens.remove(index);
                if tokens.is_empty() {
                    self.symbol_tokens.remove(row);
                }
                Ok(Token::Symbol(removed))
            }
        }
    }
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Learner input for one record, plus the feedback from its last submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub input: LearnerInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<GradeResult>,
}

impl Snapshot {
    #[must_use]
    pub fn has_feedback(&self) -> bool {
        self.feedback.is_some()
    }
}
