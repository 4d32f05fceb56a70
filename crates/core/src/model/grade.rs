use serde::{Deserialize, Serialize};

/// Which cell of a completion row the feedback refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Tally,
    Frequency,
    Pictogram,
    Key,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFeedback {
    pub row: String,
    pub cell: Cell,
    pub ok: bool,
    pub message: String,
}

/// Outcome of one gradable unit: the whole question, a part or a sub-part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitGrade {
    pub label: String,
    pub ok: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<RowFeedback>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    pub units: Vec<UnitGrade>,
}

impl GradeResult {
    /// Number of correct units.
    #[must_use]
    pub fn score_delta(&self) -> u32 {
        self.units.iter().filter(|u| u.ok).count() as u32
    }

    #[must_use]
    pub fn units_graded(&self) -> u32 {
        self.units.len() as u32
    }

    #[must_use]
    pub fn all_correct(&self) -> bool {
        !self.units.is_empty() && self.units.iter().all(|u| u.ok)
    }

    #[must_use]
    pub fn unit(&self, label: &str) -> Option<&UnitGrade> {
        self.units.iter().find(|u| u.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(label: &str, ok: bool) -> UnitGrade {
        UnitGrade {
            label: label.into(),
            ok,
            message: String::new(),
            rows: Vec::new(),
        }
    }

    #[test]
    fn counts_correct_units() {
        let result = GradeResult {
            units: vec![unit("a", true), unit("b.i", false), unit("b.ii", true)],
        };
        assert_eq!(result.score_delta(), 2);
        assert_eq!(result.units_graded(), 3);
        assert!(!result.all_correct());
        assert!(result.unit("b.i").is_some_and(|u| !u.ok));
        assert!(!GradeResult::default().all_correct());
    }
}
