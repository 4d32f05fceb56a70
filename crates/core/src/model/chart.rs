use serde::{Deserialize, Serialize};

/// A table shown alongside a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "kebab-case")]
pub enum Table {
    Grid(GridTable),
    Tally(TallyChart),
}

/// Plain text table: timetables, counters per colour, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

//
// ─── TALLY ─────────────────────────────────────────────────────────────────────
//

/// One category of a tally chart. `None` marks a cell the learner must fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyRow {
    pub label: String,
    pub tally: Option<u32>,
    pub frequency: Option<u32>,
}

impl TallyRow {
    /// The count a blank cell should be completed with.
    ///
    /// Prefers the tally marks, since fault-injected rows may disagree.
    #[must_use]
    pub fn inferred_count(&self) -> Option<u32> {
        self.tally.or(self.frequency)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyChart {
    pub rows: Vec<TallyRow>,
}

impl TallyChart {
    #[must_use]
    pub fn row(&self, label: &str) -> Option<&TallyRow> {
        self.rows.iter().find(|row| row.label == label)
    }

    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.label.clone()).collect()
    }

    #[must_use]
    pub fn has_blanks(&self) -> bool {
        self.rows
            .iter()
            .any(|row| row.tally.is_none() || row.frequency.is_none())
    }
}

//
// ─── PICTOGRAM ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolShape {
    Circle,
    Square,
}

/// A pictogram row: a known symbol count, or `None` when it must be built from tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictogramRow {
    pub label: String,
    pub symbols: Option<f64>,
}

/// One symbol stands for `key` items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictogramChart {
    pub key: u32,
    pub symbol: SymbolShape,
    pub rows: Vec<PictogramRow>,
    pub has_quarters: bool,
    /// False when the learner has to work the key out.
    pub key_shown: bool,
}

impl PictogramChart {
    #[must_use]
    pub fn row(&self, label: &str) -> Option<&PictogramRow> {
        self.rows.iter().find(|row| row.label == label)
    }

    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.label.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inferred_count_prefers_tally() {
        let row = TallyRow {
            label: "Monday".into(),
            tally: Some(9),
            frequency: Some(10),
        };
        assert_eq!(row.inferred_count(), Some(9));
        let blank_tally = TallyRow {
            label: "Tuesday".into(),
            tally: None,
            frequency: Some(4),
        };
        assert_eq!(blank_tally.inferred_count(), Some(4));
    }

    #[test]
    fn tables_are_tagged_by_layout() {
        let table = Table::Tally(TallyChart {
            rows: vec![TallyRow {
                label: "Monday".into(),
                tally: None,
                frequency: Some(3),
            }],
        });
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["layout"], "tally");
        assert!(json["rows"][0]["tally"].is_null());
        let back: Table = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }
}
