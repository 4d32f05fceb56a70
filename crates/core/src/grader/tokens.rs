//! Grading of drag-token completion: tally marks, frequencies, pictogram symbols and keys.

use crate::format::format_number;
use crate::model::{
    Cell, LearnerInput, PictogramChart, RowFeedback, SymbolTarget, TallyChart, TallyGroup,
    UnitGrade,
};
use crate::settings::QuizSettings;

use super::compare::parse_number;

fn feedback(row: &str, cell: Cell, ok: bool, message: String) -> RowFeedback {
    RowFeedback {
        row: row.to_string(),
        cell,
        ok,
        message,
    }
}

/// Full gates of five first, then the remainder.
#[must_use]
pub fn canonical_groups(count: u32) -> Vec<u8> {
    let mut groups = vec![5; (count / 5) as usize];
    if count % 5 > 0 {
        groups.push((count % 5) as u8);
    }
    groups
}

fn grade_tally_row(label: &str, expected: u32, groups: &[TallyGroup]) -> RowFeedback {
    let marks: Vec<u8> = groups.iter().map(|g| g.marks()).collect();
    let total: u32 = marks.iter().map(|&m| u32::from(m)).sum();
    if marks == canonical_groups(expected) {
        feedback(label, Cell::Tally, true, format!("{label} tally shows {expected}"))
    } else if total == expected {
        feedback(
            label,
            Cell::Tally,
            false,
            format!("{label} tally adds up to {expected} but should be drawn as gates of 5 first"),
        )
    } else {
        feedback(
            label,
            Cell::Tally,
            false,
            format!("{label} tally shows {total} but should show {expected}"),
        )
    }
}

/// Same rule as every other numeric answer: `7`, `7.0` and `14/2` all count as 7.
fn typed_equals(typed: &str, expected: u32, epsilon: f64) -> bool {
    parse_number(typed).is_some_and(|n| (n - f64::from(expected)).abs() < epsilon)
}

fn grade_frequency_row(label: &str, expected: u32, typed: &str, epsilon: f64) -> RowFeedback {
    let typed = typed.trim();
    if typed.is_empty() {
        return feedback(
            label,
            Cell::Frequency,
            false,
            format!("{label} frequency is missing, it should be {expected}"),
        );
    }
    if typed_equals(typed, expected, epsilon) {
        feedback(
            label,
            Cell::Frequency,
            true,
            format!("{label} frequency is {expected}"),
        )
    } else {
        feedback(
            label,
            Cell::Frequency,
            false,
            format!("{label} frequency should be {expected}, you wrote {typed}"),
        )
    }
}

fn unit(label: &str, rows: Vec<RowFeedback>) -> UnitGrade {
    let right = rows.iter().filter(|r| r.ok).count();
    let ok = !rows.is_empty() && right == rows.len();
    let message = if ok {
        "Correct! Every row is complete".to_string()
    } else {
        format!("{right} of {} rows are correct", rows.len())
    };
    UnitGrade {
        label: label.to_string(),
        ok,
        message,
        rows,
    }
}

/// Every blank cell of the tally chart: tokens for blank tallies, typed numbers for blank frequencies.
#[must_use]
pub fn grade_tally_chart(
    label: &str,
    chart: &TallyChart,
    input: &LearnerInput,
    settings: &QuizSettings,
) -> UnitGrade {
    let mut rows = Vec::new();
    for row in &chart.rows {
        let Some(count) = row.inferred_count() else {
            continue;
        };
        if row.tally.is_none() {
            let groups = input
                .tally_tokens
                .get(&row.label)
                .map_or(&[][..], Vec::as_slice);
            rows.push(grade_tally_row(&row.label, count, groups));
        }
        if row.frequency.is_none() {
            rows.push(grade_frequency_row(
                &row.label,
                count,
                input.frequency(&row.label),
                settings.numeric_epsilon(),
            ));
        }
    }
    unit(label, rows)
}

/// Placed symbols per target row, closer than the symbol tolerance, plus the key
/// when one must be stated.
#[must_use]
pub fn grade_pictogram(
    label: &str,
    chart: &PictogramChart,
    targets: &[SymbolTarget],
    key: Option<u32>,
    input: &LearnerInput,
    settings: &QuizSettings,
) -> UnitGrade {
    let mut rows: Vec<RowFeedback> = targets
        .iter()
        .map(|target| {
            let placed: f64 = input
                .symbol_tokens
                .get(&target.label)
                .map_or(0.0, |tokens| tokens.iter().map(|t| t.value()).sum());
            let ok = (placed - target.symbols).abs() < settings.symbol_tolerance();
            let message = if ok {
                format!("{} shows {} symbols", target.label, format_number(target.symbols))
            } else {
                format!(
                    "{} shows {} symbols but should show {} (1 symbol = {})",
                    target.label,
                    format_number(placed),
                    format_number(target.symbols),
                    chart.key
                )
            };
            feedback(&target.label, Cell::Pictogram, ok, message)
        })
        .collect();

    if let Some(expected) = key {
        let typed = input.key.trim();
        let ok = typed_equals(typed, expected, settings.numeric_epsilon());
        let message = if ok {
            format!("The key is 1 symbol = {expected}")
        } else if typed.is_empty() {
            format!("The key is missing, it should be 1 symbol = {expected}")
        } else {
            format!("The key should be 1 symbol = {expected}, you wrote {typed}")
        };
        rows.push(feedback("key", Cell::Key, ok, message));
    }
    unit(label, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PictogramRow, SymbolShape, SymbolToken, TallyRow};

    fn standard() -> QuizSettings {
        QuizSettings::standard()
    }

    fn groups(marks: &[u8]) -> Vec<TallyGroup> {
        marks.iter().map(|&m| TallyGroup::new(m).unwrap()).collect()
    }

    fn chart(key: u32) -> PictogramChart {
        PictogramChart {
            key,
            symbol: SymbolShape::Circle,
            rows: vec![PictogramRow {
                label: "Tuesday".into(),
                symbols: None,
            }],
            has_quarters: true,
            key_shown: true,
        }
    }

    fn tuesday(symbols: f64) -> Vec<SymbolTarget> {
        vec![SymbolTarget {
            label: "Tuesday".into(),
            symbols,
        }]
    }

    #[test]
    fn canonical_tally_is_gates_first() {
        assert_eq!(canonical_groups(13), vec![5, 5, 3]);
        assert_eq!(canonical_groups(10), vec![5, 5]);
        assert_eq!(canonical_groups(4), vec![4]);
        assert!(canonical_groups(0).is_empty());
    }

    #[test]
    fn tally_rows_need_total_and_order() {
        assert!(grade_tally_row("Monday", 13, &groups(&[5, 5, 3])).ok);

        let reordered = grade_tally_row("Monday", 13, &groups(&[3, 5, 5]));
        assert!(!reordered.ok);
        assert!(reordered.message.contains("gates of 5 first"));

        let short = grade_tally_row("Monday", 13, &groups(&[5, 5]));
        assert!(!short.ok);
        assert!(short.message.contains("shows 10"));
    }

    #[test]
    fn tally_chart_grades_blank_cells_only() {
        let table = TallyChart {
            rows: vec![
                TallyRow {
                    label: "Monday".into(),
                    tally: Some(4),
                    frequency: Some(4),
                },
                TallyRow {
                    label: "Tuesday".into(),
                    tally: None,
                    frequency: Some(7),
                },
                TallyRow {
                    label: "Wednesday".into(),
                    tally: Some(6),
                    frequency: None,
                },
            ],
        };
        let mut input = LearnerInput::default();
        input.tally_tokens.insert("Tuesday".into(), groups(&[5, 2]));
        input.frequencies.insert("Wednesday".into(), "6".into());
        let graded = grade_tally_chart("a", &table, &input, &standard());
        assert!(graded.ok);
        assert_eq!(graded.rows.len(), 2);

        input.frequencies.insert("Wednesday".into(), "7".into());
        let graded = grade_tally_chart("a", &table, &input, &standard());
        assert!(!graded.ok);
        assert_eq!(graded.message, "1 of 2 rows are correct");
    }

    #[test]
    fn symbols_sum_within_tolerance() {
        let chart = chart(6);
        let mut input = LearnerInput::default();
        input.symbol_tokens.insert(
            "Tuesday".into(),
            vec![SymbolToken::Full, SymbolToken::Full, SymbolToken::Half],
        );
        assert!(grade_pictogram("b", &chart, &tuesday(2.5), None, &input, &standard()).ok);

        input.symbol_tokens.insert(
            "Tuesday".into(),
            vec![SymbolToken::Full, SymbolToken::Full, SymbolToken::Quarter],
        );
        assert!(!grade_pictogram("b", &chart, &tuesday(2.5), None, &input, &standard()).ok);
    }

    #[test]
    fn stated_key_must_match() {
        let chart = chart(8);
        let mut input = LearnerInput::default();
        input
            .symbol_tokens
            .insert("Tuesday".into(), vec![SymbolToken::Full]);
        input.key = "6".into();
        let graded = grade_pictogram("a", &chart, &tuesday(1.0), Some(8), &input, &standard());
        assert!(!graded.ok);
        assert!(graded.rows.iter().any(|r| r.cell == Cell::Key && !r.ok));

        input.key = " 8 ".into();
        assert!(grade_pictogram("a", &chart, &tuesday(1.0), Some(8), &input, &standard()).ok);

        input.key = "8.0".into();
        assert!(grade_pictogram("a", &chart, &tuesday(1.0), Some(8), &input, &standard()).ok);
    }

    #[test]
    fn frequencies_accept_any_spelling_of_the_number() {
        for (typed, ok) in [("6", true), ("6.0", true), (" 12/2 ", true), ("6.5", false), ("six", false)] {
            let row = grade_frequency_row("Wednesday", 6, typed, 1e-9);
            assert_eq!(row.ok, ok, "{typed}");
        }
    }

    #[test]
    fn symbol_tolerance_is_exclusive() {
        let settings = QuizSettings::new(32, 1e-9, 0.85, 2, 0.125).unwrap();
        let mut input = LearnerInput::default();
        input
            .symbol_tokens
            .insert("Tuesday".into(), vec![SymbolToken::Full, SymbolToken::Half]);
        assert!(grade_pictogram("b", &chart(2), &tuesday(1.5625), None, &input, &settings).ok);
        assert!(!grade_pictogram("b", &chart(2), &tuesday(1.625), None, &input, &settings).ok);
    }
}
