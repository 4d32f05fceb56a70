//! Plain-text rendering of questions and feedback for the terminal.

use std::fmt::Write as _;

use quiz_core::format::{format_number, render_math};
use quiz_core::model::{
    GradeResult, GridTable, Part, PictogramChart, Question, SymbolShape, Table, TallyChart,
};

fn tally_marks(count: u32) -> String {
    let rest = "|".repeat((count % 5) as usize);
    let mut groups: Vec<&str> = vec!["||||/"; (count / 5) as usize];
    if !rest.is_empty() {
        groups.push(&rest);
    }
    groups.join(" ")
}

fn symbols(shape: SymbolShape, count: f64) -> String {
    let (full, half, quarter, three_quarters) = match shape {
        SymbolShape::Circle => ("●", "◐", "◔", "◕"),
        SymbolShape::Square => ("■", "◧", "◩", "◪"),
    };
    let whole = count.trunc() as usize;
    let part = match ((count.fract() * 4.0).round() as u8).min(3) {
        1 => quarter,
        2 => half,
        3 => three_quarters,
        _ => "",
    };
    format!("{}{part}", full.repeat(whole))
}

fn write_grid(out: &mut String, grid: &GridTable) {
    if let Some(title) = &grid.title {
        let _ = writeln!(out, "{title}");
    }
    let widths: Vec<usize> = (0..grid.headers.len())
        .map(|col| {
            std::iter::once(&grid.headers)
                .chain(&grid.rows)
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();
    for row in std::iter::once(&grid.headers).chain(&grid.rows) {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "  {}", cells.join(" | "));
    }
}

fn write_tally(out: &mut String, chart: &TallyChart) {
    let _ = writeln!(out, "  {:<10} | {:<20} | Frequency", "", "Tally");
    for row in &chart.rows {
        let tally = row.tally.map_or_else(|| "?".to_string(), tally_marks);
        let frequency = row.frequency.map_or_else(|| "?".to_string(), |f| f.to_string());
        let _ = writeln!(out, "  {:<10} | {tally:<20} | {frequency}", row.label);
    }
}

fn write_pictogram(out: &mut String, chart: &PictogramChart) {
    for row in &chart.rows {
        let shown = row
            .symbols
            .map_or_else(|| "?".to_string(), |count| symbols(chart.symbol, count));
        let _ = writeln!(out, "  {:<10} {shown}", row.label);
    }
    let key = if chart.key_shown {
        chart.key.to_string()
    } else {
        "?".to_string()
    };
    let _ = writeln!(out, "  Key: {} = {key}", symbols(chart.symbol, 1.0));
}

fn write_parts(out: &mut String, parts: &[Part]) {
    const ROMAN: [&str; 6] = ["i", "ii", "iii", "iv", "v", "vi"];
    for (i, part) in parts.iter().enumerate() {
        let letter = char::from(b'a' + (i % 26) as u8);
        let _ = writeln!(out, "({letter}) {}", render_math(&part.question));
        for (j, sub) in part.sub_parts.iter().enumerate() {
            let numeral = ROMAN
                .get(j)
                .map_or_else(|| (j + 1).to_string(), |r| (*r).to_string());
            let _ = writeln!(out, "    ({numeral}) {}", render_math(&sub.question));
        }
    }
}

#[must_use]
pub fn question(question: &Question) -> String {
    let mut out = String::new();
    if let Some(prompt) = question.prompt() {
        let _ = writeln!(out, "{}", render_math(prompt));
    }
    match question {
        Question::Tabular(q) => {
            match &q.table {
                Table::Grid(grid) => write_grid(&mut out, grid),
                Table::Tally(chart) => write_tally(&mut out, chart),
            }
            if let Some(chart) = &q.pictogram {
                out.push('\n');
                write_pictogram(&mut out, chart);
            }
        }
        Question::Pictogram(q) => {
            write_pictogram(&mut out, &q.chart);
            for clue in &q.clues {
                let _ = writeln!(out, "  - {clue}");
            }
        }
        Question::Coordinate(q) => {
            let points: Vec<String> = q
                .points
                .iter()
                .map(|p| format!("{} ({}, {})", p.label, p.x, p.y))
                .collect();
            let _ = writeln!(out, "Points on the grid: {}", points.join(", "));
        }
        Question::Simple(q) => {
            if let Some(fraction) = q.fraction {
                let _ = writeln!(out, "  [{fraction}]");
            }
        }
        Question::MultiPart(_) | Question::Fraction(_) => {}
    }
    write_parts(&mut out, question.parts());
    out
}

#[must_use]
pub fn feedback(result: &GradeResult) -> String {
    let mut out = String::new();
    for unit in &result.units {
        let mark = if unit.ok { "✓" } else { "✗" };
        let _ = writeln!(out, "{mark} {}: {}", unit.label, unit.message);
        for row in unit.rows.iter().filter(|row| !row.ok) {
            let _ = writeln!(out, "    - {}", row.message);
        }
    }
    let _ = writeln!(
        out,
        "{} of {} correct",
        result.score_delta(),
        result.units_graded()
    );
    out
}

#[must_use]
pub fn score(correct: u32, units: u32) -> String {
    if units == 0 {
        return "Nothing graded yet".to_string();
    }
    format!(
        "Score: {correct} / {units} ({}%)",
        format_number((f64::from(correct) * 100.0 / f64::from(units)).round())
    )
}
