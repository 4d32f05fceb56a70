//! Tally charts and pictograms.
//!
//! Six layouts share one topic: spotting an injected fault in a tally chart
//! (optionally with a pictogram beside it), completing charts from drag tokens,
//! and reading pictograms whose missing rows follow from clues.

use crate::format::join_names;
use crate::model::{
    Expected, FaultExplanation, FaultKind, Part, PictogramChart, PictogramQuestion, PictogramRow,
    Question, SubPart, SymbolShape, SymbolTarget, Table, TabularQuestion, TallyChart, TallyRow,
};
use crate::random::Draws;

use super::DAYS;

/// What was sold, and where.
#[derive(Debug, Clone, Copy)]
struct Context {
    item: &'static str,
    plural: &'static str,
    place: &'static str,
}

const fn context(item: &'static str, plural: &'static str, place: &'static str) -> Context {
    Context {
        item,
        plural,
        place,
    }
}

const CONTEXTS: [Context; 8] = [
    context("ice cream", "ice creams", "a shop"),
    context("chocolate bar", "chocolate bars", "a store"),
    context("book", "books", "a library"),
    context("toy", "toys", "a toy shop"),
    context("pencil", "pencils", "a stationery store"),
    context("sticker", "stickers", "a shop"),
    context("cupcake", "cupcakes", "a bakery"),
    context("flower", "flowers", "a flower shop"),
];

/// Weekly sales behind both fault-spotting layouts.
pub const FAULT_COUNTS: [u32; 5] = [11, 13, 9, 11, 9];

const FAULT_KEY: u32 = 3;
const COMPLETION_KEY: u32 = 2;
const MONTHS: [&str; 4] = ["January", "February", "March", "April"];
const MONTH_KEY: u32 = 8;
const SQUARE_COUNTS: [f64; 13] = [
    1.0, 1.5, 2.0, 2.25, 2.5, 2.75, 3.0, 3.25, 3.5, 3.75, 4.0, 4.5, 5.0,
];
const CIRCLE_PAIRS: [(f64, f64); 21] = [
    (1.0, 2.0),
    (1.0, 2.5),
    (1.0, 3.0),
    (1.0, 3.5),
    (1.5, 2.0),
    (1.5, 2.5),
    (1.5, 3.0),
    (1.5, 3.5),
    (2.0, 3.0),
    (2.0, 3.5),
    (2.0, 4.0),
    (2.5, 3.0),
    (2.5, 3.5),
    (2.5, 4.0),
    (1.0, 4.0),
    (1.5, 4.0),
    (2.0, 4.5),
    (2.5, 4.5),
    (3.0, 4.0),
    (3.0, 4.5),
    (3.5, 4.5),
];

pub(crate) fn pictograms(draws: &mut Draws<'_>) -> Question {
    let context = draws.pick_copy(&CONTEXTS);
    match draws.index(6) {
        0 => tally_only(draws, context),
        1 => tally_and_pictogram(draws, context),
        2 => completion(draws, context),
        3 => with_clues(draws, context),
        4 => months(draws, context),
        _ => with_calculation(draws, context),
    }
}

fn days() -> Vec<String> {
    DAYS.iter().map(|d| (*d).to_string()).collect()
}

fn row(label: &str, symbols: Option<f64>) -> PictogramRow {
    PictogramRow {
        label: label.to_string(),
        symbols,
    }
}

fn target(label: &str, symbols: f64) -> SymbolTarget {
    SymbolTarget {
        label: label.to_string(),
        symbols,
    }
}

//
// ─── FAULT SPOTTING ────────────────────────────────────────────────────────────
//

/// The tally chart with frequency row `wrong` off by one, plus the explanation part.
fn faulty_tally(counts: &[u32], wrong: usize, up: bool) -> (TallyChart, Part) {
    let shown = |i: usize, count: u32| match (i == wrong, up) {
        (false, _) => count,
        (true, true) => count + 1,
        (true, false) => count.saturating_sub(1).max(1),
    };
    let chart = TallyChart {
        rows: DAYS
            .iter()
            .zip(counts)
            .enumerate()
            .map(|(i, (day, &count))| TallyRow {
                label: (*day).to_string(),
                tally: Some(count),
                frequency: Some(shown(i, count)),
            })
            .collect(),
    };
    let day = DAYS[wrong];
    let part = Part::new(
        "Write down one thing that is wrong with the tally chart.",
        Expected::Explanation(FaultExplanation {
            text: format!("Row {day} frequency does not match tally"),
            row: day.to_string(),
            fault: FaultKind::Frequency,
            valid_numbers: vec![
                f64::from(counts[wrong]),
                f64::from(shown(wrong, counts[wrong])),
            ],
            row_labels: days(),
        }),
    );
    (chart, part)
}

fn tally_question(
    prompt: String,
    chart: TallyChart,
    pictogram: Option<PictogramChart>,
    parts: Vec<Part>,
) -> Question {
    Question::Tabular(TabularQuestion {
        prompt: Some(prompt),
        table: Table::Tally(chart),
        pictogram,
        answer: None,
        parts,
    })
}

/// The tally-only fault question for fixed sales, used where the fault must be known up front.
#[must_use]
pub fn tally_fault(counts: &[u32; 5], wrong: usize, up: bool) -> Question {
    tally_fault_in(CONTEXTS[0], counts, wrong.min(DAYS.len() - 1), up)
}

fn tally_fault_in(context: Context, counts: &[u32], wrong: usize, up: bool) -> Question {
    let (chart, part) = faulty_tally(counts, wrong, up);
    tally_question(
        format!(
            "The tally chart shows information about the number of {} sold by {} last week.",
            context.plural, context.place
        ),
        chart,
        None,
        vec![part],
    )
}

fn tally_only(draws: &mut Draws<'_>, context: Context) -> Question {
    let wrong = draws.index(DAYS.len());
    let up = draws.coin();
    tally_fault_in(context, &FAULT_COUNTS, wrong, up)
}

fn tally_and_pictogram(draws: &mut Draws<'_>, context: Context) -> Question {
    let wrong = draws.index(DAYS.len());
    let up = draws.coin();
    let (chart, tally_part) = faulty_tally(&FAULT_COUNTS, wrong, up);

    let odd = draws.index(DAYS.len());
    let correct: Vec<f64> = FAULT_COUNTS
        .iter()
        .map(|&c| (f64::from(c) / f64::from(FAULT_KEY)).round())
        .collect();
    let shown = if draws.coin() {
        correct[odd] + 0.5
    } else {
        (correct[odd] - 0.5).max(0.5)
    };
    let pictogram = PictogramChart {
        key: FAULT_KEY,
        symbol: SymbolShape::Circle,
        rows: DAYS
            .iter()
            .enumerate()
            .map(|(i, day)| row(day, Some(if i == odd { shown } else { correct[i] })))
            .collect(),
        has_quarters: false,
        key_shown: true,
    };

    let day = DAYS[odd];
    let key = f64::from(FAULT_KEY);
    let symbol_part = Part::new(
        "Write down one thing that is wrong with the pictogram.",
        Expected::Explanation(FaultExplanation {
            text: format!("Row {day} symbols do not match the key"),
            row: day.to_string(),
            fault: FaultKind::Symbol,
            valid_numbers: vec![
                shown,
                shown * key,
                shown.fract(),
                shown.fract() + 1.0,
                key,
                f64::from(FAULT_COUNTS[odd]),
            ],
            row_labels: days(),
        }),
    );

    tally_question(
        format!(
            "The tally chart and the pictogram show the number of {} sold by {} last week.",
            context.plural, context.place
        ),
        chart,
        Some(pictogram),
        vec![tally_part, symbol_part],
    )
}

//
// ─── COMPLETION ────────────────────────────────────────────────────────────────
//

/// One complete reference row, one to three rows missing their tally, the rest
/// missing their frequency, and a pictogram with only the reference row filled.
fn completion(draws: &mut Draws<'_>, context: Context) -> Question {
    let counts: Vec<u32> = DAYS.iter().map(|_| draws.int(3, 19) as u32).collect();
    let drag_count = draws.int(1, 3) as usize;
    let mut chosen = draws.distinct_indices(DAYS.len(), drag_count + 1);
    let reference = chosen.pop().unwrap_or(0);
    let dragged = chosen;

    let chart = TallyChart {
        rows: DAYS
            .iter()
            .zip(&counts)
            .enumerate()
            .map(|(i, (day, &count))| {
                let (tally, frequency) = if i == reference {
                    (Some(count), Some(count))
                } else if dragged.contains(&i) {
                    (None, Some(count))
                } else {
                    (Some(count), None)
                };
                TallyRow {
                    label: (*day).to_string(),
                    tally,
                    frequency,
                }
            })
            .collect(),
    };

    let symbols = |count: u32| f64::from(count) / f64::from(COMPLETION_KEY);
    let pictogram = PictogramChart {
        key: COMPLETION_KEY,
        symbol: SymbolShape::Circle,
        rows: DAYS
            .iter()
            .zip(&counts)
            .enumerate()
            .map(|(i, (day, &count))| row(day, (i == reference).then(|| symbols(count))))
            .collect(),
        has_quarters: false,
        key_shown: true,
    };
    let blanks = DAYS
        .iter()
        .zip(&counts)
        .enumerate()
        .filter(|&(i, _)| i != reference)
        .map(|(_, (day, &count))| target(day, symbols(count)))
        .collect();

    tally_question(
        format!(
            "The incomplete tally chart and pictogram show the number of {} sold by {} last week.",
            context.plural, context.place
        ),
        chart,
        Some(pictogram),
        vec![
            Part::new("Complete the tally chart.", Expected::TallyChart),
            Part::new(
                format!("Complete the pictogram to represent the {} sales.", context.item),
                Expected::Pictogram {
                    rows: blanks,
                    key: None,
                },
            ),
        ],
    )
}

//
// ─── PICTOGRAMS WITH CLUES ─────────────────────────────────────────────────────
//

/// The key is hidden; the learner works it out from the filled rows' total and states it.
fn with_clues(draws: &mut Draws<'_>, context: Context) -> Question {
    let key = draws.pick_copy(&[2u32, 6, 8, 10, 12]);
    let halves = draws.distinct_indices(DAYS.len(), 2);
    let counts: Vec<u32> = (0..DAYS.len())
        .map(|i| {
            if halves.contains(&i) {
                draws.int(1, 4) as u32 * key + key / 2
            } else {
                draws.int(2, 5) as u32 * key
            }
        })
        .collect();

    let filled_count = draws.int(2, 3) as usize;
    let mut filled = draws.distinct_indices(DAYS.len(), filled_count);
    filled.sort_unstable();
    let empty: Vec<usize> = (0..DAYS.len()).filter(|i| !filled.contains(i)).collect();

    let symbols = |i: usize| f64::from(counts[i]) / f64::from(key);
    let chart = PictogramChart {
        key,
        symbol: SymbolShape::Circle,
        rows: (0..DAYS.len())
            .map(|i| row(DAYS[i], filled.contains(&i).then(|| symbols(i))))
            .collect(),
        has_quarters: true,
        key_shown: false,
    };

    let filled_days: Vec<&str> = filled.iter().map(|&i| DAYS[i]).collect();
    let mut clues = vec![format!(
        "A total of {} {} were sold on {}.",
        filled.iter().map(|&i| counts[i]).sum::<u32>(),
        context.plural,
        join_names(&filled_days)
    )];
    clues.extend(
        empty
            .iter()
            .map(|&i| format!("{} {} were sold on {}.", counts[i], context.plural, DAYS[i])),
    );

    Question::Pictogram(PictogramQuestion {
        prompt: format!(
            "This incomplete pictogram shows information about the number of {} sold by {} \
             on {}.",
            context.plural,
            context.place,
            join_names(&filled_days)
        ),
        chart,
        clues,
        parts: vec![Part::new(
            "Use the information to complete the pictogram and write down the key.",
            Expected::Pictogram {
                rows: empty.iter().map(|&i| target(DAYS[i], symbols(i))).collect(),
                key: Some(key),
            },
        )],
    })
}

fn months(draws: &mut Draws<'_>, context: Context) -> Question {
    let mut filled = draws.distinct_indices(MONTHS.len(), 3);
    filled.sort_unstable();
    let missing = (0..MONTHS.len())
        .find(|i| !filled.contains(i))
        .unwrap_or(MONTHS.len() - 1);

    let squares: Vec<f64> = (0..MONTHS.len())
        .map(|_| draws.pick_copy(&SQUARE_COUNTS))
        .collect();
    let sold = |i: usize| (squares[i] * f64::from(MONTH_KEY)).round() as i64;
    let total: i64 = (0..MONTHS.len()).map(sold).sum();
    let read = filled[draws.index(filled.len())];

    let chart = PictogramChart {
        key: MONTH_KEY,
        symbol: SymbolShape::Square,
        rows: (0..MONTHS.len())
            .map(|i| row(MONTHS[i], (i != missing).then_some(squares[i])))
            .collect(),
        has_quarters: true,
        key_shown: true,
    };
    let filled_months: Vec<&str> = filled.iter().map(|&i| MONTHS[i]).collect();

    Question::Pictogram(PictogramQuestion {
        prompt: format!(
            "The pictogram shows information about the number of {} sold by an author in {}.",
            context.plural,
            join_names(&filled_months)
        ),
        chart,
        clues: Vec::new(),
        parts: vec![
            Part::new(
                format!(
                    "Write down the number of {} sold in {}.",
                    context.plural, MONTHS[read]
                ),
                Expected::int(sold(read)),
            ),
            Part::new(
                format!(
                    "{} {} were sold in {}. Show this information on the pictogram.",
                    sold(missing),
                    context.plural,
                    MONTHS[missing]
                ),
                Expected::Pictogram {
                    rows: vec![target(MONTHS[missing], squares[missing])],
                    key: None,
                },
            ),
            Part::new(
                format!(
                    "What was the total number of {} sold in these four months?",
                    context.plural
                ),
                Expected::int(total),
            ),
        ],
    })
}

/// Two rows are read off; the other two follow from a total and a "times as many" clue.
fn with_calculation(draws: &mut Draws<'_>, context: Context) -> Question {
    const WEEKDAYS: usize = 4;
    let order = draws.distinct_indices(WEEKDAYS, WEEKDAYS);
    let mut shown = [order[0], order[1]];
    let mut hidden = [order[2], order[3]];
    shown.sort_unstable();
    hidden.sort_unstable();

    let key = draws.pick_copy(&[6u32, 8, 10, 12]);
    let (first, second) = draws.pick_copy(&CIRCLE_PAIRS);
    let multiplier = draws.int(2, 4);
    // keeps the larger hidden row within six circles
    let smaller = draws.pick_copy(if multiplier == 4 {
        &[0.5, 1.0, 1.5][..]
    } else {
        &[0.5, 1.0, 1.5, 2.0][..]
    });
    let larger = smaller * multiplier as f64;
    let count = |circles: f64| (circles * f64::from(key)).round() as i64;
    let total = count(smaller) + count(larger);

    let mut circles = [None; WEEKDAYS];
    circles[shown[0]] = Some(first);
    circles[shown[1]] = Some(second);
    let chart = PictogramChart {
        key,
        symbol: SymbolShape::Circle,
        rows: (0..WEEKDAYS).map(|i| row(DAYS[i], circles[i])).collect(),
        has_quarters: false,
        key_shown: true,
    };

    let (a, b) = (DAYS[hidden[0]], DAYS[hidden[1]]);
    let clue = format!(
        "On {a} and {b} a total of {total} {plural} were sold. The number of {plural} sold on \
         {b} was {multiplier} times the number of {plural} sold on {a}.",
        plural = context.plural
    );

    Question::Pictogram(PictogramQuestion {
        prompt: format!(
            "The pictogram shows information about the number of {} sold by {} on {} and {}.",
            context.plural, context.place, DAYS[shown[0]], DAYS[shown[1]]
        ),
        chart,
        clues: vec![clue],
        parts: vec![
            Part::grouped(
                format!("Write down the number of {} sold", context.plural),
                vec![
                    SubPart::new(
                        format!("on {}", DAYS[shown[0]]),
                        Expected::int(count(first)),
                    ),
                    SubPart::new(
                        format!("on {}", DAYS[shown[1]]),
                        Expected::int(count(second)),
                    ),
                ],
            ),
            Part::new(
                "Use this information to complete the pictogram.",
                Expected::Pictogram {
                    rows: vec![target(a, smaller), target(b, larger)],
                    key: None,
                },
            ),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ChaChaSource, ScriptedSource};

    fn explanation(part: &Part) -> &FaultExplanation {
        match &part.answer {
            Some(Expected::Explanation(fault)) => fault,
            other => panic!("expected an explanation, got {other:?}"),
        }
    }

    #[test]
    fn tally_fault_nudges_one_frequency() {
        let q = tally_fault(&FAULT_COUNTS, 2, false);
        let chart = q.tally_chart().unwrap();
        let wednesday = chart.row("Wednesday").unwrap();
        assert_eq!(wednesday.tally, Some(9));
        assert_eq!(wednesday.frequency, Some(8));
        let others_match = chart
            .rows
            .iter()
            .filter(|r| r.label != "Wednesday")
            .all(|r| r.tally == r.frequency);
        assert!(others_match);

        let fault = explanation(&q.parts()[0]);
        assert_eq!(fault.text, "Row Wednesday frequency does not match tally");
        assert_eq!(fault.valid_numbers, vec![9.0, 8.0]);
    }

    #[test]
    fn frequency_never_drops_below_one() {
        let q = tally_fault(&[1, 4, 4, 4, 4], 0, false);
        assert_eq!(q.tally_chart().unwrap().rows[0].frequency, Some(1));
    }

    #[test]
    fn symbol_fault_is_half_a_symbol_off() {
        let mut source = ChaChaSource::seeded(77);
        let mut draws = Draws::new(&mut source, 8);
        for _ in 0..40 {
            let q = tally_and_pictogram(&mut draws, CONTEXTS[1]);
            let chart = q.pictogram().unwrap();
            let fault = explanation(&q.parts()[1]);
            let shown = chart.row(&fault.row).unwrap().symbols.unwrap();
            let index = DAYS.iter().position(|d| *d == fault.row).unwrap();
            let correct = (f64::from(FAULT_COUNTS[index]) / 3.0).round();
            assert_eq!((shown - correct).abs(), 0.5);
            assert!(shown >= 0.5);
        }
    }

    #[test]
    fn completion_blanks_are_whole_or_half_symbols() {
        let mut source = ChaChaSource::seeded(5);
        let mut draws = Draws::new(&mut source, 8);
        for _ in 0..40 {
            let q = completion(&mut draws, CONTEXTS[2]);
            assert!(q.validate().is_ok());
            let chart = q.tally_chart().unwrap();
            let reference = chart
                .rows
                .iter()
                .filter(|r| r.tally.is_some() && r.frequency.is_some())
                .count();
            assert_eq!(reference, 1);
            let Some(Expected::Pictogram { rows, .. }) = &q.parts()[1].answer else {
                unreachable!()
            };
            assert_eq!(rows.len(), 4);
            assert!(rows.iter().all(|t| (t.symbols * 2.0).fract() == 0.0));
        }
    }

    #[test]
    fn clue_totals_pin_down_the_key() {
        let mut source = ChaChaSource::seeded(13);
        let mut draws = Draws::new(&mut source, 8);
        for _ in 0..40 {
            let Question::Pictogram(q) = with_clues(&mut draws, CONTEXTS[3]) else {
                unreachable!()
            };
            assert!(!q.chart.key_shown);
            let filled: f64 = q.chart.rows.iter().filter_map(|r| r.symbols).sum();
            let total: f64 = q.clues[0]
                .split_whitespace()
                .nth(3)
                .unwrap()
                .parse()
                .unwrap();
            assert_eq!(total / filled, f64::from(q.chart.key));
        }
    }

    #[test]
    fn calculation_rows_follow_the_clue() {
        let mut source = ChaChaSource::seeded(29);
        let mut draws = Draws::new(&mut source, 8);
        for _ in 0..40 {
            let q = with_calculation(&mut draws, CONTEXTS[4]);
            assert!(q.validate().is_ok());
            let key = f64::from(q.pictogram().unwrap().key);
            let Some(Expected::Pictogram { rows, .. }) = &q.parts()[1].answer else {
                unreachable!()
            };
            assert!(rows[1].symbols >= rows[0].symbols * 2.0);
            assert!(rows[1].symbols <= 6.0);
            assert_eq!(((rows[0].symbols * key) % 1.0), 0.0);
            assert_eq!(q.parts()[0].sub_parts.len(), 2);
        }
    }

    #[test]
    fn variant_is_chosen_after_the_context() {
        // context 0, then the months layout
        let mut source = ScriptedSource::new([0.0, 4.0 / 6.0 + 0.01]);
        let mut draws = Draws::new(&mut source, 8);
        let q = pictograms(&mut draws);
        assert_eq!(q.pictogram().map(|c| c.key), Some(MONTH_KEY));
        assert_eq!(q.parts().len(), 3);
    }
}
