//! Probability and statistics: averages, charts, tables, trees and sampling.

use std::collections::BTreeMap;

use crate::format::{format_number, round2, round_to};
use crate::model::{Answer, Expected, GridTable, Part, Question, Table, TabularQuestion};
use crate::random::Draws;

use super::fractions::fraction_text;

fn listed(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn probability_text(favourable: i64, total: i64) -> String {
    fraction_text(favourable as u32, total as u32)
}

fn grid(title: Option<&str>, headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    Table::Grid(GridTable {
        title: title.map(String::from),
        headers: headers.iter().map(|h| (*h).to_string()).collect(),
        rows,
    })
}

pub(crate) fn probability(draws: &mut Draws<'_>) -> Question {
    if draws.coin() {
        let red = draws.int(2, 6);
        let blue = draws.int(2, 6);
        Question::simple(
            format!(
                "A bag contains {red} red balls and {blue} blue balls. What is the probability \
                 of picking a red ball? Give your answer as a fraction in its simplest form."
            ),
            Answer::text(probability_text(red, red + blue)),
        )
    } else {
        let favourable = draws.int(1, 5);
        Question::simple(
            format!(
                "A fair dice is rolled. What is the probability of rolling a number less than \
                 or equal to {favourable}? Give your answer as a fraction in its simplest form."
            ),
            Answer::text(probability_text(favourable, 6)),
        )
    }
}

pub(crate) fn frequency_polygons(draws: &mut Draws<'_>) -> Question {
    const INTERVALS: [&str; 4] = ["0-10", "10-20", "20-30", "30-40"];
    let frequencies: Vec<i64> = (0..INTERVALS.len()).map(|_| draws.int(2, 15)).collect();
    let asked = draws.index(INTERVALS.len());
    let shown = INTERVALS
        .iter()
        .zip(&frequencies)
        .map(|(interval, f)| format!("{interval}: {f}"))
        .collect::<Vec<_>>()
        .join(", ");
    Question::simple(
        format!(
            "A frequency polygon shows: {shown}. What is the frequency for the interval {}?",
            INTERVALS[asked]
        ),
        Answer::int(frequencies[asked]),
    )
}

/// Every value that occurs most often, ascending, or `no mode` when all occur once.
fn modes(data: &[i64]) -> String {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for &value in data {
        *counts.entry(value).or_default() += 1;
    }
    let most = counts.values().copied().max().unwrap_or(0);
    if most <= 1 {
        return "no mode".into();
    }
    counts
        .into_iter()
        .filter(|&(_, count)| count == most)
        .map(|(value, _)| value.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn median(data: &[i64]) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}

pub(crate) fn averages(draws: &mut Draws<'_>) -> Question {
    let len = draws.int(5, 7) as usize;
    let data: Vec<i64> = (0..len).map(|_| draws.int(5, 24)).collect();
    let shown = listed(&data);
    match draws.index(4) {
        0 => {
            let mean = data.iter().sum::<i64>() as f64 / len as f64;
            Question::simple(
                format!("Find the mean of: {shown}. Give your answer to 1 decimal place."),
                Answer::num(round_to(mean, 1)),
            )
        }
        1 => Question::simple(
            format!("Find the median of: {shown}"),
            Answer::num(median(&data)),
        ),
        2 => {
            let (min, max) = data
                .iter()
                .fold((i64::MAX, i64::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
            Question::simple(
                format!("Find the range of: {shown}"),
                Answer::int(max - min),
            )
        }
        _ => Question::simple(
            format!(
                "Find the mode of: {shown}. List several modes smallest first, separated by \
                 commas, or answer \"no mode\"."
            ),
            Answer::text(modes(&data)),
        ),
    }
}

pub(crate) fn bar_charts(draws: &mut Draws<'_>) -> Question {
    const FRUIT: [&str; 4] = ["Apples", "Bananas", "Oranges", "Grapes"];
    let sold: Vec<i64> = (0..FRUIT.len()).map(|_| draws.int(5, 25)).collect();
    let asked = draws.index(FRUIT.len());
    let shown = FRUIT
        .iter()
        .zip(&sold)
        .map(|(fruit, n)| format!("{fruit}: {n}"))
        .collect::<Vec<_>>()
        .join(", ");
    Question::simple(
        format!(
            "A bar chart shows fruit sales: {shown}. How many {} were sold?",
            FRUIT[asked].to_lowercase()
        ),
        Answer::int(sold[asked]),
    )
}

pub(crate) fn stem_leaf(draws: &mut Draws<'_>) -> Question {
    let first_stem = draws.int(1, 5);
    let mut values = Vec::new();
    let mut diagram = String::from("Stem | Leaf");
    for stem in first_stem..first_stem + 3 {
        let mut leaves: Vec<i64> = (0..draws.int(2, 4)).map(|_| draws.int(0, 9)).collect();
        leaves.sort_unstable();
        diagram.push_str(&format!("\n{stem} | {}", listed(&leaves).replace(',', "")));
        values.extend(leaves.iter().map(|leaf| stem * 10 + leaf));
    }
    let (min, max) = (values[0], values[values.len() - 1]);
    if draws.coin() {
        Question::simple(
            format!("A stem-and-leaf diagram shows:\n{diagram}\nWhat is the largest value?"),
            Answer::int(max),
        )
    } else {
        Question::simple(
            format!("A stem-and-leaf diagram shows:\n{diagram}\nWhat is the range?"),
            Answer::int(max - min),
        )
    }
}

pub(crate) fn pie_charts(draws: &mut Draws<'_>) -> Question {
    let total = 12 * draws.int(4, 8);
    let angle = draws.pick_copy(&[90, 180, 120, 60, 30]);
    Question::simple(
        format!(
            "A pie chart represents {total} students. One sector has an angle of {angle}°. \
             How many students does this sector represent?"
        ),
        Answer::int(total * angle / 360),
    )
}

pub(crate) fn frequency_trees(draws: &mut Draws<'_>) -> Question {
    let total = draws.int(60, 99);
    let walk = draws.int(total * 2 / 5, total * 7 / 10);
    Question::simple(
        format!(
            "A frequency tree shows {total} students. {walk} of them walk to school and the \
             rest take the bus. How many take the bus?"
        ),
        Answer::int(total - walk),
    )
}

pub(crate) fn two_way_tables(draws: &mut Draws<'_>) -> Question {
    let boys = (draws.int(10, 29), draws.int(5, 19));
    let girls = (draws.int(12, 29), draws.int(8, 19));
    let table = grid(
        Some("Do you have a pet?"),
        &["", "Yes", "No"],
        vec![
            vec!["Boys".into(), boys.0.to_string(), boys.1.to_string()],
            vec!["Girls".into(), girls.0.to_string(), girls.1.to_string()],
        ],
    );
    Question::Tabular(TabularQuestion {
        prompt: Some("The two-way table shows the answers of a class survey.".into()),
        table,
        pictogram: None,
        answer: None,
        parts: vec![
            Part::new(
                "How many students took part altogether?",
                Expected::int(boys.0 + boys.1 + girls.0 + girls.1),
            ),
            Part::new("How many students said yes?", Expected::int(boys.0 + girls.0)),
        ],
    })
}

pub(crate) fn averages_frequency_tables(draws: &mut Draws<'_>) -> Question {
    let frequencies: Vec<i64> = (0..5).map(|_| draws.int(1, 8)).collect();
    let total: i64 = frequencies.iter().sum();
    let sum: i64 = frequencies
        .iter()
        .zip(1..)
        .map(|(f, value)| f * value)
        .sum();
    let table = grid(
        None,
        &["Value", "Frequency"],
        frequencies
            .iter()
            .zip(1..)
            .map(|(f, value): (&i64, i64)| vec![value.to_string(), f.to_string()])
            .collect(),
    );
    Question::Tabular(TabularQuestion {
        prompt: Some(
            "Find the mean from this frequency table. Give your answer to 2 decimal places."
                .into(),
        ),
        table,
        pictogram: None,
        answer: Some(Answer::num(round2(sum as f64 / total as f64))),
        parts: Vec::new(),
    })
}

pub(crate) fn probability_g4(draws: &mut Draws<'_>) -> Question {
    let favourable = draws.int(2, 7);
    let total = favourable + draws.int(5, 14);
    Question::simple(
        format!(
            "There are {favourable} successful outcomes out of {total} equally likely outcomes. \
             What is the probability of success? Give it as a fraction in its simplest form."
        ),
        Answer::text(probability_text(favourable, total)),
    )
}

pub(crate) fn scatter_graphs(draws: &mut Draws<'_>) -> Question {
    const SCENARIOS: [(&str, &str); 3] = [
        ("as temperature increases, ice cream sales increase", "positive"),
        ("as temperature increases, sales of hot drinks decrease", "negative"),
        ("shoe size shows no pattern against test score", "no correlation"),
    ];
    let (shown, correlation) = draws.pick_copy(&SCENARIOS);
    Question::simple(
        format!(
            "A scatter graph shows that {shown}. What type of correlation is this? \
             (positive, negative or no correlation)"
        ),
        Answer::text(correlation),
    )
}

pub(crate) fn probability_trees(draws: &mut Draws<'_>) -> Question {
    let first = draws.int(1, 5);
    let second = draws.int(1, 5);
    Question::simple(
        format!(
            "Two independent events have probabilities {} and {}. What is P(both occur)?",
            format_number(first as f64 / 10.0),
            format_number(second as f64 / 10.0)
        ),
        Answer::num(round2((first * second) as f64 / 100.0)),
    )
}

pub(crate) fn venn_diagrams(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(10, 29);
    let b = draws.int(8, 22);
    let both = draws.int(3, 7);
    Question::simple(
        format!(
            "Set A has {a} elements, set B has {b} elements, and {both} are in both. \
             How many elements are in A ∪ B?"
        ),
        Answer::int(a + b - both),
    )
}

pub(crate) fn cumulative_frequency(draws: &mut Draws<'_>) -> Question {
    let mut running = 0;
    let cumulative: Vec<i64> = (0..5)
        .map(|_| {
            running += draws.int(3, 12);
            running
        })
        .collect();
    let position = draws.index(cumulative.len());
    Question::simple(
        format!(
            "Cumulative frequencies are: {}. What is the frequency of group {} on its own?",
            listed(&cumulative),
            position + 1
        ),
        Answer::int(cumulative[position] - position.checked_sub(1).map_or(0, |p| cumulative[p])),
    )
}

pub(crate) fn box_plots(draws: &mut Draws<'_>) -> Question {
    let min = draws.int(10, 29);
    let q1 = min + draws.int(5, 14);
    let median = q1 + draws.int(4, 11);
    let q3 = median + draws.int(5, 14);
    let max = q3 + draws.int(6, 17);
    Question::multi_part(
        Some(format!(
            "A box plot shows minimum {min}, lower quartile {q1}, median {median}, \
             upper quartile {q3} and maximum {max}."
        )),
        vec![
            Part::new("Find the interquartile range.", Expected::int(q3 - q1)),
            Part::new("Find the range.", Expected::int(max - min)),
        ],
    )
}

/// Lincoln-Petersen estimate, set up to come out whole.
pub(crate) fn capture_recapture(draws: &mut Draws<'_>) -> Question {
    let marked = draws.int(30, 69);
    let recaptured = draws.int(5, 19);
    let scale = draws.int(3, 6);
    let second_catch = recaptured * scale;
    Question::simple(
        format!(
            "{marked} fish are caught, marked and released. Later, {second_catch} fish are \
             caught and {recaptured} of them are marked. Estimate the size of the population."
        ),
        Answer::int(marked * scale),
    )
}

pub(crate) fn histograms(draws: &mut Draws<'_>) -> Question {
    let width = draws.pick_copy(&[5, 10, 20]);
    let frequency = draws.int(10, 29);
    Question::simple(
        format!(
            "A histogram bar has frequency {frequency} and class width {width}. \
             Find the frequency density."
        ),
        Answer::num(frequency as f64 / width as f64),
    )
}

pub(crate) fn conditional_probability(draws: &mut Draws<'_>) -> Question {
    let total = draws.int(50, 99);
    let a = total * 3 / 5;
    let both = a * 2 / 5;
    Question::simple(
        format!(
            "P(A) = {a}/{total} and P(A and B) = {both}/{total}. Find P(B|A) to 2 decimal places."
        ),
        Answer::num(round2(both as f64 / a as f64)),
    )
}
