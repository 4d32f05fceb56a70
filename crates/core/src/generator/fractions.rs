//! Fraction questions: the seven-way `fractions` topic plus the later
//! fraction, decimal and percentage topics.

use std::cmp::Ordering;

use crate::model::{
    Answer, CloserTarget, Fraction, FractionQuestion, FractionTask, GridTable, OrderDirection,
    Question, SimpleQuestion, Table, TabularQuestion,
};
use crate::random::Draws;

const ORDER_DENOMINATORS: [u32; 10] = [3, 4, 5, 6, 8, 10, 12, 15, 20, 30];
const CLOSER_DENOMINATORS: [u32; 5] = [6, 7, 8, 10, 12];

fn draw_u32(draws: &mut Draws<'_>, lo: u32, hi: u32) -> u32 {
    draws.int(i64::from(lo), i64::from(hi)) as u32
}

/// Lowest-terms text, with whole numbers written without a denominator.
pub(super) fn fraction_text(numerator: u32, denominator: u32) -> String {
    let reduced = Fraction::new(numerator, denominator).reduced();
    if reduced.denominator == 1 {
        reduced.numerator.to_string()
    } else {
        reduced.to_string()
    }
}

fn fraction_question(prompt: String, task: FractionTask, answer: Answer) -> Question {
    Question::Fraction(FractionQuestion {
        prompt,
        task,
        answer,
    })
}

pub(crate) fn fractions(draws: &mut Draws<'_>) -> Question {
    match draws.index(7) {
        0 => simplify(draws),
        1 => find_equivalent(draws),
        2 => compare(draws),
        3 => find_non_equivalent(draws),
        4 => word_problem(draws),
        5 => order(draws),
        _ => closer_to(draws),
    }
}

fn simplify(draws: &mut Draws<'_>) -> Question {
    let fraction = Fraction::new(draw_u32(draws, 6, 29), draw_u32(draws, 6, 29));
    fraction_question(
        format!("Simplify {fraction}"),
        FractionTask::Simplify { fraction },
        Answer::from(fraction.reduced()),
    )
}

fn find_equivalent(draws: &mut Draws<'_>) -> Question {
    let given = Fraction::new(draw_u32(draws, 2, 7), draw_u32(draws, 3, 8));
    let factor = draw_u32(draws, 2, 5);
    let denominator = given.denominator * factor;
    fraction_question(
        format!("Find x: {given} = x/{denominator}"),
        FractionTask::FindEquivalent { given, denominator },
        Answer::int(i64::from(given.numerator * factor)),
    )
}

fn compare(draws: &mut Draws<'_>) -> Question {
    let (first, second) = draws.retry(
        "compared fractions differ in value",
        |d| {
            let first = Fraction::new(draw_u32(d, 1, 8), draw_u32(d, 3, 8));
            let second = Fraction::new(draw_u32(d, 1, 8), draw_u32(d, 3, 8));
            (!first.same_value(second)).then_some((first, second))
        },
        || (Fraction::new(2, 3), Fraction::new(3, 5)),
    );
    let bigger = match first.cmp_value(second) {
        Ordering::Less => second,
        _ => first,
    };
    fraction_question(
        format!("Which is bigger: {first} or {second}?"),
        FractionTask::Compare { first, second },
        Answer::from(bigger),
    )
}

fn find_non_equivalent(draws: &mut Draws<'_>) -> Question {
    let denominator = draw_u32(draws, 3, 9);
    let target = Fraction::new(draw_u32(draws, 1, denominator - 1), denominator).reduced();

    const FACTORS: [u32; 6] = [2, 3, 4, 5, 6, 7];
    let mut candidates: Vec<Fraction> = draws
        .distinct_indices(FACTORS.len(), 4)
        .into_iter()
        .map(|i| target.scaled(FACTORS[i]))
        .collect();

    let odd_one = draws.retry(
        "odd fraction is not close to the target",
        |d| {
            let candidate = Fraction::new(draw_u32(d, 5, 24), draw_u32(d, 10, 29)).reduced();
            ((candidate.value() - target.value()).abs() >= 0.05).then_some(candidate)
        },
        || {
            if target.value() <= 0.5 {
                Fraction::new(9, 10)
            } else {
                Fraction::new(1, 10)
            }
        },
    );
    let slot = draws.index(candidates.len() + 1);
    candidates.insert(slot, odd_one);

    fraction_question(
        format!("Which fraction is not equivalent to {target}?"),
        FractionTask::FindNonEquivalent { target, candidates },
        Answer::from(odd_one),
    )
}

fn word_problem(draws: &mut Draws<'_>) -> Question {
    match draws.index(3) {
        0 => {
            let total = draws.pick_copy(&[12u32, 15, 18, 20, 24, 26, 30]);
            let red = draw_u32(draws, 3, total - 3);
            Question::simple(
                format!(
                    "There are {total} sweets in a bag.\n{red} of the sweets are red.\n\
                     The rest of the sweets are white.\nWhat fraction of the sweets are red?"
                ),
                Answer::text(fraction_text(red, total)),
            )
        }
        1 => counters(draws),
        _ => {
            let total = draws.pick_copy(&[9u32, 12, 15, 18]);
            let red = draw_u32(draws, 2, total - 2);
            Question::simple(
                format!(
                    "There are {total} pens in a box.\n{red} pens are red.\n\
                     The rest of the pens are green.\nWhat fraction of the pens are green?"
                ),
                Answer::text(fraction_text(total - red, total)),
            )
        }
    }
}

fn counters(draws: &mut Draws<'_>) -> Question {
    const COLOURS: [&str; 4] = ["Red", "Blue", "Yellow", "Green"];
    let total = draws.pick_copy(&[15u32, 17, 20, 22]);

    // every colour gets at least two counters
    let mut spare = total - 2 * COLOURS.len() as u32;
    let mut counts = Vec::with_capacity(COLOURS.len());
    for _ in 1..COLOURS.len() {
        let extra = draw_u32(draws, 0, spare / 2);
        spare -= extra;
        counts.push(2 + extra);
    }
    counts.push(2 + spare);

    let target = draws.index(COLOURS.len());
    let table = Table::Grid(GridTable {
        title: None,
        headers: std::iter::once("Colour")
            .chain(COLOURS)
            .map(String::from)
            .collect(),
        rows: vec![
            std::iter::once("Number of counters".to_string())
                .chain(counts.iter().map(u32::to_string))
                .collect(),
        ],
    });
    Question::Tabular(TabularQuestion {
        prompt: Some(format!(
            "There are {total} counters in a bag.\nThe table shows the number of counters of \
             each colour.\nWhat fraction of the counters are {}?",
            COLOURS[target].to_lowercase()
        )),
        table,
        pictogram: None,
        answer: Some(Answer::text(fraction_text(counts[target], total))),
        parts: Vec::new(),
    })
}

fn order(draws: &mut Draws<'_>) -> Question {
    let count = if draws.coin() { 4 } else { 5 };
    let mut fractions: Vec<Fraction> = Vec::with_capacity(count);
    while fractions.len() < count {
        let next = draws.retry(
            "ordered fractions have distinct values",
            |d| {
                let denominator = d.pick_copy(&ORDER_DENOMINATORS);
                let candidate = Fraction::new(draw_u32(d, 1, denominator - 1), denominator);
                (!fractions.iter().any(|f| f.same_value(candidate))).then_some(candidate)
            },
            || Fraction::new(fractions.len() as u32 + 1, 31),
        );
        fractions.push(next);
    }

    let direction = if draws.coin() {
        OrderDirection::SmallestFirst
    } else {
        OrderDirection::BiggestFirst
    };
    let mut sorted = fractions.clone();
    sorted.sort_by(|a, b| a.cmp_value(*b));
    if direction == OrderDirection::BiggestFirst {
        sorted.reverse();
    }
    let answer = sorted
        .iter()
        .map(Fraction::to_string)
        .collect::<Vec<_>>()
        .join(",");

    draws.shuffle(&mut fractions);
    let listed = fractions
        .iter()
        .map(Fraction::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let start = match direction {
        OrderDirection::SmallestFirst => "smallest",
        OrderDirection::BiggestFirst => "biggest",
    };
    fraction_question(
        format!("Put these fractions in order, starting with the {start}: {listed}"),
        FractionTask::Order {
            fractions,
            direction,
        },
        Answer::text(answer),
    )
}

/// Distance from `f` to `target` as an unreduced fraction.
fn distance(f: Fraction, target: Fraction) -> (u64, u64) {
    let left = u64::from(f.numerator) * u64::from(target.denominator);
    let right = u64::from(target.numerator) * u64::from(f.denominator);
    (
        left.abs_diff(right),
        u64::from(f.denominator) * u64::from(target.denominator),
    )
}

fn closer_candidate(draws: &mut Draws<'_>) -> Fraction {
    let denominator = draws.pick_copy(&CLOSER_DENOMINATORS);
    Fraction::new(draw_u32(draws, 2, denominator - 1), denominator)
}

fn closer_to(draws: &mut Draws<'_>) -> Question {
    let target = if draws.coin() {
        CloserTarget::One
    } else {
        CloserTarget::Half
    };
    let goal = target.as_fraction();

    let (first, second, closer) = draws.retry(
        "closer-to fractions are distinct without a tie",
        |d| {
            let first = closer_candidate(d);
            let second = closer_candidate(d);
            if first.same_value(second) {
                return None;
            }
            let (a, b) = (distance(first, goal), distance(second, goal));
            match (a.0 * b.1).cmp(&(b.0 * a.1)) {
                Ordering::Less => Some((first, second, first)),
                Ordering::Greater => Some((first, second, second)),
                Ordering::Equal => None,
            }
        },
        || {
            let (first, second) = (Fraction::new(5, 6), Fraction::new(4, 7));
            match target {
                CloserTarget::Half => (first, second, second),
                CloserTarget::One => (first, second, first),
            }
        },
    );
    fraction_question(
        format!(
            "Which fraction is closer to {}: {first} or {second}?",
            target.label()
        ),
        FractionTask::CloserTo {
            target,
            first,
            second,
        },
        Answer::from(closer),
    )
}

//
// ─── OTHER FRACTION TOPICS ─────────────────────────────────────────────────────
//

pub(crate) fn fractions_of_amount(draws: &mut Draws<'_>) -> Question {
    const FRACTIONS: [(u32, u32); 9] = [
        (1, 2),
        (1, 3),
        (1, 4),
        (1, 5),
        (2, 3),
        (3, 4),
        (2, 5),
        (3, 5),
        (4, 5),
    ];
    let (numerator, denominator) = draws.pick_copy(&FRACTIONS);
    let amount = denominator * draw_u32(draws, 3, 12);
    let fraction = Fraction::new(numerator, denominator);
    Question::Simple(SimpleQuestion {
        prompt: format!("Work out {fraction} of {amount}"),
        answer: Answer::int(i64::from(amount / denominator * numerator)),
        fraction: Some(fraction),
    })
}

pub(crate) fn fractions_decimals_percentages(draws: &mut Draws<'_>) -> Question {
    const TABLE: [(u32, u32, u32); 6] = [
        (1, 2, 50),
        (1, 4, 25),
        (3, 4, 75),
        (1, 5, 20),
        (2, 5, 40),
        (1, 10, 10),
    ];
    let (n, d, percent) = draws.pick_copy(&TABLE);
    let decimal = f64::from(percent) / 100.0;
    match draws.index(4) {
        0 => Question::simple(
            format!("Convert {n}/{d} to a decimal"),
            Answer::num(decimal),
        ),
        1 => Question::simple(
            format!("Convert {decimal} to a percentage"),
            Answer::int(i64::from(percent)),
        ),
        2 => Question::simple(
            format!("Convert {percent}% to a fraction in its simplest form"),
            Answer::text(fraction_text(n, d)),
        ),
        _ => Question::simple(
            format!("Convert {n}/{d} to a percentage"),
            Answer::int(i64::from(percent)),
        ),
    }
}

/// The four operations on fractions, answered in lowest terms.
pub(crate) fn fractions_g3(draws: &mut Draws<'_>) -> Question {
    match draws.index(4) {
        0 => {
            let d = draw_u32(draws, 2, 9);
            let (a, b) = (draw_u32(draws, 1, 5), draw_u32(draws, 1, 4));
            Question::simple(
                format!("Calculate: {a}/{d} + {b}/{d}"),
                Answer::text(fraction_text(a + b, d)),
            )
        }
        1 => {
            let d = draw_u32(draws, 3, 9);
            let a = draw_u32(draws, 2, 6);
            let b = draw_u32(draws, 1, a - 1);
            Question::simple(
                format!("Calculate: {a}/{d} - {b}/{d}"),
                Answer::text(fraction_text(a - b, d)),
            )
        }
        2 => {
            let (a, b) = (draw_u32(draws, 1, 5), draw_u32(draws, 2, 7));
            let (c, d) = (draw_u32(draws, 1, 4), draw_u32(draws, 2, 6));
            Question::simple(
                format!("Calculate: {a}/{b} * {c}/{d}"),
                Answer::text(fraction_text(a * c, b * d)),
            )
        }
        _ => {
            let (a, b) = (draw_u32(draws, 1, 5), draw_u32(draws, 2, 7));
            let (c, d) = (draw_u32(draws, 1, 4), draw_u32(draws, 2, 6));
            Question::simple(
                format!("Calculate: {a}/{b} ÷ {c}/{d}"),
                Answer::text(fraction_text(a * d, b * c)),
            )
        }
    }
}

pub(crate) fn recurring_decimals_fractions(draws: &mut Draws<'_>) -> Question {
    if draws.coin() {
        let digit = draw_u32(draws, 1, 8);
        Question::simple(
            format!("Convert 0.{digit}{digit}{digit}... (recurring) to a fraction in its simplest form"),
            Answer::text(fraction_text(digit, 9)),
        )
    } else {
        let pair = draw_u32(draws, 1, 98);
        Question::simple(
            format!(
                "Convert 0.{pair:02}{pair:02}... (the digits {pair:02} recurring) to a fraction \
                 in its simplest form"
            ),
            Answer::text(fraction_text(pair, 99)),
        )
    }
}
