//! Money word problems and percentages.
//!
//! Prices are drawn in pence and only converted to pounds for display, so
//! every answer is exact to the penny.

use crate::format::{format_money, format_number, round2};
use crate::model::{Answer, Question};
use crate::random::Draws;

use super::NAMES;

fn pounds(pence: i64) -> String {
    format!("£{}", format_money(pence as f64 / 100.0))
}

fn pence_answer(pence: i64) -> Answer {
    Answer::num(round2(pence as f64 / 100.0))
}

//
// ─── CALCULATION PROBLEMS ──────────────────────────────────────────────────────
//

/// One of fourteen multi-step shopping and measuring problems.
pub(crate) fn calculation_problems(draws: &mut Draws<'_>) -> Question {
    let pair = draws.distinct_indices(NAMES.len(), 2);
    let (name, friend) = (NAMES[pair[0]], NAMES[pair[1]]);
    let (prompt, answer) = match draws.index(14) {
        0 => change_from_note(draws, name, "sausage rolls", (5, 8), (70, 99), 20),
        1 => {
            let budget = draws.int(4, 6) * 100;
            let price = draws.int(30, 49);
            let change = budget % price;
            (
                format!(
                    "{name} wants to buy as many chocolate bars as possible with {}. \
                     Each chocolate bar costs {}. How much change will {name} get?",
                    pounds(budget),
                    pounds(price)
                ),
                pence_answer(change),
            )
        }
        2 => change_from_note(draws, name, "pens", (5, 7), (25, 39), 10),
        3 => stationery_order(draws, name),
        4 => {
            let price = draws.int(5000, 6999);
            let deposit = draws.int(800, 1199);
            let months = 12;
            (
                format!(
                    "{name} buys a car costing £{price}. They pay a deposit of £{deposit}, then \
                     {months} equal monthly payments. How much is each monthly payment \
                     (to the nearest penny)?"
                ),
                Answer::num(round2((price - deposit) as f64 / months as f64)),
            )
        }
        5 => {
            let (coffees, coffee) = (draws.int(2, 3), draws.int(150, 179));
            let (teas, tea) = (2, draws.int(100, 119));
            let (cakes, cake) = (draws.int(4, 6), draws.int(200, 239));
            (
                format!(
                    "{name} goes to a cafe and buys:\n{coffees} coffees at {} each\n\
                     {teas} teas at {} each\n{cakes} cakes at {} each\n\
                     Work out the total amount spent.",
                    pounds(coffee),
                    pounds(tea),
                    pounds(cake)
                ),
                pence_answer(coffees * coffee + teas * tea + cakes * cake),
            )
        }
        6 => {
            let pen = draws.int(25, 32);
            let pencil = draws.int(8, 15);
            let (pens, pencils) = (draws.int(3, 4), draws.int(4, 6));
            (
                format!(
                    "{name} buys {pens} pens and {pencils} pencils for {} in total.\n\
                     {friend} buys 4 pens for {}.\n\
                     Work out how much it would cost to buy 1 pen and 2 pencils.",
                    pounds(pens * pen + pencils * pencil),
                    pounds(4 * pen)
                ),
                pence_answer(pen + 2 * pencil),
            )
        }
        7 => {
            let calculator = draws.int(500, 539);
            let pen = draws.int(110, 129);
            let budget = 200 * 100;
            let enough = 30 * (calculator + pen) <= budget;
            (
                format!(
                    "2 calculators cost {}.\n3 pens cost {}.\n\
                     {name} wants to buy 30 calculators and 30 pens and only has £200.\n\
                     Does {name} have enough money? (yes/no)",
                    pounds(2 * calculator),
                    pounds(3 * pen)
                ),
                Answer::text(if enough { "yes" } else { "no" }),
            )
        }
        8 => {
            let length = draws.int(330, 379);
            (
                format!(
                    "A piece of string is {length} cm long.\n{name} cuts three 40 cm lengths off \
                     the string, then cuts the rest into as many 35 cm lengths as possible.\n\
                     How many 35 cm lengths are cut?"
                ),
                Answer::int((length - 3 * 40) / 35),
            )
        }
        9 => {
            let weekday = draws.int(900, 949);
            let saturday = draws.int(1100, 1139);
            (
                format!(
                    "{name} is paid {} an hour from Monday to Friday and {} an hour on Saturday.\n\
                     Last week {name} worked 12 hours from Monday to Friday and 4 hours on \
                     Saturday. How much was {name} paid?",
                    pounds(weekday),
                    pounds(saturday)
                ),
                pence_answer(12 * weekday + 4 * saturday),
            )
        }
        10 => {
            let students = draws.int(100, 119);
            let pack = draws.int(115, 134);
            let packs = (students + 5) / 6;
            (
                format!(
                    "{name} wants to buy a chocolate bar for each of the {students} students in \
                     year 7. A pack of 6 bars costs {}. How much will the bars cost?",
                    pounds(pack)
                ),
                pence_answer(packs * pack),
            )
        }
        11 => {
            let smaller = draws.int(210, 240);
            let difference = draws.int(30, 49);
            (
                format!(
                    "{name} and {friend} saved a total of £{}. {friend} saved £{difference} more \
                     than {name}. How much did {name} save?",
                    2 * smaller + difference
                ),
                Answer::int(smaller),
            )
        }
        12 => {
            let tenths = draws.int(15, 19);
            (
                format!(
                    "{name} has {} litres of water in a kettle. Each cup of tea needs 200ml. \
                     How many cups of tea can be made?",
                    format_number(tenths as f64 / 10.0)
                ),
                Answer::int(tenths * 100 / 200),
            )
        }
        _ => {
            let washes = draws.int(2, 3);
            let grams = draws.pick_copy(&[40, 50]);
            let weeks = draws.int(10, 13);
            let pack = 650;
            let needed = washes * grams * weeks;
            (
                format!(
                    "A shop sells washing powder in {pack}g packs. {name} does {washes} washes \
                     a week using {grams}g each wash. How many packs are needed for {weeks} weeks?"
                ),
                Answer::int((needed + pack - 1) / pack),
            )
        }
    };
    Question::simple(prompt, answer)
}

fn change_from_note(
    draws: &mut Draws<'_>,
    name: &str,
    item: &str,
    count: (i64, i64),
    price: (i64, i64),
    note: i64,
) -> (String, Answer) {
    let count = draws.int(count.0, count.1);
    let price = draws.int(price.0, price.1);
    (
        format!(
            "{name} buys {count} {item} costing {price}p each and pays with a £{note} note. \
             How much change should {name} get?"
        ),
        pence_answer(note * 100 - count * price),
    )
}

fn stationery_order(draws: &mut Draws<'_>, name: &str) -> (String, Answer) {
    let pens = draws.int(75, 94);
    let rulers = draws.int(240, 289);
    let pencils = draws.int(48, 62);
    let calculator = draws.int(600, 699);
    let total = 30 / 5 * pens + 30 / 10 * rulers + 30 / 6 * pencils + 30 * calculator;
    (
        format!(
            "{name} buys 30 pens, 30 rulers, 30 pencils and 30 calculators.\n\
             Price list:\nPens: 5 for {}\nRulers: 10 for {}\nPencils: 6 for {}\n\
             Calculators: {} each\nWhat is the total cost?",
            pounds(pens),
            pounds(rulers),
            pounds(pencils),
            pounds(calculator)
        ),
        pence_answer(total),
    )
}

//
// ─── PERCENTAGES ───────────────────────────────────────────────────────────────
//

pub(crate) fn percentages(draws: &mut Draws<'_>) -> Question {
    let percent = draws.pick_copy(&[10, 15, 20, 25, 30, 40, 50, 75]);
    let amount = draws.int(50, 249);
    Question::simple(
        format!("Calculate {percent}% of £{amount}"),
        Answer::num(round2((percent * amount) as f64 / 100.0)),
    )
}

pub(crate) fn percentage_change(draws: &mut Draws<'_>) -> Question {
    let original = draws.int(50, 149);
    let change = draws.int(10, 39);
    let (verb, factor) = if draws.chance(0.5) {
        ("Increase", 100 + change)
    } else {
        ("Decrease", 100 - change)
    };
    Question::simple(
        format!("{verb} £{original} by {change}%"),
        pence_answer(original * factor),
    )
}

pub(crate) fn exchange_rates(draws: &mut Draws<'_>) -> Question {
    let gbp = draws.int(100, 599);
    let rate = draws.int(100, 149);
    Question::simple(
        format!(
            "Convert £{gbp} to euros at an exchange rate of £1 = €{}",
            format_number(rate as f64 / 100.0)
        ),
        pence_answer(gbp * rate),
    )
}

pub(crate) fn best_buy(draws: &mut Draws<'_>) -> Question {
    let items = draws.int(3, 6);
    let cost = draws.int(2, 6);
    let nudge = draws.int(1, 2);
    let big_cost = if draws.coin() {
        2 * cost - nudge
    } else {
        2 * cost + nudge
    };
    // big pack has twice the items, so compare its cost with twice the small one
    let better = if big_cost < 2 * cost { "Pack B" } else { "Pack A" };
    Question::simple(
        format!(
            "Pack A: {items} items for £{cost}. Pack B: {} items for £{big_cost}. \
             Which is better value? (Pack A or Pack B)",
            items * 2
        ),
        Answer::text(better),
    )
}

pub(crate) fn compound_interest(draws: &mut Draws<'_>) -> Question {
    let principal = draws.int(1000, 5999);
    let rate = draws.pick_copy(&[2, 3, 4, 5, 6, 8, 10]);
    let years = draws.int(2, 4);
    if draws.chance(0.5) {
        let total = principal as f64 * (1.0 + rate as f64 / 100.0).powi(years as i32);
        Question::simple(
            format!(
                "£{principal} is invested at {rate}% compound interest for {years} years. \
                 Find the total amount to the nearest penny."
            ),
            Answer::num(round2(total)),
        )
    } else {
        let value = principal as f64 * (1.0 - rate as f64 / 100.0).powi(years as i32);
        Question::simple(
            format!(
                "A car worth £{principal} depreciates by {rate}% per year for {years} years. \
                 Find its value to the nearest penny."
            ),
            Answer::num(round2(value)),
        )
    }
}

pub(crate) fn reverse_percentages(draws: &mut Draws<'_>) -> Question {
    let percent = draws.pick_copy(&[10, 15, 20, 25, 30]);
    let original = draws.int(20, 60) * 4;
    let increase = draws.coin();
    let factor = if increase { 100 + percent } else { 100 - percent };
    let wording = if increase { "an increase" } else { "a decrease" };
    Question::simple(
        format!(
            "After {wording} of {percent}%, a price is {}. What was the original price?",
            pounds(original * factor)
        ),
        Answer::int(original),
    )
}

pub(crate) fn repeated_percentage_change(draws: &mut Draws<'_>) -> Question {
    let initial = draws.int(1000, 5999);
    let percent = draws.pick_copy(&[5, 8, 10, 12, 15]);
    let years = draws.int(2, 4);
    let total = initial as f64 * (1.0 + percent as f64 / 100.0).powi(years as i32);
    Question::simple(
        format!(
            "£{initial} increases by {percent}% each year for {years} years. \
             Find the final amount to the nearest penny."
        ),
        Answer::num(round2(total)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ChaChaSource, ScriptedSource};

    #[test]
    fn calculation_problems_never_go_negative() {
        let mut source = ChaChaSource::seeded(21);
        let mut draws = Draws::new(&mut source, 8);
        for _ in 0..500 {
            let q = calculation_problems(&mut draws);
            if let Some(value) = q.scalar_answer().and_then(Answer::as_number) {
                assert!(value >= 0.0, "{q:?}");
            }
        }
    }

    #[test]
    fn pen_and_pencil_problem_is_consistent() {
        // names Alex and Sam, problem 6, pen 25p, pencil 8p, 3 pens, 4 pencils
        let mut source =
            ScriptedSource::new([0.0, 0.0, 6.0 / 14.0 + 0.01, 0.0, 0.0, 0.0, 0.0]);
        let mut draws = Draws::new(&mut source, 4);
        let q = calculation_problems(&mut draws);
        assert!(q.prompt().unwrap().contains("£1.07 in total"));
        assert_eq!(q.scalar_answer(), Some(&Answer::num(0.41)));
    }

    #[test]
    fn best_buy_can_go_either_way() {
        let mut source = ChaChaSource::seeded(4);
        let mut draws = Draws::new(&mut source, 8);
        let answers: std::collections::BTreeSet<String> = (0..100)
            .map(|_| best_buy(&mut draws).scalar_answer().unwrap().to_string())
            .collect();
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn reverse_percentage_recovers_whole_pounds() {
        let mut source = ScriptedSource::new([0.0, 0.0, 0.9]);
        let mut draws = Draws::new(&mut source, 4);
        let q = reverse_percentages(&mut draws);
        assert!(q.prompt().unwrap().contains("£88.00"));
        assert_eq!(q.scalar_answer(), Some(&Answer::int(80)));
    }
}
