//! Number work: the four operations, place value, powers, factors, indices,
//! standard form, surds and bounds.

use crate::format::{format_number, gcd, lcm, ordinal, prime_factors, round2, round_to};
use crate::model::{Answer, Question};
use crate::random::Draws;

pub(crate) fn addition_subtraction(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(1, 12);
    let b = draws.int(1, 12);
    if draws.coin() {
        Question::simple(format!("{a} + {b} = ?"), Answer::int(a + b))
    } else {
        Question::simple(format!("{a} - {b} = ?"), Answer::int(a - b))
    }
}

pub(crate) fn multiplication_division(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(1, 12);
    let b = draws.int(1, 12);
    if draws.coin() {
        Question::simple(format!("{a} * {b} = ?"), Answer::int(a * b))
    } else {
        let quotient = round2(a as f64 / b as f64);
        Question::simple(format!("{a} ÷ {b} = ?"), Answer::num(quotient))
    }
}

pub(crate) fn place_value(draws: &mut Draws<'_>) -> Question {
    if draws.coin() {
        let thousands = draws.int(1, 9);
        let hundreds = draws.int(0, 9);
        let tens = draws.int(0, 9);
        let units = draws.int(0, 9);
        return Question::simple(
            format!(
                "Write the number: {thousands} thousands, {hundreds} hundreds, {tens} tens, {units} units"
            ),
            Answer::int(thousands * 1000 + hundreds * 100 + tens * 10 + units),
        );
    }

    const PLACES: [&str; 4] = ["units", "tens", "hundreds", "thousands"];
    let (number, digits) = if draws.coin() {
        (draws.int(1000, 9999), 4)
    } else {
        (draws.int(100, 999), 3)
    };
    let place = draws.index(digits);
    let power = 10i64.pow(place as u32);
    let digit = (number / power) % 10;
    Question::simple(
        format!("What is the value of the {} digit in {number}?", PLACES[place]),
        Answer::int(digit * power),
    )
}

pub(crate) fn rounding(draws: &mut Draws<'_>) -> Question {
    match draws.index(4) {
        0 => nearest(draws.int(100, 999), 10),
        1 => nearest(draws.int(1000, 9999), 100),
        2 => nearest(draws.int(10_000, 99_999), 1000),
        _ => {
            let thousandths = draws.int(0, 99_999);
            let value = thousandths as f64 / 1000.0;
            Question::simple(
                format!("Round {value:.3} to 1 decimal place"),
                Answer::num(round_to(value, 1)),
            )
        }
    }
}

fn nearest(number: i64, to: i64) -> Question {
    let rounded = ((number as f64 / to as f64).round() as i64) * to;
    Question::simple(
        format!("Round {number} to the nearest {to}"),
        Answer::int(rounded),
    )
}

pub(crate) fn negative_numbers(draws: &mut Draws<'_>) -> Question {
    match draws.index(4) {
        0 => {
            let a = draws.sign() * draws.int(1, 12);
            let b = draws.sign() * draws.int(1, 12);
            Question::simple(format!("{a} + {b} = ?"), Answer::int(a + b))
        }
        1 => {
            let a = draws.sign() * draws.int(1, 12);
            let b = draws.sign() * draws.int(1, 12);
            Question::simple(format!("{a} - {b} = ?"), Answer::int(a - b))
        }
        2 => {
            let a = draws.sign() * draws.int(2, 9);
            let b = draws.sign() * draws.int(2, 9);
            Question::simple(format!("{a} * {b} = ?"), Answer::int(a * b))
        }
        _ => {
            let start = draws.sign() * draws.int(1, 10);
            let step = draws.sign() * draws.int(1, 5);
            Question::simple(
                format!(
                    "Sequence: {start}, {}, {}, ? What is the next term?",
                    start + step,
                    start + 2 * step
                ),
                Answer::int(start + 3 * step),
            )
        }
    }
}

pub(crate) fn powers_roots(draws: &mut Draws<'_>) -> Question {
    match draws.index(5) {
        0 => {
            let n = draws.int(2, 13);
            Question::simple(format!("{n}^2 = ?"), Answer::int(n * n))
        }
        1 => {
            let n = draws.int(2, 7);
            Question::simple(format!("{n}^3 = ?"), Answer::int(n * n * n))
        }
        2 => {
            let base = draws.int(2, 7);
            let exp = draws.int(2, 4);
            Question::simple(format!("{base}^{exp} = ?"), Answer::int(base.pow(exp as u32)))
        }
        3 => {
            let n = draws.int(2, 14);
            Question::simple(format!("√{} = ?", n * n), Answer::int(n))
        }
        _ => {
            let n = draws.int(2, 6);
            Question::simple(format!("∛{} = ?", n * n * n), Answer::int(n))
        }
    }
}

pub(crate) fn bidmas(draws: &mut Draws<'_>) -> Question {
    match draws.index(3) {
        0 => {
            let (a, b, c) = (draws.int(2, 7), draws.int(2, 7), draws.int(2, 7));
            Question::simple(format!("({a} + {b}) * {c} = ?"), Answer::int((a + b) * c))
        }
        1 => {
            let (a, b, c) = (draws.int(2, 7), draws.int(2, 5), draws.int(2, 7));
            Question::simple(format!("{a} + {b} * {c} = ?"), Answer::int(a + b * c))
        }
        _ => {
            let (a, b, c) = (draws.int(2, 5), draws.int(2, 5), draws.int(2, 5));
            let d = draws.int(1, 4);
            let value = ((a + b) * c) as f64 / d as f64;
            Question::simple(
                format!("({a} + {b}) * {c} ÷ {d} = ?"),
                Answer::num(round2(value)),
            )
        }
    }
}

const PRIMES: [i64; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];
const COMPOSITES: [i64; 10] = [9, 15, 21, 25, 27, 33, 35, 39, 49, 51];

pub(crate) fn factors_multiples(draws: &mut Draws<'_>) -> Question {
    match draws.index(4) {
        0 => {
            let n = draws.int(10, 29);
            let count = (1..=n).filter(|d| n % d == 0).count();
            Question::simple(
                format!("How many factors does {n} have?"),
                Answer::int(count as i64),
            )
        }
        1 => {
            let n = draws.int(3, 12);
            let k = draws.int(2, 5);
            Question::simple(
                format!("What is the {} multiple of {n}?", ordinal(k as u64)),
                Answer::int(n * k),
            )
        }
        2 => {
            let (n, prime) = if draws.coin() {
                (draws.pick_copy(&COMPOSITES), false)
            } else {
                (draws.pick_copy(&PRIMES), true)
            };
            Question::simple(
                format!("Is {n} a prime number? (yes/no)"),
                Answer::text(if prime { "yes" } else { "no" }),
            )
        }
        _ => {
            let n = draws.pick_copy(&[12u64, 18, 20, 24, 30, 36, 40, 42]);
            Question::simple(
                format!("Write {n} as a product of its prime factors (e.g. 2*3*5)"),
                Answer::text(product(&prime_factors(n))),
            )
        }
    }
}

fn product(factors: &[u64]) -> String {
    factors
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join("*")
}

pub(crate) fn using_calculator(draws: &mut Draws<'_>) -> Question {
    match draws.index(3) {
        0 => {
            let a = draws.int(10, 59) as f64 / 10.0;
            let b = draws.int(5, 34) as f64 / 10.0;
            Question::simple(
                format!("{} * {} = ?", format_number(a), format_number(b)),
                Answer::num(round2(a * b)),
            )
        }
        1 => {
            let dividend = draws.int(200, 599);
            let divisor = draws.int(5, 19);
            Question::simple(
                format!("{dividend} ÷ {divisor} = ? (give your answer to 2 decimal places)"),
                Answer::num(round2(dividend as f64 / divisor as f64)),
            )
        }
        _ => {
            let a = draws.int(20, 69);
            let b = draws.int(10, 39);
            let c = draws.int(5, 24);
            Question::simple(format!("({a} + {b}) * {c} = ?"), Answer::int((a + b) * c))
        }
    }
}

pub(crate) fn systematic_listing(draws: &mut Draws<'_>) -> Question {
    const MENUS: [(&str, &[&str], &str, &[&str]); 3] = [
        ("mains", &["Burger", "Pizza", "Pasta"], "drinks", &["Coke", "Juice"]),
        ("mains", &["Chicken", "Fish", "Beef"], "sides", &["Chips", "Salad"]),
        ("fillings", &["Ham", "Cheese"], "breads", &["White", "Brown"]),
    ];
    let (first_kind, first, second_kind, second) = draws.pick_copy(&MENUS);
    let count = first.len() * second.len();
    Question::simple(
        format!(
            "A cafe offers {} for {first_kind} and {} for {second_kind}. \
             How many different combinations of one of each are possible?",
            first.join(", "),
            second.join(" or "),
        ),
        Answer::int(count as i64),
    )
}

pub(crate) fn error_intervals(draws: &mut Draws<'_>) -> Question {
    let value = draws.int(20, 69);
    if draws.coin() {
        let (lower, upper) = (value as f64 - 0.05, value as f64 + 0.05);
        Question::simple(
            format!("A length is {value}.0 cm to 1 decimal place. Write the error interval for the length x."),
            Answer::text(interval(round2(lower), round2(upper))),
        )
    } else {
        let (lower, upper) = (value as f64 - 0.5, value as f64 + 0.5);
        Question::simple(
            format!("A length is {value} cm to the nearest cm. Write the error interval for the length x."),
            Answer::text(interval(lower, upper)),
        )
    }
}

fn interval(lower: f64, upper: f64) -> String {
    format!("{} ≤ x < {}", format_number(lower), format_number(upper))
}

pub(crate) fn estimating(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(10, 59) * 10 + draws.int(1, 9);
    let b = draws.int(5, 34) * 10 + draws.int(1, 9);
    let round = |n: i64| ((n as f64 / 10.0).round() as i64) * 10;
    Question::simple(
        format!("Estimate {a} * {b} by rounding each number to the nearest 10"),
        Answer::int(round(a) * round(b)),
    )
}

pub(crate) fn indices(draws: &mut Draws<'_>) -> Question {
    let base = draws.int(2, 6);
    let m = draws.int(2, 5);
    let n = draws.int(1, 3);
    let (prompt, exponent) = match draws.index(3) {
        0 => (format!("Simplify: {base}^{m} * {base}^{n}"), m + n),
        1 => (format!("Simplify: {base}^{m} ÷ {base}^{n}"), m - n),
        _ => (format!("Simplify: ({base}^{m})^{n}"), m * n),
    };
    Question::simple(
        format!("{prompt} (leave your answer as a power)"),
        Answer::text(format!("{base}^{exponent}")),
    )
}

pub(crate) fn prime_factors_hcf_lcm(draws: &mut Draws<'_>) -> Question {
    let a = draws.pick_copy(&[12u64, 18, 24, 30, 36, 40, 48]);
    let b = draws.pick_copy(&[15u64, 20, 24, 30, 36, 45]);
    if draws.chance(0.5) {
        Question::simple(
            format!("Find the HCF of {a} and {b}"),
            Answer::int(gcd(a, b) as i64),
        )
    } else {
        Question::simple(
            format!("Find the LCM of {a} and {b}"),
            Answer::int(lcm(a, b) as i64),
        )
    }
}

pub(crate) fn standard_form(draws: &mut Draws<'_>) -> Question {
    let tenths = draws.int(10, 99);
    let exponent = draws.int(2, 9);
    let mantissa = tenths as f64 / 10.0;
    Question::simple(
        format!(
            "Write {} * 10^{exponent} as an ordinary number",
            format_number(mantissa)
        ),
        Answer::int(tenths * 10i64.pow(exponent as u32 - 1)),
    )
}

pub(crate) fn fractional_negative_indices(draws: &mut Draws<'_>) -> Question {
    if draws.coin() {
        let root = draws.int(2, 7);
        Question::simple(
            format!("Calculate: {}^(1/2)", root * root),
            Answer::int(root),
        )
    } else {
        let base = draws.int(2, 7);
        let exp = draws.int(1, 3);
        Question::simple(
            format!("Calculate: {base}^-{exp} (give your answer as a fraction)"),
            Answer::text(format!("1/{}", base.pow(exp as u32))),
        )
    }
}

pub(crate) fn product_rule_counting(draws: &mut Draws<'_>) -> Question {
    let first = draws.int(3, 7);
    let second = draws.int(2, 5);
    let third = draws.int(2, 4);
    Question::simple(
        format!(
            "How many different outcomes are there if there are {first} choices for the first, \
             {second} for the second, and {third} for the third?"
        ),
        Answer::int(first * second * third),
    )
}

pub(crate) fn surds(draws: &mut Draws<'_>) -> Question {
    const SQUARE_FREE: [i64; 5] = [2, 3, 5, 6, 7];
    if draws.coin() {
        let a = draws.int(2, 9);
        let b = draws.pick_copy(&SQUARE_FREE);
        Question::simple(
            format!("Simplify: √{}", a * a * b),
            Answer::text(format!("{a}√{b}")),
        )
    } else {
        let a = draws.pick_copy(&SQUARE_FREE);
        Question::simple(
            format!("Rationalise the denominator: 1/√{a}"),
            Answer::text(format!("√{a}/{a}")),
        )
    }
}

pub(crate) fn bounds(draws: &mut Draws<'_>) -> Question {
    let value = draws.int(20, 69);
    if draws.coin() {
        Question::simple(
            format!("A measurement is {value} cm to the nearest cm. Find the upper bound."),
            Answer::num(value as f64 + 0.5),
        )
    } else {
        Question::simple(
            format!("A measurement is {value} cm to the nearest cm. Find the lower bound."),
            Answer::num(value as f64 - 0.5),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ChaChaSource, ScriptedSource};

    fn scripted(script: &[f64]) -> ScriptedSource {
        ScriptedSource::new(script.iter().copied())
    }

    #[test]
    fn subtraction_when_coin_is_low() {
        let mut source = scripted(&[0.5, 0.25, 0.1]);
        let mut draws = Draws::new(&mut source, 4);
        let q = addition_subtraction(&mut draws);
        assert_eq!(q.prompt(), Some("7 - 4 = ?"));
        assert_eq!(q.scalar_answer(), Some(&Answer::int(3)));
    }

    #[test]
    fn division_rounds_to_two_places() {
        let mut source = scripted(&[0.0, 0.2, 0.1]);
        let mut draws = Draws::new(&mut source, 4);
        let q = multiplication_division(&mut draws);
        assert_eq!(q.prompt(), Some("1 ÷ 3 = ?"));
        assert_eq!(q.scalar_answer(), Some(&Answer::num(0.33)));
    }

    #[test]
    fn place_value_reads_the_right_digit() {
        // digit question, 4-digit number 1000 + floor(0.5 * 9000) = 5500, tens place
        let mut source = scripted(&[0.1, 0.9, 0.5, 0.3]);
        let mut draws = Draws::new(&mut source, 4);
        let q = place_value(&mut draws);
        assert_eq!(q.prompt(), Some("What is the value of the tens digit in 5500?"));
        assert_eq!(q.scalar_answer(), Some(&Answer::int(0)));
    }

    #[test]
    fn prime_questions_cover_both_answers() {
        let mut source = ChaChaSource::seeded(9);
        let mut draws = Draws::new(&mut source, 8);
        let mut seen = (false, false);
        for _ in 0..400 {
            let q = factors_multiples(&mut draws);
            match q.scalar_answer() {
                Some(Answer::Text(t)) if t == "yes" => seen.0 = true,
                Some(Answer::Text(t)) if t == "no" => seen.1 = true,
                _ => {}
            }
        }
        assert_eq!(seen, (true, true));
    }

    #[test]
    fn factorisation_is_written_as_a_product() {
        assert_eq!(product(&prime_factors(36)), "2*2*3*3");
    }

    #[test]
    fn standard_form_is_exact() {
        // tenths = 10 + floor(0.5 * 90) = 55, exponent = 2 + floor(0.9 * 8) = 9
        let mut source = scripted(&[0.5, 0.9]);
        let mut draws = Draws::new(&mut source, 4);
        let q = standard_form(&mut draws);
        assert_eq!(q.scalar_answer(), Some(&Answer::int(5_500_000_000)));
    }

    #[test]
    fn surds_are_fully_simplified() {
        let mut source = ChaChaSource::seeded(1);
        let mut draws = Draws::new(&mut source, 8);
        for _ in 0..100 {
            if let Some(Answer::Text(answer)) = surds(&mut draws).scalar_answer() {
                assert!(!answer.contains("√4") && !answer.contains("√9"), "{answer}");
            }
        }
    }

    #[test]
    fn error_interval_uses_plain_x() {
        let mut source = scripted(&[0.0, 0.9]);
        let mut draws = Draws::new(&mut source, 4);
        let q = error_intervals(&mut draws);
        assert_eq!(q.scalar_answer(), Some(&Answer::text("19.95 ≤ x < 20.05")));
    }
}
