//! Algebra from collecting like terms through to iteration.

use crate::format::{gcd, linear, ordinal, round2, signed_term};
use crate::model::{Answer, Expected, Part, Question};
use crate::random::Draws;

use super::fractions::fraction_text;

const INEQUALITIES: [&str; 4] = [">", "<", "≥", "≤"];

/// A trailing signed term with a variable: ` + 3x`, ` - x`, or nothing for zero.
fn signed_var(coefficient: i64, var: &str) -> String {
    match coefficient {
        0 => String::new(),
        1 => format!(" + {var}"),
        -1 => format!(" - {var}"),
        c if c > 0 => format!(" + {c}{var}"),
        c => format!(" - {}{var}", -c),
    }
}

/// `x^2 + bx + c` with signs folded in.
fn monic_quadratic(b: i64, c: i64) -> String {
    format!("x^2{}{}", signed_var(b, "x"), signed_term(c))
}

pub(crate) fn simplifying_algebra(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(1, 5);
    let b = draws.int(1, 4);
    if draws.coin() {
        Question::simple(
            format!("Simplify: {a}x + {b}x"),
            Answer::text(format!("{}x", a + b)),
        )
    } else {
        let c = draws.int(1, 3);
        Question::simple(
            format!("Simplify: {a}x + {b}x + {c}"),
            Answer::text(format!("{}x + {c}", a + b)),
        )
    }
}

pub(crate) fn writing_expression(draws: &mut Draws<'_>) -> Question {
    match draws.index(3) {
        0 => {
            let n = draws.int(3, 7);
            Question::simple(
                format!("Write an expression for: a number n multiplied by {n}, then add {n}"),
                Answer::text(format!("{n}n + {n}")),
            )
        }
        1 => {
            let cost = draws.int(2, 9);
            Question::simple(
                format!(
                    "Tickets cost £{cost} each. Write an expression for the total cost of n tickets."
                ),
                Answer::text(format!("{cost}n")),
            )
        }
        _ => {
            let pen = draws.int(2, 4);
            let pencil = draws.int(2, 3);
            Question::simple(
                format!(
                    "Pens cost £{pen} and pencils cost £{pencil}. Write an expression for the \
                     cost of x pens and y pencils."
                ),
                Answer::text(format!("{pen}x + {pencil}y")),
            )
        }
    }
}

/// One-rule machines; division rules only ever receive a multiple of the divisor.
pub(crate) fn function_machines(draws: &mut Draws<'_>) -> Question {
    let (rule, input, output) = match draws.index(4) {
        0 => {
            let (input, operand) = (draws.int(5, 19), draws.int(2, 11));
            (format!("+ {operand}"), input, input + operand)
        }
        1 => {
            let (input, operand) = (draws.int(5, 19), draws.int(2, 11));
            (format!("- {operand}"), input, input - operand)
        }
        2 => {
            let (input, operand) = (draws.int(5, 19), draws.int(2, 11));
            (format!("* {operand}"), input, input * operand)
        }
        _ => {
            let operand = draws.int(2, 5);
            let output = draws.int(2, 9);
            (format!("÷ {operand}"), output * operand, output)
        }
    };
    Question::simple(
        format!(
            "A function machine has the rule \"{rule}\". If the input is {input}, \
             what is the output?"
        ),
        Answer::int(output),
    )
}

pub(crate) fn one_step_equations(draws: &mut Draws<'_>) -> Question {
    let (equation, x) = match draws.index(4) {
        0 => {
            let (x, added) = (draws.int(3, 17), draws.int(2, 11));
            (format!("x + {added} = {}", x + added), x)
        }
        1 => {
            let (x, taken) = (draws.int(5, 24), draws.int(2, 9));
            (format!("x - {taken} = {}", x - taken), x)
        }
        2 => {
            let (x, multiplier) = (draws.int(2, 11), draws.int(2, 9));
            (format!("{multiplier}x = {}", x * multiplier), x)
        }
        _ => {
            let divisor = draws.int(2, 5);
            let quotient = draws.int(2, 6);
            (format!("x ÷ {divisor} = {quotient}"), quotient * divisor)
        }
    };
    Question::simple(format!("Solve: {equation}"), Answer::int(x))
}

pub(crate) fn substitution(draws: &mut Draws<'_>) -> Question {
    let x = draws.int(1, 10);
    let y = draws.int(1, 10);
    let a = draws.int(2, 6);
    let b = draws.int(1, 4);
    let expression = format!("{a}x{}", signed_var(b, "y"));
    Question::simple(
        format!("If x = {x} and y = {y}, find the value of {expression}"),
        Answer::int(a * x + b * y),
    )
}

pub(crate) fn solving_equations(draws: &mut Draws<'_>) -> Question {
    let x = draws.int(3, 14);
    let coefficient = draws.int(2, 5);
    let added = draws.int(3, 12);
    Question::simple(
        format!(
            "Solve: {coefficient}x + {added} = {}",
            coefficient * x + added
        ),
        Answer::int(x),
    )
}

pub(crate) fn drawing_linear_graphs(draws: &mut Draws<'_>) -> Question {
    let m = draws.int(1, 5);
    let c = draws.int(-4, 3);
    let x = draws.int(1, 5);
    Question::simple(
        format!(
            "The line y = {} passes through ({x}, y). Find y.",
            linear(m, c, "x")
        ),
        Answer::int(m * x + c),
    )
}

pub(crate) fn inequalities(draws: &mut Draws<'_>) -> Question {
    let x = draws.int(5, 19);
    let added = draws.int(3, 12);
    let sign = draws.pick_copy(&INEQUALITIES);
    Question::simple(
        format!("Solve: x + {added} {sign} {}", x + added),
        Answer::text(format!("x {sign} {x}")),
    )
}

pub(crate) fn forming_solving_equations(draws: &mut Draws<'_>) -> Question {
    let x = draws.int(5, 14);
    let coefficient = draws.int(2, 4);
    let first = draws.int(2, 9);
    let second = draws.int(1, 6);
    Question::simple(
        format!(
            "The sum of {coefficient}x + {first} and {second} is {}. Find x.",
            coefficient * x + first + second
        ),
        Answer::int(x),
    )
}

pub(crate) fn sequences_nth_term(draws: &mut Draws<'_>) -> Question {
    let first = draws.int(3, 12);
    let difference = draws.int(2, 6);
    let n = draws.int(3, 10);
    Question::simple(
        format!(
            "The nth term of a sequence is {}. Find the {} term.",
            linear(difference, first - difference, "n"),
            ordinal(n as u64)
        ),
        Answer::int(first + (n - 1) * difference),
    )
}

/// Expand one bracket, or factorise fully by taking out the highest common factor.
pub(crate) fn expanding_factorising(draws: &mut Draws<'_>) -> Question {
    if draws.coin() {
        let a = draws.int(2, 6);
        let b = draws.int(1, 8);
        let c = draws.int(1, 6);
        return Question::simple(
            format!("Expand: {a}({})", linear(b, c, "x")),
            Answer::text(linear(a * b, a * c, "x")),
        );
    }
    let factor = draws.int(2, 5);
    let first = factor * draws.int(2, 5);
    let second = factor * draws.int(1, 5);
    let hcf = gcd(first as u64, second as u64) as i64;
    Question::simple(
        format!("Factorise fully: {first}x + {second}"),
        Answer::text(format!(
            "{hcf}({})",
            linear(first / hcf, second / hcf, "x")
        )),
    )
}

pub(crate) fn changing_subject_formula(draws: &mut Draws<'_>) -> Question {
    let coefficient = draws.int(2, 6);
    let added = draws.int(3, 10);
    Question::simple(
        format!("Make x the subject of: y = {coefficient}x + {added}"),
        Answer::text(format!("x = (y - {added})/{coefficient}")),
    )
}

pub(crate) fn expanding_factorising_quadratics(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(2, 6);
    if draws.coin() {
        let b = draws.int(1, 6);
        Question::simple(
            format!("Expand: (x + {a})(x + {b})"),
            Answer::text(monic_quadratic(a + b, a * b)),
        )
    } else {
        let b = draws.int(1, 4);
        Question::simple(
            format!("Factorise: {}", monic_quadratic(a + b, a * b)),
            Answer::text(format!("(x + {a})(x + {b})")),
        )
    }
}

/// Each root is its own part, so the order the learner finds them in doesn't matter.
pub(crate) fn solving_quadratics(draws: &mut Draws<'_>) -> Question {
    let first = draws.int(1, 8);
    let second = draws.int(1, 6);
    let (smaller, larger) = (first.min(second), first.max(second));
    Question::multi_part(
        Some(format!(
            "Solve: {} = 0",
            monic_quadratic(-(first + second), first * second)
        )),
        vec![
            Part::new("What is the smaller solution?", Expected::int(smaller)),
            Part::new("What is the larger solution?", Expected::int(larger)),
        ],
    )
}

pub(crate) fn drawing_quadratic_graphs(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(1, 3);
    let x = draws.int(1, 5);
    let coefficient = if a == 1 { String::new() } else { a.to_string() };
    Question::simple(
        format!("For y = {coefficient}x^2, find y when x = {x}"),
        Answer::int(a * x * x),
    )
}

pub(crate) fn cubic_reciprocal_graphs(draws: &mut Draws<'_>) -> Question {
    if draws.coin() {
        let x = draws.int(1, 4);
        Question::simple(
            format!("For y = x^3, find y when x = {x}"),
            Answer::int(x.pow(3)),
        )
    } else {
        let x = draws.int(2, 9);
        Question::simple(
            format!("For y = 1/x, find y when x = {x}. Give your answer to 2 decimal places."),
            Answer::num(round2(1.0 / x as f64)),
        )
    }
}

/// Two equations with a unique integer solution, asked as an x part and a y part.
pub(crate) fn simultaneous_equations(draws: &mut Draws<'_>) -> Question {
    let x = draws.int(2, 9);
    let y = draws.int(1, 6);
    let (a1, b1, a2, b2) = draws.retry(
        "simultaneous equations are independent",
        |d| {
            let coefficients = (d.int(1, 3), d.int(1, 3), d.int(1, 3), d.int(1, 3));
            let (a1, b1, a2, b2) = coefficients;
            (a1 * b2 != a2 * b1).then_some(coefficients)
        },
        || (1, 1, 2, 1),
    );
    let equation = |a: i64, b: i64| {
        format!(
            "{}{} = {}",
            linear(a, 0, "x"),
            signed_var(b, "y"),
            a * x + b * y
        )
    };
    Question::multi_part(
        Some(format!(
            "Solve the simultaneous equations:\n{}\n{}",
            equation(a1, b1),
            equation(a2, b2)
        )),
        vec![
            Part::new("What is x?", Expected::int(x)),
            Part::new("What is y?", Expected::int(y)),
        ],
    )
}

pub(crate) fn simultaneous_equations_graphically(draws: &mut Draws<'_>) -> Question {
    let x = draws.int(1, 6);
    // y = 2x + 1 meets y = -x + k where 3x = k - 1
    let k = 3 * x + 1;
    Question::multi_part(
        Some(format!(
            "The lines y = 2x + 1 and y = -x + {k} intersect at a point."
        )),
        vec![
            Part::new("What is the x-coordinate of the intersection?", Expected::int(x)),
            Part::new(
                "What is the y-coordinate of the intersection?",
                Expected::int(2 * x + 1),
            ),
        ],
    )
}

pub(crate) fn expanding_triple_brackets(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(1, 3);
    let b = draws.int(1, 3);
    let c = draws.int(1, 3);
    Question::simple(
        format!("Expand: (x + {a})(x + {b})(x + {c})"),
        Answer::text(format!(
            "x^3 + {}x^2 + {}x + {}",
            a + b + c,
            a * b + b * c + a * c,
            a * b * c
        )),
    )
}

pub(crate) fn inequalities_graphs(draws: &mut Draws<'_>) -> Question {
    let m = draws.int(1, 4);
    let c = draws.int(-3, 2);
    let sign = draws.pick_copy(&INEQUALITIES);
    let side = if matches!(sign, ">" | "≥") {
        "above"
    } else {
        "below"
    };
    Question::simple(
        format!(
            "Is the region y {sign} {} above or below the line? Answer \"Region above the line\" \
             or \"Region below the line\".",
            linear(m, c, "x")
        ),
        Answer::text(format!("Region {side} the line")),
    )
}

/// Only equations with real roots are asked; roots are given to 2 decimal places.
pub(crate) fn quadratic_formula(draws: &mut Draws<'_>) -> Question {
    let (b, c) = draws.retry(
        "quadratic has real roots",
        |d| {
            let (b, c) = (d.int(-4, 3), d.int(-5, 4));
            (b * b - 4 * c >= 0).then_some((b, c))
        },
        || (5, 6),
    );
    let root = ((b * b - 4 * c) as f64).sqrt();
    let larger = round2((-(b as f64) + root) / 2.0);
    let smaller = round2((-(b as f64) - root) / 2.0);
    Question::multi_part(
        Some(format!(
            "Solve {} = 0 using the quadratic formula. Give your answers to 2 decimal places.",
            monic_quadratic(b, c)
        )),
        vec![
            Part::new("What is the larger solution?", Expected::num(larger)),
            Part::new("What is the smaller solution?", Expected::num(smaller)),
        ],
    )
}

pub(crate) fn factorising_harder_quadratics(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(2, 4);
    let p = draws.int(1, 4);
    let q = draws.int(1, 3);
    Question::simple(
        format!(
            "Factorise fully: {a}x^2 + {}x + {}",
            a * (p + q),
            a * p * q
        ),
        Answer::text(format!("{a}(x + {p})(x + {q})")),
    )
}

pub(crate) fn algebraic_fractions(draws: &mut Draws<'_>) -> Question {
    let numerator = draws.int(2, 7) as u32;
    let denominator = draws.int(2, 6) as u32;
    Question::simple(
        format!("Simplify: ({numerator}x)/({denominator}x)"),
        Answer::text(fraction_text(numerator, denominator)),
    )
}

pub(crate) fn rearranging_harder_formulae(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(2, 6);
    let b = draws.int(1, 4);
    Question::simple(
        format!("Make x the subject: y = {a}(x + {b})"),
        Answer::text(format!("x = y/{a} - {b}")),
    )
}

pub(crate) fn trig_exponential_graphs(draws: &mut Draws<'_>) -> Question {
    match draws.index(3) {
        0 => Question::simple(
            "For 0 ≤ x ≤ 180, at what angle does sin(x) = 1?",
            Answer::int(90),
        ),
        1 => Question::simple(
            "For 0 ≤ x ≤ 180, at what angle does cos(x) = 0?",
            Answer::int(90),
        ),
        _ => {
            let exponent = draws.int(1, 5);
            Question::simple(
                format!("For y = 2^x, find y when x = {exponent}"),
                Answer::int(2_i64.pow(exponent as u32)),
            )
        }
    }
}

pub(crate) fn inverse_composite_functions(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(2, 6);
    let b = draws.int(1, 8);
    if draws.coin() {
        Question::simple(
            format!("f(x) = {a}x + {b}. Find the inverse function f^-1(x)"),
            Answer::text(format!("(x - {b})/{a}")),
        )
    } else {
        let input = draws.int(1, 4);
        Question::simple(
            format!("f(x) = {a}x + {b} and g(x) = x^2. Find fg({input})"),
            Answer::int(a * input * input + b),
        )
    }
}

pub(crate) fn iteration(draws: &mut Draws<'_>) -> Question {
    let start = draws.int(2, 6);
    let x2 = (0..2).fold(start as f64, |x, _| (x + 2.0) / 2.0);
    Question::simple(
        format!(
            "Using the iteration formula x_(n+1) = (x_n + 2)/2 with x_0 = {start}, find x_2"
        ),
        Answer::num(round2(x2)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ChaChaSource, ScriptedSource};

    #[test]
    fn signed_quadratics() {
        assert_eq!(monic_quadratic(-7, 12), "x^2 - 7x + 12");
        assert_eq!(monic_quadratic(1, 0), "x^2 + x");
        assert_eq!(monic_quadratic(0, -5), "x^2 - 5");
    }

    #[test]
    fn division_machines_stay_whole() {
        let mut source = ChaChaSource::seeded(4);
        let mut draws = Draws::new(&mut source, 8);
        for _ in 0..200 {
            for q in [function_machines(&mut draws), one_step_equations(&mut draws)] {
                let answer = q.scalar_answer().and_then(Answer::as_number).unwrap();
                assert_eq!(answer.fract(), 0.0, "{}", q.prompt().unwrap());
            }
        }
    }

    #[test]
    fn factorising_takes_out_the_highest_common_factor() {
        // expand branch skipped, factor 2, first 2 * 4, second 2 * 2
        let mut source = ScriptedSource::new([0.1, 0.0, 0.5, 0.25]);
        let mut draws = Draws::new(&mut source, 4);
        let q = expanding_factorising(&mut draws);
        assert_eq!(q.prompt(), Some("Factorise fully: 8x + 4"));
        assert_eq!(q.scalar_answer(), Some(&Answer::text("4(2x + 1)")));
    }

    #[test]
    fn quadratic_solutions_are_parts() {
        // roots 3 and 4
        let mut source = ScriptedSource::new([0.25, 0.5]);
        let mut draws = Draws::new(&mut source, 4);
        let q = solving_quadratics(&mut draws);
        assert_eq!(q.prompt(), Some("Solve: x^2 - 7x + 12 = 0"));
        let parts = q.parts();
        assert_eq!(parts[0].answer, Some(Expected::int(3)));
        assert_eq!(parts[1].answer, Some(Expected::int(4)));
    }

    #[test]
    fn quadratic_formula_roots_satisfy_the_equation() {
        let mut source = ChaChaSource::seeded(9);
        let mut draws = Draws::new(&mut source, 32);
        for _ in 0..100 {
            let q = quadratic_formula(&mut draws);
            let parts = q.parts();
            assert_eq!(parts.len(), 2);
            let roots: Vec<f64> = parts
                .iter()
                .map(|p| match &p.answer {
                    Some(Expected::Value { value }) => value.as_number().unwrap(),
                    other => panic!("unexpected answer {other:?}"),
                })
                .collect();
            assert!(roots[0] >= roots[1]);
        }
    }

    #[test]
    fn simultaneous_solution_fits_both_lines() {
        let mut source = ChaChaSource::seeded(21);
        let mut draws = Draws::new(&mut source, 32);
        for _ in 0..50 {
            let q = simultaneous_equations_graphically(&mut draws);
            let prompt = q.prompt().unwrap().to_string();
            let k: i64 = prompt
                .split("-x + ")
                .nth(1)
                .and_then(|rest| rest.split_whitespace().next())
                .unwrap()
                .parse()
                .unwrap();
            let parts = q.parts();
            let Some(Expected::Value { value }) = &parts[0].answer else {
                unreachable!()
            };
            let x = value.as_number().unwrap() as i64;
            assert_eq!(2 * x + 1, -x + k);
        }
    }

    #[test]
    fn nth_term_uses_ordinals() {
        // first 3, difference 2, n = 3
        let mut source = ScriptedSource::new([0.0, 0.0, 0.0]);
        let mut draws = Draws::new(&mut source, 4);
        let q = sequences_nth_term(&mut draws);
        assert_eq!(
            q.prompt(),
            Some("The nth term of a sequence is 2n + 1. Find the 3rd term.")
        );
        assert_eq!(q.scalar_answer(), Some(&Answer::int(7)));
    }
}
