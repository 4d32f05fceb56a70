use crate::format::gcd;
use crate::model::{Answer, Fraction, Question};
use crate::random::Draws;

pub(crate) fn writing_simplifying_ratio(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(2, 9);
    let b = draws.int(2, 7);
    let multiplier = draws.int(2, 4);
    let g = gcd(a as u64, b as u64) as i64;
    Question::simple(
        format!(
            "Simplify the ratio {}:{} fully",
            a * multiplier,
            b * multiplier
        ),
        Answer::text(format!("{}:{}", a / g, b / g)),
    )
}

/// Sharing an amount in a ratio; the amount always splits into whole pounds.
pub(crate) fn ratio(draws: &mut Draws<'_>) -> Question {
    let first = draws.int(1, 4);
    let second = draws.int(1, 4);
    let parts = first + second;
    let per_part = draws.int(40 / parts, 99 / parts).max(1);
    let total = per_part * parts;
    Question::simple(
        format!(
            "Share £{total} in the ratio {first}:{second}. How much does the first person get?"
        ),
        Answer::int(per_part * first),
    )
}

pub(crate) fn proportion(draws: &mut Draws<'_>) -> Question {
    let items = draws.int(4, 11);
    let cost = draws.int(5, 19);
    let multiplier = draws.int(2, 4);
    Question::simple(
        format!(
            "If {items} pens cost £{cost}, how much do {} pens cost?",
            items * multiplier
        ),
        Answer::int(cost * multiplier),
    )
}

pub(crate) fn ratio_fraction_function(draws: &mut Draws<'_>) -> Question {
    if draws.coin() {
        let k = draws.int(2, 9);
        return Question::simple(
            format!(
                "The ratio y:x is {k}:1 for every pair of values. Write a formula for y in terms of x."
            ),
            Answer::text(format!("y = {k}x")),
        );
    }
    let red = draws.int(2, 6);
    let blue = draws.int(3, 6);
    let fraction = Fraction::new(red as u32, (red + blue) as u32).reduced();
    Question::simple(
        format!(
            "A bag holds red and blue counters in the ratio {red}:{blue}. \
             What fraction of the counters are red? Give your answer in its simplest form."
        ),
        Answer::from(fraction),
    )
}

pub(crate) fn direct_inverse_proportion(draws: &mut Draws<'_>) -> Question {
    if draws.chance(0.5) {
        let k = draws.int(2, 6);
        let x1 = draws.int(4, 11);
        let x2 = draws.int(5, 14);
        Question::simple(
            format!(
                "y is directly proportional to x. When x = {x1}, y = {}. Find y when x = {x2}.",
                k * x1
            ),
            Answer::int(k * x2),
        )
    } else {
        let x1 = draws.int(2, 6);
        let x2 = draws.int(2, 6);
        let k = x1 * x2 * draws.int(1, 4);
        Question::simple(
            format!(
                "y is inversely proportional to x. When x = {x1}, y = {}. Find y when x = {x2}.",
                k / x1
            ),
            Answer::int(k / x2),
        )
    }
}

pub(crate) fn direct_inverse_proportion_g7(draws: &mut Draws<'_>) -> Question {
    let k = draws.int(1, 5);
    let x1 = draws.int(2, 6);
    let x2 = draws.int(3, 8);
    let (power, label) = if draws.coin() { (3, "x^3") } else { (2, "x^2") };
    Question::simple(
        format!(
            "y is directly proportional to {label}. When x = {x1}, y = {}. Find y when x = {x2}.",
            k * x1.pow(power)
        ),
        Answer::int(k * x2.pow(power)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ChaChaSource, ScriptedSource};

    #[test]
    fn simplified_ratios_are_in_lowest_terms() {
        // a = 6, b = 4, multiplier 2
        let mut source = ScriptedSource::new([0.5, 0.4, 0.0]);
        let mut draws = Draws::new(&mut source, 4);
        let q = writing_simplifying_ratio(&mut draws);
        assert_eq!(q.prompt(), Some("Simplify the ratio 12:8 fully"));
        assert_eq!(q.scalar_answer(), Some(&Answer::text("3:2")));
    }

    #[test]
    fn shares_are_whole_pounds() {
        let mut source = ChaChaSource::seeded(12);
        let mut draws = Draws::new(&mut source, 4);
        for _ in 0..100 {
            let q = ratio(&mut draws);
            let share = q.scalar_answer().and_then(Answer::as_number).unwrap();
            assert_eq!(share.fract(), 0.0);
            assert!(share > 0.0);
        }
    }

    #[test]
    fn counter_fraction_is_reduced() {
        // red 4, blue 4 -> 1/2
        let mut source = ScriptedSource::new([0.1, 0.5, 0.3]);
        let mut draws = Draws::new(&mut source, 4);
        let q = ratio_fraction_function(&mut draws);
        assert_eq!(q.scalar_answer(), Some(&Answer::text("1/2")));
    }
}
