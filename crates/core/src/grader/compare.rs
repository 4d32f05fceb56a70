use crate::format::{format_number, normalize_answer, render_math};
use crate::model::Answer;

/// Verdict and learner-facing message for one typed answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Verdict {
    pub ok: bool,
    pub message: String,
}

impl Verdict {
    pub(crate) fn correct(given: &str) -> Self {
        Self {
            ok: true,
            message: format!("Correct! You answered {given}"),
        }
    }

    pub(crate) fn wrong(given: &str, expected: &str) -> Self {
        Self {
            ok: false,
            message: format!("You answered {given} but the correct answer is {expected}"),
        }
    }

    pub(crate) fn missing(expected: &str) -> Self {
        Self {
            ok: false,
            message: format!("You didn't provide an answer. The correct answer is {expected}"),
        }
    }

    pub(crate) fn not_a_number(expected: &str) -> Self {
        Self {
            ok: false,
            message: format!("Please enter a number. The correct answer is {expected}"),
        }
    }
}

/// How an expected answer is shown back to the learner.
pub(crate) fn display(answer: &Answer) -> String {
    match answer {
        Answer::Number(n) => format_number(*n),
        Answer::Text(t) => render_math(t),
    }
}

/// A finite number typed as a decimal or as `n/d`.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim().replace('−', "-");
    let value = match raw.split_once('/') {
        Some((n, d)) => {
            let n: f64 = n.trim().parse().ok()?;
            let d: f64 = d.trim().parse().ok()?;
            if d == 0.0 {
                return None;
            }
            n / d
        }
        None => raw.parse().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Numeric answers within `epsilon`, text answers equal after normalization.
pub(crate) fn compare_value(expected: &Answer, raw: &str, epsilon: f64) -> Verdict {
    let given = raw.trim();
    let shown = display(expected);
    if given.is_empty() {
        return Verdict::missing(&shown);
    }
    match expected {
        Answer::Number(e) => match parse_number(given) {
            None => Verdict::not_a_number(&shown),
            Some(v) if (v - e).abs() < epsilon => Verdict::correct(given),
            Some(_) => Verdict::wrong(given, &shown),
        },
        Answer::Text(e) => {
            if normalize_answer(given) == normalize_answer(e) {
                Verdict::correct(given)
            } else {
                Verdict::wrong(given, &shown)
            }
        }
    }
}

/// Accepts `x,y` and `(x, y)`.
pub(crate) fn parse_point(raw: &str) -> Option<(f64, f64)> {
    let inner = raw
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')');
    let (x, y) = inner.split_once(',')?;
    Some((parse_number(x)?, parse_number(y)?))
}

pub(crate) fn compare_point(x: f64, y: f64, raw: &str, epsilon: f64) -> Verdict {
    let given = raw.trim();
    let shown = format!("({}, {})", format_number(x), format_number(y));
    if given.is_empty() {
        return Verdict::missing(&shown);
    }
    match parse_point(given) {
        None => Verdict {
            ok: false,
            message: format!("Please enter coordinates as x,y. The correct answer is {shown}"),
        },
        Some((px, py)) if (px - x).abs() < epsilon && (py - y).abs() < epsilon => {
            Verdict::correct(given)
        }
        Some(_) => Verdict::wrong(given, &shown),
    }
}
