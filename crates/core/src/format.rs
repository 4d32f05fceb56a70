//! Number and text helpers shared by the generator and the grader.

/// Greatest common divisor. `gcd(0, 0)` is `0`.
#[must_use]
pub fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple. Zero when either side is zero.
#[must_use]
pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    a / gcd(a, b) * b
}

/// Rounds to `dp` decimal places.
#[must_use]
pub fn round_to(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

#[must_use]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Shortest display for a finite number: `11`, `0.25`, `-3.5`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{value}")
}

/// Money with two decimals, as printed on price lists.
#[must_use]
pub fn format_money(value: f64) -> String {
    format!("{value:.2}")
}

/// Minutes past midnight as `H:MM`.
#[must_use]
pub fn clock_time(total_minutes: i64) -> String {
    let total = total_minutes.rem_euclid(24 * 60);
    format!("{}:{:02}", total / 60, total % 60)
}

/// `a`, `a and b`, `a, b and c`.
#[must_use]
pub fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    match names {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, `11th`, `22nd`.
#[must_use]
pub fn ordinal(n: u64) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// A trailing signed term: ` + 3`, ` - 3`, or nothing for zero.
#[must_use]
pub fn signed_term(value: i64) -> String {
    match value {
        0 => String::new(),
        v if v > 0 => format!(" + {v}"),
        v => format!(" - {}", -v),
    }
}

/// `mx + c` with the sign of `c` folded in: `3x - 2`, `x + 4`, `-x`.
#[must_use]
pub fn linear(m: i64, c: i64, var: &str) -> String {
    let lead = match m {
        0 => return format_number(c as f64),
        1 => var.to_string(),
        -1 => format!("-{var}"),
        m => format!("{m}{var}"),
    };
    format!("{lead}{}", signed_term(c))
}

/// Prime factors in ascending order, with repeats.
#[must_use]
pub fn prime_factors(n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut n = n;
    let mut p = 2;
    while n > 1 && p * p <= n {
        while n % p == 0 {
            factors.push(p);
            n /= p;
        }
        p += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

//
// ─── SUPERSCRIPTS ──────────────────────────────────────────────────────────────
//

const SUPERSCRIPTS: [(char, char); 11] = [
    ('0', '⁰'),
    ('1', '¹'),
    ('2', '²'),
    ('3', '³'),
    ('4', '⁴'),
    ('5', '⁵'),
    ('6', '⁶'),
    ('7', '⁷'),
    ('8', '⁸'),
    ('9', '⁹'),
    ('-', '⁻'),
];

fn to_superscript(c: char) -> Option<char> {
    SUPERSCRIPTS.iter().find(|(plain, _)| *plain == c).map(|(_, sup)| *sup)
}

fn from_superscript(c: char) -> Option<char> {
    SUPERSCRIPTS.iter().find(|(_, sup)| *sup == c).map(|(plain, _)| *plain)
}

/// Display form of a prompt or answer: `5^3` becomes `5³` and `*` becomes `×`.
///
/// Only `^` followed by an optional minus and at least one digit is rewritten.
#[must_use]
pub fn render_math(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '^' {
            let start = i + 1;
            let mut end = start;
            if chars.get(end) == Some(&'-') {
                end += 1;
            }
            let digits_from = end;
            while chars.get(end).is_some_and(char::is_ascii_digit) {
                end += 1;
            }
            if end > digits_from {
                out.extend(chars[start..end].iter().filter_map(|&d| to_superscript(d)));
                i = end;
                continue;
            }
        }
        out.push(if c == '*' { '×' } else { c });
        i += 1;
    }
    out
}

/// Comparison form of an answer: whitespace removed, lowercased, superscripts
/// folded back to caret form and `×`, `−`, `≥`, `≤` mapped to ASCII.
#[must_use]
pub fn normalize_answer(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_exponent = false;
    for c in text.chars().filter(|c| !c.is_whitespace()) {
        if let Some(plain) = from_superscript(c) {
            if !in_exponent {
                out.push('^');
                in_exponent = true;
            }
            out.push(plain);
            continue;
        }
        in_exponent = false;
        match c {
            '×' => out.push('*'),
            '−' => out.push('-'),
            '≥' => out.push_str(">="),
            '≤' => out.push_str("<="),
            other => out.extend(other.to_lowercase()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_and_lcm() {
        assert_eq!(gcd(8, 12), 4);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(0, 6), 0);
    }

    #[test]
    fn numbers_display_without_trailing_zero() {
        assert_eq!(format_number(11.0), "11");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-3.5), "-3.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_money(7.5), "7.50");
    }

    #[test]
    fn rounding() {
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round_to(2.0 / 3.0, 1), 0.7);
        assert_eq!(round2(12.0), 12.0);
    }

    #[test]
    fn clock_time_wraps_and_pads() {
        assert_eq!(clock_time(9 * 60 + 5), "9:05");
        assert_eq!(clock_time(24 * 60 + 30), "0:30");
    }

    #[test]
    fn joins_names_with_and() {
        assert_eq!(join_names::<&str>(&[]), "");
        assert_eq!(join_names(&["Monday"]), "Monday");
        assert_eq!(join_names(&["Monday", "Tuesday"]), "Monday and Tuesday");
        assert_eq!(join_names(&["a", "b", "c"]), "a, b and c");
    }

    #[test]
    fn ordinals_and_signed_terms() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(23), "23rd");
        assert_eq!(signed_term(-4), " - 4");
        assert_eq!(signed_term(0), "");
        assert_eq!(linear(3, -2, "x"), "3x - 2");
        assert_eq!(linear(1, 4, "x"), "x + 4");
        assert_eq!(linear(-1, 0, "x"), "-x");
    }

    #[test]
    fn prime_factorisation() {
        assert_eq!(prime_factors(12), vec![2, 2, 3]);
        assert_eq!(prime_factors(42), vec![2, 3, 7]);
        assert_eq!(prime_factors(13), vec![13]);
        assert!(prime_factors(1).is_empty());
    }

    #[test]
    fn renders_superscripts_and_times() {
        assert_eq!(render_math("5^3 = ?"), "5³ = ?");
        assert_eq!(render_math("2^-12"), "2⁻¹²");
        assert_eq!(render_math("3 * 4"), "3 × 4");
        assert_eq!(render_math("9^(1/2)"), "9^(1/2)");
        assert_eq!(render_math("x^"), "x^");
    }

    #[test]
    fn normalization_folds_display_forms() {
        assert_eq!(normalize_answer(" 2 / 3 "), "2/3");
        assert_eq!(normalize_answer("Pack A"), "packa");
        assert_eq!(normalize_answer("5⁷"), "5^7");
        assert_eq!(normalize_answer("x² + 3x"), "x^2+3x");
        assert_eq!(normalize_answer("2×2×3"), "2*2*3");
        assert_eq!(normalize_answer(&render_math("2^-3")), "2^-3");
        assert_eq!(normalize_answer("x ≥ 4"), normalize_answer("x >= 4"));
    }
}
