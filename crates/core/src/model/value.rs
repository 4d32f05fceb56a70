use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::{format_number, gcd};

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// An expected scalar answer: compared numerically or as normalized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Number(f64),
    Text(String),
}

impl Answer {
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::Number(value as f64)
    }

    #[must_use]
    pub fn num(value: f64) -> Self {
        Self::Number(value)
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Answer::Number(n) => Some(*n),
            Answer::Text(_) => None,
        }
    }

    /// Text answers are always finite; numbers must not be NaN or infinite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.as_number().is_none_or(f64::is_finite)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Number(n) => f.write_str(&format_number(*n)),
            Answer::Text(t) => f.write_str(t),
        }
    }
}

impl From<Fraction> for Answer {
    fn from(fraction: Fraction) -> Self {
        Self::Text(fraction.to_string())
    }
}

//
// ─── FRACTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    pub numerator: u32,
    pub denominator: u32,
}

impl Fraction {
    #[must_use]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Lowest terms via GCD. A zero denominator is left untouched.
    #[must_use]
    pub fn reduced(self) -> Self {
        let g = gcd(u64::from(self.numerator), u64::from(self.denominator));
        if g <= 1 {
            return self;
        }
        let g = g as u32;
        Self::new(self.numerator / g, self.denominator / g)
    }

    #[must_use]
    pub fn is_reduced(self) -> bool {
        gcd(u64::from(self.numerator), u64::from(self.denominator)) == 1
    }

    #[must_use]
    pub fn scaled(self, factor: u32) -> Self {
        Self::new(self.numerator * factor, self.denominator * factor)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }

    /// Exact comparison by cross-multiplication.
    #[must_use]
    pub fn cmp_value(self, other: Self) -> Ordering {
        let left = u64::from(self.numerator) * u64::from(other.denominator);
        let right = u64::from(other.numerator) * u64::from(self.denominator);
        left.cmp(&right)
    }

    #[must_use]
    pub fn same_value(self, other: Self) -> bool {
        self.cmp_value(other) == Ordering::Equal
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_to_lowest_terms() {
        let reduced = Fraction::new(8, 12).reduced();
        assert_eq!(reduced, Fraction::new(2, 3));
        assert!(reduced.is_reduced());
        assert_eq!(Fraction::new(5, 7).reduced(), Fraction::new(5, 7));
        assert_eq!(Fraction::new(0, 0).reduced(), Fraction::new(0, 0));
    }

    #[test]
    fn compares_exactly() {
        assert_eq!(
            Fraction::new(1, 3).cmp_value(Fraction::new(2, 6)),
            Ordering::Equal
        );
        assert_eq!(
            Fraction::new(2, 3).cmp_value(Fraction::new(3, 4)),
            Ordering::Less
        );
        assert!(Fraction::new(3, 4).same_value(Fraction::new(3, 4).scaled(5)));
    }

    #[test]
    fn answers_display_and_serialize_plainly() {
        assert_eq!(Answer::int(11).to_string(), "11");
        assert_eq!(Answer::num(0.5).to_string(), "0.5");
        assert_eq!(Answer::from(Fraction::new(2, 3)).to_string(), "2/3");
        assert_eq!(serde_json::to_string(&Answer::int(11)).unwrap(), "11.0");
        assert_eq!(
            serde_json::from_str::<Answer>("\"2/3\"").unwrap(),
            Answer::text("2/3")
        );
        assert!(!Answer::num(f64::INFINITY).is_finite());
        assert!(Answer::text("yes").is_finite());
    }
}
