//! Free-text matching for "what is wrong with this chart" answers.
//!
//! A learner's explanation is accepted when it is a close spelling of the
//! reference sentence, or when it passes a keyword check: it names the faulty
//! row and no other, every number it quotes is one the chart supports, and it
//! uses both a mismatch word and a word about the broken quantity.

use crate::model::{FaultExplanation, FaultKind};

const NUMBER_TOLERANCE: f64 = 0.01;

static MISMATCH_TERMS: &[&str] = &[
    "match",
    "wrong",
    "incorrect",
    "error",
    "differ",
    "different",
    "mismatch",
    "not",
    "doesnt",
    "dont",
    "cannot",
    "cant",
    "inconsistent",
    "isnt",
];

static FREQUENCY_TERMS: &[&str] = &[
    "frequency",
    "freq",
    "count",
    "number",
    "total",
    "amount",
    "tally",
    "tallies",
    "marks",
];

static SYMBOL_TERMS: &[&str] = &[
    "symbol",
    "symbols",
    "circle",
    "circles",
    "key",
    "represent",
    "pictogram",
    "half",
    "quarter",
    "fraction",
    "decimal",
    "sell",
    "sold",
];

/// Edit distance over chars.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// `1 - distance / longer length`, 1.0 for two empty strings.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

/// Lowercase, apostrophes dropped, whitespace collapsed.
fn canonical(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '\'' | '’'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn words(text: &str) -> Vec<String> {
    canonical(text)
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

/// Every decimal number in the text, e.g. `8`, `2.5`.
fn numbers(text: &str) -> Vec<f64> {
    let chars: Vec<char> = text.chars().collect();
    let mut found = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_digit() {
            i += 1;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        }
        let literal: String = chars[start..i].iter().collect();
        if let Ok(n) = literal.parse() {
            found.push(n);
        }
    }
    found
}

/// Edits allowed between two words; short words must match exactly.
fn allowed_distance(a: &str, b: &str, cap: usize) -> usize {
    match a.chars().count().min(b.chars().count()) {
        0..=3 => 0,
        4..=5 => 1.min(cap),
        _ => 2.min(cap),
    }
}

fn close(word: &str, term: &str, cap: usize) -> bool {
    levenshtein(word, term) <= allowed_distance(word, term, cap)
}

/// The row label a word spells, if any.
///
/// An exact match wins. Otherwise the closest label within the allowed distance
/// is taken, and a word equally close to two labels names neither.
fn row_named_by<'l>(word: &str, labels: &'l [String], cap: usize) -> Option<&'l String> {
    if let Some(exact) = labels.iter().find(|label| *label == word) {
        return Some(exact);
    }
    let mut best: Option<(usize, &String)> = None;
    let mut tied = false;
    for label in labels {
        let distance = levenshtein(word, label);
        if distance > allowed_distance(word, label, cap) {
            continue;
        }
        match best {
            Some((closest, _)) if distance > closest => {}
            Some((closest, _)) if distance == closest => tied = true,
            _ => {
                best = Some((distance, label));
                tied = false;
            }
        }
    }
    if tied { None } else { best.map(|(_, label)| label) }
}

/// Lowercased row labels mentioned in `text`, in order of appearance.
fn rows_named(fault: &FaultExplanation, text: &str, keyword_distance: usize) -> Vec<String> {
    let labels: Vec<String> = fault.row_labels.iter().map(|l| l.to_lowercase()).collect();
    words(text)
        .iter()
        .filter_map(|w| row_named_by(w, &labels, keyword_distance).cloned())
        .collect()
}

/// The keyword check on its own, without the whole-sentence similarity shortcut.
#[must_use]
pub fn semantic_match(fault: &FaultExplanation, text: &str, keyword_distance: usize) -> bool {
    let words = words(text);
    let faulty = fault.row.to_lowercase();

    let named = rows_named(fault, text, keyword_distance);
    let names_only_the_faulty_row = !named.is_empty() && named.iter().all(|l| *l == faulty);

    let numbers_supported = numbers(text).iter().all(|n| {
        fault
            .valid_numbers
            .iter()
            .any(|v| (n - v).abs() <= NUMBER_TOLERANCE)
    });

    let vocabulary = match fault.fault {
        FaultKind::Frequency => FREQUENCY_TERMS,
        FaultKind::Symbol => SYMBOL_TERMS,
    };
    let uses = |terms: &[&str]| {
        words
            .iter()
            .any(|w| terms.iter().any(|t| close(w, t, keyword_distance)))
    };

    names_only_the_faulty_row && numbers_supported && uses(MISMATCH_TERMS) && uses(vocabulary)
}

/// Rejects any text naming a row other than the faulty one, then tries
/// similarity, then the keyword check.
#[must_use]
pub fn explains(
    fault: &FaultExplanation,
    text: &str,
    fuzzy_threshold: f64,
    keyword_distance: usize,
) -> bool {
    let faulty = fault.row.to_lowercase();
    // A near-copy of the reference that swaps in another row is still wrong.
    if rows_named(fault, text, keyword_distance)
        .iter()
        .any(|row| *row != faulty)
    {
        return false;
    }
    if similarity(&canonical(text), &canonical(&fault.text)) >= fuzzy_threshold {
        return true;
    }
    semantic_match(fault, text, keyword_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days() -> Vec<String> {
        ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
            .iter()
            .map(|d| (*d).to_string())
            .collect()
    }

    fn frequency_fault() -> FaultExplanation {
        FaultExplanation {
            text: "Row Wednesday frequency does not match tally".into(),
            row: "Wednesday".into(),
            fault: FaultKind::Frequency,
            valid_numbers: vec![9.0, 8.0],
            row_labels: days(),
        }
    }

    fn fault_on(day: &str) -> FaultExplanation {
        FaultExplanation {
            text: format!("Row {day} frequency does not match tally"),
            row: day.into(),
            ..frequency_fault()
        }
    }

    fn symbol_fault() -> FaultExplanation {
        FaultExplanation {
            text: "Row Monday symbols do not match the key".into(),
            row: "Monday".into(),
            fault: FaultKind::Symbol,
            valid_numbers: vec![4.5, 13.5, 0.5, 1.5, 3.0, 11.0],
            row_labels: days(),
        }
    }

    #[test]
    fn edit_distance() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("tally", "tally"), 0);
        assert!((similarity("abcd", "abce") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn accepts_close_spellings_of_the_reference() {
        let fault = frequency_fault();
        assert!(explains(
            &fault,
            "row wednesday frequency does not match the tally",
            0.85,
            2
        ));
    }

    #[test]
    fn accepts_paraphrases_naming_the_row_and_fault() {
        let fault = frequency_fault();
        for text in [
            "Wednesday frequency doesn't match the tally",
            "On wendesday the tally is 9 but the frequency is wrong, it says 8",
            "wednesday's count is wrong",
        ] {
            assert!(explains(&fault, text, 0.85, 2), "{text}");
        }

        let thursday = fault_on("Thursday");
        for text in [
            "Thursday frequency doesn't match the tally",
            "Row Thursday frequency does not match tally",
            "thursdy count is wrong",
        ] {
            assert!(explains(&thursday, text, 0.85, 2), "{text}");
        }
    }

    #[test]
    fn rejects_wrong_rows_numbers_and_vague_answers() {
        let fault = frequency_fault();
        for text in [
            "Tuesday is wrong",
            "Wednesday and Friday frequencies do not match",
            "Wednesday frequency should be 12, it is wrong",
            "Wednesday frequency",
            "something is wrong",
        ] {
            assert!(!explains(&fault, text, 0.85, 2), "{text}");
        }

        let tuesday = fault_on("Tuesday");
        for text in [
            "Thursday frequency doesn't match the tally",
            "Row Thursday frequency does not match tally",
        ] {
            assert!(!explains(&tuesday, text, 0.85, 2), "{text}");
        }
        assert!(!explains(&fault_on("Thursday"), "Tuesday frequency is wrong", 0.85, 2));
    }

    #[test]
    fn similar_day_names_resolve_to_the_closest_label() {
        let labels: Vec<String> = days().iter().map(|d| d.to_lowercase()).collect();
        assert_eq!(row_named_by("thursday", &labels, 2).map(String::as_str), Some("thursday"));
        assert_eq!(row_named_by("tuesday", &labels, 2).map(String::as_str), Some("tuesday"));
        assert_eq!(row_named_by("thursdy", &labels, 2).map(String::as_str), Some("thursday"));
        assert_eq!(row_named_by("tusday", &labels, 2).map(String::as_str), Some("tuesday"));
        assert_eq!(row_named_by("tally", &labels, 2), None);
    }

    #[test]
    fn a_word_equally_close_to_two_rows_names_neither() {
        let labels = vec!["north".to_string(), "south".to_string()];
        assert_eq!(row_named_by("nouth", &labels, 2), None);
        assert_eq!(row_named_by("south", &labels, 2).map(String::as_str), Some("south"));
    }

    #[test]
    fn symbol_faults_use_their_own_vocabulary() {
        let fault = symbol_fault();
        assert!(explains(&fault, "Monday has 4.5 circles which doesn't fit the key", 0.85, 2));
        assert!(!explains(&fault, "Monday frequency does not match tally", 0.85, 2));
    }

    #[test]
    fn lowering_the_threshold_never_rejects_more() {
        let fault = frequency_fault();
        let texts = [
            "Row Wednesday frequency does not match tally",
            "row wednsday frequncy does not mach tally",
            "wednesday tally wrong",
            "friday",
        ];
        for text in texts {
            let mut accepted_before = false;
            for step in (1..=20).rev() {
                let threshold = f64::from(step) / 20.0;
                let accepted = explains(&fault, text, threshold, 2);
                assert!(!accepted_before || accepted, "{text} at {threshold}");
                accepted_before = accepted;
            }
        }
    }

    #[test]
    fn numbers_include_decimals() {
        assert_eq!(numbers("row 3 has 2.5 symbols, not 3."), vec![3.0, 2.5, 3.0]);
    }
}
