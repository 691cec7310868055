//! Confidence scoring for candidate pairs.
//!
//! Each heuristic is a guarded multiplier; the score is the product of every
//! multiplier whose guard fires on either side of the pair.

struct ConfidenceCheck {
    factor: f64,
    fires: fn(&str) -> bool,
}

const CHECKS: &[ConfidenceCheck] = &[
    ConfidenceCheck {
        factor: 0.5,
        fires: is_too_short,
    },
    ConfidenceCheck {
        factor: 0.7,
        fires: has_digit,
    },
    ConfidenceCheck {
        factor: 0.8,
        fires: has_foreign_char,
    },
];

fn is_too_short(token: &str) -> bool {
    token.chars().count() < 2
}

fn has_digit(token: &str) -> bool {
    token.chars().any(|c| c.is_numeric())
}

/// ASCII letters, Latin-1 letters and Latin Extended-A
fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || (('\u{C0}'..='\u{FF}').contains(&c) && c != '×' && c != '÷')
        || ('\u{100}'..='\u{17F}').contains(&c)
}

fn has_foreign_char(token: &str) -> bool {
    token
        .chars()
        .any(|c| !(is_latin_letter(c) || c.is_whitespace() || matches!(c, '\'' | '’' | '-')))
}

/// Score a term/definition pair in [0, 1].
pub fn confidence(term: &str, definition: &str) -> f64 {
    CHECKS
        .iter()
        .filter(|check| (check.fires)(term) || (check.fires)(definition))
        .fold(1.0, |score, check| score * check.factor)
        .clamp(0.0, 1.0)
}
