//! Header detection: column labels and short title lines are dropped before
//! parsing.

use super::clean::strip_ordinal;

/// Lines shorter than this (after the ordinal prefix) count as titles
const SHORT_LINE_CHARS: usize = 15;

/// Column-label words, lowercase
const HEADER_WORDS: &[&str] = &[
    // nl
    "woord", "woorden", "betekenis", "vertaling", "nederlands", "frans", "engels", "duits",
    // fr
    "mot", "mots", "traduction", "signification", "français", "francais", "néerlandais",
    // en
    "word", "words", "term", "terms", "meaning", "translation", "definition", "english",
    "dutch", "french", "german", "vocabulary",
    // de
    "wort", "wörter", "bedeutung", "übersetzung", "deutsch",
    // es
    "palabra", "significado", "traducción", "español",
];

fn has_dash_or_equals(line: &str) -> bool {
    line.chars().any(|c| matches!(c, '-' | '–' | '—' | '='))
}

fn is_header_word(token: &str) -> bool {
    HEADER_WORDS.contains(&token)
}

/// Whether a line is a title or column header rather than a word pair.
///
/// Either it is short with no dash/equals separator, or its first or last
/// standalone word is a column label ("Woord", "Translation", ...).
pub fn is_likely_header(line: &str) -> bool {
    let body = strip_ordinal(line.trim());
    if body.chars().count() < SHORT_LINE_CHARS && !has_dash_or_equals(body) {
        return true;
    }

    let lowered = body.to_lowercase();
    let mut tokens = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty());

    let Some(first) = tokens.next() else {
        return false;
    };
    let last = tokens.last().unwrap_or(first);
    is_header_word(first) || is_header_word(last)
}
