//! Token cleaning for recognized text.

use std::sync::OnceLock;

use regex::Regex;

/// Punctuation kept inside tokens
const ALLOWED_PUNCTUATION: &[char] = &['\'', '’', '-', '.', ',', '!', '?', '(', ')', '/'];

/// Glyphs recognizers emit for list bullets
const BULLET_GLYPHS: &[char] = &['-', '–', '—', '•', '·', '●', '▪', '■', '►', '*', '>', '~'];

fn ordinal_prefix() -> &'static Regex {
    static ORDINAL: OnceLock<Regex> = OnceLock::new();
    ORDINAL.get_or_init(|| Regex::new(r"^\s*\d+\.").expect("ordinal pattern is valid"))
}

/// Remove a leading "12. " or "12.Word" style ordinal.
///
/// The dot must be followed by whitespace, a letter or the end of the text,
/// so decimals such as "1.5" are left alone.
pub fn strip_ordinal(raw: &str) -> &str {
    let Some(m) = ordinal_prefix().find(raw) else {
        return raw;
    };
    let rest = &raw[m.end()..];
    match rest.chars().next() {
        None => rest,
        Some(c) if c.is_whitespace() => rest.trim_start(),
        Some(c) if c.is_alphabetic() => rest,
        Some(_) => raw,
    }
}

fn is_kept(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(&c)
}

/// Normalize one side of a candidate pair.
///
/// Strips an ordinal prefix and leading bullet glyphs, drops anything that is
/// not a letter (any script), digit, whitespace or allowed punctuation, then
/// collapses whitespace. Apostrophes and hyphens inside words survive.
pub fn clean_token(raw: &str) -> String {
    let without_ordinal = strip_ordinal(raw);
    let without_bullets =
        without_ordinal.trim_start_matches(|c: char| BULLET_GLYPHS.contains(&c) || c.is_whitespace());

    let filtered: String = without_bullets.chars().filter(|&c| is_kept(c)).collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}
