//! Word-Pair Extraction
//!
//! Turns noisy recognized text into term/definition candidates with
//! confidence scores. Best-effort and total: a line that resists every
//! strategy is reported back as data, never as an error.
//!
//! Pipeline per line:
//! 1. trim, skip empty lines
//! 2. drop headers ([`is_likely_header`])
//! 3. ordered separator rules, then the table-column fallback
//! 4. report leftovers longer than two characters as unparsed

mod clean;
mod confidence;
mod header;
mod separators;

pub use clean::{clean_token, strip_ordinal};
pub use confidence::confidence;
pub use header::is_likely_header;
pub use separators::{ParseStrategy, SeparatorKind};

use rayon::prelude::*;

use crate::types::{CandidatePair, ExtractionResult, MIN_UNPARSED_LEN, TABLE_CONFIDENCE};

/// Parse one line into a candidate pair, if any strategy applies.
pub fn parse_line(line: &str) -> Option<CandidatePair> {
    parse_line_with_strategy(line).map(|(pair, _)| pair)
}

/// Like [`parse_line`], also reporting which strategy matched.
pub fn parse_line_with_strategy(line: &str) -> Option<(CandidatePair, ParseStrategy)> {
    if let Some((term, definition, kind)) = separators::split_by_separator(line) {
        let confidence = confidence(&term, &definition);
        return Some((
            CandidatePair {
                term,
                definition,
                confidence,
            },
            ParseStrategy::Separator(kind),
        ));
    }

    separators::split_table_columns(line).map(|(term, definition)| {
        (
            CandidatePair {
                term,
                definition,
                confidence: TABLE_CONFIDENCE,
            },
            ParseStrategy::TableColumns,
        )
    })
}

/// Extract every pair from one block of recognized text.
pub fn extract(raw_text: &str) -> ExtractionResult {
    let mut result = ExtractionResult::default();

    for line in raw_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_likely_header(line) {
            continue;
        }
        match parse_line(line) {
            Some(pair) => result.pairs.push(pair),
            None if line.chars().count() > MIN_UNPARSED_LEN => {
                result.unparsed_lines.push(line.to_string())
            }
            None => {}
        }
    }

    result
}

/// Extract several recognized pages in parallel; output keeps page order.
pub fn extract_pages<S>(pages: &[S]) -> ExtractionResult
where
    S: AsRef<str> + Sync,
{
    pages
        .par_iter()
        .map(|page| extract(page.as_ref()))
        .collect::<Vec<_>>()
        .into_iter()
        .fold(ExtractionResult::default(), |mut acc, page| {
            acc.merge(page);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_clean_pairs() {
        let result = extract("Hond - Chien\nKat - Chat");
        assert_eq!(
            result.pairs,
            vec![
                CandidatePair {
                    term: "Hond".into(),
                    definition: "Chien".into(),
                    confidence: 1.0,
                },
                CandidatePair {
                    term: "Kat".into(),
                    definition: "Chat".into(),
                    confidence: 1.0,
                },
            ]
        );
        assert!(result.unparsed_lines.is_empty());
    }

    #[test]
    fn test_header_dropped() {
        let result = extract("Woord\nHond - Chien");
        assert_eq!(result.pairs.len(), 1);
        assert_eq!(result.pairs[0].term, "Hond");
        assert!(result.unparsed_lines.is_empty());
    }

    #[test]
    fn test_digits_lower_confidence() {
        let result = extract("asdf1 - asdf2");
        assert_eq!(result.pairs.len(), 1);
        assert!(result.pairs[0].confidence <= 0.7);
    }

    #[test]
    fn test_unparsed_line() {
        let result = extract("xyzxyzxyzxyzxyz");
        assert!(result.pairs.is_empty());
        assert_eq!(result.unparsed_lines, vec!["xyzxyzxyzxyzxyz".to_string()]);
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let result = extract("\r\n  Hond - Chien  \r\n\r\n\tKat - Chat\r\n");
        assert_eq!(result.pairs.len(), 2);
        assert_eq!(result.pairs[1].definition, "Chat");
    }

    #[test]
    fn test_mixed_page_keeps_order() {
        let text = "\
Les 3 - Dieren
Nederlands | Français
1. de hond - le chien
2. de kat = le chat
de vogel: l'oiseau
@@ ### $$$ %%% &&&&
de vis\tle poisson";
        let result = extract(text);
        let terms: Vec<&str> = result.pairs.iter().map(|p| p.term.as_str()).collect();
        assert_eq!(terms, vec!["Les 3", "de hond", "de kat", "de vogel", "de vis"]);
        assert_eq!(result.pairs[3].definition, "l'oiseau");
        assert_eq!(result.unparsed_lines, vec!["@@ ### $$$ %%% &&&&".to_string()]);
    }

    #[test]
    fn test_short_noise_not_reported() {
        // dash lines pass the header check, fail to parse, and are too short
        let result = extract("--\n=\n-");
        assert!(result.pairs.is_empty());
        assert!(result.unparsed_lines.is_empty());
    }

    #[test]
    fn test_strategy_reported() {
        let (_, strategy) = parse_line_with_strategy("Hond - Chien").unwrap();
        assert_eq!(strategy, ParseStrategy::Separator(SeparatorKind::SpacedDash));
        assert!(parse_line_with_strategy("nothing to split here").is_none());
    }

    #[test]
    fn test_wide_gap_takes_two_column_lines() {
        let (pair, strategy) = parse_line_with_strategy("de kat    le chat").unwrap();
        assert_eq!(strategy, ParseStrategy::Separator(SeparatorKind::WideGap));
        assert_eq!(pair.confidence, 1.0);
    }

    #[test]
    fn test_table_fallback_when_gap_parts_clean_away() {
        // the bullet and the bare ordinal each clean to nothing on their own
        let (pair, strategy) = parse_line_with_strategy("•   7.    zeven").unwrap();
        assert_eq!(strategy, ParseStrategy::TableColumns);
        assert_eq!(pair.term, "7.");
        assert_eq!(pair.definition, "zeven");
        assert_eq!(pair.confidence, TABLE_CONFIDENCE);
    }

    #[test]
    fn test_decimal_terms_survive() {
        let result = extract("1.5 - anderhalf\n2.5 kg - twee en een halve kilo\n3. 0.5 - half");
        let terms: Vec<&str> = result.pairs.iter().map(|p| p.term.as_str()).collect();
        assert_eq!(terms, vec!["1.5", "2.5 kg", "0.5"]);
    }

    #[test]
    fn test_idempotent() {
        let text = "Woord\nHond - Chien\nasdf1 - asdf2\nxyzxyzxyzxyzxyz";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn test_extract_pages_in_order() {
        let pages = vec![
            "Hond - Chien\nxyzxyzxyzxyzxyz".to_string(),
            "Kat - Chat".to_string(),
            String::new(),
            "Vis - Poisson\nqwertyqwertyqwerty".to_string(),
        ];
        let result = extract_pages(&pages);
        let terms: Vec<&str> = result.pairs.iter().map(|p| p.term.as_str()).collect();
        assert_eq!(terms, vec!["Hond", "Kat", "Vis"]);
        assert_eq!(
            result.unparsed_lines,
            vec!["xyzxyzxyzxyzxyz".to_string(), "qwertyqwertyqwerty".to_string()]
        );
    }

    #[test]
    fn test_extract_pages_empty() {
        let pages: Vec<&str> = Vec::new();
        assert!(extract_pages(&pages).is_empty());
    }
}
