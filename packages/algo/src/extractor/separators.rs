//! Ordered separator rules and the table-column fallback.
//!
//! Rules are tried in declaration order and the first one that yields two
//! non-empty cleaned parts wins.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::clean::clean_token;

/// Separator patterns, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorKind {
    /// `hond - chien`, also en/em dashes
    SpacedDash,
    /// `hond-chien`
    Dash,
    Equals,
    Colon,
    Pipe,
    TabRun,
    /// three or more whitespace characters
    WideGap,
}

impl SeparatorKind {
    pub const ORDER: [SeparatorKind; 7] = [
        SeparatorKind::SpacedDash,
        SeparatorKind::Dash,
        SeparatorKind::Equals,
        SeparatorKind::Colon,
        SeparatorKind::Pipe,
        SeparatorKind::TabRun,
        SeparatorKind::WideGap,
    ];

    fn pattern(&self) -> &'static str {
        match self {
            SeparatorKind::SpacedDash => r"\s+[-–—]\s+",
            SeparatorKind::Dash => r"[-–—]",
            SeparatorKind::Equals => r"\s*=\s*",
            SeparatorKind::Colon => r"\s*:\s*",
            SeparatorKind::Pipe => r"\s*\|\s*",
            SeparatorKind::TabRun => r"\t+",
            SeparatorKind::WideGap => r"\s{3,}",
        }
    }
}

/// How a line was turned into a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStrategy {
    Separator(SeparatorKind),
    TableColumns,
}

struct SeparatorRule {
    kind: SeparatorKind,
    pattern: Regex,
}

fn rules() -> &'static [SeparatorRule] {
    static RULES: OnceLock<Vec<SeparatorRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        SeparatorKind::ORDER
            .iter()
            .map(|&kind| SeparatorRule {
                kind,
                pattern: Regex::new(kind.pattern()).expect("separator pattern is valid"),
            })
            .collect()
    })
}

fn table_pattern() -> &'static Regex {
    static TABLE: OnceLock<Regex> = OnceLock::new();
    TABLE.get_or_init(|| Regex::new(r"^(.{2,30})\s{4,}(.{2,})$").expect("table pattern is valid"))
}

/// Split `line` with the first separator rule that produces a term and a
/// definition. The definition is every remaining part joined by spaces.
pub fn split_by_separator(line: &str) -> Option<(String, String, SeparatorKind)> {
    rules().iter().find_map(|rule| {
        let mut parts = rule
            .pattern
            .split(line)
            .map(clean_token)
            .filter(|part| !part.is_empty());

        let term = parts.next()?;
        let rest: Vec<String> = parts.collect();
        if rest.is_empty() {
            return None;
        }
        Some((term, rest.join(" "), rule.kind))
    })
}

/// Two fixed-width columns: 2-30 chars, a gap of four or more spaces, then at
/// least 2 chars.
pub fn split_table_columns(line: &str) -> Option<(String, String)> {
    let caps = table_pattern().captures(line)?;
    let term = clean_token(caps.get(1)?.as_str());
    let definition = clean_token(caps.get(2)?.as_str());
    if term.is_empty() || definition.is_empty() {
        return None;
    }
    Some((term, definition))
}
