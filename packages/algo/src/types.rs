//! Common Types and Constants
//!
//! Shared data structures used by the scheduler and the extractor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Ease factor assigned to a freshly created item
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Floor for the ease factor, never violated
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Lowest quality score that counts as "remembered"
pub const PASSING_QUALITY: u8 = 3;

/// Interval after a lapse or a first successful review (days)
pub const FIRST_INTERVAL_DAYS: i64 = 1;

/// Interval after the second consecutive successful review (days)
pub const SECOND_INTERVAL_DAYS: i64 = 6;

/// Confidence assigned to pairs recovered by the table-column fallback
pub const TABLE_CONFIDENCE: f64 = 0.7;

/// Pairs below this confidence should be flagged for human review
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Unparsed lines must be longer than this (in chars) to be reported
pub const MIN_UNPARSED_LEN: usize = 2;

// ==================== Scheduler Types ====================

/// Rating given by the user after seeing the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRating {
    Again,
    Hard,
    Good,
    Easy,
}

impl UserRating {
    /// All ratings, worst to best
    pub const ALL: [UserRating; 4] = [
        UserRating::Again,
        UserRating::Hard,
        UserRating::Good,
        UserRating::Easy,
    ];

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "again" => Some(UserRating::Again),
            "hard" => Some(UserRating::Hard),
            "good" => Some(UserRating::Good),
            "easy" => Some(UserRating::Easy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRating::Again => "again",
            UserRating::Hard => "hard",
            UserRating::Good => "good",
            UserRating::Easy => "easy",
        }
    }

    /// SM-2 quality score for this rating.
    ///
    /// Coarse four-level mapping onto the classical 0-5 scale. Ease updates
    /// are sensitive to these exact values.
    pub fn quality(&self) -> u8 {
        match self {
            UserRating::Again => 0,
            UserRating::Hard => 2,
            UserRating::Good => 4,
            UserRating::Easy => 5,
        }
    }

    pub fn is_passing(&self) -> bool {
        self.quality() >= PASSING_QUALITY
    }
}

impl std::fmt::Display for UserRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spaced-repetition memory state of one item
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    /// Interval growth multiplier, >= 1.3
    pub ease_factor: f64,
    /// Days until the next review
    pub interval_days: i64,
    /// Consecutive successful reviews since the last lapse
    pub repetitions: u32,
    pub next_review_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub times_correct: u32,
    pub times_incorrect: u32,
}

impl ReviewState {
    pub fn total_reviews(&self) -> u64 {
        u64::from(self.times_correct) + u64::from(self.times_incorrect)
    }

    pub fn is_new(&self) -> bool {
        self.last_reviewed_at.is_none()
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }
}

/// A term/definition pair under spaced repetition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningItem {
    pub term: String,
    pub definition: String,
    #[serde(flatten)]
    pub review: ReviewState,
}

impl LearningItem {
    /// New item in the default state, due immediately
    pub fn new(term: impl Into<String>, definition: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
            review: crate::scheduler::default_state(now),
        }
    }
}

// ==================== Extractor Types ====================

/// Tentative term/definition extraction awaiting confirmation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidatePair {
    pub term: String,
    pub definition: String,
    /// Self-assessed reliability in [0, 1]
    pub confidence: f64,
}

impl CandidatePair {
    pub fn is_low_confidence(&self) -> bool {
        self.confidence < LOW_CONFIDENCE_THRESHOLD
    }
}

/// Full output of one extraction run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Parsed pairs, in input line order
    pub pairs: Vec<CandidatePair>,
    /// Content lines every strategy failed on, in input line order
    pub unparsed_lines: Vec<String>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.unparsed_lines.is_empty()
    }

    /// Append another result, keeping order
    pub fn merge(&mut self, other: ExtractionResult) {
        self.pairs.extend(other.pairs);
        self.unparsed_lines.extend(other.unparsed_lines);
    }
}

// ==================== Tests ====================
