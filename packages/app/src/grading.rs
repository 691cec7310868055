//! Typed-answer grading
//!
//! Turns a typed answer into a [`UserRating`] for the scheduler using
//! normalized Levenshtein similarity. Lives outside the scheduler: the SM-2
//! transition only ever sees the resulting rating.

use serde::{Deserialize, Serialize};

use vocab_algo::UserRating;

/// Similarity at or above which a typed answer counts as correct
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Below the correctness threshold but close enough to be a near miss
const NEAR_MISS_SIMILARITY: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerGrade {
    /// Normalized similarity in [0, 1]
    pub similarity: f64,
    pub is_correct: bool,
    pub rating: UserRating,
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Edit distance in chars (insert, delete, substitute)
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
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// 1 - distance / longer length; two empty strings are identical
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

/// Grade `given` against `expected`.
///
/// Exact (after trimming, case folding and whitespace collapsing) is easy,
/// at or above `threshold` is good, a near miss is hard, anything else again.
pub fn grade_answer(expected: &str, given: &str, threshold: f64) -> AnswerGrade {
    let expected = normalize(expected);
    let given = normalize(given);
    let similarity = similarity(&expected, &given);

    let rating = if !given.is_empty() && expected == given {
        UserRating::Easy
    } else if similarity >= threshold {
        UserRating::Good
    } else if similarity >= NEAR_MISS_SIMILARITY {
        UserRating::Hard
    } else {
        UserRating::Again
    };

    AnswerGrade {
        similarity,
        is_correct: rating.is_passing(),
        rating,
    }
}
