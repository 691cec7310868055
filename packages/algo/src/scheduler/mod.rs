//! SM-2 Review Scheduler
//!
//! State transition for one learning item after a user rating, plus the
//! derived metrics shown next to it (mastery, interval previews, due text).
//!
//! Every function is pure: the review instant is passed in, nothing is
//! persisted here.

mod format;

pub use format::{due_text, format_interval};

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::sanitize::{sanitize_ease, sanitize_interval};
use crate::types::{
    ReviewState, UserRating, DEFAULT_EASE_FACTOR, FIRST_INTERVAL_DAYS, MIN_EASE_FACTOR,
    SECOND_INTERVAL_DAYS,
};

/// Upper bound on a scheduled interval (about a century)
pub const MAX_INTERVAL_DAYS: i64 = 36500;

/// Repetitions needed for the full repetition bonus in `mastery_score`
const MASTERY_REPETITION_TARGET: f64 = 5.0;

/// Interval (days) needed for the full interval bonus in `mastery_score`
const MASTERY_INTERVAL_TARGET: f64 = 30.0;

/// State of a brand-new item: due immediately, never reviewed.
pub fn default_state(now: DateTime<Utc>) -> ReviewState {
    ReviewState {
        ease_factor: DEFAULT_EASE_FACTOR,
        interval_days: 0,
        repetitions: 0,
        next_review_at: now,
        last_reviewed_at: None,
        times_correct: 0,
        times_incorrect: 0,
    }
}

/// Compute the state after the user rates a review at `now`.
///
/// Ease and interval are clamped on entry, so a corrupted record yields a
/// valid state instead of propagating bad arithmetic.
pub fn next_state(state: &ReviewState, rating: UserRating, now: DateTime<Utc>) -> ReviewState {
    let q = rating.quality();
    let ease = sanitize_ease(state.ease_factor);
    let interval = sanitize_interval(state.interval_days);

    let (interval_days, repetitions) = if rating.is_passing() {
        let next_interval = match state.repetitions {
            0 => FIRST_INTERVAL_DAYS,
            1 => SECOND_INTERVAL_DAYS,
            _ => (interval as f64 * ease).round() as i64,
        };
        (
            next_interval.clamp(FIRST_INTERVAL_DAYS, MAX_INTERVAL_DAYS),
            state.repetitions.saturating_add(1),
        )
    } else {
        (FIRST_INTERVAL_DAYS, 0)
    };

    let (times_correct, times_incorrect) = if rating.is_passing() {
        (state.times_correct.saturating_add(1), state.times_incorrect)
    } else {
        (state.times_correct, state.times_incorrect.saturating_add(1))
    };

    ReviewState {
        ease_factor: next_ease(ease, q),
        interval_days,
        repetitions,
        next_review_at: now + Duration::days(interval_days),
        last_reviewed_at: Some(now),
        times_correct,
        times_incorrect,
    }
}

/// EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02)), floored at 1.3
fn next_ease(ease: f64, quality: u8) -> f64 {
    let miss = 5.0 - quality as f64;
    (ease + 0.1 - miss * (0.08 + miss * 0.02)).max(MIN_EASE_FACTOR)
}

/// Human-readable interval each rating would schedule, without touching the
/// item. "again" always previews as one day.
pub fn estimated_intervals(
    state: &ReviewState,
    now: DateTime<Utc>,
) -> BTreeMap<UserRating, String> {
    UserRating::ALL
        .iter()
        .map(|&rating| {
            let days = match rating {
                UserRating::Again => FIRST_INTERVAL_DAYS,
                _ => next_state(state, rating, now).interval_days,
            };
            (rating, format_interval(days as f64))
        })
        .collect()
}

/// Display-only mastery metric in [0, 100].
///
/// Half accuracy, a quarter streak length, a quarter interval length. Items
/// never reviewed score 0.
pub fn mastery_score(state: &ReviewState) -> u8 {
    let total = state.total_reviews();
    if total == 0 {
        return 0;
    }

    let accuracy = state.times_correct as f64 / total as f64;
    let repetition_bonus = (state.repetitions as f64 / MASTERY_REPETITION_TARGET).min(1.0);
    let interval_bonus =
        (sanitize_interval(state.interval_days) as f64 / MASTERY_INTERVAL_TARGET).min(1.0);

    let score = 100.0 * (0.5 * accuracy + 0.25 * repetition_bonus + 0.25 * interval_bonus);
    score.round().clamp(0.0, 100.0) as u8
}
