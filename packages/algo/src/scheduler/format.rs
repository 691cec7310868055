//! Human-readable durations for interval previews and due labels.

use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Format a span of days: "now", "N days", "N months" or "N years".
///
/// Under a day is "now"; under 30 days rounds to whole days; under a year
/// rounds to the nearest 30-day month; anything longer to the nearest year.
pub fn format_interval(days: f64) -> String {
    if !days.is_finite() || days < 1.0 {
        return "now".to_string();
    }

    let whole_days = days.round() as i64;
    if whole_days < 30 {
        plural(whole_days, "day")
    } else if whole_days < 365 {
        plural(((days / 30.0).round() as i64).max(1), "month")
    } else {
        plural(((days / 365.0).round() as i64).max(1), "year")
    }
}

/// Label for when an item is next due, relative to `now`.
pub fn due_text(next_review_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if next_review_at <= now {
        return "due now".to_string();
    }

    let days = (next_review_at - now).num_seconds() as f64 / SECONDS_PER_DAY;
    if days < 1.0 {
        "due today".to_string()
    } else {
        format!("in {}", format_interval(days))
    }
}
