//! Data Sanitization
//!
//! Repairs review state read back from persistence before it reaches the
//! scheduler.
//!
//! Functions:
//! - Ease factor clamping
//! - Interval clamping
//! - State health diagnostics

use serde::{Deserialize, Serialize};

use crate::types::{ReviewState, DEFAULT_EASE_FACTOR, MIN_EASE_FACTOR};

/// What `sanitize_state` had to repair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizeReport {
    pub ease_non_finite: bool,
    pub ease_below_floor: bool,
    pub interval_negative: bool,
}

impl SanitizeReport {
    pub fn repaired(&self) -> bool {
        self.ease_non_finite || self.ease_below_floor || self.interval_negative
    }
}

/// 清理易度因子：非有限值恢复默认，低于下限则截断
pub fn sanitize_ease(ease: f64) -> f64 {
    if !ease.is_finite() {
        DEFAULT_EASE_FACTOR
    } else {
        ease.max(MIN_EASE_FACTOR)
    }
}

/// 清理间隔天数：负值截断为 0
pub fn sanitize_interval(interval_days: i64) -> i64 {
    interval_days.max(0)
}

/// Clamp ease and interval into their valid ranges.
///
/// Returns the repaired state together with a report of what changed so the
/// caller can log corrupted records.
pub fn sanitize_state(state: &ReviewState) -> (ReviewState, SanitizeReport) {
    let report = diagnose_state(state);
    let mut repaired = state.clone();
    repaired.ease_factor = sanitize_ease(state.ease_factor);
    repaired.interval_days = sanitize_interval(state.interval_days);
    (repaired, report)
}

/// 诊断状态是否需要修复（不修改输入）
pub fn diagnose_state(state: &ReviewState) -> SanitizeReport {
    let ease = state.ease_factor;
    SanitizeReport {
        ease_non_finite: !ease.is_finite(),
        ease_below_floor: ease.is_finite() && ease < MIN_EASE_FACTOR,
        interval_negative: state.interval_days < 0,
    }
}
