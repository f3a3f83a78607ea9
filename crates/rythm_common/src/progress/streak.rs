//! Consecutive-day streak transitions.
//!
//! A streak is keyed on calendar days, not elapsed time:
//!
//! 1. last activity today      → unchanged (same-day repeats are idempotent)
//! 2. last activity yesterday  → +1
//! 3. anything else            → restart at 1
//!
//! The longest streak is a high-water mark recomputed after every step.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakStep {
    /// Already counted today
    Unchanged,
    /// Continued from yesterday
    Extended,
    /// Gap or first activity
    Restarted,
}

/// Decide the transition for an activity happening `today`.
pub fn next_step(
    last_day: Option<NaiveDate>,
    today: Option<NaiveDate>,
    yesterday: Option<NaiveDate>,
) -> StreakStep {
    match last_day {
        Some(last) if Some(last) == today => StreakStep::Unchanged,
        Some(last) if Some(last) == yesterday => StreakStep::Extended,
        _ => StreakStep::Restarted,
    }
}

/// Apply a step to `(current, longest)`.
pub fn apply(step: StreakStep, current: u32, longest: u32) -> (u32, u32) {
    let current = match step {
        StreakStep::Unchanged => current,
        StreakStep::Extended => current.saturating_add(1),
        StreakStep::Restarted => 1,
    };
    (current, longest.max(current))
}
