//! Per-learner progress state: XP, level, streak, weekly counters
//!
//! `ProgressState` is owned by the progress ledger. Nothing outside the
//! ledger mutates it; callers receive copies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A learner's canonical progression counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Current level, starting at 1.
    pub level: u32,
    /// XP accumulated toward the next level.
    pub xp: u32,
    /// XP required to reach the next level.
    pub xp_to_next_level: u32,
    /// Lifetime XP, never reduced by level-ups.
    pub total_xp: u64,
    /// XP accumulated since the last weekly reset.
    pub weekly_xp: u32,
    /// Consecutive calendar days with qualifying activity.
    pub streak_days: u32,
    /// Lessons-per-week target.
    pub weekly_goal: u32,
    /// Lessons completed this week. Raw counter, may exceed the goal;
    /// clamping is a display concern.
    pub weekly_progress: u32,
    /// Study minutes recorded this week.
    pub study_minutes: u32,
    /// Calendar day of the most recent qualifying activity.
    pub last_activity_date: Option<NaiveDate>,
}

impl ProgressState {
    /// Fresh state for a newly registered learner.
    pub fn new(weekly_goal: u32) -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next_level: Self::threshold_for(1),
            total_xp: 0,
            weekly_xp: 0,
            streak_days: 0,
            weekly_goal,
            weekly_progress: 0,
            study_minutes: 0,
            last_activity_date: None,
        }
    }

    /// XP needed to clear the given level. Monotonic in `level`.
    pub fn threshold_for(level: u32) -> u32 {
        100 * level.max(1)
    }

    /// Fraction of the current level cleared, for display (0.0..=1.0).
    pub fn level_fraction(&self) -> f64 {
        f64::from(self.xp) / f64::from(self.xp_to_next_level)
    }

    /// Whether the weekly lesson goal has been met or exceeded.
    pub fn weekly_goal_met(&self) -> bool {
        self.weekly_goal > 0 && self.weekly_progress >= self.weekly_goal
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new(0)
    }
}
