//! Leaderboard snapshot inputs and derived entries

use crate::LearnerId;
use serde::{Deserialize, Serialize};

/// An immutable snapshot of one learner's rankable counters. Produced on
/// demand from progress state; the ranker only ever reads these.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    pub learner_id: LearnerId,
    /// Lifetime XP (for monthly cohorts, XP accrued within the month
    /// window; the window computation is the caller's).
    pub xp_total: u64,
    /// XP accrued since the last weekly reset.
    pub xp_weekly: u32,
    pub streak_days: u32,
}

/// One ranked row. Derived, never stored; rank is a pure function of the
/// input snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub learner_id: LearnerId,
    /// 1-based position. Unique and sequential; ties do not share a rank.
    pub rank: u32,
    pub xp_total: u64,
    pub xp_weekly: u32,
    pub streak_days: u32,
}

impl LeaderboardEntry {
    pub fn from_snapshot(snapshot: LeaderboardSnapshot, rank: u32) -> Self {
        Self {
            learner_id: snapshot.learner_id,
            rank,
            xp_total: snapshot.xp_total,
            xp_weekly: snapshot.xp_weekly,
            streak_days: snapshot.streak_days,
        }
    }
}
