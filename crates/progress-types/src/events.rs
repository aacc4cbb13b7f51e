//! Gamification events: the engine's outward-facing product
//!
//! Each event is a plain immutable record. The order of events within one
//! `process_activity` call is significant and must be preserved by the
//! delivery layer.

use crate::{AchievementId, LessonId};
use serde::{Deserialize, Serialize};

/// One gamification event produced while processing an activity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GamificationEvent {
    /// XP credited to the learner.
    XpGained { amount: u32 },
    /// The learner reached a new level. One event per level gained.
    LevelUp { new_level: u32 },
    /// The daily streak grew by one.
    StreakExtended { days: u32 },
    /// The streak was broken and restarted at one.
    StreakReset,
    /// A lesson was completed (or re-completed with a better score).
    LessonCompleted { lesson_id: LessonId, stars: u8 },
    /// An achievement unlocked for the first time.
    AchievementUnlocked { achievement_id: AchievementId },
}
