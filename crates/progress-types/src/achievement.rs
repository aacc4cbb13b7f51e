//! Achievements: catalog definitions and per-learner unlock records

use crate::AchievementId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Achievement rarity tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementTier {
    Bronze,
    Silver,
    Gold,
}

impl fmt::Display for AchievementTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
        };
        write!(f, "{label}")
    }
}

/// The condition under which an achievement unlocks. Evaluated against the
/// learner's progress state and the triggering activity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockCondition {
    /// First lesson ever completed.
    FirstLesson,
    /// A quiz scored 100.
    PerfectQuiz,
    /// Streak reached at least this many days.
    StreakDays(u32),
    /// At least this many lessons completed in total.
    LessonsCompleted(u32),
    /// Level reached at least this value.
    LevelReached(u32),
    /// At least this many study minutes recorded this week.
    StudyMinutes(u32),
    /// Weekly lesson goal met.
    WeeklyGoalMet,
}

/// A catalog achievement definition. Read-only to the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: String,
    pub description: String,
    pub tier: AchievementTier,
    pub condition: UnlockCondition,
}

impl Achievement {
    pub fn new(
        id: impl Into<AchievementId>,
        title: impl Into<String>,
        tier: AchievementTier,
        condition: UnlockCondition,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            tier,
            condition,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Record of one learner unlocking one achievement. Set semantics: a given
/// `(learner, achievement)` pair exists at most once, ever.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementUnlock {
    pub achievement_id: AchievementId,
    pub unlocked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievement_builder() {
        let achievement = Achievement::new(
            "perfectionist",
            "Perfectionist",
            AchievementTier::Gold,
            UnlockCondition::PerfectQuiz,
        )
        .with_description("Score 100% on a quiz");

        assert_eq!(achievement.id.as_str(), "perfectionist");
        assert_eq!(achievement.tier, AchievementTier::Gold);
        assert_eq!(achievement.condition, UnlockCondition::PerfectQuiz);
    }

    #[test]
    fn test_condition_serde_round_trip() {
        let condition = UnlockCondition::StreakDays(7);
        let json = serde_json::to_string(&condition).unwrap();
        let back: UnlockCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(condition, back);
    }
}
