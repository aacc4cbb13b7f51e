//! Achievement evaluator: decides which catalog achievements newly unlock
//!
//! Conditions are checked against the learner's post-mutation progress
//! state plus the triggering fact. The learner's unlock set is the
//! at-most-once enforcement point: an achievement already in the set is
//! never unlocked or emitted again. Evaluation walks the catalog in order
//! so event emission is reproducible.

use chrono::{DateTime, Utc};
use progress_types::{
    AchievementId, AchievementUnlock, Catalog, ProgressState, UnlockCondition,
};
use std::collections::HashMap;
use tracing::info;

/// Facts the evaluator consults beyond the progress state itself.
#[derive(Clone, Copy, Debug)]
pub struct EvaluationContext<'a> {
    pub state: &'a ProgressState,
    /// Lessons this learner has completed, across all weeks.
    pub lessons_completed: u32,
    /// Whether the triggering activity was a quiz scored 100.
    pub perfect_quiz: bool,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(state: &'a ProgressState) -> Self {
        Self {
            state,
            lessons_completed: 0,
            perfect_quiz: false,
        }
    }

    pub fn with_lessons_completed(mut self, count: u32) -> Self {
        self.lessons_completed = count;
        self
    }

    pub fn with_perfect_quiz(mut self, perfect: bool) -> Self {
        self.perfect_quiz = perfect;
        self
    }
}

/// Evaluates unlock conditions against a learner's state. Stateless; the
/// unlock set travels with the learner record.
#[derive(Clone, Copy, Debug, Default)]
pub struct AchievementEvaluator;

impl AchievementEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Walk the catalog in order and unlock every newly satisfied
    /// achievement, inserting into `unlocks` and returning the new ids in
    /// catalog order.
    pub fn evaluate(
        &self,
        catalog: &Catalog,
        unlocks: &mut HashMap<AchievementId, AchievementUnlock>,
        ctx: &EvaluationContext<'_>,
        now: DateTime<Utc>,
    ) -> Vec<AchievementId> {
        let mut newly_unlocked = Vec::new();
        for achievement in catalog.achievements() {
            if unlocks.contains_key(&achievement.id) {
                continue;
            }
            if self.is_satisfied(&achievement.condition, ctx) {
                unlocks.insert(
                    achievement.id.clone(),
                    AchievementUnlock {
                        achievement_id: achievement.id.clone(),
                        unlocked_at: now,
                    },
                );
                info!(achievement = %achievement.id, tier = %achievement.tier, "Achievement unlocked");
                newly_unlocked.push(achievement.id.clone());
            }
        }
        newly_unlocked
    }

    fn is_satisfied(&self, condition: &UnlockCondition, ctx: &EvaluationContext<'_>) -> bool {
        let state = ctx.state;
        match condition {
            UnlockCondition::FirstLesson => ctx.lessons_completed >= 1,
            UnlockCondition::PerfectQuiz => ctx.perfect_quiz,
            UnlockCondition::StreakDays(days) => state.streak_days >= *days,
            UnlockCondition::LessonsCompleted(count) => ctx.lessons_completed >= *count,
            UnlockCondition::LevelReached(level) => state.level >= *level,
            UnlockCondition::StudyMinutes(minutes) => state.study_minutes >= *minutes,
            UnlockCondition::WeeklyGoalMet => state.weekly_goal_met(),
        }
    }
}
