//! The engine facade: one entry point per inbound activity
//!
//! `ProgressEngine` owns the catalog plus per-learner records and wires
//! the scoring, lesson state machine, ledger, and achievement evaluator
//! together. Operations on one learner are serialized through `&mut self`;
//! learners are independent of each other, and the leaderboard only ever
//! reads immutable snapshots.
//!
//! Each `process_activity` call is all-or-nothing: the learner's record is
//! mutated on a working copy and committed only when the whole activity
//! succeeds, so a typed failure leaves no partial state behind.

use crate::{
    achievements::{AchievementEvaluator, EvaluationContext},
    ledger::ProgressLedger,
    lesson_state::{CompletionOutcome, LessonStateMachine},
    scoring,
};
use chrono::{DateTime, Utc};
use progress_types::{
    AchievementId, AchievementUnlock, Activity, Catalog, EngineError, EngineResult,
    GamificationEvent, LeaderboardEntry, LeaderboardSnapshot, LearnerId, LessonId,
    LessonInstance, LessonStatus, ProgressState, Timeframe,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Everything the engine tracks for one learner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LearnerRecord {
    pub progress: ProgressState,
    pub lessons: HashMap<LessonId, LessonInstance>,
    pub unlocks: HashMap<AchievementId, AchievementUnlock>,
}

impl LearnerRecord {
    pub fn new(weekly_goal: u32) -> Self {
        Self {
            progress: ProgressState::new(weekly_goal),
            lessons: HashMap::new(),
            unlocks: HashMap::new(),
        }
    }

    /// Lessons completed across all time.
    pub fn lessons_completed(&self) -> u32 {
        self.lessons.values().filter(|l| l.is_completed()).count() as u32
    }
}

/// What one processed activity produced: the learner's new state and the
/// ordered events to deliver.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityOutcome {
    pub state: ProgressState,
    pub events: Vec<GamificationEvent>,
}

/// The learner-progress rules engine.
pub struct ProgressEngine {
    catalog: Catalog,
    learners: HashMap<LearnerId, LearnerRecord>,
    state_machine: LessonStateMachine,
    ledger: ProgressLedger,
    evaluator: AchievementEvaluator,
}

impl ProgressEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            learners: HashMap::new(),
            state_machine: LessonStateMachine::new(),
            ledger: ProgressLedger::new(),
            evaluator: AchievementEvaluator::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Register a learner if not already present.
    pub fn register_learner(&mut self, learner_id: LearnerId, weekly_goal: u32) {
        self.learners
            .entry(learner_id.clone())
            .or_insert_with(|| {
                info!(learner = %learner_id, weekly_goal, "Learner registered");
                LearnerRecord::new(weekly_goal)
            });
    }

    pub fn learner(&self, learner_id: &LearnerId) -> EngineResult<&LearnerRecord> {
        self.learners
            .get(learner_id)
            .ok_or_else(|| EngineError::LearnerNotFound(learner_id.clone()))
    }

    /// Apply the catalog's prerequisites-satisfied signal for one lesson:
    /// `Locked -> Available`. The engine does not compute prerequisite
    /// logic itself.
    pub fn unlock_lesson(
        &mut self,
        learner_id: &LearnerId,
        lesson_id: &LessonId,
    ) -> EngineResult<LessonStatus> {
        let lesson = self
            .catalog
            .lesson(lesson_id)
            .ok_or_else(|| EngineError::LessonNotFound(lesson_id.clone()))?
            .clone();
        let record = self
            .learners
            .get_mut(learner_id)
            .ok_or_else(|| EngineError::LearnerNotFound(learner_id.clone()))?;
        let instance = record
            .lessons
            .entry(lesson.id.clone())
            .or_insert_with(|| LessonInstance::new(&lesson));
        Ok(self.state_machine.unlock(instance))
    }

    /// Process one inbound activity for one learner.
    ///
    /// The single entry point. Returns the learner's new progress state
    /// plus the ordered gamification events the caller must deliver. `now`
    /// is the injected clock reading for streak and unlock timestamps.
    pub fn process_activity(
        &mut self,
        learner_id: &LearnerId,
        activity: Activity,
        now: DateTime<Utc>,
    ) -> EngineResult<ActivityOutcome> {
        if !self.learners.contains_key(learner_id) {
            return Err(EngineError::LearnerNotFound(learner_id.clone()));
        }
        // Work on a copy so a failure leaves the committed record intact
        let mut record = self.learners[learner_id].clone();
        let mut events = Vec::new();

        if activity.qualifies_for_streak() {
            self.ledger
                .update_streak(&mut record.progress, now.date_naive(), &mut events)?;
        }

        let mut perfect_quiz = false;
        match &activity {
            Activity::LessonStart { lesson_id } => {
                let instance = self.instance_mut(&mut record, lesson_id)?;
                self.state_machine.start(instance)?;
            }
            Activity::ProgressTick { lesson_id, percent } => {
                let instance = self.instance_mut(&mut record, lesson_id)?;
                self.state_machine.tick(instance, *percent)?;
            }
            Activity::QuizSubmit { lesson_id, attempt } => {
                let lesson = self
                    .catalog
                    .lesson(lesson_id)
                    .ok_or_else(|| EngineError::LessonNotFound(lesson_id.clone()))?
                    .clone();
                if attempt.answers.len() != lesson.quiz.len() {
                    return Err(EngineError::AnswerCountMismatch {
                        expected: lesson.quiz.len(),
                        got: attempt.answers.len(),
                    });
                }

                let result = scoring::score(attempt, &lesson.quiz);
                perfect_quiz = result.is_perfect();

                let instance = record
                    .lessons
                    .entry(lesson.id.clone())
                    .or_insert_with(|| LessonInstance::new(&lesson));
                match self.state_machine.complete(instance, result)? {
                    CompletionOutcome::First { stars } => {
                        events.push(GamificationEvent::LessonCompleted {
                            lesson_id: lesson.id.clone(),
                            stars,
                        });
                        self.ledger
                            .apply_xp(&mut record.progress, lesson.xp_reward, &mut events);
                        self.ledger
                            .record_weekly_lesson_completion(&mut record.progress);
                    }
                    CompletionOutcome::Improved { stars } => {
                        events.push(GamificationEvent::LessonCompleted {
                            lesson_id: lesson.id.clone(),
                            stars,
                        });
                    }
                    CompletionOutcome::Unchanged => {}
                }
            }
            Activity::StudyTimeTick { minutes } => {
                self.ledger.record_study_time(&mut record.progress, *minutes);
            }
        }

        let ctx = EvaluationContext::new(&record.progress)
            .with_lessons_completed(record.lessons_completed())
            .with_perfect_quiz(perfect_quiz);
        let mut unlocks = std::mem::take(&mut record.unlocks);
        let newly_unlocked = self.evaluator.evaluate(&self.catalog, &mut unlocks, &ctx, now);
        record.unlocks = unlocks;
        events.extend(
            newly_unlocked
                .into_iter()
                .map(|achievement_id| GamificationEvent::AchievementUnlocked { achievement_id }),
        );

        debug!(
            learner = %learner_id,
            events = events.len(),
            "Activity processed"
        );

        let state = record.progress.clone();
        self.learners.insert(learner_id.clone(), record);
        Ok(ActivityOutcome { state, events })
    }

    /// An immutable rankable snapshot of one learner.
    pub fn snapshot(&self, learner_id: &LearnerId) -> EngineResult<LeaderboardSnapshot> {
        let record = self.learner(learner_id)?;
        Ok(LeaderboardSnapshot {
            learner_id: learner_id.clone(),
            xp_total: record.progress.total_xp,
            xp_weekly: record.progress.weekly_xp,
            streak_days: record.progress.streak_days,
        })
    }

    /// Rank a cohort of snapshots for a timeframe. Pure; the snapshots
    /// need not belong to learners this engine tracks.
    pub fn rank_cohort(
        &self,
        snapshots: &[LeaderboardSnapshot],
        timeframe: Timeframe,
    ) -> Vec<LeaderboardEntry> {
        crate::leaderboard::rank(snapshots, timeframe)
    }

    /// Apply the external weekly-boundary signal to one learner.
    pub fn reset_weekly(&mut self, learner_id: &LearnerId) -> EngineResult<()> {
        let record = self
            .learners
            .get_mut(learner_id)
            .ok_or_else(|| EngineError::LearnerNotFound(learner_id.clone()))?;
        self.ledger.reset_weekly(&mut record.progress);
        Ok(())
    }

    /// Apply the external weekly-boundary signal to every learner.
    pub fn reset_weekly_all(&mut self) {
        let ledger = self.ledger;
        for record in self.learners.values_mut() {
            ledger.reset_weekly(&mut record.progress);
        }
    }

    /// Fetch (lazily creating) the learner's instance of a catalog lesson.
    fn instance_mut<'a>(
        &self,
        record: &'a mut LearnerRecord,
        lesson_id: &LessonId,
    ) -> EngineResult<&'a mut LessonInstance> {
        let lesson = self
            .catalog
            .lesson(lesson_id)
            .ok_or_else(|| EngineError::LessonNotFound(lesson_id.clone()))?;
        Ok(record
            .lessons
            .entry(lesson.id.clone())
            .or_insert_with(|| LessonInstance::new(lesson)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use progress_types::{Achievement, AchievementTier, Lesson, QuizAttempt, QuizQuestion, UnlockCondition};

    fn quiz() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion::new("q1", vec!["a".into(), "b".into()], 0),
            QuizQuestion::new("q2", vec!["a".into(), "b".into()], 1),
        ]
    }

    fn engine() -> ProgressEngine {
        let catalog = Catalog::new()
            .with_lesson(
                Lesson::new("l-1", "Intro")
                    .with_xp_reward(150)
                    .with_quiz(quiz())
                    .available_from_start(),
            )
            .with_lesson(Lesson::new("l-2", "Advanced").with_xp_reward(250).with_quiz(quiz()))
            .with_achievement(Achievement::new(
                "first-steps",
                "First Steps",
                AchievementTier::Bronze,
                UnlockCondition::FirstLesson,
            ));
        let mut engine = ProgressEngine::new(catalog);
        engine.register_learner(LearnerId::new("alice"), 5);
        engine
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_unknown_learner_is_reported() {
        let mut engine = engine();
        let err = engine
            .process_activity(
                &LearnerId::new("nobody"),
                Activity::StudyTimeTick { minutes: 5 },
                at(4),
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::LearnerNotFound(_)));
    }

    #[test]
    fn test_unknown_lesson_is_reported() {
        let mut engine = engine();
        let err = engine
            .process_activity(
                &LearnerId::new("alice"),
                Activity::LessonStart {
                    lesson_id: LessonId::new("l-9"),
                },
                at(4),
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::LessonNotFound(_)));
    }

    #[test]
    fn test_failed_activity_leaves_no_partial_state() {
        let mut engine = engine();
        let alice = LearnerId::new("alice");

        // Locked lesson start fails, but the streak bump inside the same
        // call must not stick either
        let err = engine
            .process_activity(
                &alice,
                Activity::LessonStart {
                    lesson_id: LessonId::new("l-2"),
                },
                at(4),
            )
            .unwrap_err();
        assert!(err.is_invalid_transition());

        let record = engine.learner(&alice).unwrap();
        assert_eq!(record.progress.streak_days, 0);
        assert!(record.progress.last_activity_date.is_none());
    }

    #[test]
    fn test_mismatched_answer_count_is_invalid_input() {
        let mut engine = engine();
        let err = engine
            .process_activity(
                &LearnerId::new("alice"),
                Activity::QuizSubmit {
                    lesson_id: LessonId::new("l-1"),
                    attempt: QuizAttempt::answered([0]),
                },
                at(4),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::AnswerCountMismatch { expected: 2, got: 1 }
        ));
    }

    #[test]
    fn test_study_time_accumulates_without_touching_streak() {
        let mut engine = engine();
        let alice = LearnerId::new("alice");

        let outcome = engine
            .process_activity(&alice, Activity::StudyTimeTick { minutes: 25 }, at(4))
            .unwrap();
        assert_eq!(outcome.state.study_minutes, 25);
        assert_eq!(outcome.state.streak_days, 0);
        assert!(outcome.events.is_empty());
    }

    #[test]
    fn test_snapshot_reflects_progress() {
        let mut engine = engine();
        let alice = LearnerId::new("alice");
        engine
            .process_activity(
                &alice,
                Activity::QuizSubmit {
                    lesson_id: LessonId::new("l-1"),
                    attempt: QuizAttempt::answered([0, 1]),
                },
                at(4),
            )
            .unwrap();

        let snapshot = engine.snapshot(&alice).unwrap();
        assert_eq!(snapshot.xp_total, 150);
        assert_eq!(snapshot.xp_weekly, 150);
        assert_eq!(snapshot.streak_days, 1);
    }

    #[test]
    fn test_reset_weekly_all() {
        let mut engine = engine();
        let alice = LearnerId::new("alice");
        engine
            .process_activity(&alice, Activity::StudyTimeTick { minutes: 30 }, at(4))
            .unwrap();
        engine.reset_weekly_all();
        assert_eq!(engine.learner(&alice).unwrap().progress.study_minutes, 0);
    }
}
