//! Lesson state machine: the allowed status transitions of one lesson
//! instance
//!
//! `Locked -> Available -> InProgress -> Completed`. Completed is terminal
//! but revisitable: a retake can improve stars, never regress them, and
//! never re-credits XP (the engine credits XP on first completion only).
//! Invalid transitions are reported as typed errors, never silently
//! dropped.

use progress_types::{
    EngineError, EngineResult, LessonInstance, LessonStatus, QuizResult,
};
use tracing::debug;

/// What a quiz-driven completion did to the instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// First completion: status moved to Completed, XP is due.
    First { stars: u8 },
    /// Retake with a strictly better result: stars improved, no XP due.
    Improved { stars: u8 },
    /// Retake with an equal or worse result: nothing changed.
    Unchanged,
}

/// Drives status transitions on lesson instances. Stateless; all state
/// lives in the instance itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct LessonStateMachine;

impl LessonStateMachine {
    pub fn new() -> Self {
        Self
    }

    /// Apply the external prerequisites-satisfied signal:
    /// `Locked -> Available`. A no-op on any other status, so the catalog
    /// service may re-send the signal freely.
    pub fn unlock(&self, instance: &mut LessonInstance) -> LessonStatus {
        if instance.status == LessonStatus::Locked {
            instance.status = LessonStatus::Available;
            debug!(lesson = %instance.lesson_id, "Lesson unlocked");
        }
        instance.status
    }

    /// Handle a lesson-start activity. `Available -> InProgress`; starting
    /// an already in-progress lesson is a resume and changes nothing.
    /// Returns whether the lesson was newly started.
    pub fn start(&self, instance: &mut LessonInstance) -> EngineResult<bool> {
        match instance.status {
            LessonStatus::Available => {
                instance.status = LessonStatus::InProgress;
                debug!(lesson = %instance.lesson_id, "Lesson started");
                Ok(true)
            }
            LessonStatus::InProgress => Ok(false),
            from @ (LessonStatus::Locked | LessonStatus::Completed) => {
                Err(EngineError::InvalidTransition {
                    lesson: instance.lesson_id.clone(),
                    from,
                    to: LessonStatus::InProgress,
                })
            }
        }
    }

    /// Handle a progress-tick activity. Only valid while in progress, and
    /// progress is monotonically non-decreasing within a session: a
    /// decreasing update is rejected, not clamped.
    pub fn tick(&self, instance: &mut LessonInstance, percent: u8) -> EngineResult<()> {
        if percent > 100 {
            return Err(EngineError::PercentOutOfRange(percent));
        }
        if instance.status != LessonStatus::InProgress {
            return Err(EngineError::InvalidTransition {
                lesson: instance.lesson_id.clone(),
                from: instance.status,
                to: LessonStatus::InProgress,
            });
        }
        if percent < instance.progress_percent {
            return Err(EngineError::ProgressRegression {
                lesson: instance.lesson_id.clone(),
                from: instance.progress_percent,
                to: percent,
            });
        }
        instance.progress_percent = percent;
        Ok(())
    }

    /// Handle a scored quiz submission. `Available | InProgress ->
    /// Completed` on first completion; a resubmission after completion
    /// updates stars only when the new result is strictly better.
    pub fn complete(
        &self,
        instance: &mut LessonInstance,
        result: QuizResult,
    ) -> EngineResult<CompletionOutcome> {
        match instance.status {
            LessonStatus::Locked => Err(EngineError::InvalidTransition {
                lesson: instance.lesson_id.clone(),
                from: LessonStatus::Locked,
                to: LessonStatus::Completed,
            }),
            LessonStatus::Available | LessonStatus::InProgress => {
                instance.status = LessonStatus::Completed;
                instance.progress_percent = 100;
                instance.stars_earned = result.stars;
                debug!(
                    lesson = %instance.lesson_id,
                    score = result.score,
                    stars = result.stars,
                    "Lesson completed"
                );
                Ok(CompletionOutcome::First {
                    stars: result.stars,
                })
            }
            LessonStatus::Completed => {
                if result.stars > instance.stars_earned {
                    instance.stars_earned = result.stars;
                    debug!(
                        lesson = %instance.lesson_id,
                        stars = result.stars,
                        "Lesson stars improved on retake"
                    );
                    Ok(CompletionOutcome::Improved {
                        stars: result.stars,
                    })
                } else {
                    Ok(CompletionOutcome::Unchanged)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use progress_types::Lesson;

    fn available_instance() -> LessonInstance {
        LessonInstance::new(&Lesson::new("l-1", "Intro").available_from_start())
    }

    fn result_with_stars(stars: u8) -> QuizResult {
        QuizResult {
            score: match stars {
                3 => 100,
                2 => 75,
                1 => 50,
                _ => 0,
            },
            stars,
            correct: 0,
            total: 4,
        }
    }

    #[test]
    fn test_locked_rejects_start() {
        let machine = LessonStateMachine::new();
        let mut instance = LessonInstance::new(&Lesson::new("l-1", "Intro"));
        let err = machine.start(&mut instance).unwrap_err();
        assert!(err.is_invalid_transition());
        assert_eq!(instance.status, LessonStatus::Locked);
    }

    #[test]
    fn test_unlock_then_start() {
        let machine = LessonStateMachine::new();
        let mut instance = LessonInstance::new(&Lesson::new("l-1", "Intro"));
        assert_eq!(machine.unlock(&mut instance), LessonStatus::Available);
        assert!(machine.start(&mut instance).unwrap());
        assert_eq!(instance.status, LessonStatus::InProgress);

        // Re-sending the unlock signal is harmless
        assert_eq!(machine.unlock(&mut instance), LessonStatus::InProgress);
    }

    #[test]
    fn test_start_while_in_progress_is_resume() {
        let machine = LessonStateMachine::new();
        let mut instance = available_instance();
        assert!(machine.start(&mut instance).unwrap());
        assert!(!machine.start(&mut instance).unwrap());
        assert_eq!(instance.status, LessonStatus::InProgress);
    }

    #[test]
    fn test_completed_rejects_start() {
        let machine = LessonStateMachine::new();
        let mut instance = available_instance();
        machine.complete(&mut instance, result_with_stars(2)).unwrap();
        assert!(machine.start(&mut instance).unwrap_err().is_invalid_transition());
    }

    #[test]
    fn test_tick_is_monotonic() {
        let machine = LessonStateMachine::new();
        let mut instance = available_instance();
        machine.start(&mut instance).unwrap();

        machine.tick(&mut instance, 40).unwrap();
        machine.tick(&mut instance, 40).unwrap();
        machine.tick(&mut instance, 75).unwrap();
        assert_eq!(instance.progress_percent, 75);

        let err = machine.tick(&mut instance, 60).unwrap_err();
        assert!(matches!(err, EngineError::ProgressRegression { from: 75, to: 60, .. }));
        assert_eq!(instance.progress_percent, 75);
    }

    #[test]
    fn test_tick_rejects_out_of_range_and_wrong_status() {
        let machine = LessonStateMachine::new();
        let mut instance = available_instance();
        assert!(machine.tick(&mut instance, 10).unwrap_err().is_invalid_transition());

        machine.start(&mut instance).unwrap();
        assert!(matches!(
            machine.tick(&mut instance, 101),
            Err(EngineError::PercentOutOfRange(101))
        ));
    }

    #[test]
    fn test_first_completion_forces_full_progress() {
        let machine = LessonStateMachine::new();
        let mut instance = available_instance();
        machine.start(&mut instance).unwrap();
        machine.tick(&mut instance, 30).unwrap();

        let outcome = machine.complete(&mut instance, result_with_stars(2)).unwrap();
        assert_eq!(outcome, CompletionOutcome::First { stars: 2 });
        assert_eq!(instance.status, LessonStatus::Completed);
        assert_eq!(instance.progress_percent, 100);
        assert_eq!(instance.stars_earned, 2);
    }

    #[test]
    fn test_completion_straight_from_available() {
        // A quiz can be submitted without an explicit start
        let machine = LessonStateMachine::new();
        let mut instance = available_instance();
        let outcome = machine.complete(&mut instance, result_with_stars(3)).unwrap();
        assert_eq!(outcome, CompletionOutcome::First { stars: 3 });
    }

    #[test]
    fn test_retake_improves_but_never_regresses_stars() {
        let machine = LessonStateMachine::new();
        let mut instance = available_instance();
        machine.complete(&mut instance, result_with_stars(1)).unwrap();

        let outcome = machine.complete(&mut instance, result_with_stars(3)).unwrap();
        assert_eq!(outcome, CompletionOutcome::Improved { stars: 3 });
        assert_eq!(instance.stars_earned, 3);

        let outcome = machine.complete(&mut instance, result_with_stars(2)).unwrap();
        assert_eq!(outcome, CompletionOutcome::Unchanged);
        assert_eq!(instance.stars_earned, 3);
    }

    #[test]
    fn test_locked_rejects_completion() {
        let machine = LessonStateMachine::new();
        let mut instance = LessonInstance::new(&Lesson::new("l-1", "Intro"));
        let err = machine.complete(&mut instance, result_with_stars(3)).unwrap_err();
        assert!(err.is_invalid_transition());
        assert_eq!(instance.status, LessonStatus::Locked);
    }
}
