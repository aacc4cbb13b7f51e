//! Error taxonomy for engine operations
//!
//! Three families: invalid lesson transitions, invalid input, and unknown
//! references. Every failure is a typed value returned to the caller; the
//! engine performs no partial mutation on failure.

use crate::{AchievementId, LearnerId, LessonId, LessonStatus};

/// Errors the engine can report.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid lesson transition for {lesson}: {from} -> {to}")]
    InvalidTransition {
        lesson: LessonId,
        from: LessonStatus,
        to: LessonStatus,
    },

    #[error("progress for {lesson} cannot decrease: {from}% -> {to}%")]
    ProgressRegression {
        lesson: LessonId,
        from: u8,
        to: u8,
    },

    #[error("quiz attempt has {got} answers but the quiz has {expected} questions")]
    AnswerCountMismatch { expected: usize, got: usize },

    #[error("activity date {given} precedes last recorded activity {last}")]
    BackdatedActivity {
        last: chrono::NaiveDate,
        given: chrono::NaiveDate,
    },

    #[error("progress percent {0} exceeds 100")]
    PercentOutOfRange(u8),

    #[error("lesson not found: {0}")]
    LessonNotFound(LessonId),

    #[error("learner not found: {0}")]
    LearnerNotFound(LearnerId),

    #[error("achievement not found: {0}")]
    AchievementNotFound(AchievementId),
}

impl EngineError {
    /// Whether this error is an illegal lesson status change, as opposed to
    /// bad input or an unknown reference.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(
            self,
            Self::InvalidTransition { .. } | Self::ProgressRegression { .. }
        )
    }

    /// Whether this error is a malformed or inadmissible input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::AnswerCountMismatch { .. }
                | Self::BackdatedActivity { .. }
                | Self::PercentOutOfRange(_)
        )
    }

    /// Whether this error is an unknown catalog or learner reference.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::LessonNotFound(_) | Self::LearnerNotFound(_) | Self::AchievementNotFound(_)
        )
    }
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_families() {
        let transition = EngineError::InvalidTransition {
            lesson: LessonId::new("l-1"),
            from: LessonStatus::Locked,
            to: LessonStatus::InProgress,
        };
        assert!(transition.is_invalid_transition());
        assert!(!transition.is_invalid_input());

        let mismatch = EngineError::AnswerCountMismatch {
            expected: 3,
            got: 2,
        };
        assert!(mismatch.is_invalid_input());

        let missing = EngineError::LessonNotFound(LessonId::new("l-9"));
        assert!(missing.is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = EngineError::ProgressRegression {
            lesson: LessonId::new("l-1"),
            from: 60,
            to: 40,
        };
        assert_eq!(
            err.to_string(),
            "progress for l-1 cannot decrease: 60% -> 40%"
        );
    }
}
