//! Inbound activities: the facts the engine processes

use crate::{LessonId, QuizAttempt};
use serde::{Deserialize, Serialize};

/// One inbound domain event for a learner. The engine's single entry point
/// consumes exactly one of these per call.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Activity {
    /// The learner opened a lesson.
    LessonStart { lesson_id: LessonId },
    /// The learner advanced within an in-progress lesson.
    ProgressTick { lesson_id: LessonId, percent: u8 },
    /// The learner submitted a lesson's quiz.
    QuizSubmit {
        lesson_id: LessonId,
        attempt: QuizAttempt,
    },
    /// Study time elapsed.
    StudyTimeTick { minutes: u32 },
}

impl Activity {
    /// The lesson this activity targets, if any.
    pub fn lesson_id(&self) -> Option<&LessonId> {
        match self {
            Self::LessonStart { lesson_id }
            | Self::ProgressTick { lesson_id, .. }
            | Self::QuizSubmit { lesson_id, .. } => Some(lesson_id),
            Self::StudyTimeTick { .. } => None,
        }
    }

    /// Whether this activity counts toward the learner's daily streak.
    /// Passive timers do not extend a learning day.
    pub fn qualifies_for_streak(&self) -> bool {
        matches!(self, Self::LessonStart { .. } | Self::QuizSubmit { .. })
    }
}

/// Leaderboard timeframe. Monthly cohorts arrive pre-windowed; the ranker
/// does no date arithmetic of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Weekly,
    Monthly,
    AllTime,
}
