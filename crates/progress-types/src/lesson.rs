//! Catalog lessons and the per-learner lesson instance

use crate::{LessonId, QuizQuestion};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lesson difficulty band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        };
        write!(f, "{label}")
    }
}

/// A catalog lesson. Read-only to the engine; the catalog service authors
/// these.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub duration_minutes: u32,
    /// XP credited on first completion.
    pub xp_reward: u32,
    /// The quiz gating completion of this lesson.
    pub quiz: Vec<QuizQuestion>,
    /// Whether the lesson is available from the start (no prerequisites).
    pub starts_available: bool,
}

impl Lesson {
    pub fn new(id: impl Into<LessonId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: String::new(),
            difficulty: Difficulty::Beginner,
            duration_minutes: 0,
            xp_reward: 0,
            quiz: Vec::new(),
            starts_available: false,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn with_xp_reward(mut self, xp: u32) -> Self {
        self.xp_reward = xp;
        self
    }

    pub fn with_quiz(mut self, quiz: Vec<QuizQuestion>) -> Self {
        self.quiz = quiz;
        self
    }

    pub fn available_from_start(mut self) -> Self {
        self.starts_available = true;
        self
    }
}

/// Status of one learner's instance of a lesson.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
    /// Prerequisites not yet satisfied. No activity is admissible.
    Locked,
    /// Ready to start.
    Available,
    /// Started, not yet completed.
    InProgress,
    /// Completed. Terminal but revisitable: a retake can improve stars.
    Completed,
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Locked => "locked",
            Self::Available => "available",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        };
        write!(f, "{label}")
    }
}

/// Per learner-lesson pair state. Created lazily on first reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonInstance {
    pub lesson_id: LessonId,
    pub status: LessonStatus,
    /// Completion percentage, 0..=100. Forced to 100 on completion.
    pub progress_percent: u8,
    /// Stars earned on the best completion so far, 0..=3.
    pub stars_earned: u8,
}

impl LessonInstance {
    /// New instance for a lesson, `Locked` unless the catalog marks it
    /// initially available.
    pub fn new(lesson: &Lesson) -> Self {
        Self {
            lesson_id: lesson.id.clone(),
            status: if lesson.starts_available {
                LessonStatus::Available
            } else {
                LessonStatus::Locked
            },
            progress_percent: 0,
            stars_earned: 0,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == LessonStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_defaults_to_locked() {
        let lesson = Lesson::new("l-1", "Intro to Flow");
        let instance = LessonInstance::new(&lesson);
        assert_eq!(instance.status, LessonStatus::Locked);
        assert_eq!(instance.progress_percent, 0);
        assert_eq!(instance.stars_earned, 0);
    }

    #[test]
    fn test_instance_honors_starts_available() {
        let lesson = Lesson::new("l-1", "Intro to Flow").available_from_start();
        let instance = LessonInstance::new(&lesson);
        assert_eq!(instance.status, LessonStatus::Available);
    }

    #[test]
    fn test_lesson_builder() {
        let lesson = Lesson::new("l-2", "Smart Contracts 101")
            .with_category("blockchain")
            .with_difficulty(Difficulty::Intermediate)
            .with_duration_minutes(25)
            .with_xp_reward(250);
        assert_eq!(lesson.category, "blockchain");
        assert_eq!(lesson.difficulty, Difficulty::Intermediate);
        assert_eq!(lesson.xp_reward, 250);
        assert!(!lesson.starts_available);
    }
}
