//! The content catalog: lessons and achievements
//!
//! External configuration data the engine reads but never authors.
//! Achievement iteration order is the catalog's insertion order; the
//! evaluator relies on this for deterministic event emission.

use crate::{Achievement, AchievementId, Lesson, LessonId};
use serde::{Deserialize, Serialize};

/// The lesson and achievement catalog for one deployment.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    lessons: Vec<Lesson>,
    achievements: Vec<Achievement>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lesson(mut self, lesson: Lesson) -> Self {
        self.lessons.push(lesson);
        self
    }

    pub fn with_achievement(mut self, achievement: Achievement) -> Self {
        self.achievements.push(achievement);
        self
    }

    pub fn lesson(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|l| &l.id == id)
    }

    pub fn achievement(&self, id: &AchievementId) -> Option<&Achievement> {
        self.achievements.iter().find(|a| &a.id == id)
    }

    /// Lessons in catalog order.
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Achievements in catalog order. Evaluation walks this order.
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }
}
