//! Quiz questions, attempts, and results
//!
//! A `QuizAttempt` is ephemeral: it exists for one submission, produces a
//! `QuizResult`, and is discarded. The engine retains nothing about it.

use serde::{Deserialize, Serialize};

/// One multiple-choice question from a lesson's quiz.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_answer: usize,
    /// Optional rationale shown after answering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuizQuestion {
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            correct_answer,
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }
}

/// A learner's selected answers, one slot per question. `None` means the
/// question was left unanswered and counts as incorrect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub answers: Vec<Option<usize>>,
}

impl QuizAttempt {
    pub fn new(answers: Vec<Option<usize>>) -> Self {
        Self { answers }
    }

    /// Convenience for tests and callers with fully answered quizzes.
    pub fn answered(answers: impl IntoIterator<Item = usize>) -> Self {
        Self {
            answers: answers.into_iter().map(Some).collect(),
        }
    }
}

/// The outcome of scoring one quiz attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    /// Percentage score, 0..=100.
    pub score: u8,
    /// Star tier, 0..=3.
    pub stars: u8,
    /// Questions answered correctly.
    pub correct: usize,
    /// Total questions in the quiz.
    pub total: usize,
}

impl QuizResult {
    pub fn is_perfect(&self) -> bool {
        self.score == 100
    }

    pub fn is_passing(&self) -> bool {
        self.stars > 0
    }
}
