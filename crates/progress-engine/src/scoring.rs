//! Quiz scoring: answers in, score and star tier out
//!
//! Pure and total. Unanswered questions count as incorrect, an empty quiz
//! scores zero, and identical input always yields identical output so the
//! caller can retry submissions idempotently.

use progress_types::{QuizAttempt, QuizQuestion, QuizResult};

/// Score one quiz attempt against its questions.
///
/// An attempt shorter than the question list is treated as leaving the
/// trailing questions unanswered; length validation against the catalog
/// happens before scoring, at the engine boundary.
pub fn score(attempt: &QuizAttempt, questions: &[QuizQuestion]) -> QuizResult {
    let total = questions.len();
    if total == 0 {
        return QuizResult {
            score: 0,
            stars: 0,
            correct: 0,
            total: 0,
        };
    }

    let correct = questions
        .iter()
        .enumerate()
        .filter(|(i, q)| attempt.answers.get(*i).copied().flatten() == Some(q.correct_answer))
        .count();

    let score = ((correct as f64 / total as f64) * 100.0).round() as u8;
    QuizResult {
        score,
        stars: stars_for_score(score),
        correct,
        total,
    }
}

/// Star tier for a percentage score. Boundaries are inclusive lower bounds.
pub fn stars_for_score(score: u8) -> u8 {
    match score {
        90..=100 => 3,
        70..=89 => 2,
        50..=69 => 1,
        _ => 0,
    }
}
