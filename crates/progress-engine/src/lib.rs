//! Learner-progress rules engine
//!
//! The pure state-transition and scoring core of the gamification system:
//! it decides *what happened* and *what it means* for XP, level, streak,
//! achievements, and leaderboard rank, independent of how any of it is
//! displayed, delivered, or persisted.
//!
//! # Key Concepts
//!
//! - **Scoring**: pure functions from quiz answers to a 0-100 score and a
//!   0-3 star tier.
//! - **Lesson state machine**: the allowed status transitions of one
//!   lesson instance, gating whether a quiz attempt is admissible.
//! - **Progress ledger**: the only writer of a learner's XP, level,
//!   streak, and weekly counters.
//! - **Achievement evaluator**: catalog-ordered, at-most-once unlock
//!   decisions.
//! - **Leaderboard ranker**: a deterministic total order over cohort
//!   snapshots.
//! - **`ProgressEngine`**: the facade wiring these together behind one
//!   `process_activity` entry point.
//!
//! # Design Principles
//!
//! 1. The engine computes; callers persist and deliver. No I/O happens
//!    here, and the clock is injected.
//! 2. Every `process_activity` call is all-or-nothing and returns the new
//!    state plus an ordered event list.
//! 3. Reprocessing the same activity is safe: scoring is deterministic,
//!    XP is credited once per first completion, and achievement unlocks
//!    are at-most-once.

#![deny(unsafe_code)]

pub mod achievements;
pub mod engine;
pub mod leaderboard;
pub mod ledger;
pub mod lesson_state;
pub mod scoring;

pub use achievements::{AchievementEvaluator, EvaluationContext};
pub use engine::{ActivityOutcome, LearnerRecord, ProgressEngine};
pub use leaderboard::rank;
pub use ledger::ProgressLedger;
pub use lesson_state::{CompletionOutcome, LessonStateMachine};
pub use scoring::{score, stars_for_score};
