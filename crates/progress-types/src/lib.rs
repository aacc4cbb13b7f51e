//! Domain types for the learner-progress and gamification engine
//!
//! # Key Concepts
//!
//! - **ProgressState**: a learner's XP, level, streak, and weekly-goal
//!   counters. Owned by the progress ledger and mutated only through
//!   defined operations, never directly.
//! - **Lesson / LessonInstance**: a catalog lesson (read-only) and the
//!   per-learner state of working through it (status, progress, stars).
//! - **QuizAttempt / QuizResult**: one ephemeral quiz submission and the
//!   score plus star tier it produced.
//! - **Achievement / AchievementUnlock**: a catalog-defined milestone and
//!   the at-most-once record of a learner unlocking it.
//! - **GamificationEvent**: the engine's only outward-facing product
//!   besides new state. An ordered list of plain immutable records the
//!   caller delivers however it likes.
//!
//! # Design Principles
//!
//! 1. The engine computes, callers deliver. No type here knows about
//!    toasts, notifications, or storage.
//! 2. Illegal states are unrepresentable: statuses, tiers, and activity
//!    kinds are closed enums, not strings.
//! 3. Everything is serde-serializable so callers can persist state and
//!    ship events over any transport.

#![deny(unsafe_code)]

mod achievement;
mod activity;
mod catalog;
mod errors;
mod events;
mod ids;
mod leaderboard;
mod learner;
mod lesson;
mod quiz;

pub use achievement::*;
pub use activity::*;
pub use catalog::*;
pub use errors::*;
pub use events::*;
pub use ids::*;
pub use leaderboard::*;
pub use learner::*;
pub use lesson::*;
pub use quiz::*;
