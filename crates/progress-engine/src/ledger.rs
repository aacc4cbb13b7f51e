//! Progress ledger: the only writer of `ProgressState`
//!
//! Every mutation is total over valid input and returns its effects as
//! gamification events appended to the caller's event list. Level-ups are
//! applied in a loop so one large XP grant can clear several levels at
//! once.

use chrono::NaiveDate;
use progress_types::{EngineError, EngineResult, GamificationEvent, ProgressState};
use tracing::{debug, info};

/// Applies XP, streak, study-time, and weekly-goal deltas to a learner's
/// progress state. Stateless; the state travels with the learner record.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProgressLedger;

impl ProgressLedger {
    pub fn new() -> Self {
        Self
    }

    /// Credit XP and level up as many times as the new total allows.
    /// Emits `XpGained` for a non-zero grant, then one `LevelUp` per level
    /// gained, in order.
    pub fn apply_xp(
        &self,
        state: &mut ProgressState,
        amount: u32,
        events: &mut Vec<GamificationEvent>,
    ) {
        if amount == 0 {
            return;
        }
        state.xp += amount;
        state.total_xp += u64::from(amount);
        state.weekly_xp += amount;
        events.push(GamificationEvent::XpGained { amount });

        while state.xp >= state.xp_to_next_level {
            state.xp -= state.xp_to_next_level;
            state.level += 1;
            state.xp_to_next_level = ProgressState::threshold_for(state.level);
            info!(level = state.level, "Level up");
            events.push(GamificationEvent::LevelUp {
                new_level: state.level,
            });
        }
    }

    /// Record study minutes. Additive; the weekly reset zeroes the counter.
    pub fn record_study_time(&self, state: &mut ProgressState, minutes: u32) {
        state.study_minutes += minutes;
        debug!(minutes, total = state.study_minutes, "Study time recorded");
    }

    /// Count a lesson completion toward the weekly goal. The raw counter
    /// may exceed the goal; clamping is left to presentation.
    pub fn record_weekly_lesson_completion(&self, state: &mut ProgressState) {
        state.weekly_progress += 1;
    }

    /// Update the daily streak for a qualifying activity on `date`.
    ///
    /// Exactly one day after the last activity extends the streak; the
    /// same day repeated changes nothing; a longer gap resets the streak
    /// to one. Backdating is rejected.
    pub fn update_streak(
        &self,
        state: &mut ProgressState,
        date: NaiveDate,
        events: &mut Vec<GamificationEvent>,
    ) -> EngineResult<()> {
        match state.last_activity_date {
            Some(last) if date < last => {
                return Err(EngineError::BackdatedActivity { last, given: date });
            }
            Some(last) if date == last => {}
            Some(last) if (date - last).num_days() == 1 => {
                state.streak_days += 1;
                state.last_activity_date = Some(date);
                info!(days = state.streak_days, "Streak extended");
                events.push(GamificationEvent::StreakExtended {
                    days: state.streak_days,
                });
            }
            Some(_) => {
                state.streak_days = 1;
                state.last_activity_date = Some(date);
                info!("Streak reset");
                events.push(GamificationEvent::StreakReset);
            }
            None => {
                state.streak_days = 1;
                state.last_activity_date = Some(date);
                events.push(GamificationEvent::StreakExtended { days: 1 });
            }
        }
        Ok(())
    }

    /// Zero the weekly counters. Week-boundary detection is external; the
    /// ledger only exposes the reset.
    pub fn reset_weekly(&self, state: &mut ProgressState) {
        state.weekly_progress = 0;
        state.weekly_xp = 0;
        state.study_minutes = 0;
        debug!("Weekly counters reset");
    }
}
