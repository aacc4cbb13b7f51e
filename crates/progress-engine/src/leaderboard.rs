//! Leaderboard ranker: a deterministic total order over cohort snapshots
//!
//! Pure and total. The sort key follows the timeframe; ties break on
//! streak days, then on input order (the sort is stable), so the same
//! cohort always ranks identically. Ranks are unique sequential 1-based
//! numbers; ties do not share a rank.

use progress_types::{LeaderboardEntry, LeaderboardSnapshot, Timeframe};

/// Rank a cohort for a timeframe.
///
/// Weekly cohorts rank on `xp_weekly`; monthly and all-time rank on
/// `xp_total` (monthly snapshots arrive pre-windowed by the caller).
pub fn rank(snapshots: &[LeaderboardSnapshot], timeframe: Timeframe) -> Vec<LeaderboardEntry> {
    let mut ordered: Vec<LeaderboardSnapshot> = snapshots.to_vec();
    ordered.sort_by(|a, b| {
        sort_key(b, timeframe)
            .cmp(&sort_key(a, timeframe))
            .then(b.streak_days.cmp(&a.streak_days))
    });

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, snapshot)| LeaderboardEntry::from_snapshot(snapshot, i as u32 + 1))
        .collect()
}

fn sort_key(snapshot: &LeaderboardSnapshot, timeframe: Timeframe) -> u64 {
    match timeframe {
        Timeframe::Weekly => u64::from(snapshot.xp_weekly),
        Timeframe::Monthly | Timeframe::AllTime => snapshot.xp_total,
    }
}
