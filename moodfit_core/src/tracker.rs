//! Progress tracker: recomputes streaks, weekly consistency and
//! aggregate totals from the full completion history.
//!
//! Progress is always re-derived from the log rather than patched
//! incrementally; only the longest streak is carried forward as a
//! running maximum.

use crate::{HistoryEntry, Progress};
use chrono::{DateTime, Duration, Utc};

/// Sessions per week that count as 100% consistency
const WEEKLY_TARGET_SESSIONS: u32 = 4;

/// Recompute progress after a completed session
///
/// `history` holds every prior completion for the user; the function
/// appends `just_completed` itself, so the caller passes the log as it
/// stood before this session. `now` anchors the trailing-7-day window.
pub fn record_completion(
    history: &[HistoryEntry],
    just_completed: &HistoryEntry,
    previous_longest_streak: u32,
    now: DateTime<Utc>,
) -> Progress {
    let mut full: Vec<&HistoryEntry> = history.iter().collect();
    full.push(just_completed);

    let current_streak = compute_streak(&mut full);
    let weekly_consistency = weekly_consistency(&full, now);
    let total_minutes = full.iter().map(|e| e.duration_minutes).sum();

    let progress = Progress {
        user_id: just_completed.user_id,
        total_workouts: full.len() as u32,
        total_minutes,
        current_streak,
        longest_streak: previous_longest_streak.max(current_streak),
        weekly_consistency,
        last_workout_date: Some(just_completed.completed_at),
        difficulty_level: just_completed.difficulty,
    };

    tracing::info!(
        "Progress for {}: {} workouts, streak {} (longest {}), consistency {}%",
        progress.user_id,
        progress.total_workouts,
        progress.current_streak,
        progress.longest_streak,
        progress.weekly_consistency
    );

    progress
}

/// Count consecutive calendar days with a session, anchored at the
/// most recent entry
///
/// Sorts descending by completion time and walks backward; a whole-day
/// gap of exactly 1 extends the streak, any other gap terminates it.
/// A 0-day gap (two sessions on the same day) terminates too - the
/// walk stops at the first non-1-day gap, whatever it is.
fn compute_streak(entries: &mut Vec<&HistoryEntry>) -> u32 {
    entries.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    let mut streak = 1u32;
    let mut last = match entries.first() {
        Some(entry) => entry.completed_at,
        None => return 1,
    };

    for entry in entries.iter().skip(1) {
        let gap_days = (last - entry.completed_at).num_days();
        if gap_days == 1 {
            streak += 1;
            last = entry.completed_at;
        } else {
            break;
        }
    }

    streak
}

/// Percentage of the 4-session weekly target met in the trailing
/// 7 days, clamped to 100
fn weekly_consistency(entries: &[&HistoryEntry], now: DateTime<Utc>) -> u8 {
    let cutoff = now - Duration::days(7);
    let recent = entries
        .iter()
        .filter(|e| e.completed_at >= cutoff)
        .count() as u32;

    (recent * 100 / WEEKLY_TARGET_SESSIONS).min(100) as u8
}
