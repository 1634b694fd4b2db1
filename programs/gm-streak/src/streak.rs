use crate::constants::SECONDS_PER_DAY;
use crate::state::UserRecord;

/// Result of applying one GM to a user's record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakUpdate {
    pub record: UserRecord,
    /// `current_streak` just passed the previous `longest_streak`
    pub new_longest: bool,
}

/// Whole days between two timestamps, truncated toward zero.
/// A clock that moved backwards counts as zero days.
pub fn elapsed_whole_days(last_event_time: i64, event_time: i64) -> i64 {
    event_time.saturating_sub(last_event_time).max(0) / SECONDS_PER_DAY
}

/// Apply a GM at `event_time` to `prior`.
///
/// - first GM: streak and longest streak start at 1
/// - gap of at most `streak_gap_days` whole days: streak + 1, longest raised if passed
/// - longer gap: streak back to 1, longest untouched
///
/// `total_events` is always incremented and `last_event_time` set to `event_time`.
pub fn compute_streak(prior: &UserRecord, event_time: i64, streak_gap_days: i64) -> StreakUpdate {
    let mut record = prior.clone();
    let mut new_longest = false;

    if !prior.has_events() {
        record.current_streak = 1;
        record.longest_streak = 1;
    } else {
        let elapsed_days = elapsed_whole_days(prior.last_event_time, event_time);

        #[cfg(feature = "verbose")]
        anchor_lang::prelude::msg!("Streak: user={} elapsed_days={}", prior.user, elapsed_days);

        if elapsed_days <= streak_gap_days {
            record.current_streak = record.current_streak.saturating_add(1);
            if record.current_streak > record.longest_streak {
                record.longest_streak = record.current_streak;
                new_longest = true;
            }
        } else {
            record.current_streak = 1;
        }
    }

    record.total_events = record.total_events.saturating_add(1);
    record.last_event_time = event_time;

    StreakUpdate { record, new_longest }
}
