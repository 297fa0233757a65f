//! Consecutive-day completion streaks.
//!
//! A streak is the number of consecutive local calendar days with at least
//! one completion. It grows on the first completion of each new consecutive
//! day and dies once a full day passes without one.

use chrono::{Days, NaiveDate};

use crate::stats::UserStats;

/// Update the streak for a completion on `day`. Repeat completions on the
/// same day leave it untouched; the day after the last completion extends
/// it; anything else starts over at 1.
pub(crate) fn record_completion(stats: &mut UserStats, day: NaiveDate) {
    match stats.last_completion_day {
        Some(last) if last == day => {}
        Some(last) if last.succ_opt() == Some(day) => stats.streak += 1,
        _ => stats.streak = 1,
    }
    stats.longest_streak = stats.longest_streak.max(stats.streak);
    stats.last_completion_day = Some(day);
}

/// Reset a streak that lapsed: the streak is dead once `today` is more than
/// one day past the last completion (yesterday's streak can still be
/// extended today). Returns whether anything changed.
pub fn apply_lapse(stats: &mut UserStats, today: NaiveDate) -> bool {
    if stats.streak == 0 {
        return false;
    }
    let lapsed = match stats.last_completion_day {
        Some(last) => last.checked_add_days(Days::new(1)).is_some_and(|d| d < today),
        None => true,
    };
    if lapsed {
        stats.streak = 0;
    }
    lapsed
}

/// The `streak` most recent calendar days ending at `today`, oldest first.
/// Presentation helper for calendar highlighting; carries no state.
pub fn highlight_days(today: NaiveDate, streak: u32) -> Vec<NaiveDate> {
    (0..streak)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back as u64)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn first_completion_starts_a_streak() {
        let mut stats = UserStats::default();
        record_completion(&mut stats, day(10));
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.last_completion_day, Some(day(10)));
    }

    #[test]
    fn same_day_completions_do_not_stack() {
        let mut stats = UserStats::default();
        record_completion(&mut stats, day(10));
        record_completion(&mut stats, day(10));
        assert_eq!(stats.streak, 1);
    }

    #[test]
    fn consecutive_days_extend() {
        let mut stats = UserStats::default();
        record_completion(&mut stats, day(10));
        record_completion(&mut stats, day(11));
        record_completion(&mut stats, day(12));
        assert_eq!(stats.streak, 3);
        assert_eq!(stats.longest_streak, 3);
    }

    #[test]
    fn a_gap_restarts_at_one_but_keeps_longest() {
        let mut stats = UserStats::default();
        record_completion(&mut stats, day(10));
        record_completion(&mut stats, day(11));
        record_completion(&mut stats, day(14));
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn lapse_resets_only_after_a_full_missed_day() {
        let mut stats = UserStats::default();
        record_completion(&mut stats, day(10));
        record_completion(&mut stats, day(11));

        // Next morning: streak still alive, can be extended today.
        assert!(!apply_lapse(&mut stats, day(12)));
        assert_eq!(stats.streak, 2);

        // A whole day passed with no completion.
        assert!(apply_lapse(&mut stats, day(13)));
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn lapse_on_zero_streak_is_a_no_op() {
        let mut stats = UserStats::default();
        assert!(!apply_lapse(&mut stats, day(10)));
    }

    #[test]
    fn highlight_days_run_backwards_from_today() {
        let days = highlight_days(day(12), 3);
        assert_eq!(days, vec![day(10), day(11), day(12)]);
        assert!(highlight_days(day(12), 0).is_empty());
    }
}
