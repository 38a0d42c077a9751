//! Consecutive-day workout streak.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};

/// Walk backward from `today`, one day at a time, while each day appears in
/// `workout_days`. Today itself must be present for a non-zero streak.
/// O(streak length) once the set is built.
pub fn current_streak(workout_days: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while workout_days.contains(&day) {
        streak += 1;
        let Some(previous) = day.checked_sub_days(Days::new(1)) else {
            break;
        };
        day = previous;
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset_back: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 24)
            .unwrap()
            .checked_sub_days(Days::new(offset_back))
            .unwrap()
    }

    #[test]
    fn three_consecutive_days_give_streak_three() {
        let days: HashSet<_> = [day(0), day(1), day(2)].into();
        assert_eq!(current_streak(&days, day(0)), 3);
    }

    #[test]
    fn gap_stops_the_walk() {
        let days: HashSet<_> = [day(0), day(1), day(3)].into();
        assert_eq!(current_streak(&days, day(0)), 2);
    }

    #[test]
    fn no_workout_today_means_zero() {
        let days: HashSet<_> = [day(1), day(2)].into();
        assert_eq!(current_streak(&days, day(0)), 0);
    }

    #[test]
    fn empty_set_means_zero() {
        assert_eq!(current_streak(&HashSet::new(), day(0)), 0);
    }
}
