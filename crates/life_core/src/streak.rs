use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};

use crate::model::{HabitLog, HabitType};

/// The log at position `i` (newest first) must be dated `today - i` and be a
/// success; the first mismatch ends the streak. No gap filling.
pub fn current_streak(habit_type: HabitType, logs: &[HabitLog], today: NaiveDate) -> u32 {
    let mut ordered: Vec<&HabitLog> = logs.iter().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));

    let mut streak = 0;
    for (offset, log) in ordered.into_iter().enumerate() {
        let Some(expected) = today.checked_sub_days(Days::new(offset as u64)) else {
            break;
        };
        if log.date != expected || !habit_type.is_success(log.completed) {
            break;
        }
        streak += 1;
    }
    streak
}

pub fn longest_streak(habit_type: HabitType, logs: &[HabitLog]) -> u32 {
    let days: BTreeSet<NaiveDate> = logs
        .iter()
        .filter(|log| habit_type.is_success(log.completed))
        .map(|log| log.date)
        .collect();

    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for day in days {
        run = match previous.and_then(|prev| prev.succ_opt()) {
            Some(next) if next == day => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log(date: NaiveDate, completed: bool) -> HabitLog {
        HabitLog {
            id: format!("log-{date}"),
            user_id: "user".into(),
            habit_id: "habit".into(),
            date,
            completed,
        }
    }

    #[test]
    fn stops_at_first_gap() {
        let today = day(2025, 10, 20);
        let logs = vec![
            log(today - Duration::days(3), true),
            log(today, true),
            log(today - Duration::days(1), true),
        ];
        assert_eq!(current_streak(HabitType::Do, &logs, today), 2);
    }

    #[test]
    fn dont_habit_counts_abstention_as_success() {
        let today = day(2025, 10, 20);
        assert_eq!(current_streak(HabitType::Dont, &[log(today, false)], today), 1);
        assert_eq!(current_streak(HabitType::Dont, &[log(today, true)], today), 0);
    }

    #[test]
    fn failed_day_ends_the_run() {
        let today = day(2025, 10, 20);
        let logs = vec![
            log(today, true),
            log(today - Duration::days(1), false),
            log(today - Duration::days(2), true),
        ];
        assert_eq!(current_streak(HabitType::Do, &logs, today), 1);
    }

    #[test]
    fn missing_today_yields_zero() {
        let today = day(2025, 10, 20);
        let logs = vec![
            log(today - Duration::days(1), true),
            log(today - Duration::days(2), true),
        ];
        assert_eq!(current_streak(HabitType::Do, &logs, today), 0);
    }

    #[test]
    fn duplicate_day_breaks_offset_matching() {
        let today = day(2025, 10, 20);
        let logs = vec![log(today, true), log(today, true), log(today - Duration::days(1), true)];
        assert_eq!(current_streak(HabitType::Do, &logs, today), 1);
    }

    #[test]
    fn spans_month_boundaries() {
        let today = day(2025, 3, 1);
        let logs = vec![log(day(2025, 2, 27), true), log(day(2025, 2, 28), true), log(today, true)];
        assert_eq!(current_streak(HabitType::Do, &logs, today), 3);
    }

    #[test]
    fn empty_history_has_no_streak() {
        let today = day(2025, 10, 20);
        assert_eq!(current_streak(HabitType::Do, &[], today), 0);
        assert_eq!(longest_streak(HabitType::Do, &[]), 0);
    }

    #[test]
    fn longest_streak_scans_whole_history() {
        let logs = vec![
            log(day(2025, 1, 1), true),
            log(day(2025, 1, 2), true),
            log(day(2025, 1, 3), true),
            log(day(2025, 1, 4), false),
            log(day(2025, 1, 5), true),
            log(day(2025, 1, 6), true),
        ];
        assert_eq!(longest_streak(HabitType::Do, &logs), 3);
        assert_eq!(longest_streak(HabitType::Dont, &logs), 1);
    }

    #[test]
    fn stops_at_calendar_start() {
        let logs = vec![log(NaiveDate::MIN, true), log(NaiveDate::MIN, true)];
        assert_eq!(current_streak(HabitType::Do, &logs, NaiveDate::MIN), 1);

        let today = NaiveDate::MIN + Duration::days(1);
        let logs = vec![log(NaiveDate::MIN, true), log(today, true), log(today, true)];
        assert_eq!(current_streak(HabitType::Do, &logs, today), 1);
    }
}
