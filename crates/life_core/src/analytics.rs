use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, MAX_TREND_WINDOW_DAYS};
use crate::model::{EntityId, Habit, HabitLog, HabitStatus};
use crate::streak;

pub fn completion_rate(successful: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rate = (successful as f64 / total as f64 * 100.0).round();
    rate.clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    pub habit_id: EntityId,
    pub title: String,
    pub total_logs: usize,
    pub successful_logs: usize,
    pub completion_rate: u8,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyCompletion {
    pub date: NaiveDate,
    pub completion_rate: u8,
    pub total_logs: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HabitOverview {
    pub total_habits: usize,
    pub active_habits: usize,
    pub overall_completion_rate: u8,
    pub best_habit: Option<HabitStats>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HabitAnalytics {
    pub overview: HabitOverview,
    pub per_habit: Vec<HabitStats>,
    pub trend: Vec<DailyCompletion>,
}

pub fn habit_stats(habits: &[Habit], logs: &[HabitLog], today: NaiveDate) -> Vec<HabitStats> {
    let mut by_habit: HashMap<&str, Vec<HabitLog>> = HashMap::new();
    for log in logs {
        by_habit.entry(log.habit_id.as_str()).or_default().push(log.clone());
    }

    habits
        .iter()
        .map(|habit| {
            let own = by_habit.get(habit.id.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            let successful = own
                .iter()
                .filter(|log| habit.habit_type.is_success(log.completed))
                .count();
            HabitStats {
                habit_id: habit.id.clone(),
                title: habit.title.clone(),
                total_logs: own.len(),
                successful_logs: successful,
                completion_rate: completion_rate(successful, own.len()),
                current_streak: streak::current_streak(habit.habit_type, own, today),
                longest_streak: streak::longest_streak(habit.habit_type, own),
            }
        })
        .collect()
}

pub fn best_habit(stats: &[HabitStats]) -> Option<&HabitStats> {
    stats.iter().fold(None, |best: Option<&HabitStats>, candidate| match best {
        Some(current) if current.completion_rate >= candidate.completion_rate => Some(current),
        _ => Some(candidate),
    })
}

/// Logs whose habit is unknown are skipped; their success cannot be interpreted.
pub fn daily_trend(
    habits: &[Habit],
    logs: &[HabitLog],
    today: NaiveDate,
    window_days: u32,
) -> Vec<DailyCompletion> {
    let types: HashMap<&str, _> = habits
        .iter()
        .map(|habit| (habit.id.as_str(), habit.habit_type))
        .collect();

    let mut per_day: HashMap<NaiveDate, (usize, usize)> = HashMap::new();
    for log in logs {
        let Some(habit_type) = types.get(log.habit_id.as_str()) else {
            continue;
        };
        let entry = per_day.entry(log.date).or_default();
        entry.0 += 1;
        if habit_type.is_success(log.completed) {
            entry.1 += 1;
        }
    }

    // days before the start of the calendar are left out of the series
    (0..window_days.clamp(1, MAX_TREND_WINDOW_DAYS))
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| {
            let (total, successful) = per_day.get(&date).copied().unwrap_or_default();
            DailyCompletion {
                date,
                completion_rate: completion_rate(successful, total),
                total_logs: total,
            }
        })
        .collect()
}

pub fn analyze_habits(
    habits: &[Habit],
    logs: &[HabitLog],
    today: NaiveDate,
    config: &EngineConfig,
) -> HabitAnalytics {
    let per_habit = habit_stats(habits, logs, today);
    let total_logs: usize = per_habit.iter().map(|stats| stats.total_logs).sum();
    let successful_logs: usize = per_habit.iter().map(|stats| stats.successful_logs).sum();

    let overview = HabitOverview {
        total_habits: habits.len(),
        active_habits: habits
            .iter()
            .filter(|habit| habit.status == HabitStatus::Active)
            .count(),
        overall_completion_rate: completion_rate(successful_logs, total_logs),
        best_habit: best_habit(&per_habit).cloned(),
    };
    let trend = daily_trend(habits, logs, today, config.trend_window_days);

    tracing::debug!(
        habits = habits.len(),
        logs = logs.len(),
        overall = overview.overall_completion_rate,
        "habit analytics computed"
    );

    HabitAnalytics {
        overview,
        per_habit,
        trend,
    }
}
