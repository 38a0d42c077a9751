//! Log-based derivation: folds the full free-form history into weight,
//! calorie, and workout aggregates.

use std::collections::{HashMap, HashSet};

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::classify::is_workout;
use crate::dates::parse_timestamp;
use crate::signals;
use crate::types::LogRecord;

/// Everything the free-form log alone can say about a user. Intermediate
/// result, consumed by the reconciler.
#[derive(Clone, Debug, Default)]
pub struct HistoryDerived {
    /// Oldest weight signal in the whole log.
    pub initial_weight: Option<f64>,
    /// Most recent weight signal.
    pub latest_weight: Option<f64>,
    /// Next distinct weight after the latest one, scanning toward the past.
    pub previous_weight: Option<f64>,
    /// `latest_weight - initial_weight`, only when both exist.
    pub weight_change: Option<f64>,
    pub last_weight_date: Option<NaiveDateTime>,
    pub imc: Option<f64>,
    /// Most recent daily-intake signal.
    pub daily_calories: Option<f64>,
    /// Mean of one intake value per distinct day inside the window; the
    /// first (most recent) value seen for a day wins.
    pub avg_daily_calories_7d: Option<f64>,
    /// All workout-classified records, not windowed.
    pub workouts_total: u32,
    pub workouts_count_7d: u32,
    /// Sum of burned-calorie signals on workout records inside the window.
    pub calories_7d: Option<f64>,
    pub avg_workout_duration_min: Option<f64>,
    pub avg_calories_per_workout: Option<f64>,
    pub last_workout_at: Option<NaiveDateTime>,
    /// Free-form descriptors of the most recent workout record; reconciler
    /// fallbacks when no structured session is available.
    pub last_workout_label: Option<String>,
    pub last_workout_duration_min: Option<f64>,
    pub last_workout_calories: Option<f64>,
    /// Distinct workout days over the whole log, for the streak.
    pub workout_days: HashSet<NaiveDate>,
}

/// Fold the log (ordered most-recent-first) into [`HistoryDerived`].
///
/// Window aggregates cover `[today - window_days, today]` at day
/// granularity; the averages over workout records are deliberately not
/// windowed.
pub fn derive_from_history(
    records: &[LogRecord],
    today: NaiveDate,
    window_days: u32,
) -> HistoryDerived {
    let mut out = HistoryDerived::default();
    let window_start = today
        .checked_sub_days(Days::new(u64::from(window_days)))
        .unwrap_or(today);

    let mut latest_height: Option<f64> = None;
    let mut bmi_alias: Option<f64> = None;
    let mut intake_by_day: HashMap<NaiveDate, f64> = HashMap::new();
    let mut burned_7d: Option<f64> = None;
    let mut duration_sum = 0.0;
    let mut duration_count = 0u32;
    let mut kcal_sum = 0.0;
    let mut kcal_count = 0u32;

    for record in records {
        let day = parse_timestamp(&record.created_at).map(|ts| ts.date());
        let in_window = day.is_some_and(|d| d >= window_start && d <= today);

        if out.latest_weight.is_none() {
            if let Some(weight) = signals::pick_weight(&record.meta) {
                out.latest_weight = Some(weight);
                out.last_weight_date = parse_timestamp(&record.created_at);
            }
        } else if out.previous_weight.is_none()
            && let Some(weight) = signals::pick_weight(&record.meta)
            && Some(weight) != out.latest_weight
        {
            out.previous_weight = Some(weight);
        }
        if latest_height.is_none() {
            latest_height = signals::pick_height_cm(&record.meta);
        }
        if bmi_alias.is_none() {
            bmi_alias = signals::pick_imc(&record.meta);
        }
        if out.daily_calories.is_none() {
            out.daily_calories = signals::pick_daily_calories(&record.meta);
        }
        if in_window
            && let Some(intake) = signals::pick_daily_calories(&record.meta)
            && let Some(d) = day
        {
            // first value per day wins; same-day duplicates must not
            // inflate the average
            intake_by_day.entry(d).or_insert(intake);
        }

        if !is_workout(record) {
            continue;
        }

        out.workouts_total += 1;
        if let Some(d) = day {
            out.workout_days.insert(d);
        }
        if out.last_workout_label.is_none() {
            out.last_workout_label = Some(record.action.clone());
            out.last_workout_duration_min = signals::pick_duration_minutes(&record.meta);
            out.last_workout_calories = signals::pick_calories_burned(&record.meta);
        }
        if let Some(ts) = workout_timestamp(record)
            && out.last_workout_at.is_none_or(|current| ts > current)
        {
            out.last_workout_at = Some(ts);
        }
        if let Some(minutes) = signals::pick_duration_minutes(&record.meta) {
            duration_sum += minutes;
            duration_count += 1;
        }
        if let Some(kcal) = signals::pick_calories_burned(&record.meta) {
            kcal_sum += kcal;
            kcal_count += 1;
            if in_window {
                *burned_7d.get_or_insert(0.0) += kcal;
            }
        }
        if in_window {
            out.workouts_count_7d += 1;
        }
    }

    // The list is most-recent-first, so the baseline weight sits at the tail.
    out.initial_weight = records
        .iter()
        .rev()
        .find_map(|r| signals::pick_weight(&r.meta));

    if let (Some(latest), Some(initial)) = (out.latest_weight, out.initial_weight) {
        out.weight_change = Some(latest - initial);
    }
    out.imc = match (out.latest_weight, latest_height) {
        (Some(weight), Some(height)) => {
            let meters = height / 100.0;
            Some(((weight / (meters * meters)) * 10.0).round() / 10.0)
        }
        _ => bmi_alias,
    };
    if !intake_by_day.is_empty() {
        let sum: f64 = intake_by_day.values().sum();
        out.avg_daily_calories_7d = Some((sum / intake_by_day.len() as f64).round());
    }
    if duration_count > 0 {
        out.avg_workout_duration_min = Some((duration_sum / f64::from(duration_count)).round());
    }
    if kcal_count > 0 {
        out.avg_calories_per_workout = Some((kcal_sum / f64::from(kcal_count)).round());
    }
    out.calories_7d = burned_7d;

    out
}

/// Timestamp of a workout record: `endedAt`/`startedAt` from meta when
/// present, otherwise the record's own creation time.
fn workout_timestamp(record: &LogRecord) -> Option<NaiveDateTime> {
    ["endedAt", "startedAt"]
        .iter()
        .find_map(|k| {
            record
                .meta
                .get(*k)
                .and_then(Value::as_str)
                .and_then(parse_timestamp)
        })
        .or_else(|| parse_timestamp(&record.created_at))
}
