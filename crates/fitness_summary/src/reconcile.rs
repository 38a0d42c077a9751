//! Precedence merge of the two derivations into the dashboard summary.
//!
//! The policy is explicit, not "last writer wins": sessions are a
//! superset/refinement of log entries, so count-like and sum-like fields
//! never regress when the richer source appears, and descriptive fields
//! prefer structured session data with free-form fallbacks.

use chrono::NaiveDate;

use crate::dates::format_timestamp;
use crate::history::HistoryDerived;
use crate::sessions::SessionDerived;
use crate::streak::current_streak;
use crate::types::Summary;

/// State of the session source, surfaced instead of a silent empty
/// fallback so degradation is visible to the reconciler and its callers.
#[derive(Clone, Debug, Default)]
pub enum SessionsOutcome {
    Available(SessionDerived),
    #[default]
    Unavailable,
}

impl SessionsOutcome {
    pub fn as_available(&self) -> Option<&SessionDerived> {
        match self {
            SessionsOutcome::Available(derived) => Some(derived),
            SessionsOutcome::Unavailable => None,
        }
    }
}

/// Merge the two partial derivations under the precedence policy.
///
/// - Single-source fields (weights, IMC, intake) come from the log deriver.
/// - Count-like and calorie-sum fields take the maximum of both sources.
/// - Last-session descriptors prefer session data, falling back to what the
///   log inferred from free-form fields.
/// - Muscle tallies exist only when sessions are available.
/// - The streak walks the union of both sources' workout days.
pub fn reconcile(
    history: &HistoryDerived,
    sessions: &SessionsOutcome,
    today: NaiveDate,
) -> Summary {
    let sessions = sessions.as_available();

    let mut workout_days = history.workout_days.clone();
    if let Some(s) = sessions {
        workout_days.extend(s.session_days.iter().copied());
    }

    let last_workout_at = max_option(
        history.last_workout_at,
        sessions.and_then(|s| s.last_session_at),
    );

    Summary {
        latest_weight: history.latest_weight,
        previous_weight: history.previous_weight,
        initial_weight: history.initial_weight,
        weight_change: history.weight_change,
        imc: history.imc,
        last_weight_date: history
            .last_weight_date
            .map(|ts| ts.date().format("%Y-%m-%d").to_string()),
        daily_calories: history.daily_calories,
        avg_daily_calories_7d: history.avg_daily_calories_7d,
        calories_burned_week: max_option(
            history.calories_7d,
            sessions.and_then(|s| s.calories_7d),
        ),
        workouts_count_7d: history
            .workouts_count_7d
            .max(sessions.map_or(0, |s| s.workouts_count_7d)),
        total_sessions: history
            .workouts_total
            .max(sessions.map_or(0, |s| s.total_sessions)),
        avg_workout_duration_min: sessions
            .and_then(|s| s.avg_duration_min)
            .or(history.avg_workout_duration_min),
        avg_calories_per_workout: sessions
            .and_then(|s| s.avg_calories)
            .or(history.avg_calories_per_workout),
        streak_days: current_streak(&workout_days, today),
        last_workout_at: last_workout_at.map(format_timestamp),
        last_session_name: sessions
            .and_then(|s| s.last_session_name.clone())
            .or_else(|| history.last_workout_label.clone()),
        last_session_duration_min: sessions
            .and_then(|s| s.last_session_duration_min)
            .or(history.last_workout_duration_min),
        last_session_calories: sessions
            .and_then(|s| s.last_session_calories)
            .or(history.last_workout_calories),
        last_session_exercises: sessions
            .map(|s| s.last_session_exercises.clone())
            .unwrap_or_default(),
        muscle_groups: sessions.map(|s| s.muscle_groups.clone()).unwrap_or_default(),
        sessions_available: sessions.is_some(),
    }
}

fn max_option<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(x), Some(y)) => Some(if y > x { y } else { x }),
        (Some(x), None) => Some(x),
        (None, other) => other,
    }
}
