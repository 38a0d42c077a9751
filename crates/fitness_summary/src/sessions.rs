//! Session-based derivation over structured workout sessions.

use std::collections::{HashMap, HashSet};

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::dates::parse_timestamp;
use crate::estimate::{SessionEstimate, estimate_session};
use crate::types::SessionRecord;

/// Placeholder for unnamed sessions (product UI language).
pub const DEFAULT_SESSION_NAME: &str = "Séance";

/// Everything the structured session list alone can say about a user.
/// Intermediate result, consumed by the reconciler.
#[derive(Clone, Debug, Default)]
pub struct SessionDerived {
    pub total_sessions: u32,
    pub last_session_name: Option<String>,
    pub last_session_at: Option<NaiveDateTime>,
    pub last_session_duration_min: Option<f64>,
    pub last_session_calories: Option<f64>,
    pub last_session_exercises: Vec<String>,
    pub workouts_count_7d: u32,
    pub calories_7d: Option<f64>,
    pub avg_duration_min: Option<f64>,
    pub avg_calories: Option<f64>,
    /// Per-muscle tallies weighted by set count.
    pub muscle_groups: HashMap<String, f64>,
    /// Distinct session days, for the streak.
    pub session_days: HashSet<NaiveDate>,
}

/// Effective duration and calories for one session: explicit values first,
/// the start/end span for duration, then the MET estimate.
pub fn session_metrics(session: &SessionRecord, body_weight_kg: Option<f64>) -> SessionEstimate {
    let estimate = estimate_session(&session.entries, body_weight_kg);
    let duration_minutes = session
        .duration_sec
        .filter(|d| d.is_finite() && *d > 0.0)
        .map(|d| (d / 60.0).round().max(1.0))
        .or_else(|| span_minutes(session))
        .or(estimate.duration_minutes);
    let calories_burned = session
        .calories
        .filter(|c| c.is_finite() && *c > 0.0)
        .or(estimate.calories_burned);
    SessionEstimate {
        duration_minutes,
        calories_burned,
    }
}

fn span_minutes(session: &SessionRecord) -> Option<f64> {
    let started = session.started_at.as_deref().and_then(parse_timestamp)?;
    let ended = session.ended_at.as_deref().and_then(parse_timestamp)?;
    let minutes = (ended - started).num_seconds() as f64 / 60.0;
    (minutes > 0.0).then(|| minutes.round().max(1.0))
}

fn session_timestamp(session: &SessionRecord) -> Option<NaiveDateTime> {
    session
        .started_at
        .as_deref()
        .or(session.created_at.as_deref())
        .and_then(parse_timestamp)
}

/// Fold the session list (ordered most-recent-first) into
/// [`SessionDerived`]. `body_weight_kg` feeds the estimator for sessions
/// without explicit calorie values.
pub fn derive_from_sessions(
    sessions: &[SessionRecord],
    body_weight_kg: Option<f64>,
    today: NaiveDate,
    window_days: u32,
) -> SessionDerived {
    let mut out = SessionDerived {
        total_sessions: sessions.len() as u32,
        ..Default::default()
    };
    let window_start = today
        .checked_sub_days(Days::new(u64::from(window_days)))
        .unwrap_or(today);

    let mut duration_sum = 0.0;
    let mut duration_count = 0u32;
    let mut calorie_sum = 0.0;
    let mut calorie_count = 0u32;
    let mut burned_7d: Option<f64> = None;

    for (index, session) in sessions.iter().enumerate() {
        let metrics = session_metrics(session, body_weight_kg);
        let ts = session_timestamp(session);
        let day = ts.map(|t| t.date());

        if index == 0 {
            out.last_session_name = Some(
                session
                    .name
                    .clone()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SESSION_NAME.to_string()),
            );
            out.last_session_at = ts;
            out.last_session_duration_min = metrics.duration_minutes;
            out.last_session_calories = metrics.calories_burned;
            out.last_session_exercises = session
                .entries
                .iter()
                .filter_map(|e| e.exercise_name.clone())
                .collect();
        }

        if let Some(d) = day {
            out.session_days.insert(d);
            if d >= window_start && d <= today {
                out.workouts_count_7d += 1;
                if let Some(kcal) = metrics.calories_burned {
                    *burned_7d.get_or_insert(0.0) += kcal;
                }
            }
        }
        if let Some(minutes) = metrics.duration_minutes {
            duration_sum += minutes;
            duration_count += 1;
        }
        if let Some(kcal) = metrics.calories_burned {
            calorie_sum += kcal;
            calorie_count += 1;
        }

        for entry in &session.entries {
            let weight = entry.sets.len().max(1) as f64;
            for muscle in &entry.muscles {
                let key = muscle.trim().to_lowercase();
                if !key.is_empty() {
                    *out.muscle_groups.entry(key).or_insert(0.0) += weight;
                }
            }
        }
    }

    if duration_count > 0 {
        out.avg_duration_min = Some((duration_sum / f64::from(duration_count)).round());
    }
    if calorie_count > 0 {
        out.avg_calories = Some((calorie_sum / f64::from(calorie_count)).round());
    }
    out.calories_7d = burned_7d;

    out
}
