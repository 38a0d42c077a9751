use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One free-form activity log entry.
///
/// Read-only input: the engine folds over records and never mutates them.
/// `meta` is an open bag of application-defined keys; the same concept can
/// appear under several legacy names depending on which feature wrote the
/// record (see the alias tables in [`crate::signals`]).
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub id: String,
    pub user_id: String,
    /// Feature-defined action name, e.g. `imc_calcule` or `workout_finished`.
    pub action: String,
    #[serde(default)]
    pub meta: Map<String, Value>,
    /// RFC3339, naive datetime, or date-only string.
    pub created_at: String,
}

/// One structured workout session, as stored by the session feature.
///
/// Lifecycle (create on finish, edit, delete) belongs to the storage layer;
/// the engine treats sessions as read-only input.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub ended_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Explicit duration in seconds, when the client reported one.
    #[serde(default)]
    pub duration_sec: Option<f64>,
    /// Explicit calories burned, when the client reported them.
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub entries: Vec<SessionEntry>,
}

/// Exercise category used by the session UI.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Muscu,
    Cardio,
    PoidsDuCorps,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ExerciseKind {
    /// Lowercase keyword fed to the MET lookup alongside the exercise name.
    pub fn keyword(self) -> &'static str {
        match self {
            ExerciseKind::Muscu => "muscu",
            ExerciseKind::Cardio => "cardio",
            ExerciseKind::PoidsDuCorps => "poids_du_corps",
            ExerciseKind::Unknown => "",
        }
    }
}

/// One exercise inside a session. Every field except `sets` is optional;
/// the estimator fills gaps with defaults rather than erroring.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntry {
    #[serde(default)]
    pub exercise_name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: ExerciseKind,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
    #[serde(default)]
    pub muscles: Vec<String>,
    #[serde(default)]
    pub reps: Option<f64>,
    #[serde(default)]
    pub rest_sec: Option<f64>,
    #[serde(default)]
    pub tempo_sec: Option<f64>,
    /// Explicit duration; skips the set-based estimate when present.
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    /// Explicit MET override; skips the name/type lookup when present.
    #[serde(default)]
    pub met: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetEntry {
    #[serde(default)]
    pub reps: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

/// The reconciled dashboard summary.
///
/// Field names are a stable contract for the dashboard consumer: evolution
/// is additive-only, existing names are never repurposed. Every numeric
/// field is a finite number or null, never NaN.
#[derive(Clone, Debug, Default, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub latest_weight: Option<f64>,
    pub previous_weight: Option<f64>,
    pub initial_weight: Option<f64>,
    pub weight_change: Option<f64>,
    pub imc: Option<f64>,
    /// Day (YYYY-MM-DD) of the most recent weight signal.
    pub last_weight_date: Option<String>,
    pub daily_calories: Option<f64>,
    pub avg_daily_calories_7d: Option<f64>,
    pub calories_burned_week: Option<f64>,
    pub workouts_count_7d: u32,
    pub total_sessions: u32,
    pub avg_workout_duration_min: Option<f64>,
    pub avg_calories_per_workout: Option<f64>,
    /// Consecutive workout days counting backward from today.
    pub streak_days: u32,
    /// Naive datetime (YYYY-MM-DDTHH:MM:SS) of the most recent workout.
    pub last_workout_at: Option<String>,
    pub last_session_name: Option<String>,
    pub last_session_duration_min: Option<f64>,
    pub last_session_calories: Option<f64>,
    pub last_session_exercises: Vec<String>,
    /// Weighted per-muscle tallies; empty when no session data is available.
    pub muscle_groups: HashMap<String, f64>,
    /// False when the session source failed and the summary degraded to
    /// log-only derivation.
    pub sessions_available: bool,
}
