//! Workout classification over free-form log records.

use serde_json::Value;

use crate::signals::{BURNED_KEYS, DURATION_KEYS};
use crate::types::LogRecord;

/// Action-name fragments that mark a workout event, in every language the
/// product shipped in.
pub const WORKOUT_ACTION_PATTERNS: [&str; 12] = [
    "workout",
    "session",
    "training",
    "entrainement",
    "entraînement",
    "seance",
    "séance",
    "musculation",
    "cardio",
    "sport",
    "exercice",
    "exercise",
];

/// Best-effort duck typing: the log has no agreed schema, so a record counts
/// as a workout when its action name matches, or when its meta carries a
/// workout-shaped field (a burned-calorie alias, a duration alias, or a
/// `muscles` array). May misclassify; callers treat the result as a
/// documented heuristic, not a guarantee.
pub fn is_workout(record: &LogRecord) -> bool {
    let action = record.action.to_lowercase();
    if WORKOUT_ACTION_PATTERNS.iter().any(|p| action.contains(p)) {
        return true;
    }
    BURNED_KEYS.iter().any(|k| record.meta.contains_key(*k))
        || DURATION_KEYS.iter().any(|k| record.meta.contains_key(*k))
        || record.meta.get("muscles").is_some_and(Value::is_array)
}
