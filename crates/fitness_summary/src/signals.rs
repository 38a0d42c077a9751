//! Signal extraction from the free-form `meta` bag.
//!
//! The log is written by many independent features that never agreed on a
//! schema, so each semantic signal is looked up through an ordered alias
//! table. Each table is a named constant: the precedence of every field is
//! declared once here, not re-derived per call site.

use serde_json::{Map, Value};

use crate::coerce::to_number;

/// Weight in kilograms, most specific alias first.
pub const WEIGHT_KEYS: [&str; 3] = ["poids", "weightKg", "weight"];

/// Height in centimeters.
pub const HEIGHT_KEYS: [&str; 3] = ["taille", "heightCm", "height"];

/// Daily calorie intake.
pub const INTAKE_KEYS: [&str; 3] = ["calorie", "dailyCalories", "caloriesDaily"];

/// Calories burned during a workout. The generic `calories` key comes last
/// because some older features also used it for intake.
pub const BURNED_KEYS: [&str; 4] = ["caloriesBurned", "kcalBurned", "kcal", "calories"];

/// Burned-specific aliases; used to veto the generic `calories` fallback in
/// [`pick_daily_calories`].
const BURNED_SPECIFIC_KEYS: [&str; 3] = ["caloriesBurned", "kcalBurned", "kcal"];

/// Workout duration in minutes. `durationText` carries values like "45 min".
pub const DURATION_KEYS: [&str; 3] = ["duration", "durationMinutes", "durationText"];

/// Precomputed body-mass index.
pub const BMI_KEYS: [&str; 2] = ["imc", "bmi"];

/// First alias that coerces to a finite number and passes `accept`, in
/// table order.
pub fn first_matching(
    meta: &Map<String, Value>,
    keys: &[&str],
    accept: impl Fn(f64) -> bool,
) -> Option<f64> {
    keys.iter()
        .find_map(|k| meta.get(*k).and_then(to_number).filter(|v| accept(*v)))
}

/// First alias that coerces to a finite number, in table order.
pub fn first_coercible(meta: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    first_matching(meta, keys, |_| true)
}

pub fn pick_weight(meta: &Map<String, Value>) -> Option<f64> {
    first_matching(meta, &WEIGHT_KEYS, |v| v > 0.0)
}

pub fn pick_height_cm(meta: &Map<String, Value>) -> Option<f64> {
    first_matching(meta, &HEIGHT_KEYS, |v| v > 0.0)
}

pub fn pick_imc(meta: &Map<String, Value>) -> Option<f64> {
    first_matching(meta, &BMI_KEYS, |v| v > 0.0)
}

pub fn pick_calories_burned(meta: &Map<String, Value>) -> Option<f64> {
    first_matching(meta, &BURNED_KEYS, |v| v >= 0.0)
}

pub fn pick_duration_minutes(meta: &Map<String, Value>) -> Option<f64> {
    first_matching(meta, &DURATION_KEYS, |v| v > 0.0)
}

/// Daily intake, with an asymmetric tie-break: a record carrying a
/// burned-specific alias and no intake alias is workout-shaped, and its
/// generic `calories` key must not be read as intake — burned calories
/// counted as intake would double-count systematically. Dashboard consumers
/// depend on this exact precedence; do not "improve" it.
pub fn pick_daily_calories(meta: &Map<String, Value>) -> Option<f64> {
    if let Some(v) = first_matching(meta, &INTAKE_KEYS, |v| v >= 0.0) {
        return Some(v);
    }
    if BURNED_SPECIFIC_KEYS.iter().any(|k| meta.contains_key(*k)) {
        return None;
    }
    first_matching(meta, &["calories"], |v| v >= 0.0)
}
