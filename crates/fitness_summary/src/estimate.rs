//! MET-based calorie and duration estimation for session entries.
//!
//! Many sessions carry no explicit duration or calorie values; both are
//! estimated from exercise composition. Failure policy: never errors,
//! unrecognized shapes degrade to the defaults below.

use crate::types::SessionEntry;

/// Ordered substring table, first match wins: specific activities sit before
/// generic type keywords. Values from standard MET tables.
pub const MET_TABLE: [(&str, f64); 24] = [
    ("run", 9.8),
    ("course", 9.8),
    ("walk", 3.5),
    ("marche", 3.5),
    ("cycl", 7.5),
    ("velo", 7.5),
    ("bike", 7.5),
    ("rope", 11.0),
    ("corde", 11.0),
    ("hiit", 8.0),
    ("burpee", 8.0),
    ("squat", 5.5),
    ("deadlift", 6.0),
    ("souleve", 6.0),
    ("bench", 6.0),
    ("developpe", 6.0),
    ("push", 8.0),
    ("pompe", 8.0),
    ("pull", 8.0),
    ("traction", 8.0),
    ("cardio", 7.0),
    ("muscu", 5.0),
    ("strength", 5.0),
    ("force", 5.0),
];

/// Fallback when neither the name nor the type matches anything.
pub const DEFAULT_MET: f64 = 5.0;

const DEFAULT_REPS: f64 = 10.0;
const DEFAULT_TEMPO_SEC: f64 = 5.0;
const DEFAULT_REST_SEC: f64 = 45.0;

/// Summed estimate for a whole session. `None` means absence of data, not
/// zero effort.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionEstimate {
    pub duration_minutes: Option<f64>,
    pub calories_burned: Option<f64>,
}

/// MET value for an entry: explicit override first, then ordered substring
/// match over the lowercased name and type keyword.
pub fn pick_met(entry: &SessionEntry) -> f64 {
    if let Some(met) = entry.met.filter(|m| m.is_finite() && *m > 0.0) {
        return met;
    }
    let mut haystack = entry
        .exercise_name
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    haystack.push(' ');
    haystack.push_str(entry.kind.keyword());

    MET_TABLE
        .iter()
        .find(|(pattern, _)| haystack.contains(pattern))
        .map(|(_, met)| *met)
        .unwrap_or(DEFAULT_MET)
}

/// Minutes spent on an entry: the explicit duration when present, otherwise
/// `sets × (reps × tempo + rest) / 60` with defaults reps=10, tempo=5s,
/// rest=45s, sets=1 (or the length of the sets array). Rounded, floored at
/// one minute.
pub fn estimate_duration_minutes(entry: &SessionEntry) -> f64 {
    if let Some(d) = entry.duration_minutes.filter(|d| d.is_finite() && *d > 0.0) {
        return d.round().max(1.0);
    }

    let sets = if entry.sets.is_empty() {
        1.0
    } else {
        entry.sets.len() as f64
    };
    let reps = entry
        .reps
        .filter(|r| r.is_finite() && *r > 0.0)
        .or_else(|| mean_set_reps(entry))
        .unwrap_or(DEFAULT_REPS);
    let tempo = entry
        .tempo_sec
        .filter(|t| t.is_finite() && *t > 0.0)
        .unwrap_or(DEFAULT_TEMPO_SEC);
    let rest = entry
        .rest_sec
        .filter(|r| r.is_finite() && *r >= 0.0)
        .unwrap_or(DEFAULT_REST_SEC);

    let minutes = sets * (reps * tempo + rest) / 60.0;
    minutes.round().max(1.0)
}

fn mean_set_reps(entry: &SessionEntry) -> Option<f64> {
    let reps: Vec<f64> = entry
        .sets
        .iter()
        .filter_map(|s| s.reps.filter(|r| r.is_finite() && *r > 0.0))
        .collect();
    if reps.is_empty() {
        return None;
    }
    Some(reps.iter().sum::<f64>() / reps.len() as f64)
}

/// Calories burned by an entry: `MET × 3.5 × kg / 200 × minutes`, rounded,
/// floored at zero. Returns 0 when the body weight is unknown or
/// non-positive — calories scale with mass, there is nothing to estimate
/// from without it.
pub fn estimate_calories(entry: &SessionEntry, weight_kg: Option<f64>) -> f64 {
    let Some(kg) = weight_kg.filter(|w| w.is_finite() && *w > 0.0) else {
        return 0.0;
    };
    let minutes = estimate_duration_minutes(entry);
    let met = pick_met(entry);
    (met * 3.5 * kg / 200.0 * minutes).round().max(0.0)
}

/// Per-entry sums across a session. Each field is `None` when its sum is
/// zero: an empty or unusable session reports absence, not zero effort.
pub fn estimate_session(entries: &[SessionEntry], weight_kg: Option<f64>) -> SessionEstimate {
    let mut minutes = 0.0;
    let mut calories = 0.0;
    for entry in entries {
        minutes += estimate_duration_minutes(entry);
        calories += estimate_calories(entry, weight_kg);
    }
    SessionEstimate {
        duration_minutes: (minutes > 0.0).then_some(minutes),
        calories_burned: (calories > 0.0).then_some(calories),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExerciseKind, SetEntry};

    fn named(name: &str) -> SessionEntry {
        SessionEntry {
            exercise_name: Some(name.into()),
            ..Default::default()
        }
    }

    #[test]
    fn pick_met_orders_specific_before_generic() {
        // "course à pied cardio" must resolve to run, not to the cardio keyword
        assert_eq!(pick_met(&named("course à pied cardio")), 9.8);
        assert_eq!(pick_met(&named("corde à sauter")), 11.0);
    }

    #[test]
    fn pick_met_falls_back_to_type_keyword() {
        let entry = SessionEntry {
            exercise_name: Some("inconnu".into()),
            kind: ExerciseKind::Cardio,
            ..Default::default()
        };
        assert_eq!(pick_met(&entry), 7.0);
    }

    #[test]
    fn pick_met_defaults_when_nothing_matches() {
        assert_eq!(pick_met(&SessionEntry::default()), DEFAULT_MET);
    }

    #[test]
    fn pick_met_explicit_override_wins() {
        let entry = SessionEntry {
            exercise_name: Some("course".into()),
            met: Some(12.0),
            ..Default::default()
        };
        assert_eq!(pick_met(&entry), 12.0);
    }

    #[test]
    fn duration_uses_explicit_value_when_present() {
        let entry = SessionEntry {
            duration_minutes: Some(30.0),
            ..Default::default()
        };
        assert_eq!(estimate_duration_minutes(&entry), 30.0);
    }

    #[test]
    fn duration_formula_with_all_defaults() {
        // 1 set × (10 reps × 5s + 45s) / 60 = 1.58 → 2
        assert_eq!(estimate_duration_minutes(&SessionEntry::default()), 2.0);
    }

    #[test]
    fn duration_scales_with_sets_array() {
        let entry = SessionEntry {
            sets: vec![SetEntry::default(); 4],
            ..Default::default()
        };
        // 4 × 95s / 60 = 6.33 → 6
        assert_eq!(estimate_duration_minutes(&entry), 6.0);
    }

    #[test]
    fn duration_is_floored_at_one_minute() {
        let entry = SessionEntry {
            reps: Some(1.0),
            tempo_sec: Some(1.0),
            rest_sec: Some(0.0),
            ..Default::default()
        };
        assert_eq!(estimate_duration_minutes(&entry), 1.0);
    }

    #[test]
    fn calories_zero_without_body_weight() {
        let entry = named("course");
        assert_eq!(estimate_calories(&entry, None), 0.0);
        assert_eq!(estimate_calories(&entry, Some(0.0)), 0.0);
        assert_eq!(estimate_calories(&entry, Some(-70.0)), 0.0);
    }

    #[test]
    fn calories_non_decreasing_in_weight() {
        let entry = named("squat");
        let mut previous = 0.0;
        for kg in [40.0, 60.0, 80.0, 100.0, 120.0] {
            let current = estimate_calories(&entry, Some(kg));
            assert!(current >= previous, "not monotonic at {kg} kg");
            previous = current;
        }
    }

    #[test]
    fn calories_match_met_formula() {
        let entry = SessionEntry {
            exercise_name: Some("course".into()),
            duration_minutes: Some(30.0),
            ..Default::default()
        };
        // 9.8 × 3.5 × 80 / 200 × 30 = 411.6 → 412
        assert_eq!(estimate_calories(&entry, Some(80.0)), 412.0);
    }

    #[test]
    fn empty_session_estimates_to_absence() {
        let estimate = estimate_session(&[], Some(80.0));
        assert_eq!(estimate.duration_minutes, None);
        assert_eq!(estimate.calories_burned, None);
    }

    #[test]
    fn session_sums_entries() {
        let entries = vec![
            SessionEntry {
                duration_minutes: Some(10.0),
                exercise_name: Some("squat".into()),
                ..Default::default()
            },
            SessionEntry {
                duration_minutes: Some(20.0),
                exercise_name: Some("squat".into()),
                ..Default::default()
            },
        ];
        let estimate = estimate_session(&entries, Some(80.0));
        assert_eq!(estimate.duration_minutes, Some(30.0));
        // 5.5 × 3.5 × 80 / 200 × 10 = 77 ; ×20 = 154
        assert_eq!(estimate.calories_burned, Some(231.0));
    }

    #[test]
    fn session_without_weight_still_reports_duration() {
        let entries = vec![SessionEntry {
            duration_minutes: Some(15.0),
            ..Default::default()
        }];
        let estimate = estimate_session(&entries, None);
        assert_eq!(estimate.duration_minutes, Some(15.0));
        assert_eq!(estimate.calories_burned, None);
    }
}
