//! Defensive numeric coercion.
//!
//! Every arithmetic input in the engine goes through [`to_number`], which is
//! what guarantees the output invariant: finite number or null, never NaN.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9+\-.,]").expect("valid pattern"));

/// Coerce an arbitrary JSON value to a finite `f64`, or `None`.
///
/// Strings are stripped of non-numeric characters first, so values like
/// `"2000 kcal"` or `"72,5"` still coerce. Booleans, arrays, and objects
/// are rejected. Never panics.
pub fn to_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => numeric_from_str(s),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse a free-form string as a number after dropping units and other
/// non-numeric characters. A decimal comma is accepted.
pub fn numeric_from_str(s: &str) -> Option<f64> {
    let stripped = NON_NUMERIC.replace_all(s, "");
    let normalized = stripped.replace(',', ".");
    let parsed: f64 = normalized.parse().ok()?;
    parsed.is_finite().then_some(parsed)
}
