//! Coercions between configuration values and form control text.
//!
//! Form controls only hold strings; configuration objects hold typed JSON.
//! These helpers define how one becomes the other.

use serde_json::{Number, Value};

/// Render a configuration value as the text a form control receives.
///
/// Integral floats lose their fractional part (`3.0` → `"3"`), arrays are
/// joined with commas, `null` renders empty.
#[must_use]
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[allow(clippy::float_cmp)]
fn number_string(n: &Number) -> String {
    if !n.is_f64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

/// Read control text as a number.
///
/// Blank text reads as `0`; anything that is not a number reads as `None`
/// and therefore never matches.
#[must_use]
pub fn numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// The candidate list a multi-valued control is matched against: the array
/// items themselves, or the scalar wrapped as a singleton.
#[must_use]
pub fn value_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

/// Whether `list` holds a number equal to `target`. Strings are never
/// coerced: `"3"` does not match `3`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn contains_number(list: &[&Value], target: f64) -> bool {
    list.iter().any(|item| item.as_f64() == Some(target))
}

/// Whether `list` holds a string equal to `target`. Numbers are never
/// coerced: `3` does not match `"3"`.
#[must_use]
pub fn contains_string(list: &[&Value], target: &str) -> bool {
    list.iter().any(|item| item.as_str() == Some(target))
}
