//! Field extraction with documented defaults.
//!
//! Upstream endpoints disagree on key casing and on value types, so every
//! lookup takes a list of accepted keys (first match wins) and classifies
//! what it found instead of coercing falsy values.
//!
//! | JSON value                | `number_field`      |
//! |---------------------------|---------------------|
//! | number                    | `Present(v)`        |
//! | string parsing to finite  | `Present(v)`        |
//! | absent / `null`           | `Missing`           |
//! | anything else             | `Invalid`           |

use serde_json::{Map, Value};

/// Outcome of a numeric field lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberField {
    Present(f64),
    Missing,
    Invalid,
}

impl NumberField {
    /// `Missing` and `Invalid` both collapse to `None` (read as zero later).
    pub fn value(self) -> Option<f64> {
        match self {
            NumberField::Present(v) => Some(v),
            NumberField::Missing | NumberField::Invalid => None,
        }
    }
}

fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

/// Extract a numeric field.
pub fn number_field(obj: &Map<String, Value>, keys: &[&str]) -> NumberField {
    match lookup(obj, keys) {
        None => NumberField::Missing,
        Some(Value::Number(n)) => n.as_f64().map_or(NumberField::Invalid, NumberField::Present),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map_or(NumberField::Invalid, NumberField::Present),
        Some(_) => NumberField::Invalid,
    }
}

/// Extract an identifier. Numbers render as their JSON text.
pub fn id_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match lookup(obj, keys)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Extract a display string; non-strings yield `None`.
pub fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match lookup(obj, keys)? {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
