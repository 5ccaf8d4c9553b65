//! Coercion helpers shared by the normalizers.
//!
//! All helpers are total: anything that does not coerce cleanly becomes the
//! documented fallback, never an error. Validation of *required* structure
//! (a missing player, innings that are not a sequence) happens in the
//! normalizers, not here.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Coerce to an integer counter. Accepts JSON numbers (floats truncate) and
/// numeric strings; everything else is 0.
pub(crate) fn coerce_i64(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f as i64)
            .unwrap_or(0),
        _ => 0,
    }
}

/// Coerce to a float. Same sources as [`coerce_i64`], 0.0 fallback.
pub(crate) fn coerce_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Coerce to a flag. Only a JSON boolean counts; everything else is false.
pub(crate) fn coerce_bool(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(false)
}

/// Coerce to a string. Non-empty strings pass through, numbers are
/// stringified, anything else takes the fallback.
pub(crate) fn coerce_string(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => fallback.to_owned(),
    }
}

/// Coerce to a point in time. Accepts RFC3339 strings and non-negative Unix
/// millisecond integers; anything absent or unparseable takes `default`.
pub(crate) fn coerce_timestamp(value: Option<&Value>, default: SystemTime) -> SystemTime {
    match value {
        Some(Value::String(s)) => OffsetDateTime::parse(s, &Rfc3339)
            .map(SystemTime::from)
            .unwrap_or(default),
        Some(Value::Number(n)) => n
            .as_i64()
            .filter(|millis| *millis >= 0)
            .map(|millis| UNIX_EPOCH + Duration::from_millis(millis as u64))
            .unwrap_or(default),
        _ => default,
    }
}

/// Fetch a key out of a JSON object, treating non-objects as empty.
pub(crate) fn field<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_numeric_strings_coerce() {
        assert_eq!(coerce_i64(Some(&json!(7))), 7);
        assert_eq!(coerce_i64(Some(&json!(7.9))), 7);
        assert_eq!(coerce_i64(Some(&json!("12"))), 12);
        assert_eq!(coerce_f64(Some(&json!("2.5"))), 2.5);
    }

    #[test]
    fn garbage_coerces_to_zero() {
        assert_eq!(coerce_i64(Some(&json!("eight"))), 0);
        assert_eq!(coerce_i64(Some(&json!(null))), 0);
        assert_eq!(coerce_i64(Some(&json!({"nested": true}))), 0);
        assert_eq!(coerce_i64(None), 0);
        assert_eq!(coerce_f64(Some(&json!([1, 2]))), 0.0);
    }

    #[test]
    fn only_real_booleans_count() {
        assert!(coerce_bool(Some(&json!(true))));
        assert!(!coerce_bool(Some(&json!("true"))));
        assert!(!coerce_bool(Some(&json!(1))));
        assert!(!coerce_bool(None));
    }

    #[test]
    fn strings_fall_back_when_empty_or_missing() {
        assert_eq!(coerce_string(Some(&json!("bank shot")), "unknown"), "bank shot");
        assert_eq!(coerce_string(Some(&json!("")), "unknown"), "unknown");
        assert_eq!(coerce_string(Some(&json!(9)), "unknown"), "9");
        assert_eq!(coerce_string(None, "unknown"), "unknown");
    }

    #[test]
    fn timestamps_parse_rfc3339_and_millis() {
        let fallback = UNIX_EPOCH;
        let parsed = coerce_timestamp(Some(&json!("2024-03-01T12:00:00Z")), fallback);
        assert_ne!(parsed, fallback);

        let millis = coerce_timestamp(Some(&json!(1_700_000_000_000_i64)), fallback);
        assert_eq!(
            millis,
            UNIX_EPOCH + Duration::from_millis(1_700_000_000_000)
        );

        assert_eq!(coerce_timestamp(Some(&json!("yesterday")), fallback), fallback);
        assert_eq!(coerce_timestamp(Some(&json!(-5)), fallback), fallback);
        assert_eq!(coerce_timestamp(None, fallback), fallback);
    }
}
