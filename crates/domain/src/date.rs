//! Calendar dates for `date` controls.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::DateError;
use crate::value::display_string;

/// Date-time layouts accepted without an offset; read as UTC.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// The `YYYY-MM-DD` UTC calendar date of a configuration value.
///
/// Numbers are milliseconds since the Unix epoch. Strings may be RFC 3339
/// date-times (converted to UTC), bare dates, or date-times without offset.
///
/// # Errors
///
/// Returns [`DateError`] for any other value, including empty strings.
pub fn calendar_date(value: &Value) -> Result<String, DateError> {
    let instant = match value {
        Value::Number(n) => n.as_f64().and_then(from_epoch_millis),
        Value::String(text) => parse_instant(text.trim()),
        _ => None,
    };
    instant
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .ok_or_else(|| DateError {
            value: display_string(value),
        })
}

#[allow(clippy::cast_possible_truncation)]
fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_take_date_part_of_utc_timestamp() {
        assert_eq!(
            calendar_date(&json!("2022-01-15T10:00:00Z")).unwrap(),
            "2022-01-15"
        );
    }

    #[test]
    fn should_convert_offset_timestamp_to_utc_first() {
        assert_eq!(
            calendar_date(&json!("2022-01-15T01:30:00+03:00")).unwrap(),
            "2022-01-14"
        );
    }

    #[test]
    fn should_accept_bare_date() {
        assert_eq!(calendar_date(&json!("2021-12-31")).unwrap(), "2021-12-31");
    }

    #[test]
    fn should_accept_naive_date_time() {
        assert_eq!(
            calendar_date(&json!("2023-06-01T23:59")).unwrap(),
            "2023-06-01"
        );
        assert_eq!(
            calendar_date(&json!("2023-06-01T08:00:00.250")).unwrap(),
            "2023-06-01"
        );
    }

    #[test]
    fn should_read_numbers_as_epoch_millis() {
        assert_eq!(calendar_date(&json!(0)).unwrap(), "1970-01-01");
        assert_eq!(
            calendar_date(&json!(1_642_240_800_000_i64)).unwrap(),
            "2022-01-15"
        );
    }

    #[test]
    fn should_fail_on_unparsable_text() {
        let err = calendar_date(&json!("next tuesday")).unwrap_err();
        assert_eq!(err.value, "next tuesday");
    }

    #[test]
    fn should_fail_on_empty_text() {
        assert!(calendar_date(&json!("")).is_err());
    }

    #[test]
    fn should_fail_on_non_date_types() {
        assert!(calendar_date(&json!(true)).is_err());
        assert!(calendar_date(&json!({"y": 2022})).is_err());
    }
}
