//! Lenient decoders for the loosely typed fixture schema.
//!
//! Numeric metadata fields show up either as JSON numbers (`5230.5`) or as
//! numeric strings (`"5230.5"`). Timestamps are zone-less wall-clock strings in
//! one of a handful of layouts.

use crate::errors::DataError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Decode a field documented as numeric that may be serialized as a string.
///
/// A JSON number is taken as is. A JSON string must parse completely as a
/// finite decimal number with `.` as separator. Anything else, `null` and a
/// missing field included, is a `DataError::Decode` naming `field`.
pub fn decode_flexible_f64(field: &str, value: Option<&JsonValue>) -> Result<f64, DataError> {
    match value {
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .ok_or_else(|| DataError::decode(field, format!("{n} does not fit in f64"))),
        Some(JsonValue::String(s)) => parse_decimal(s)
            .ok_or_else(|| DataError::decode(field, format!("cannot convert {s:?} to a number"))),
        Some(other) => Err(DataError::decode(
            field,
            format!("expected a number or numeric string, got {other}"),
        )),
        None => Err(DataError::decode(field, "missing required numeric field")),
    }
}

fn parse_decimal(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a fixture timestamp.
///
/// Date-only values land on midnight of that day.
pub fn decode_wall_clock(s: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// `deserialize_with` adapter for [`decode_wall_clock`].
pub fn wall_clock<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    decode_wall_clock(&s).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "Invalid date format: '{s}'. Expected 'YYYY-MM-DD HH:MM:SS' or 'YYYY-MM-DD'"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_and_numeric_string_agree() {
        let n = json!(5230.5);
        let s = json!("5230.5");
        assert_eq!(decode_flexible_f64("distance", Some(&n)).unwrap(), 5230.5);
        assert_eq!(decode_flexible_f64("distance", Some(&s)).unwrap(), 5230.5);
    }

    #[test]
    fn test_integer_number() {
        let v = json!(1800);
        assert_eq!(decode_flexible_f64("duration", Some(&v)).unwrap(), 1800.0);
    }

    #[test]
    fn test_garbage_string_fails() {
        let v = json!("abc");
        let err = decode_flexible_f64("distance", Some(&v)).unwrap_err();
        assert!(err.is_decode());
        let msg = err.to_string();
        assert!(msg.contains("distance"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_null_and_missing_fail() {
        let null = JsonValue::Null;
        assert!(decode_flexible_f64("avg_temp", Some(&null)).unwrap_err().is_decode());
        assert!(decode_flexible_f64("avg_temp", None).unwrap_err().is_decode());
    }

    #[test]
    fn test_partial_and_padded_strings_fail() {
        for raw in ["12km", " 12", "12,5", "", "NaN", "inf"] {
            let v = json!(raw);
            assert!(
                decode_flexible_f64("avg_humidity", Some(&v)).is_err(),
                "{raw:?} should not decode"
            );
        }
    }

    #[test]
    fn test_bool_fails() {
        let v = json!(true);
        assert!(decode_flexible_f64("duration", Some(&v)).is_err());
    }

    #[test]
    fn test_wall_clock_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 11, 25)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(decode_wall_clock("2025-11-25 09:30:00"), Some(expected));
        assert_eq!(decode_wall_clock("2025/11/25 09:30:00"), Some(expected));

        let midnight = NaiveDate::from_ymd_opt(2025, 11, 25)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(decode_wall_clock("2025-11-25"), Some(midnight));
        assert_eq!(decode_wall_clock("2025/11/25"), Some(midnight));
    }

    #[test]
    fn test_wall_clock_rejects_other_layouts() {
        assert_eq!(decode_wall_clock("25.11.2025"), None);
        assert_eq!(decode_wall_clock("2025-11-25T09:30:00Z"), None);
    }

    #[test]
    fn test_wall_clock_adapter() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(deserialize_with = "wall_clock")]
            at: NaiveDateTime,
        }

        let row: Row = serde_json::from_str(r#"{"at":"2025-11-26 10:00:00"}"#).unwrap();
        assert_eq!(row.at.to_string(), "2025-11-26 10:00:00");

        let bad = serde_json::from_str::<Row>(r#"{"at":"tomorrow"}"#);
        assert!(bad.is_err());
    }
}
