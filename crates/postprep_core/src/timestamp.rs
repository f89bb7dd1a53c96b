//! Second-precision timestamps for `local_data.date_modified`.
//!
//! Timestamps are naive UTC values written as `YYYY-MM-DDTHH:MM:SS`. Reading
//! is lenient: fractional seconds and RFC 3339 offsets are accepted and
//! normalized to second precision UTC.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Wire format for timestamps.
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Current UTC time truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(0)
}

/// Parse an ISO-8601 timestamp, with or without offset or fractional seconds.
pub fn parse(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.trunc_subsecs(0));
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc).naive_utc().trunc_subsecs(0))
}

pub(crate) fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(FORMAT))
}

/// Missing, null or unparseable values become the current time.
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse).unwrap_or_else(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_naive_and_offset_forms() {
        let naive = parse("2025-03-01T10:20:30").expect("naive timestamp");
        assert_eq!(naive.format(FORMAT).to_string(), "2025-03-01T10:20:30");

        let fractional = parse("2025-03-01T10:20:30.123456").expect("fractional timestamp");
        assert_eq!(fractional, naive);

        let offset = parse("2025-03-01T12:20:30+02:00").expect("offset timestamp");
        assert_eq!(offset, naive);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("yesterday").is_none());
    }

    #[test]
    fn now_has_no_subseconds() {
        assert_eq!(now().nanosecond(), 0);
    }
}
