//! Timestamp parsing and display.
//!
//! New artifacts carry RFC 3339 timestamps. Older clients wrote display-zone
//! timestamps such as `2024-03-01 09:30 PST`, so those still decode.

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, TimeZone, Timelike, Utc};

const LEGACY_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// UTC offset in hours for the zone abbreviations older clients emitted.
fn zone_offset_hours(zone: &str) -> Option<i32> {
    let hours = match zone.to_ascii_uppercase().as_str() {
        "UTC" | "GMT" | "Z" => 0,
        "EDT" => -4,
        "EST" | "CDT" => -5,
        "CST" | "MDT" => -6,
        "MST" | "PDT" => -7,
        "PST" => -8,
        _ => return None,
    };
    Some(hours)
}

/// Parse a metadata timestamp, truncated to whole seconds in UTC.
///
/// Returns `None` when the text is not a recognized timestamp.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(truncate(ts.with_timezone(&Utc)));
    }

    let (naive_text, offset_hours) = match text.rsplit_once(' ') {
        Some((head, zone)) if zone.chars().all(|c| c.is_ascii_alphabetic()) => {
            (head.trim_end(), zone_offset_hours(zone)?)
        }
        _ => (text, 0),
    };
    let naive = LEGACY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive_text, fmt).ok())?;
    let offset = FixedOffset::east_opt(offset_hours * 3600)?;
    let local = offset.from_local_datetime(&naive).single()?;
    Some(truncate(local.with_timezone(&Utc)))
}

/// Drop sub-second precision.
pub fn truncate(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// Wire form written into metadata blocks: `2024-03-01T12:00:00Z`.
pub fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Display form used in summaries and notes: `2024-03-01 12:00 UTC`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(
            parse_timestamp("2024-03-01T12:00:00Z"),
            Some(utc(2024, 3, 1, 12, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-03-01T04:00:00-08:00"),
            Some(utc(2024, 3, 1, 12, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-03-01T12:00:00.750Z"),
            Some(utc(2024, 3, 1, 12, 0, 0))
        );
    }

    #[test]
    fn test_parse_legacy_with_zone() {
        assert_eq!(
            parse_timestamp("2024-03-01 04:00 PST"),
            Some(utc(2024, 3, 1, 12, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-07-01 08:00:30 EDT"),
            Some(utc(2024, 7, 1, 12, 0, 30))
        );
        assert_eq!(
            parse_timestamp("2024-03-01 12:00 UTC"),
            Some(utc(2024, 3, 1, 12, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-03-01 12:00"),
            Some(utc(2024, 3, 1, 12, 0, 0))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-03-01 12:00 XYZ"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_formats() {
        let ts = utc(2024, 3, 1, 9, 5, 7);
        assert_eq!(encode_timestamp(ts), "2024-03-01T09:05:07Z");
        assert_eq!(format_timestamp(ts), "2024-03-01 09:05 UTC");
    }
}
