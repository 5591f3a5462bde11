//! `get_time`: current local time.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};

/// Used when the system clock cannot be read.
pub const FALLBACK_TIME: &str = "2024-10-01 12:00:00";

pub fn get_time() -> String {
    format_time(read_clock())
}

fn read_clock() -> Option<DateTime<Local>> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
    let secs = i64::try_from(elapsed.as_secs()).ok()?;
    DateTime::from_timestamp(secs, elapsed.subsec_nanos()).map(|utc| utc.with_timezone(&Local))
}

pub(crate) fn format_time(now: Option<DateTime<Local>>) -> String {
    let stamp = match now {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
        None => {
            tracing::warn!("system clock unavailable, using fallback time");
            FALLBACK_TIME.to_string()
        }
    };
    format!("Current time in your location: {}", stamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_time() {
        let t = Local.with_ymd_and_hms(2025, 5, 6, 7, 8, 9).single().unwrap();
        let s = format_time(Some(t));
        assert!(s.starts_with("Current time in your location: 2025-05-06 07:08:09 "));
    }

    #[test]
    fn test_fallback() {
        assert_eq!(
            format_time(None),
            "Current time in your location: 2024-10-01 12:00:00"
        );
    }

    #[test]
    fn test_get_time_prefix() {
        assert!(get_time().starts_with("Current time in your location: "));
    }
}
