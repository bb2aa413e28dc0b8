//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for `created_at` / `updated_at` on remote records.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Format a timestamp for the dashboard (`2024-03-01 10:00 UTC`).
#[must_use]
pub fn display(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        assert!(ts >= before);
    }

    #[test]
    fn should_format_for_display_in_minutes() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 59).unwrap();
        assert_eq!(display(&ts), "2024-03-01 10:00 UTC");
    }
}
