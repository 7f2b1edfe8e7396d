// src/utils/time.rs
//! Wall-clock timestamp formatting.

use chrono::{SecondsFormat, Utc};

/// Current UTC time as an ISO-8601 string with millisecond precision and a
/// `Z` suffix (e.g. `2026-08-30T12:34:56.789Z`), the format carried in every
/// exported artifact.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_shape() {
        let ts = now_iso8601();
        assert!(ts.ends_with('Z'));
        // YYYY-MM-DDTHH:MM:SS.mmmZ
        assert_eq!(ts.len(), 24);
        assert_eq!(&ts[10..11], "T");
        assert_eq!(&ts[19..20], ".");
    }
}
