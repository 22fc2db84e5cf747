use chrono::{DateTime, Utc};

/// Convert Windows FILETIME (100ns ticks since 1601-01-01) to a UTC timestamp
pub(crate) fn filetime_to_datetime(filetime: &u64) -> DateTime<Utc> {
    let seconds_to_unix: i64 = 11644473600;
    let micros_per_second = 1000000;
    let nanos_per_micro = 1000;

    // Sub-microsecond ticks are dropped
    let micros = (filetime / 10) as i64;
    let seconds = micros / micros_per_second - seconds_to_unix;
    let nanos = (micros % micros_per_second) as u32 * nanos_per_micro;

    // Every u64 FILETIME lands inside the range chrono supports
    DateTime::from_timestamp(seconds, nanos).unwrap_or_default()
}

/// Render a timestamp the way investigators expect to read it. Always UTC with microseconds
pub(crate) fn datetime_to_string(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::{datetime_to_string, filetime_to_datetime};
    use chrono::SecondsFormat;

    #[test]
    fn test_filetime_to_datetime_epoch() {
        let result = filetime_to_datetime(&0);
        assert_eq!(
            result.to_rfc3339_opts(SecondsFormat::Secs, true),
            "1601-01-01T00:00:00Z"
        );
    }

    #[test]
    fn test_filetime_to_datetime() {
        let result = filetime_to_datetime(&133195127992921820);
        assert_eq!(result.timestamp(), 1675039199);
        assert_eq!(
            result.to_rfc3339_opts(SecondsFormat::Micros, true),
            "2023-01-30T00:39:59.292182Z"
        );
    }

    #[test]
    fn test_filetime_to_datetime_max() {
        let result = filetime_to_datetime(&u64::MAX);
        assert!(result.timestamp() > 0);
    }

    #[test]
    fn test_datetime_to_string() {
        let result = filetime_to_datetime(&0);
        assert_eq!(datetime_to_string(&result), "1601-01-01 00:00:00.000000");
    }
}
