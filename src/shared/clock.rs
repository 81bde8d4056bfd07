//! Time related functions.
//!
//! Reports carry two kinds of time: wall-clock timestamps, rendered as
//! ISO-8601 strings in UTC with millisecond precision, and the process uptime,
//! measured with a monotonic clock from the instant the application started.
use std::time::{Duration, Instant};

use chrono::{DateTime, SecondsFormat, Utc};

lazy_static! {
    /// The instant at which the application started.
    pub static ref INSTANT_AT_APP_START: Instant = Instant::now();
}

/// Time elapsed since the application started.
#[must_use]
pub fn uptime() -> Duration {
    INSTANT_AT_APP_START.elapsed()
}

/// The current UTC time.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Renders a timestamp the way every report of this service does, for example
/// `2024-05-01T10:15:30.123Z`.
#[must_use]
pub fn to_iso8601(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Elapsed milliseconds with sub-millisecond precision.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_secs() as f64 * 1000.0 + f64::from(duration.subsec_nanos()) / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};

    use super::{as_millis_f64, to_iso8601, uptime};

    #[test]
    fn it_should_render_timestamps_in_utc_with_milliseconds() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 30).unwrap() + chrono::Duration::milliseconds(123);

        assert_eq!(to_iso8601(&time), "2024-05-01T10:15:30.123Z");
    }

    #[test]
    fn it_should_convert_durations_to_fractional_milliseconds() {
        assert!((as_millis_f64(Duration::from_micros(1500)) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn uptime_should_never_go_backwards() {
        let first = uptime();
        let second = uptime();

        assert!(second >= first);
    }
}
