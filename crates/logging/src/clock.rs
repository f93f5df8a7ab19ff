//! crates/logging/src/clock.rs
//! Timestamp collaborator used by framing sinks.

use time::OffsetDateTime;
use time::macros::format_description;

/// Produces the timestamp column of a framed line.
pub trait TimeFormatter: Send + Sync {
    /// Returns the current time as display text.
    fn now(&self) -> String;
}

/// Wall clock in the local time zone, formatted as `dd-MM-yyyy hh:mm:ss am/pm`.
///
/// Falls back to UTC when the local offset cannot be determined, which the
/// `time` crate reports on some multi-threaded Unix processes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LocalClock;

impl TimeFormatter for LocalClock {
    fn now(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        format_timestamp(now)
    }
}

/// Formats `at` as `dd-MM-yyyy hh:mm:ss am/pm` with a lowercase period marker.
///
/// # Examples
///
/// ```
/// use time::macros::datetime;
/// use logging::format_timestamp;
///
/// assert_eq!(
///     format_timestamp(datetime!(2025-03-05 14:07:09 UTC)),
///     "05-03-2025 02:07:09 pm"
/// );
/// ```
#[must_use]
pub fn format_timestamp(at: OffsetDateTime) -> String {
    let format = format_description!(
        "[day]-[month]-[year] [hour repr:12]:[minute]:[second] [period case:lower]"
    );
    at.format(format)
        .unwrap_or_else(|_| String::from("<time-format-error>"))
}
