//! Lookup of canonical timezone names and conversion of instants to local dates.

use time::{Date, OffsetDateTime};
use time_tz::{OffsetDateTimeExt, Tz};

use crate::Error;

/// The timezone named `canonical_timezone`, e.g. "Pacific/Auckland".
///
/// Returns `None` if the name is not a known timezone.
pub fn get_timezone(canonical_timezone: &str) -> Option<&'static Tz> {
    time_tz::timezones::get_by_name(canonical_timezone)
}

/// Like [get_timezone], but logs and returns an error for unknown names.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if the name is not a known timezone.
pub fn timezone_or_error(canonical_timezone: &str) -> Result<&'static Tz, Error> {
    get_timezone(canonical_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {canonical_timezone}");
        Error::InvalidTimezoneError(canonical_timezone.to_owned())
    })
}

/// The calendar date of `instant` in `timezone`.
///
/// The offset used is the one in effect at `instant`, so daylight saving
/// changes between then and now do not move the date.
pub fn local_date(instant: OffsetDateTime, timezone: &Tz) -> Date {
    instant.to_timezone(timezone).date()
}

/// Today's date in `timezone`.
pub fn local_today(timezone: &Tz) -> Date {
    local_date(OffsetDateTime::now_utc(), timezone)
}
