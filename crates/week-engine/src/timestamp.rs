//! The offset-aware instant shared by [`crate::epoch`] and [`crate::week`].

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::TimeError;

/// An instant in time together with the UTC offset it is viewed in.
///
/// Equality and ordering compare the instant only, so the same moment seen
/// from two offsets is equal. Calendar accessors (`year`, `month`, `weekday`,
/// ...) answer in the carried offset.
///
/// Both the instant and its local wall-clock time are always within chrono's
/// range. Values whose local time would fall outside it (e.g. the latest UTC
/// instant viewed at `+14:00`) are rejected with [`TimeError::OutOfRange`].
///
/// Serializes as an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "DateTime<FixedOffset>",
    into = "DateTime<FixedOffset>"
)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Parse an RFC 3339 string (e.g. `"2020-12-31T12:00:00+01:00"`).
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidDatetime`] if the string cannot be parsed.
    pub fn parse_rfc3339(s: &str) -> Result<Self, TimeError> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| TimeError::InvalidDatetime(format!("'{}': {}", s, e)))?;
        Self::try_from(dt)
    }

    /// The underlying chrono value.
    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    /// The offset calendar fields are read in.
    pub fn offset(&self) -> FixedOffset {
        *self.0.offset()
    }

    /// The same instant viewed in UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// The same instant viewed in another offset.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::OutOfRange`] if the local time in `offset` is not
    /// representable, which only happens within a day of chrono's limits.
    pub fn with_offset(&self, offset: FixedOffset) -> Result<Self, TimeError> {
        Self::try_from(self.0.with_timezone(&offset))
    }

    /// Calendar date in the carried offset.
    pub fn date_naive(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Calendar year in the carried offset.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of the year, 1-12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of the month, 1-31.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day of the week in the carried offset.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Hour of the day, 0-23.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Minute of the hour, 0-59.
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Second of the minute, 0-59.
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Nanoseconds past the second.
    pub fn nanosecond(&self) -> u32 {
        self.0.nanosecond()
    }
}

impl TryFrom<DateTime<FixedOffset>> for Timestamp {
    type Error = TimeError;

    fn try_from(dt: DateTime<FixedOffset>) -> Result<Self, TimeError> {
        let offset = chrono::Duration::seconds(i64::from(dt.offset().local_minus_utc()));
        match dt.naive_utc().checked_add_signed(offset) {
            Some(_) => Ok(Self(dt)),
            None => Err(TimeError::OutOfRange(format!(
                "local time of {} at {} is not representable",
                dt.naive_utc(),
                dt.offset()
            ))),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.fixed_offset())
    }
}

impl From<Timestamp> for DateTime<FixedOffset> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_keeps_offset() {
        let ts = Timestamp::parse_rfc3339("2021-01-01T00:30:00+02:00").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 7200);
        assert_eq!(ts.year(), 2021);
        assert_eq!(ts.to_utc().year(), 2020);
        assert_eq!(ts.to_utc().day(), 31);
    }

    #[test]
    fn test_parse_invalid_returns_error() {
        let err = Timestamp::parse_rfc3339("not-a-datetime").unwrap_err();
        assert!(matches!(err, TimeError::InvalidDatetime(_)));
        assert!(err.to_string().contains("Invalid datetime"), "got: {err}");
    }

    #[test]
    fn test_equality_ignores_offset() {
        let utc = Timestamp::parse_rfc3339("2020-12-31T23:00:00Z").unwrap();
        let cet = Timestamp::parse_rfc3339("2021-01-01T00:00:00+01:00").unwrap();
        assert_eq!(utc, cet);
        assert_ne!(utc.year(), cet.year());
    }

    #[test]
    fn test_with_offset_moves_calendar_fields() {
        let utc = Timestamp::from(Utc.with_ymd_and_hms(2018, 12, 31, 23, 0, 0).unwrap());
        let tokyo = utc
            .with_offset(FixedOffset::east_opt(9 * 3600).unwrap())
            .unwrap();
        assert_eq!(tokyo, utc);
        assert_eq!(tokyo.date_naive(), NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
        assert_eq!(tokyo.hour(), 8);
        assert_eq!(tokyo.weekday(), Weekday::Tue);
    }

    #[test]
    fn test_display_is_rfc3339() {
        let ts = Timestamp::from(Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap());
        assert_eq!(ts.to_string(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn test_serde_as_rfc3339_string() {
        let ts = Timestamp::parse_rfc3339("2016-01-03T23:59:59+01:00").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2016-01-03T23:59:59+01:00\"");

        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
        assert_eq!(back.offset(), ts.offset());
    }

    #[test]
    fn test_with_offset_rejects_unrepresentable_local_time() {
        let max = Timestamp::from(DateTime::<Utc>::MAX_UTC);
        let err = max
            .with_offset(FixedOffset::east_opt(14 * 3600).unwrap())
            .unwrap_err();
        assert!(matches!(err, TimeError::OutOfRange(_)));

        let min = Timestamp::from(DateTime::<Utc>::MIN_UTC);
        let err = min
            .with_offset(FixedOffset::west_opt(14 * 3600).unwrap())
            .unwrap_err();
        assert!(matches!(err, TimeError::OutOfRange(_)));

        // The other direction stays inside the range.
        assert!(max.with_offset(FixedOffset::west_opt(14 * 3600).unwrap()).is_ok());
        assert!(min.with_offset(FixedOffset::east_opt(14 * 3600).unwrap()).is_ok());
    }

    #[test]
    fn test_try_from_rejects_unrepresentable_local_time() {
        let dt = DateTime::<Utc>::MAX_UTC.with_timezone(&FixedOffset::east_opt(3600).unwrap());
        assert!(matches!(
            Timestamp::try_from(dt),
            Err(TimeError::OutOfRange(_))
        ));
    }
}
