//! Conversion between Unix epoch seconds and [`Timestamp`].
//!
//! The epoch is 1970-01-01T00:00:00Z. Everything here is a pure function of
//! its input except the `now*` family, which reads the system clock through
//! `chrono::Utc::now()`.
//!
//! # Functions
//!
//! - [`now`], [`now_epoch_seconds`], [`now_epoch_seconds_precise`] — current instant
//! - [`from_epoch_seconds`] — `i32`, `i64`, `f64` or decimal string → [`Timestamp`]
//! - [`to_epoch_seconds`], [`to_epoch_seconds_precise`] — [`Timestamp`] → seconds

use chrono::{DateTime, Utc};

use crate::error::TimeError;
use crate::timestamp::Timestamp;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

// ── Current time ────────────────────────────────────────────────────────────

/// The current instant, in UTC.
pub fn now() -> Timestamp {
    Timestamp::from(Utc::now())
}

/// Whole seconds since the epoch, rounded down.
pub fn now_epoch_seconds() -> i64 {
    Utc::now().timestamp()
}

/// Seconds since the epoch including the fractional part.
pub fn now_epoch_seconds_precise() -> f64 {
    to_epoch_seconds_precise(&now())
}

// ── Epoch → Timestamp ───────────────────────────────────────────────────────

/// A value that can be read as a number of seconds since the epoch.
///
/// Implemented for `i32`, `i64`, `f64`, `&str` and `String`. Strings must hold
/// a base-10 integer; surrounding whitespace and a leading sign are accepted.
pub trait EpochValue {
    /// Add `self` seconds to the epoch.
    fn into_timestamp(self) -> Result<Timestamp, TimeError>;
}

impl EpochValue for i32 {
    fn into_timestamp(self) -> Result<Timestamp, TimeError> {
        i64::from(self).into_timestamp()
    }
}

impl EpochValue for i64 {
    fn into_timestamp(self) -> Result<Timestamp, TimeError> {
        timestamp_from_parts(self, 0).ok_or_else(|| out_of_range(self))
    }
}

impl EpochValue for f64 {
    fn into_timestamp(self) -> Result<Timestamp, TimeError> {
        if !self.is_finite() {
            return Err(out_of_range(self));
        }

        let floor = self.floor();
        // `as` saturates, so bounds are checked first to keep the error honest.
        if floor < i64::MIN as f64 || floor >= i64::MAX as f64 {
            return Err(out_of_range(self));
        }

        let mut secs = floor as i64;
        let mut nanos = ((self - floor) * f64::from(NANOS_PER_SECOND)).round() as u32;
        if nanos >= NANOS_PER_SECOND {
            secs = secs.checked_add(1).ok_or_else(|| out_of_range(self))?;
            nanos -= NANOS_PER_SECOND;
        }

        timestamp_from_parts(secs, nanos).ok_or_else(|| out_of_range(self))
    }
}

impl EpochValue for &str {
    fn into_timestamp(self) -> Result<Timestamp, TimeError> {
        let secs: i64 = self.trim().parse().map_err(|e| {
            tracing::debug!(len = self.len(), "epoch string is not a base-10 integer");
            TimeError::InvalidFormat(format!("'{}': {}", truncated(self), e))
        })?;
        secs.into_timestamp()
    }
}

impl EpochValue for String {
    fn into_timestamp(self) -> Result<Timestamp, TimeError> {
        self.as_str().into_timestamp()
    }
}

/// Build the instant `value` seconds after 1970-01-01T00:00:00Z.
///
/// The result is expressed with offset `+00:00`.
///
/// # Errors
///
/// Returns [`TimeError::InvalidFormat`] if a string input is not a base-10
/// integer, or [`TimeError::OutOfRange`] if a numeric input is NaN, infinite,
/// or beyond the instants chrono can represent. `i32` input never fails.
///
/// # Examples
///
/// ```
/// use week_engine::epoch::from_epoch_seconds;
///
/// let ts = from_epoch_seconds(1_700_000_000).unwrap();
/// assert_eq!(ts.to_string(), "2023-11-14T22:13:20+00:00");
/// assert_eq!(from_epoch_seconds("1700000000").unwrap(), ts);
/// ```
pub fn from_epoch_seconds<V: EpochValue>(value: V) -> Result<Timestamp, TimeError> {
    value.into_timestamp()
}

// ── Timestamp → epoch ───────────────────────────────────────────────────────

/// Whole seconds since the epoch, truncated toward zero.
///
/// The offset of `t` does not matter; the instant is measured in UTC.
pub fn to_epoch_seconds(t: &Timestamp) -> i64 {
    let utc = t.to_utc();
    let secs = utc.timestamp();
    // `timestamp()` floors; step back toward zero for negative fractional values.
    if secs < 0 && utc.timestamp_subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

/// Seconds since the epoch including the fractional part.
pub fn to_epoch_seconds_precise(t: &Timestamp) -> f64 {
    let utc = t.to_utc();
    utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) / f64::from(NANOS_PER_SECOND)
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn timestamp_from_parts(secs: i64, nanos: u32) -> Option<Timestamp> {
    DateTime::<Utc>::from_timestamp(secs, nanos).map(Timestamp::from)
}

/// At most 32 characters of `s`, marked with an ellipsis when cut.
fn truncated(s: &str) -> String {
    const MAX_CHARS: usize = 32;
    match s.char_indices().nth(MAX_CHARS) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

fn out_of_range<T: std::fmt::Display>(value: T) -> TimeError {
    tracing::debug!(%value, "epoch value outside the representable range");
    TimeError::OutOfRange(format!("{} seconds since the epoch", value))
}

// ── Tests ───────────────────────────────────────────────────────────────────
