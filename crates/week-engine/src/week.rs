//! ISO 8601 week resolution.
//!
//! Weeks run Monday to Sunday and week 1 of a year is the week holding that
//! year's first Thursday. Near New Year a week can therefore belong to a
//! different year than some of its days, and [`resolve`] works out which.
//!
//! All calendar math happens in the offset carried by the input [`Timestamp`]:
//! "midnight" means local midnight in that offset, and the returned bounds
//! carry the same offset.
//!
//! # Functions
//!
//! - [`resolve`] — Week number, bounds and week-based year for an instant
//! - [`current_week`] / [`current_week_with_options`] — Same, for "now"
//! - [`resolve_iso_week`] — Descriptor for an explicit ISO year and week
//! - [`iso_week_number`], [`first_day_of_week`], [`last_day_of_week`] — The pieces

use std::fmt;

use chrono::{
    DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Utc, Weekday,
};
use serde::Serialize;

use crate::epoch;
use crate::error::TimeError;
use crate::timestamp::Timestamp;

// ── Options ─────────────────────────────────────────────────────────────────

/// Options for [`current_week_with_options`].
#[derive(Debug, Clone)]
pub struct WeekOptions {
    /// Offset in which "now" is viewed before its week is resolved.
    pub offset: FixedOffset,
}

impl Default for WeekOptions {
    fn default() -> Self {
        Self { offset: Utc.fix() }
    }
}

// ── WeekDescriptor ──────────────────────────────────────────────────────────

/// An ISO 8601 week, derived from a single instant.
///
/// `start` is Monday 00:00:00 and `end` is the last nanosecond of Sunday, both
/// in the offset of the instant the week was resolved from. `year` is the
/// week-based year, which differs from the calendar year of some days in the
/// first and last week of a year.
///
/// Displays as the ISO week label, e.g. `2020-W53`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WeekDescriptor {
    year: i32,
    week: u32,
    start: Timestamp,
    end: Timestamp,
}

impl WeekDescriptor {
    /// The ISO week-based year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The ISO week number, 1-53.
    pub fn week(&self) -> u32 {
        self.week
    }

    /// Monday 00:00:00.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Sunday 23:59:59.999999999.
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Whether `t` falls within this week, bounds included.
    pub fn contains(&self, t: &Timestamp) -> bool {
        self.start <= *t && *t <= self.end
    }
}

impl fmt::Display for WeekDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

// ── resolve ─────────────────────────────────────────────────────────────────

/// Resolve the ISO 8601 week that `t` falls in.
///
/// The week-based year is chosen by the first rule that matches:
///
/// 1. Week 1 whose Sunday is in January belongs to the Sunday's year, even
///    when its Monday is still in December.
/// 2. Week 50 or later whose Monday is in December belongs to the Monday's
///    year, even when its Sunday is already in January.
/// 3. Otherwise the week does not cross New Year and takes the year of `t`.
///
/// # Examples
///
/// ```
/// use week_engine::{resolve, Timestamp};
///
/// // Friday 1 January 2021 is in the last week of 2020.
/// let t = Timestamp::parse_rfc3339("2021-01-01T12:00:00Z").unwrap();
/// let week = resolve(&t);
/// assert_eq!(week.year(), 2020);
/// assert_eq!(week.week(), 53);
/// assert_eq!(week.to_string(), "2020-W53");
/// ```
pub fn resolve(t: &Timestamp) -> WeekDescriptor {
    let week = iso_week_number(t);
    let start = first_day_of_week(t);
    let end = last_day_of_week(t);
    let year = week_based_year(t, week, &start, &end);

    WeekDescriptor {
        year,
        week,
        start,
        end,
    }
}

/// Resolve the week containing the current instant, viewed in UTC.
pub fn current_week() -> WeekDescriptor {
    resolve(&epoch::now())
}

/// Resolve the week containing the current instant, viewed in `options.offset`.
///
/// # Errors
///
/// Returns [`TimeError::OutOfRange`] if the clock reads an instant whose local
/// time in `options.offset` is not representable.
pub fn current_week_with_options(options: &WeekOptions) -> Result<WeekDescriptor, TimeError> {
    let now = epoch::now().with_offset(options.offset)?;
    Ok(resolve(&now))
}

/// Build the descriptor for week `week` of ISO week-based year `year`.
///
/// The bounds are expressed in `offset`.
///
/// # Errors
///
/// Returns [`TimeError::InvalidWeek`] if the year has no such week (week 0,
/// week 53 of a 52-week year) or the week lies outside the representable range.
pub fn resolve_iso_week(
    year: i32,
    week: u32,
    offset: FixedOffset,
) -> Result<WeekDescriptor, TimeError> {
    let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
        .ok_or_else(|| TimeError::InvalidWeek(format!("{year:04}-W{week:02} does not exist")))?;
    let start = local_instant(monday, NaiveTime::MIN, offset).ok_or_else(|| {
        TimeError::InvalidWeek(format!("{year:04}-W{week:02} is not representable"))
    })?;
    Ok(resolve(&start))
}

// ── Week pieces ─────────────────────────────────────────────────────────────

/// The ISO 8601 week number (1-53) of `t`'s local date.
pub fn iso_week_number(t: &Timestamp) -> u32 {
    t.as_datetime().iso_week().week()
}

/// Midnight at the start of the Monday on or before `t`'s local date.
///
/// Saturates to the earliest representable instant in `t`'s offset if that
/// Monday lies before chrono's range.
pub fn first_day_of_week(t: &Timestamp) -> Timestamp {
    let date = t.date_naive();
    let since_monday = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(since_monday))
        .and_then(|monday| local_instant(monday, NaiveTime::MIN, t.offset()))
        .unwrap_or_else(|| earliest_in(t.offset()))
}

/// The last nanosecond of the Sunday on or after `t`'s local date.
///
/// Saturates to the latest representable instant in `t`'s offset if that
/// Sunday lies beyond chrono's range.
pub fn last_day_of_week(t: &Timestamp) -> Timestamp {
    let date = t.date_naive();
    let until_sunday = u64::from(6 - date.weekday().num_days_from_monday());
    date.checked_add_days(Days::new(until_sunday))
        .zip(NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999))
        .and_then(|(sunday, last)| local_instant(sunday, last, t.offset()))
        .unwrap_or_else(|| latest_in(t.offset()))
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Apply the New Year rules in order; the order matters at the boundary.
fn week_based_year(t: &Timestamp, week: u32, start: &Timestamp, end: &Timestamp) -> i32 {
    if end.month() == 1 && week == 1 {
        tracing::trace!(week, year = end.year(), "week 1 reaches into January");
        end.year()
    } else if start.month() == 12 && week >= 50 {
        tracing::trace!(week, year = start.year(), "late week starts in December");
        start.year()
    } else {
        t.year()
    }
}

fn local_instant(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> Option<Timestamp> {
    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .and_then(|dt| Timestamp::try_from(dt).ok())
}

/// Earliest instant whose local time in `offset` is representable.
fn earliest_in(offset: FixedOffset) -> Timestamp {
    offset
        .from_local_datetime(&NaiveDateTime::MIN)
        .single()
        .and_then(|dt| Timestamp::try_from(dt).ok())
        .or_else(|| Timestamp::from(DateTime::<Utc>::MIN_UTC).with_offset(offset).ok())
        .unwrap_or_else(|| Timestamp::from(DateTime::<Utc>::MIN_UTC))
}

/// Latest instant whose local time in `offset` is representable.
fn latest_in(offset: FixedOffset) -> Timestamp {
    offset
        .from_local_datetime(&NaiveDateTime::MAX)
        .single()
        .and_then(|dt| Timestamp::try_from(dt).ok())
        .or_else(|| Timestamp::from(DateTime::<Utc>::MAX_UTC).with_offset(offset).ok())
        .unwrap_or_else(|| Timestamp::from(DateTime::<Utc>::MAX_UTC))
}

// ── Tests ───────────────────────────────────────────────────────────────────
