//! # week-engine
//!
//! Unix epoch conversion and ISO 8601 week computation.
//!
//! Week numbers are not monotonic with the calendar year: the last week of a
//! year can run into January, and week 1 can start in December. This crate
//! resolves the week-based year for those boundary weeks explicitly instead
//! of trusting the calendar year of the input date.
//!
//! ## Modules
//!
//! - [`epoch`] — Seconds since 1970-01-01T00:00:00Z ↔ [`Timestamp`]
//! - [`week`] — ISO 8601 week number, week bounds and week-based year
//! - [`timestamp`] — The offset-aware instant both modules work on
//! - [`error`] — Error types

pub mod epoch;
pub mod error;
pub mod timestamp;
pub mod week;

pub use epoch::{
    from_epoch_seconds, now, now_epoch_seconds, now_epoch_seconds_precise, to_epoch_seconds,
    to_epoch_seconds_precise, EpochValue,
};
pub use error::TimeError;
pub use timestamp::Timestamp;
pub use week::{
    current_week, current_week_with_options, first_day_of_week, iso_week_number,
    last_day_of_week, resolve, resolve_iso_week, WeekDescriptor, WeekOptions,
};
