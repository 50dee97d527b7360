//! Day-granular calendar date value type.
//!
//! [`Day`] wraps a `chrono::NaiveDate` and exposes exactly the calendar
//! vocabulary the recurrence engine needs: lenient multi-format parsing,
//! day-of-week numbering with Sunday as 0, week-of-month and
//! weekday-occurrence accessors, and fractional unit differences with the
//! anchored month algorithm used for month/year distances.

use std::fmt;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, CoreResult};

/// String formats accepted for date input, tried in order; first parse wins.
pub const ACCEPTED_FORMATS: [&str; 3] = ["%m/%d/%Y", "%m-%d-%Y", "%Y-%m-%d"];

/// Display/export format (`MM/DD/YYYY`).
const DISPLAY_FORMAT: &str = "%m/%d/%Y";

/// A calendar date with no time-of-day and no timezone.
///
/// All comparisons between `Day`s are day-granular by construction. Inputs
/// carrying a time component are truncated to their calendar date at intake,
/// so two values on the same day always compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NaiveDate);

impl Day {
    /// Parses a date string against [`ACCEPTED_FORMATS`].
    ///
    /// ## Errors
    ///
    /// Returns [`CoreError::InvalidDate`] if no accepted format matches.
    pub fn parse(input: &str) -> CoreResult<Self> {
        for format in ACCEPTED_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(input, format) {
                return Ok(Self(date));
            }
        }
        tracing::trace!(input, "no accepted date format matched");
        Err(CoreError::InvalidDate(input.to_owned()))
    }

    /// Creates a day from explicit calendar fields (`month` is 1-based).
    ///
    /// ## Errors
    ///
    /// Returns [`CoreError::InvalidCalendarFields`] if the fields do not
    /// name a real calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(CoreError::InvalidCalendarFields { year, month, day })
    }

    /// Returns the underlying `chrono::NaiveDate`.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Calendar year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Zero-based month (January = 0).
    #[must_use]
    pub fn month0(self) -> u32 {
        self.0.month0()
    }

    /// Day of the month (1-31).
    #[must_use]
    pub fn day_of_month(self) -> u32 {
        self.0.day()
    }

    /// Day of the week with Sunday = 0 through Saturday = 6.
    #[must_use]
    pub fn day_of_week(self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// Week of the year, counting Sunday-started weeks.
    ///
    /// Week 1 is the week containing January 1. Days late in December that
    /// fall in the week containing the next January 1 report week 1.
    #[must_use]
    pub fn week_of_year(self) -> u32 {
        let jan1 = self.0 - Days::new(u64::from(self.0.ordinal0()));
        let days_in_year: u64 = if self.0.leap_year() { 366 } else { 365 };
        let next_jan1 = jan1 + Days::new(days_in_year);
        if self.0 >= week_start(next_jan1) {
            return 1;
        }
        let elapsed = self.0.signed_duration_since(week_start(jan1)).num_days();
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "elapsed is 0..366 by construction"
        )]
        let week = (elapsed / 7 + 1) as u32;
        week
    }

    /// Week of the month, zero-based, counting Sunday-started weeks from
    /// the week containing the 1st of the month.
    #[must_use]
    pub fn week_of_month(self) -> u32 {
        let first_of_month = self.0 - Days::new(u64::from(self.0.day0()));
        let elapsed = week_start(self.0)
            .signed_duration_since(week_start(first_of_month))
            .num_days();
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "elapsed is 0..42 by construction"
        )]
        let week = (elapsed / 7) as u32;
        week
    }

    /// Occurrence of this weekday within the month, zero-based.
    ///
    /// A value of 2 means this is the third occurrence of this day of the
    /// week in its month.
    #[must_use]
    pub fn week_of_month_by_day(self) -> u32 {
        (self.0.day() - 1) / 7
    }

    /// The day number of the last day of this day's month (28-31).
    #[must_use]
    pub fn last_day_of_month(self) -> u32 {
        let first_of_month = self.0 - Days::new(u64::from(self.0.day0()));
        (first_of_month + Months::new(1) - Days::new(1)).day()
    }

    /// Whether this is the last day of its month.
    #[must_use]
    pub fn is_last_day_of_month(self) -> bool {
        self.0.day() == self.last_day_of_month()
    }

    /// The following day.
    #[must_use]
    pub fn next_day(self) -> Self {
        Self(self.0 + Days::new(1))
    }

    /// The preceding day.
    #[must_use]
    pub fn previous_day(self) -> Self {
        Self(self.0 - Days::new(1))
    }

    /// This day shifted by a number of days.
    #[must_use]
    pub fn plus_days(self, days: i64) -> Self {
        let magnitude = Days::new(days.unsigned_abs());
        if days >= 0 {
            Self(self.0 + magnitude)
        } else {
            Self(self.0 - magnitude)
        }
    }

    /// This day shifted by whole weeks.
    #[must_use]
    pub fn plus_weeks(self, weeks: i64) -> Self {
        self.plus_days(weeks * 7)
    }

    /// This day shifted by whole months, clamping to the end of a shorter
    /// target month (January 31 plus one month is the last day of February).
    #[must_use]
    pub fn plus_months(self, months: i64) -> Self {
        let magnitude = u32::try_from(months.unsigned_abs()).unwrap_or(u32::MAX);
        if months >= 0 {
            Self(self.0 + Months::new(magnitude))
        } else {
            Self(self.0 - Months::new(magnitude))
        }
    }

    /// This day shifted by whole years, clamping February 29 as needed.
    #[must_use]
    pub fn plus_years(self, years: i64) -> Self {
        self.plus_months(years * 12)
    }

    /// Whole days from `other` to `self` (negative when `self` is earlier).
    #[must_use]
    pub fn days_since(self, other: Self) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }

    /// Fractional weeks from `other` to `self`.
    #[must_use]
    pub fn weeks_since(self, other: Self) -> f64 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "day counts are far below 2^52"
        )]
        let days = self.days_since(other) as f64;
        days / 7.0
    }

    /// Fractional months from `other` to `self`.
    ///
    /// Uses the anchored algorithm: the whole-month difference lands on an
    /// anchor date (with end-of-month clamping), and the leftover days are
    /// expressed as a fraction of the surrounding month's length. The result
    /// is a whole number exactly when `self` falls on the clamped
    /// month-anniversary of `other`.
    #[must_use]
    pub fn months_since(self, other: Self) -> f64 {
        let whole = i64::from(other.year() - self.year()) * 12
            + (i64::from(other.month0()) - i64::from(self.month0()));
        let anchor = self.plus_months(whole);
        #[expect(
            clippy::cast_precision_loss,
            reason = "day counts are far below 2^52"
        )]
        let adjust = if other < anchor {
            let previous_anchor = self.plus_months(whole - 1);
            other.days_since(anchor) as f64 / anchor.days_since(previous_anchor) as f64
        } else {
            let next_anchor = self.plus_months(whole + 1);
            other.days_since(anchor) as f64 / next_anchor.days_since(anchor) as f64
        };
        #[expect(
            clippy::cast_precision_loss,
            reason = "month counts are far below 2^52"
        )]
        let whole = whole as f64;
        -(whole + adjust)
    }

    /// Fractional years from `other` to `self`.
    #[must_use]
    pub fn years_since(self, other: Self) -> f64 {
        self.months_since(other) / 12.0
    }

    /// Formats this day with a `chrono` strftime pattern.
    ///
    /// ## Panics
    ///
    /// Panics if the pattern is not a valid strftime string.
    #[must_use]
    pub fn format(self, pattern: &str) -> String {
        self.0.format(pattern).to_string()
    }
}

/// The Sunday starting the week containing `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Conversion into a [`Day`] for every accepted date input shape.
///
/// String inputs go through [`Day::parse`]; datetime inputs are truncated
/// to their calendar date.
pub trait DateInput {
    /// Converts this value into a day-granular date.
    ///
    /// ## Errors
    ///
    /// Returns [`CoreError::InvalidDate`] for unparsable string input.
    fn into_day(self) -> CoreResult<Day>;
}

impl DateInput for Day {
    fn into_day(self) -> CoreResult<Day> {
        Ok(self)
    }
}

impl DateInput for &Day {
    fn into_day(self) -> CoreResult<Day> {
        Ok(*self)
    }
}

impl DateInput for NaiveDate {
    fn into_day(self) -> CoreResult<Day> {
        Ok(Day(self))
    }
}

impl DateInput for NaiveDateTime {
    fn into_day(self) -> CoreResult<Day> {
        Ok(Day(self.date()))
    }
}

impl<Tz: TimeZone> DateInput for DateTime<Tz> {
    fn into_day(self) -> CoreResult<Day> {
        Ok(Day(self.date_naive()))
    }
}

impl DateInput for &str {
    fn into_day(self) -> CoreResult<Day> {
        Day::parse(self)
    }
}

impl DateInput for String {
    fn into_day(self) -> CoreResult<Day> {
        Day::parse(&self)
    }
}
