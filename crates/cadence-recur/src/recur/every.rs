//! The staging half of rule construction.

use crate::error::RecurResult;
use crate::recur::engine::Recurrence;
use crate::recur::measure::Measure;
use crate::recur::units::Units;

/// Staged units waiting for a measure.
///
/// Returned by [`Recurrence::every`]; no rule exists until one of the
/// measure methods (or [`of`](Self::of)) commits the staged units against
/// the engine. Dropping an `Every` without a terminal call discards the
/// staged units.
///
/// ```
/// use cadence_recur::Recurrence;
///
/// # fn main() -> cadence_recur::RecurResult<()> {
/// let mut recurrence = Recurrence::starting("01/01/2014")?;
/// recurrence.every(2).days()?;
/// recurrence.every(["Sunday"]).days_of_week()?;
/// # Ok(())
/// # }
/// ```
#[must_use = "staged units do not create a rule until a measure method commits them"]
pub struct Every<'a> {
    recurrence: &'a mut Recurrence,
    units: Units,
}

impl<'a> Every<'a> {
    pub(crate) fn new(recurrence: &'a mut Recurrence, units: Units) -> Self {
        Self { recurrence, units }
    }

    /// Commits the staged units against an explicit measure.
    ///
    /// ## Errors
    ///
    /// Whatever rule validation rejects; see [`Recurrence::every`].
    pub fn of(self, measure: Measure) -> RecurResult<&'a mut Recurrence> {
        self.recurrence.commit(&self.units, measure)?;
        Ok(self.recurrence)
    }

    /// Commits an interval rule measured in days.
    ///
    /// ## Errors
    ///
    /// Whatever rule validation rejects; see [`Recurrence::every`].
    pub fn days(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::Days)
    }

    /// Alias for [`days`](Self::days).
    ///
    /// ## Errors
    ///
    /// As [`days`](Self::days).
    pub fn day(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::Days)
    }

    /// Commits an interval rule measured in weeks.
    ///
    /// ## Errors
    ///
    /// Whatever rule validation rejects; see [`Recurrence::every`].
    pub fn weeks(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::Weeks)
    }

    /// Alias for [`weeks`](Self::weeks).
    ///
    /// ## Errors
    ///
    /// As [`weeks`](Self::weeks).
    pub fn week(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::Weeks)
    }

    /// Commits an interval rule measured in months.
    ///
    /// ## Errors
    ///
    /// Whatever rule validation rejects; see [`Recurrence::every`].
    pub fn months(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::Months)
    }

    /// Alias for [`months`](Self::months).
    ///
    /// ## Errors
    ///
    /// As [`months`](Self::months).
    pub fn month(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::Months)
    }

    /// Commits an interval rule measured in years.
    ///
    /// ## Errors
    ///
    /// Whatever rule validation rejects; see [`Recurrence::every`].
    pub fn years(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::Years)
    }

    /// Alias for [`years`](Self::years).
    ///
    /// ## Errors
    ///
    /// As [`years`](Self::years).
    pub fn year(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::Years)
    }

    /// Commits a calendar rule on days of the week (Sunday = 0).
    ///
    /// ## Errors
    ///
    /// Whatever rule validation rejects; see [`Recurrence::every`].
    pub fn days_of_week(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::DaysOfWeek)
    }

    /// Alias for [`days_of_week`](Self::days_of_week).
    ///
    /// ## Errors
    ///
    /// As [`days_of_week`](Self::days_of_week).
    pub fn day_of_week(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::DaysOfWeek)
    }

    /// Commits a calendar rule on days of the month (1-31).
    ///
    /// ## Errors
    ///
    /// Whatever rule validation rejects; see [`Recurrence::every`].
    pub fn days_of_month(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::DaysOfMonth)
    }

    /// Alias for [`days_of_month`](Self::days_of_month).
    ///
    /// ## Errors
    ///
    /// As [`days_of_month`](Self::days_of_month).
    pub fn day_of_month(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::DaysOfMonth)
    }

    /// Commits a calendar rule on weeks of the month (0-4).
    ///
    /// ## Errors
    ///
    /// Whatever rule validation rejects; see [`Recurrence::every`].
    pub fn weeks_of_month(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::WeeksOfMonth)
    }

    /// Alias for [`weeks_of_month`](Self::weeks_of_month).
    ///
    /// ## Errors
    ///
    /// As [`weeks_of_month`](Self::weeks_of_month).
    pub fn week_of_month(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::WeeksOfMonth)
    }

    /// Commits a calendar rule on a weekday's occurrence within the month
    /// (0-4); requires an existing `daysOfWeek` rule.
    ///
    /// ## Errors
    ///
    /// Whatever rule validation rejects; see [`Recurrence::every`].
    pub fn weeks_of_month_by_day(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::WeeksOfMonthByDay)
    }

    /// Alias for [`weeks_of_month_by_day`](Self::weeks_of_month_by_day).
    ///
    /// ## Errors
    ///
    /// As [`weeks_of_month_by_day`](Self::weeks_of_month_by_day).
    pub fn week_of_month_by_day(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::WeeksOfMonthByDay)
    }

    /// Commits a calendar rule on weeks of the year (0-52).
    ///
    /// ## Errors
    ///
    /// Whatever rule validation rejects; see [`Recurrence::every`].
    pub fn weeks_of_year(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::WeeksOfYear)
    }

    /// Alias for [`weeks_of_year`](Self::weeks_of_year).
    ///
    /// ## Errors
    ///
    /// As [`weeks_of_year`](Self::weeks_of_year).
    pub fn week_of_year(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::WeeksOfYear)
    }

    /// Commits a calendar rule on months of the year (January = 0).
    ///
    /// ## Errors
    ///
    /// Whatever rule validation rejects; see [`Recurrence::every`].
    pub fn months_of_year(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::MonthsOfYear)
    }

    /// Alias for [`months_of_year`](Self::months_of_year).
    ///
    /// ## Errors
    ///
    /// As [`months_of_year`](Self::months_of_year).
    pub fn month_of_year(self) -> RecurResult<&'a mut Recurrence> {
        self.of(Measure::MonthsOfYear)
    }
}
