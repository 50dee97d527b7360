//! The recurrence engine: state, rule commitment, matching, enumeration.

use cadence_core::{DateInput, Day, Locale};
use chrono::NaiveDate;

use crate::error::{RecurError, RecurResult};
use crate::recur::every::Every;
use crate::recur::measure::Measure;
use crate::recur::occurrences::{Direction, Occurrences};
use crate::recur::rule::Rule;
use crate::recur::save::SavedRecurrence;
use crate::recur::units::Units;

/// A recurring date pattern.
///
/// Holds an optional `[start, end]` window, an ordered list of rules
/// (at most one per measure, all ANDed together), a list of exception
/// dates that never match, and an ephemeral `from` date anchoring
/// [`next`](Self::next) / [`previous`](Self::previous) enumeration.
///
/// All dates are normalized to day granularity at intake. The engine is a
/// pure predicate/enumerator: it never schedules anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Recurrence {
    start: Option<Day>,
    end: Option<Day>,
    from: Option<Day>,
    rules: Vec<Rule>,
    exceptions: Vec<Day>,
    locale: Locale,
}

impl Default for Recurrence {
    fn default() -> Self {
        Self::new()
    }
}

impl Recurrence {
    /// An empty engine: no window, no rules, no exceptions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: None,
            end: None,
            from: None,
            rules: Vec::new(),
            exceptions: Vec::new(),
            locale: Locale::english(),
        }
    }

    /// An engine with a start date.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::InvalidDate`] for unparsable input.
    pub fn starting(start: impl DateInput) -> RecurResult<Self> {
        let mut recurrence = Self::new();
        recurrence.set_start_date(start)?;
        Ok(recurrence)
    }

    /// An engine with both a start and an end date.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::InvalidDate`] for unparsable input.
    pub fn between(start: impl DateInput, end: impl DateInput) -> RecurResult<Self> {
        let mut recurrence = Self::starting(start)?;
        recurrence.set_end_date(end)?;
        Ok(recurrence)
    }

    /// Replaces the locale used to resolve day and month names.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Stages a unit set; the returned [`Every`] commits it once given a
    /// measure.
    ///
    /// ```
    /// use cadence_recur::Recurrence;
    ///
    /// # fn main() -> cadence_recur::RecurResult<()> {
    /// let mut recurrence = Recurrence::starting("01/01/2014")?;
    /// recurrence.every([1, 10]).days_of_month()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn every(&mut self, units: impl Into<Units>) -> Every<'_> {
        Every::new(self, units.into())
    }

    /// Shorthand for `every(units).days()`.
    ///
    /// ## Errors
    ///
    /// As [`every`](Self::every) followed by the measure method.
    pub fn days(&mut self, units: impl Into<Units>) -> RecurResult<&mut Self> {
        self.every(units).days()
    }

    /// Shorthand for `every(units).weeks()`.
    ///
    /// ## Errors
    ///
    /// As [`every`](Self::every) followed by the measure method.
    pub fn weeks(&mut self, units: impl Into<Units>) -> RecurResult<&mut Self> {
        self.every(units).weeks()
    }

    /// Shorthand for `every(units).months()`.
    ///
    /// ## Errors
    ///
    /// As [`every`](Self::every) followed by the measure method.
    pub fn months(&mut self, units: impl Into<Units>) -> RecurResult<&mut Self> {
        self.every(units).months()
    }

    /// Shorthand for `every(units).years()`.
    ///
    /// ## Errors
    ///
    /// As [`every`](Self::every) followed by the measure method.
    pub fn years(&mut self, units: impl Into<Units>) -> RecurResult<&mut Self> {
        self.every(units).years()
    }

    /// Shorthand for `every(units).days_of_week()`.
    ///
    /// ## Errors
    ///
    /// As [`every`](Self::every) followed by the measure method.
    pub fn days_of_week(&mut self, units: impl Into<Units>) -> RecurResult<&mut Self> {
        self.every(units).days_of_week()
    }

    /// Shorthand for `every(units).days_of_month()`.
    ///
    /// ## Errors
    ///
    /// As [`every`](Self::every) followed by the measure method.
    pub fn days_of_month(&mut self, units: impl Into<Units>) -> RecurResult<&mut Self> {
        self.every(units).days_of_month()
    }

    /// Shorthand for `every(units).weeks_of_month()`.
    ///
    /// ## Errors
    ///
    /// As [`every`](Self::every) followed by the measure method.
    pub fn weeks_of_month(&mut self, units: impl Into<Units>) -> RecurResult<&mut Self> {
        self.every(units).weeks_of_month()
    }

    /// Shorthand for `every(units).weeks_of_month_by_day()`.
    ///
    /// ## Errors
    ///
    /// As [`every`](Self::every) followed by the measure method.
    pub fn weeks_of_month_by_day(&mut self, units: impl Into<Units>) -> RecurResult<&mut Self> {
        self.every(units).weeks_of_month_by_day()
    }

    /// Shorthand for `every(units).weeks_of_year()`.
    ///
    /// ## Errors
    ///
    /// As [`every`](Self::every) followed by the measure method.
    pub fn weeks_of_year(&mut self, units: impl Into<Units>) -> RecurResult<&mut Self> {
        self.every(units).weeks_of_year()
    }

    /// Shorthand for `every(units).months_of_year()`.
    ///
    /// ## Errors
    ///
    /// As [`every`](Self::every) followed by the measure method.
    pub fn months_of_year(&mut self, units: impl Into<Units>) -> RecurResult<&mut Self> {
        self.every(units).months_of_year()
    }

    /// Commits staged units against a measure: validates, enforces the
    /// `weeksOfMonthByDay` pairing, and replaces any rule with the same
    /// measure.
    pub(crate) fn commit(&mut self, units: &Units, measure: Measure) -> RecurResult<()> {
        let rule = Rule::build(units, measure, &self.locale, self.start)?;
        if rule.measure() == Measure::WeeksOfMonthByDay && !self.has_rule(Measure::DaysOfWeek) {
            return Err(RecurError::InvalidCombination);
        }
        let replaced = self.rules.iter().any(|existing| existing.measure() == measure);
        self.rules.retain(|existing| existing.measure() != measure);
        self.rules.push(rule);
        tracing::debug!(measure = %measure, replaced, "committed recurrence rule");
        Ok(())
    }

    /// Adds an exception date; a matching day never matches the pattern.
    /// Duplicates are permitted.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::InvalidDate`] for unparsable input.
    pub fn except(&mut self, date: impl DateInput) -> RecurResult<&mut Self> {
        let day = date.into_day()?;
        self.exceptions.push(day);
        Ok(self)
    }

    /// Removes an exception (by date) or a rule (by measure).
    ///
    /// A string argument is tried as a date first, then as a measure name.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::UnknownMeasure`] for a string that is neither
    /// a parsable date nor a measure name.
    pub fn forget(&mut self, target: impl Into<ForgetTarget>) -> RecurResult<&mut Self> {
        match target.into() {
            ForgetTarget::Date(day) => {
                self.forget_exception(day);
                Ok(self)
            }
            ForgetTarget::Measure(measure) => {
                self.forget_rule(measure);
                Ok(self)
            }
            ForgetTarget::Text(text) => {
                if let Ok(day) = Day::parse(&text) {
                    self.forget_exception(day);
                } else if let Some(measure) = Measure::parse(&text) {
                    self.forget_rule(measure);
                } else {
                    return Err(RecurError::UnknownMeasure(text));
                }
                Ok(self)
            }
        }
    }

    /// Removes the first exception equal to `day`, if any.
    fn forget_exception(&mut self, day: Day) {
        if let Some(index) = self.exceptions.iter().position(|exception| *exception == day) {
            self.exceptions.remove(index);
        }
    }

    /// Removes the rule with the given measure, if any.
    fn forget_rule(&mut self, measure: Measure) {
        self.rules.retain(|rule| rule.measure() != measure);
    }

    /// Whether a rule with the given measure is committed.
    #[must_use]
    pub fn has_rule(&self, measure: Measure) -> bool {
        self.rules.iter().any(|rule| rule.measure() == measure)
    }

    /// Whether any rule is committed.
    #[must_use]
    pub fn repeats(&self) -> bool {
        !self.rules.is_empty()
    }

    /// The committed rules, in commit order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The exception dates, in intake order.
    #[must_use]
    pub fn exceptions(&self) -> &[Day] {
        &self.exceptions
    }

    /// The locale used for day and month name resolution.
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The start of the matching window.
    #[must_use]
    pub fn start_date(&self) -> Option<Day> {
        self.start
    }

    /// Sets the start of the matching window.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::InvalidDate`] for unparsable input.
    pub fn set_start_date(&mut self, date: impl DateInput) -> RecurResult<&mut Self> {
        self.start = Some(date.into_day()?);
        Ok(self)
    }

    /// Clears the start of the matching window.
    pub fn clear_start_date(&mut self) -> &mut Self {
        self.start = None;
        self
    }

    /// The end of the matching window.
    #[must_use]
    pub fn end_date(&self) -> Option<Day> {
        self.end
    }

    /// Sets the end of the matching window.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::InvalidDate`] for unparsable input.
    pub fn set_end_date(&mut self, date: impl DateInput) -> RecurResult<&mut Self> {
        self.end = Some(date.into_day()?);
        Ok(self)
    }

    /// Clears the end of the matching window.
    pub fn clear_end_date(&mut self) -> &mut Self {
        self.end = None;
        self
    }

    /// The ephemeral enumeration anchor.
    #[must_use]
    pub fn from_date(&self) -> Option<Day> {
        self.from
    }

    /// Sets the ephemeral enumeration anchor. Never serialized.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::InvalidDate`] for unparsable input.
    pub fn set_from_date(&mut self, date: impl DateInput) -> RecurResult<&mut Self> {
        self.from = Some(date.into_day()?);
        Ok(self)
    }

    /// Clears the ephemeral enumeration anchor.
    pub fn clear_from_date(&mut self) -> &mut Self {
        self.from = None;
        self
    }

    /// Whether `date` matches the pattern, honoring the start/end window.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::InvalidDate`] for unparsable input.
    pub fn matches(&self, date: impl DateInput) -> RecurResult<bool> {
        Ok(self.matches_day(date.into_day()?, false))
    }

    /// Whether `date` matches the pattern, ignoring the start/end window.
    /// Exceptions and rules still apply.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::InvalidDate`] for unparsable input.
    pub fn matches_ignoring_range(&self, date: impl DateInput) -> RecurResult<bool> {
        Ok(self.matches_day(date.into_day()?, true))
    }

    /// Range gate (unless ignored), then exception gate, then the AND-fold
    /// over all rules. An engine with no rules matches every in-range,
    /// non-excepted date.
    pub(crate) fn matches_day(&self, day: Day, ignore_range: bool) -> bool {
        if !ignore_range && !self.in_range(day) {
            return false;
        }
        if self.exceptions.contains(&day) {
            return false;
        }
        self.rules.iter().all(|rule| rule.matches(self.start, day))
    }

    fn in_range(&self, day: Day) -> bool {
        self.start.is_none_or(|start| day >= start) && self.end.is_none_or(|end| day <= end)
    }

    /// The lazy occurrence sequence stepping away from the anchor (`from`
    /// if set, else `start`), nearest first. The anchor itself is excluded
    /// and the window is bypassed; see [`Occurrences`].
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::MissingAnchor`] when neither `from` nor
    /// `start` is set.
    pub fn occurrences(&self, direction: Direction) -> RecurResult<Occurrences<'_>> {
        let anchor = self.from.or(self.start).ok_or(RecurError::MissingAnchor)?;
        Ok(Occurrences::unbounded(self, anchor, direction))
    }

    /// The next `count` occurrences after the anchor, nearest first.
    ///
    /// ## Errors
    ///
    /// As [`occurrences`](Self::occurrences).
    pub fn next(&self, count: usize) -> RecurResult<Vec<Day>> {
        Ok(self.occurrences(Direction::Forward)?.take(count).collect())
    }

    /// The previous `count` occurrences before the anchor, nearest first.
    ///
    /// ## Errors
    ///
    /// As [`occurrences`](Self::occurrences).
    pub fn previous(&self, count: usize) -> RecurResult<Vec<Day>> {
        Ok(self.occurrences(Direction::Backward)?.take(count).collect())
    }

    /// Every occurrence from the anchor (`from` if set, else `start`)
    /// through the end date, inclusive, honoring the window.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::MissingBounds`] unless both `start` and `end`
    /// are set, and [`RecurError::StartAfterEnd`] if the window is
    /// inverted.
    pub fn all(&self) -> RecurResult<Vec<Day>> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(RecurError::MissingBounds);
        };
        if start > end {
            return Err(RecurError::StartAfterEnd);
        }
        let anchor = self.from.unwrap_or(start);
        Ok(Occurrences::bounded(self, anchor, end).collect())
    }

    /// Exports the persistent state: window, exceptions, and rules.
    /// The `from` date is ephemeral and excluded.
    #[must_use]
    pub fn save(&self) -> SavedRecurrence {
        SavedRecurrence {
            start: self.start,
            end: self.end,
            exceptions: self.exceptions.clone(),
            rules: self.rules.iter().map(Rule::to_saved).collect(),
        }
    }

    /// Rebuilds an engine from its saved form.
    ///
    /// Exceptions re-enter through [`except`](Self::except); rules are
    /// rebuilt through the same validation as live staging, and the
    /// `weeksOfMonthByDay` pairing is re-checked across the restored list.
    ///
    /// ## Errors
    ///
    /// Any staging-time error the saved data would produce live.
    pub fn from_saved(saved: &SavedRecurrence) -> RecurResult<Self> {
        let mut recurrence = Self::new();
        recurrence.start = saved.start;
        recurrence.end = saved.end;
        for exception in &saved.exceptions {
            recurrence.except(exception)?;
        }
        for rule in &saved.rules {
            let rebuilt = Rule::from_saved(rule, recurrence.start)?;
            recurrence
                .rules
                .retain(|existing| existing.measure() != rebuilt.measure());
            recurrence.rules.push(rebuilt);
        }
        if recurrence.has_rule(Measure::WeeksOfMonthByDay)
            && !recurrence.has_rule(Measure::DaysOfWeek)
        {
            return Err(RecurError::InvalidCombination);
        }
        tracing::debug!(
            rules = recurrence.rules.len(),
            exceptions = recurrence.exceptions.len(),
            "restored recurrence from saved form"
        );
        Ok(recurrence)
    }
}

/// Argument to [`Recurrence::forget`]: an exception date, a rule measure,
/// or a string resolved in that order.
#[derive(Debug, Clone, PartialEq)]
pub enum ForgetTarget {
    Date(Day),
    Measure(Measure),
    Text(String),
}

impl From<Day> for ForgetTarget {
    fn from(day: Day) -> Self {
        Self::Date(day)
    }
}

impl From<&Day> for ForgetTarget {
    fn from(day: &Day) -> Self {
        Self::Date(*day)
    }
}

impl From<NaiveDate> for ForgetTarget {
    fn from(date: NaiveDate) -> Self {
        Self::Date(Day::from(date))
    }
}

impl From<Measure> for ForgetTarget {
    fn from(measure: Measure) -> Self {
        Self::Measure(measure)
    }
}

impl From<&str> for ForgetTarget {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for ForgetTarget {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(text: &str) -> Day {
        Day::parse(text).expect("test date should parse")
    }

    #[test]
    fn staging_without_a_measure_creates_no_rule() {
        let mut recurrence = Recurrence::new();
        {
            let _staged = recurrence.every(1);
        }
        assert!(!recurrence.repeats());
    }

    #[test]
    fn committing_creates_one_rule() {
        let mut recurrence = Recurrence::starting("01/01/2014").expect("valid start");
        recurrence.every(1).day().expect("commits");
        assert!(recurrence.repeats());
        assert!(recurrence.has_rule(Measure::Days));
        assert!(!recurrence.has_rule(Measure::Months));
    }

    #[test]
    fn same_measure_commits_replace() {
        let mut recurrence = Recurrence::starting("01/01/2014").expect("valid start");
        recurrence.every(1).day().expect("commits");
        recurrence.every(2).days().expect("commits");
        assert_eq!(recurrence.rules().len(), 1);
        assert!(recurrence.rules()[0].units().contains(2));
        assert!(!recurrence.rules()[0].units().contains(1));
    }

    #[test]
    fn interval_rules_require_a_start_date() {
        let mut recurrence = Recurrence::new();
        assert_eq!(
            recurrence.every(2).days().unwrap_err(),
            RecurError::MissingStartDate
        );
        // Calendar rules do not.
        recurrence.every([1, 3]).days_of_month().expect("commits");
    }

    #[test]
    fn weeks_of_month_by_day_requires_days_of_week() {
        let mut recurrence = Recurrence::new();
        assert_eq!(
            recurrence.every(0).weeks_of_month_by_day().unwrap_err(),
            RecurError::InvalidCombination
        );
        recurrence.every(["Sunday"]).days_of_week().expect("commits");
        recurrence.every([0, 2]).weeks_of_month_by_day().expect("commits");
    }

    #[test]
    fn date_trios_get_set_and_clear() {
        let mut recurrence = Recurrence::new();
        recurrence.set_start_date("01/01/2013").expect("valid");
        recurrence.set_end_date("01/01/2014").expect("valid");
        recurrence.set_from_date("06/01/2013").expect("valid");
        assert_eq!(recurrence.start_date(), Some(day("01/01/2013")));
        assert_eq!(recurrence.end_date(), Some(day("01/01/2014")));
        assert_eq!(recurrence.from_date(), Some(day("06/01/2013")));
        recurrence.clear_from_date();
        assert_eq!(recurrence.from_date(), None);
    }

    #[test]
    fn invalid_dates_are_rejected_at_intake() {
        let mut recurrence = Recurrence::new();
        assert!(recurrence.set_start_date("not a date").is_err());
        assert!(recurrence.except("02/31/oops").is_err());
        assert!(recurrence.matches("garbage").is_err());
    }

    #[test]
    fn forget_removes_rules_by_measure_and_exceptions_by_date() {
        let mut recurrence = Recurrence::starting("01/01/2014").expect("valid start");
        recurrence.every(1).day().expect("commits");
        recurrence.forget("days").expect("known measure");
        assert!(!recurrence.repeats());

        recurrence.except("01/04/2014").expect("valid");
        recurrence.forget("01/04/2014").expect("valid date");
        assert!(recurrence.exceptions().is_empty());

        assert!(matches!(
            recurrence.forget("neither"),
            Err(RecurError::UnknownMeasure(_))
        ));
    }

    #[test]
    fn forget_removes_only_the_first_duplicate_exception() {
        let mut recurrence = Recurrence::new();
        recurrence.except("01/04/2014").expect("valid");
        recurrence.except("01/04/2014").expect("valid");
        recurrence.forget(day("01/04/2014")).expect("valid");
        assert_eq!(recurrence.exceptions().len(), 1);
    }

    #[test]
    fn an_engine_with_no_rules_matches_every_in_range_date() {
        let recurrence = Recurrence::between("01/01/2013", "01/01/2014").expect("valid");
        assert!(recurrence.matches("06/15/2013").expect("valid"));
        assert!(!recurrence.matches("06/15/2014").expect("valid"));
        assert!(recurrence.matches_ignoring_range("06/15/2014").expect("valid"));
    }

    #[test]
    fn cleared_start_disables_interval_rules() {
        let mut recurrence = Recurrence::starting("01/01/2014").expect("valid start");
        recurrence.every(2).days().expect("commits");
        recurrence.clear_start_date();
        assert!(!recurrence.matches_ignoring_range("01/03/2014").expect("valid"));
    }
}
