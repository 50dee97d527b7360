//! The tagged rule variant an engine stores.

use cadence_core::{Day, Locale};

use crate::error::{RecurError, RecurResult};
use crate::recur::calendar::CalendarRule;
use crate::recur::interval::IntervalRule;
use crate::recur::measure::{Measure, RuleFamily};
use crate::recur::save::SavedRule;
use crate::recur::units::{UnitSet, Units};

/// One committed rule. An engine ANDs all of its rules together; each
/// rule's own unit set is ORed internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Interval(IntervalRule),
    Calendar(CalendarRule),
}

impl Rule {
    /// Builds a rule from staged units, dispatching on the measure's family.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::MissingStartDate`] for an interval measure
    /// with no start date, or whatever the family's validation rejects.
    pub(crate) fn build(
        units: &Units,
        measure: Measure,
        locale: &Locale,
        start: Option<Day>,
    ) -> RecurResult<Self> {
        match measure.family() {
            RuleFamily::Interval => {
                if start.is_none() {
                    return Err(RecurError::MissingStartDate);
                }
                Ok(Self::Interval(IntervalRule::new(units, measure)?))
            }
            RuleFamily::Calendar => Ok(Self::Calendar(CalendarRule::new(units, measure, locale)?)),
        }
    }

    /// Rebuilds a rule from its saved form through the same validation as
    /// live staging.
    ///
    /// ## Errors
    ///
    /// As [`Rule::build`], minus name resolution (saved units are numeric).
    pub(crate) fn from_saved(saved: &SavedRule, start: Option<Day>) -> RecurResult<Self> {
        match saved.measure.family() {
            RuleFamily::Interval => {
                if start.is_none() {
                    return Err(RecurError::MissingStartDate);
                }
                Ok(Self::Interval(IntervalRule::from_set(
                    &saved.units,
                    saved.measure,
                )?))
            }
            RuleFamily::Calendar => Ok(Self::Calendar(CalendarRule::from_set(
                &saved.units,
                saved.measure,
            )?)),
        }
    }

    /// The measure this rule is expressed in.
    #[must_use]
    pub const fn measure(&self) -> Measure {
        match self {
            Self::Interval(rule) => rule.measure(),
            Self::Calendar(rule) => rule.measure(),
        }
    }

    /// The configured units.
    #[must_use]
    pub const fn units(&self) -> &UnitSet {
        match self {
            Self::Interval(rule) => rule.units(),
            Self::Calendar(rule) => rule.units(),
        }
    }

    /// This rule's truth value for `date`.
    ///
    /// An interval rule evaluated while the engine has no start date does
    /// not match.
    pub(crate) fn matches(&self, start: Option<Day>, date: Day) -> bool {
        match self {
            Self::Interval(rule) => start.is_some_and(|start| rule.matches(start, date)),
            Self::Calendar(rule) => rule.matches(date),
        }
    }

    /// The flat saved form.
    #[must_use]
    pub fn to_saved(&self) -> SavedRule {
        SavedRule {
            measure: self.measure(),
            units: self.units().clone(),
        }
    }
}
