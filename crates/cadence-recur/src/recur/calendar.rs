//! Calendar rules: absolute field membership.

use cadence_core::{Day, Locale};

use crate::error::{RecurError, RecurResult};
use crate::recur::measure::{Measure, RuleFamily};
use crate::recur::units::{UnitSet, UnitValue, Units};

/// A rule matching dates whose calendar field (for this rule's measure) is
/// one of the configured units.
///
/// `daysOfMonth` rules additionally widen on the last day of a short
/// month: a "day 31" rule still fires on February 28, April 30, and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRule {
    measure: Measure,
    units: UnitSet,
}

impl CalendarRule {
    /// Resolves day/month names, validates ranges, and builds the rule.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::InvalidUnit`] for a name that the locale does
    /// not resolve (or a name given for a measure other than `daysOfWeek` /
    /// `monthsOfYear`), and [`RecurError::UnitOutOfRange`] for a number
    /// outside the measure's window.
    pub fn new(units: &Units, measure: Measure, locale: &Locale) -> RecurResult<Self> {
        debug_assert_eq!(measure.family(), RuleFamily::Calendar);
        let mut numbers = Vec::with_capacity(units.values().len());
        for value in units.values() {
            numbers.push(resolve_value(value, measure, locale)?);
        }
        Self::from_units(numbers, measure)
    }

    /// Rebuilds a rule from a stored unit set, re-applying range checks.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::UnitOutOfRange`] if any stored unit is outside
    /// the measure's window.
    pub(crate) fn from_set(units: &UnitSet, measure: Measure) -> RecurResult<Self> {
        Self::from_units(units.iter().map(i64::from), measure)
    }

    fn from_units(
        numbers: impl IntoIterator<Item = i64>,
        measure: Measure,
    ) -> RecurResult<Self> {
        let (low, high) = measure.unit_range();
        let mut units = Vec::new();
        for number in numbers {
            let unit = u32::try_from(number)
                .ok()
                .filter(|unit| (low..=high).contains(unit))
                .ok_or(RecurError::UnitOutOfRange {
                    measure,
                    value: number,
                    low,
                    high,
                })?;
            units.push(unit);
        }
        Ok(Self {
            measure,
            units: UnitSet::from_numbers(units),
        })
    }

    /// The measure this rule is expressed in.
    #[must_use]
    pub const fn measure(&self) -> Measure {
        self.measure
    }

    /// The configured units (names already resolved to numbers).
    #[must_use]
    pub const fn units(&self) -> &UnitSet {
        &self.units
    }

    /// Whether `date`'s field for this measure is a configured unit.
    #[must_use]
    pub fn matches(&self, date: Day) -> bool {
        let field = match self.measure {
            Measure::DaysOfMonth => date.day_of_month(),
            Measure::DaysOfWeek => date.day_of_week(),
            Measure::WeeksOfMonth => date.week_of_month(),
            Measure::WeeksOfMonthByDay => date.week_of_month_by_day(),
            Measure::WeeksOfYear => date.week_of_year(),
            Measure::MonthsOfYear => date.month0(),
            // Interval measures are rejected at construction.
            Measure::Days | Measure::Weeks | Measure::Months | Measure::Years => return false,
        };
        if self.units.contains(field) {
            return true;
        }
        // A short month's last day stands in for the missing day numbers
        // above it.
        if self.measure == Measure::DaysOfMonth && date.is_last_day_of_month() {
            let last = date.last_day_of_month();
            if last < 31 {
                return (last..=31).any(|unit| self.units.contains(unit));
            }
        }
        false
    }
}

/// Resolves one staged value to a number, translating names through the
/// locale for the two name-bearing measures.
fn resolve_value(value: &UnitValue, measure: Measure, locale: &Locale) -> RecurResult<i64> {
    match value {
        UnitValue::Number(number) => Ok(*number),
        UnitValue::Name(name) => {
            let resolved = match measure {
                Measure::DaysOfWeek => locale.weekday_number(name),
                Measure::MonthsOfYear => locale.month_number(name),
                _ => None,
            };
            resolved
                .map(i64::from)
                .ok_or_else(|| RecurError::InvalidUnit(name.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(text: &str) -> Day {
        Day::parse(text).expect("test date should parse")
    }

    fn rule(units: impl Into<Units>, measure: Measure) -> CalendarRule {
        CalendarRule::new(&units.into(), measure, &Locale::english())
            .expect("test rule should validate")
    }

    #[test]
    fn day_of_month_membership() {
        let rule = rule([1, 10], Measure::DaysOfMonth);
        assert!(rule.matches(day("2015-01-01")));
        assert!(rule.matches(day("2015-01-10")));
        assert!(!rule.matches(day("2015-01-02")));
        assert!(!rule.matches(day("2015-01-15")));
    }

    #[test]
    fn weekday_names_resolve_through_the_locale() {
        let rule = rule(["Sunday", "Thursday"], Measure::DaysOfWeek);
        assert!(rule.matches(day("01/06/2013"))); // a Sunday
        assert!(rule.matches(day("01/03/2013"))); // a Thursday
        assert!(!rule.matches(day("01/01/2013"))); // a Tuesday
    }

    #[test]
    fn month_names_resolve_zero_based() {
        let rule = rule("February", Measure::MonthsOfYear);
        assert!(rule.units().contains(1));
        assert!(rule.matches(day("02/14/2014")));
        assert!(!rule.matches(day("01/14/2014")));
    }

    #[test]
    fn names_are_invalid_outside_the_name_bearing_measures() {
        let result = CalendarRule::new(
            &Units::from("Sunday"),
            Measure::DaysOfMonth,
            &Locale::english(),
        );
        assert!(matches!(result, Err(RecurError::InvalidUnit(_))));
    }

    #[test]
    fn out_of_range_units_are_rejected() {
        let result = CalendarRule::new(
            &Units::from(32),
            Measure::DaysOfMonth,
            &Locale::english(),
        );
        assert!(matches!(
            result,
            Err(RecurError::UnitOutOfRange { low: 1, high: 31, .. })
        ));
        assert!(
            CalendarRule::new(&Units::from(7), Measure::DaysOfWeek, &Locale::english()).is_err()
        );
        assert!(
            CalendarRule::new(&Units::from(-1), Measure::WeeksOfMonth, &Locale::english())
                .is_err()
        );
    }

    #[test]
    fn week_of_month_membership() {
        let rule = rule([1, 3], Measure::WeeksOfMonth);
        assert!(rule.matches(day("01/06/2013")));
        assert!(rule.matches(day("01/26/2013")));
        assert!(!rule.matches(day("01/27/2013")));
    }

    #[test]
    fn week_of_year_membership() {
        let rule = rule(20, Measure::WeeksOfYear);
        assert!(rule.matches(day("05/14/2014")));
        assert!(!rule.matches(day("01/01/2013")));
    }

    #[test]
    fn short_months_widen_day_of_month_rules() {
        {
            let rule = rule(31, Measure::DaysOfMonth);
            assert!(rule.matches(day("01/31/2015")));
            assert!(rule.matches(day("02/28/2015"))); // last day of a 28-day month
            assert!(rule.matches(day("04/30/2015"))); // last day of a 30-day month
            assert!(!rule.matches(day("02/27/2015")));
        }

        let rule = rule(30, Measure::DaysOfMonth);
        assert!(rule.matches(day("02/28/2015")));
        assert!(rule.matches(day("04/30/2015")));
        assert!(rule.matches(day("01/30/2015"))); // day 30 itself still matches
    }

    #[test]
    fn widening_does_not_apply_below_the_last_day() {
        let rule = rule(29, Measure::DaysOfMonth);
        assert!(rule.matches(day("02/28/2015")));
        assert!(!rule.matches(day("02/28/2016"))); // leap year: Feb 29 exists
        assert!(rule.matches(day("02/29/2016")));
    }
}
