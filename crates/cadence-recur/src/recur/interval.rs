//! Interval rules: elapsed-distance divisibility from a start date.

use cadence_core::Day;

use crate::error::{RecurError, RecurResult};
use crate::recur::measure::{Measure, RuleFamily};
use crate::recur::units::{UnitSet, UnitValue, Units};

/// A rule matching dates whose distance from the start date, measured in
/// this rule's unit, is divisible by any of the configured units.
///
/// Distances in days are whole numbers; weeks, months, and years use the
/// fractional distances produced by [`Day`], so a "every 2 months" rule
/// only fires on the (clamped) month-anniversaries of the start date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalRule {
    measure: Measure,
    units: UnitSet,
}

impl IntervalRule {
    /// Validates staged units and builds the rule.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::InvalidUnit`] if any unit is a name or is not
    /// a positive integer.
    pub fn new(units: &Units, measure: Measure) -> RecurResult<Self> {
        debug_assert_eq!(measure.family(), RuleFamily::Interval);
        let mut numbers = Vec::with_capacity(units.values().len());
        for value in units.values() {
            match value {
                UnitValue::Number(number) => numbers.push(*number),
                UnitValue::Name(name) => return Err(RecurError::InvalidUnit(name.clone())),
            }
        }
        Self::from_units(numbers, measure)
    }

    /// Rebuilds a rule from a stored unit set, re-applying validation.
    ///
    /// ## Errors
    ///
    /// Returns [`RecurError::InvalidUnit`] if any unit is not positive.
    pub(crate) fn from_set(units: &UnitSet, measure: Measure) -> RecurResult<Self> {
        Self::from_units(units.iter().map(i64::from), measure)
    }

    fn from_units(
        numbers: impl IntoIterator<Item = i64>,
        measure: Measure,
    ) -> RecurResult<Self> {
        let mut units = Vec::new();
        for number in numbers {
            let unit = u32::try_from(number)
                .ok()
                .filter(|unit| *unit > 0)
                .ok_or_else(|| RecurError::InvalidUnit(number.to_string()))?;
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

    /// The configured units.
    #[must_use]
    pub const fn units(&self) -> &UnitSet {
        &self.units
    }

    /// Whether `date` sits a whole number of any configured unit away from
    /// `start` (in either direction).
    #[must_use]
    pub fn matches(&self, start: Day, date: Day) -> bool {
        match self.measure {
            Measure::Days => {
                let elapsed = date.days_since(start).abs();
                self.units.iter().any(|unit| elapsed % i64::from(unit) == 0)
            }
            Measure::Weeks => self.matches_fractional(date.weeks_since(start).abs()),
            Measure::Months => self.matches_fractional(date.months_since(start).abs()),
            Measure::Years => self.matches_fractional(date.years_since(start).abs()),
            Measure::DaysOfWeek
            | Measure::DaysOfMonth
            | Measure::WeeksOfMonth
            | Measure::WeeksOfMonthByDay
            | Measure::WeeksOfYear
            | Measure::MonthsOfYear => false,
        }
    }

    #[expect(
        clippy::float_cmp,
        reason = "divisibility requires an exactly whole number of units; \
                  near-misses must not match"
    )]
    fn matches_fractional(&self, elapsed: f64) -> bool {
        self.units
            .iter()
            .any(|unit| elapsed % f64::from(unit) == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(text: &str) -> Day {
        Day::parse(text).expect("test date should parse")
    }

    fn rule(units: impl Into<Units>, measure: Measure) -> IntervalRule {
        IntervalRule::new(&units.into(), measure).expect("test rule should validate")
    }

    #[test]
    fn rejects_zero_negative_and_named_units() {
        assert!(IntervalRule::new(&Units::from(0), Measure::Days).is_err());
        assert!(IntervalRule::new(&Units::from(-2), Measure::Days).is_err());
        assert!(IntervalRule::new(&Units::from("Sunday"), Measure::Days).is_err());
    }

    #[test]
    fn daily_divisibility() {
        let rule = rule(2, Measure::Days);
        let start = day("01/01/2013");
        assert!(rule.matches(start, start.plus_days(2)));
        assert!(rule.matches(start, start.plus_days(4)));
        assert!(!rule.matches(start, start.plus_days(3)));
    }

    #[test]
    fn distance_is_absolute() {
        let rule = rule(2, Measure::Days);
        let start = day("01/01/2013");
        assert!(rule.matches(start, start.plus_days(-2)));
        assert!(!rule.matches(start, start.plus_days(-3)));
    }

    #[test]
    fn any_unit_in_the_set_matches() {
        let rule = rule([3, 5], Measure::Days);
        let start = day("01/01/2013");
        assert!(rule.matches(start, start.plus_days(3)));
        assert!(rule.matches(start, start.plus_days(5)));
        assert!(rule.matches(start, start.plus_days(10)));
        assert!(!rule.matches(start, start.plus_days(4)));
        assert!(!rule.matches(start, start.plus_days(8)));
    }

    #[test]
    fn weekly_requires_whole_weeks() {
        let rule = rule(2, Measure::Weeks);
        let start = day("01/01/2013");
        assert!(rule.matches(start, start.plus_weeks(2)));
        assert!(!rule.matches(start, start.plus_days(2)));
        assert!(!rule.matches(start, start.plus_weeks(3)));
    }

    #[test]
    fn monthly_matches_month_anniversaries_only() {
        let rule = rule(3, Measure::Months);
        let start = day("01/01/2013");
        assert!(rule.matches(start, start.plus_months(3)));
        assert!(!rule.matches(start, start.plus_months(2)));
        assert!(!rule.matches(start, start.plus_days(2)));
    }

    #[test]
    fn yearly_matches_year_anniversaries_only() {
        let rule = rule(2, Measure::Years);
        let start = day("01/01/2013");
        assert!(rule.matches(start, start.plus_years(2)));
        assert!(!rule.matches(start, start.plus_years(3)));
        assert!(!rule.matches(start, start.plus_days(2)));
    }

    #[test]
    fn empty_unit_set_never_matches() {
        let rule = rule(Units::default(), Measure::Days);
        let start = day("01/01/2013");
        assert!(!rule.matches(start, start));
    }
}
