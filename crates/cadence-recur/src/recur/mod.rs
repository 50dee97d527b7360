//! The rule engine: measures, unit sets, the two rule families, the
//! [`Recurrence`] engine itself, lazy occurrence enumeration, and the
//! flat saved form.

mod calendar;
mod engine;
mod every;
mod interval;
mod measure;
mod occurrences;
mod rule;
mod save;
mod units;

#[cfg(test)]
mod tests;

pub use calendar::CalendarRule;
pub use engine::{ForgetTarget, Recurrence};
pub use every::Every;
pub use interval::IntervalRule;
pub use measure::{Measure, RuleFamily};
pub use occurrences::{Direction, MAX_PROBE_DAYS, Occurrences};
pub use rule::Rule;
pub use save::{SavedRecurrence, SavedRule};
pub use units::{UnitSet, UnitValue, Units};
