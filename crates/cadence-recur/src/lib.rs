//! Day-granular recurring-date rule engine.
//!
//! A [`Recurrence`] holds an optional start/end window, a list of rules
//! that are ANDed together, and a list of exception dates. Rules come in
//! two families: interval rules ("every 2 days from the start date") match
//! on elapsed-distance divisibility, calendar rules ("the 1st and 10th of
//! the month") match on absolute calendar field membership.
//!
//! ```
//! use cadence_recur::Recurrence;
//!
//! # fn main() -> cadence_recur::RecurResult<()> {
//! let mut recurrence = Recurrence::starting("01/01/2014")?;
//! recurrence.every(2).days()?;
//!
//! assert!(recurrence.matches("01/03/2014")?);
//! assert!(!recurrence.matches("01/04/2014")?);
//!
//! let upcoming = recurrence.next(3)?;
//! assert_eq!(upcoming[0].to_string(), "01/03/2014");
//! # Ok(())
//! # }
//! ```
//!
//! Matching is day-granular and timezone-naive throughout: inputs carrying
//! a time component are truncated to their calendar date at intake, and no
//! timezone conversion is ever applied.

pub mod error;
pub mod recur;

pub use cadence_core::{DateInput, Day, Locale};
pub use error::{RecurError, RecurResult};
pub use recur::{
    CalendarRule, Direction, Every, ForgetTarget, IntervalRule, MAX_PROBE_DAYS, Measure,
    Occurrences, Recurrence, Rule, RuleFamily, SavedRecurrence, SavedRule, UnitSet, UnitValue,
    Units,
};
