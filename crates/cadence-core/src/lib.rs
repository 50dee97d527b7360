//! Core date primitives for the cadence workspace.
//!
//! Everything in this crate is day-granular: a [`Day`] is a calendar date
//! with no time-of-day and no timezone, and every comparison, difference,
//! and field accessor operates at that granularity. The rule engine in
//! `cadence-recur` builds on these primitives and never touches `chrono`
//! directly.

pub mod day;
pub mod error;
pub mod locale;

pub use day::{ACCEPTED_FORMATS, DateInput, Day};
pub use error::{CoreError, CoreResult};
pub use locale::Locale;
