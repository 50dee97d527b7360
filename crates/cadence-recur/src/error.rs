use thiserror::Error;

use crate::recur::Measure;

/// Rule-engine errors.
///
/// Every failure is a synchronous, fail-fast input or configuration error:
/// nothing is retried, and no state is mutated before validation succeeds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecurError {
    #[error("Interval units must be positive whole numbers, got {0}")]
    InvalidUnit(String),

    #[error("Unit {value} for {measure} must be between {low} and {high}")]
    UnitOutOfRange {
        measure: Measure,
        value: i64,
        low: u32,
        high: u32,
    },

    #[error("Start date cannot be later than end date")]
    StartAfterEnd,

    #[error("weeksOfMonthByDay must be combined with daysOfWeek")]
    InvalidCombination,

    #[error("Unrecognized measure: {0}")]
    UnknownMeasure(String),

    #[error("An interval rule requires a start date")]
    MissingStartDate,

    #[error("Occurrence enumeration requires a start or from date")]
    MissingAnchor,

    #[error("Collecting all occurrences requires both start and end dates")]
    MissingBounds,

    #[error(transparent)]
    InvalidDate(#[from] cadence_core::CoreError),
}

pub type RecurResult<T> = std::result::Result<T, RecurError>;
