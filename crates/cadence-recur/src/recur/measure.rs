//! The closed set of units a rule can be expressed in.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which matching algorithm a measure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleFamily {
    /// Elapsed-distance divisibility from the engine's start date.
    Interval,
    /// Absolute calendar field membership.
    Calendar,
}

/// The unit or category a rule is expressed in.
///
/// The first four measures form the interval family, the remaining six the
/// calendar family. An engine holds at most one rule per measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Days,
    Weeks,
    Months,
    Years,
    DaysOfWeek,
    DaysOfMonth,
    WeeksOfMonth,
    WeeksOfMonthByDay,
    WeeksOfYear,
    MonthsOfYear,
}

impl Measure {
    /// Returns the canonical (plural) name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
            Self::DaysOfWeek => "daysOfWeek",
            Self::DaysOfMonth => "daysOfMonth",
            Self::WeeksOfMonth => "weeksOfMonth",
            Self::WeeksOfMonthByDay => "weeksOfMonthByDay",
            Self::WeeksOfYear => "weeksOfYear",
            Self::MonthsOfYear => "monthsOfYear",
        }
    }

    /// Parses a measure from its singular or plural name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "day" | "days" => Self::Days,
            "week" | "weeks" => Self::Weeks,
            "month" | "months" => Self::Months,
            "year" | "years" => Self::Years,
            "dayOfWeek" | "daysOfWeek" => Self::DaysOfWeek,
            "dayOfMonth" | "daysOfMonth" => Self::DaysOfMonth,
            "weekOfMonth" | "weeksOfMonth" => Self::WeeksOfMonth,
            "weekOfMonthByDay" | "weeksOfMonthByDay" => Self::WeeksOfMonthByDay,
            "weekOfYear" | "weeksOfYear" => Self::WeeksOfYear,
            "monthOfYear" | "monthsOfYear" => Self::MonthsOfYear,
            _ => return None,
        })
    }

    /// Returns the family whose matching algorithm this measure uses.
    #[must_use]
    pub const fn family(self) -> RuleFamily {
        match self {
            Self::Days | Self::Weeks | Self::Months | Self::Years => RuleFamily::Interval,
            Self::DaysOfWeek
            | Self::DaysOfMonth
            | Self::WeeksOfMonth
            | Self::WeeksOfMonthByDay
            | Self::WeeksOfYear
            | Self::MonthsOfYear => RuleFamily::Calendar,
        }
    }

    /// Returns the inclusive range of valid unit values.
    ///
    /// Interval measures accept any positive integer; each calendar measure
    /// has a fixed window.
    #[must_use]
    pub const fn unit_range(self) -> (u32, u32) {
        match self {
            Self::Days | Self::Weeks | Self::Months | Self::Years => (1, u32::MAX),
            Self::DaysOfMonth => (1, 31),
            Self::DaysOfWeek => (0, 6),
            Self::WeeksOfMonth | Self::WeeksOfMonthByDay => (0, 4),
            Self::WeeksOfYear => (0, 52),
            Self::MonthsOfYear => (0, 11),
        }
    }

    /// Returns all measures in declaration order.
    #[must_use]
    pub const fn all() -> [Self; 10] {
        [
            Self::Days,
            Self::Weeks,
            Self::Months,
            Self::Years,
            Self::DaysOfWeek,
            Self::DaysOfMonth,
            Self::WeeksOfMonth,
            Self::WeeksOfMonthByDay,
            Self::WeeksOfYear,
            Self::MonthsOfYear,
        ]
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Measure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::parse(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized measure: {name}")))
    }
}
