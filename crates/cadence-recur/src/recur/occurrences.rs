//! Lazy day-by-day occurrence enumeration.

use std::iter::FusedIterator;

use cadence_core::Day;

use crate::recur::engine::Recurrence;

/// Direction of occurrence enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Hard cap on consecutive non-matching probes before an unbounded scan
/// gives up (roughly one century of days). Prevents a rule set that never
/// matches from scanning forever.
pub const MAX_PROBE_DAYS: u32 = 36_600;

/// A lazy sequence of matching dates, produced one day-probe at a time.
///
/// Created by [`Recurrence::occurrences`] (anchor excluded, range bounds
/// bypassed) or internally by [`Recurrence::all`] (anchor included, range
/// bounds honored, bounded by the end date). The sequence is finite
/// whenever an end bound applies or the caller takes a fixed count; a scan
/// that probes [`MAX_PROBE_DAYS`] days without a match ends the sequence.
///
/// Iteration is not rewindable; start a fresh scan to re-iterate.
#[derive(Debug)]
pub struct Occurrences<'a> {
    recurrence: &'a Recurrence,
    cursor: Day,
    direction: Direction,
    /// Test the current cursor before stepping (used once, for the anchor).
    pending_cursor: bool,
    /// Honor the engine's start/end window while matching.
    honor_range: bool,
    /// Walk no further than this day (inclusive).
    stop_after: Option<Day>,
    exhausted: bool,
}

impl<'a> Occurrences<'a> {
    /// An unbounded scan stepping away from `anchor`, which itself is
    /// excluded; range bounds are deliberately bypassed so a `from` date
    /// may walk past the engine's window.
    pub(crate) fn unbounded(recurrence: &'a Recurrence, anchor: Day, direction: Direction) -> Self {
        Self {
            recurrence,
            cursor: anchor,
            direction,
            pending_cursor: false,
            honor_range: false,
            stop_after: None,
            exhausted: false,
        }
    }

    /// A forward scan from `anchor` (included when it matches) to `end`
    /// (inclusive), honoring the engine's window.
    pub(crate) fn bounded(recurrence: &'a Recurrence, anchor: Day, end: Day) -> Self {
        Self {
            recurrence,
            cursor: anchor,
            direction: Direction::Forward,
            pending_cursor: true,
            honor_range: true,
            stop_after: Some(end),
            exhausted: false,
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Day;

    fn next(&mut self) -> Option<Day> {
        if self.exhausted {
            return None;
        }
        let mut probes: u32 = 0;
        loop {
            if self.pending_cursor {
                self.pending_cursor = false;
            } else {
                self.cursor = match self.direction {
                    Direction::Forward => self.cursor.next_day(),
                    Direction::Backward => self.cursor.previous_day(),
                };
            }
            if let Some(stop) = self.stop_after
                && self.cursor > stop
            {
                self.exhausted = true;
                return None;
            }
            if self.recurrence.matches_day(self.cursor, !self.honor_range) {
                return Some(self.cursor);
            }
            probes += 1;
            if self.stop_after.is_none() && probes >= MAX_PROBE_DAYS {
                tracing::warn!(
                    cap = MAX_PROBE_DAYS,
                    "occurrence scan found no match within the probe cap"
                );
                self.exhausted = true;
                return None;
            }
        }
    }
}

impl FusedIterator for Occurrences<'_> {}
