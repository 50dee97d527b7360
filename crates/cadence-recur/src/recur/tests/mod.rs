//! Engine-level behavior tests.

mod round_trip;

use cadence_core::Day;

pub(crate) fn day(text: &str) -> Day {
    Day::parse(text).expect("test date should parse")
}

pub(crate) fn days(texts: &[&str]) -> Vec<Day> {
    texts.iter().map(|text| day(text)).collect()
}
