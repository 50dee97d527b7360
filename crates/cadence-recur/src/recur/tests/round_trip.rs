//! The save/restore round-trip law: a restored engine matches exactly the
//! dates the original does.

use crate::recur::engine::Recurrence;
use crate::recur::save::SavedRecurrence;

use super::day;

/// Compares `matches` for every day in a window around the pattern.
fn assert_identical_matching(original: &Recurrence, restored: &Recurrence, from: &str, days: u32) {
    let mut cursor = day(from);
    for _ in 0..days {
        assert_eq!(
            original.matches(cursor).expect("valid"),
            restored.matches(cursor).expect("valid"),
            "divergence on {cursor}"
        );
        cursor = cursor.next_day();
    }
}

#[test_log::test]
fn interval_pattern_round_trips() {
    let mut original = Recurrence::between("01/01/2014", "12/31/2014").expect("valid");
    original.every(2).days().expect("commits");
    original.except("01/05/2014").expect("valid");

    let restored = Recurrence::from_saved(&original.save()).expect("restores");
    assert_identical_matching(&original, &restored, "12/01/2013", 450);
}

#[test_log::test]
fn layered_calendar_pattern_round_trips() {
    let mut original = Recurrence::new();
    original.every(["Sunday", "Thursday"]).days_of_week().expect("commits");
    original.every([0, 2]).weeks_of_month_by_day().expect("commits");
    original.every("February").months_of_year().expect("commits");

    let restored = Recurrence::from_saved(&original.save()).expect("restores");
    assert_identical_matching(&original, &restored, "01/01/2013", 800);
}

#[test_log::test]
fn end_of_month_widening_round_trips() {
    let mut original = Recurrence::new();
    original.every(31).days_of_month().expect("commits");

    let restored = Recurrence::from_saved(&original.save()).expect("restores");
    assert_identical_matching(&original, &restored, "01/01/2015", 400);
}

#[test_log::test]
fn the_saved_form_survives_json() {
    let mut original = Recurrence::between("01/01/2014", "12/31/2014").expect("valid");
    original.every([3, 5]).days().expect("commits");
    original.except("01/05/2014").expect("valid");
    original.except("01/05/2014").expect("valid"); // duplicates are kept

    let json = serde_json::to_string(&original.save()).expect("serializes");
    let reloaded: SavedRecurrence = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(reloaded, original.save());

    let restored = Recurrence::from_saved(&reloaded).expect("restores");
    assert_eq!(restored.exceptions().len(), 2);
    assert_identical_matching(&original, &restored, "12/15/2013", 420);
}
