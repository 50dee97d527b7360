//! The flat saved form of an engine's persistent state.

use cadence_core::Day;
use serde::{Deserialize, Serialize};

use crate::recur::measure::Measure;
use crate::recur::units::UnitSet;

/// The exported shape of a [`Recurrence`]: window, exceptions, and rules.
///
/// Dates serialize as `MM/DD/YYYY` strings and rule units as
/// `{ "<unit>": true }` maps, so the JSON form is
///
/// ```json
/// {
///   "start": "01/01/2014",
///   "end": "12/31/2014",
///   "exceptions": ["01/05/2014"],
///   "rules": [{ "measure": "days", "units": { "2": true } }]
/// }
/// ```
///
/// The ephemeral `from` date is never part of the saved form. Restoring
/// through [`Recurrence::from_saved`] re-validates everything, so a saved
/// form always round-trips to an engine with identical match behavior.
///
/// [`Recurrence`]: crate::recur::Recurrence
/// [`Recurrence::from_saved`]: crate::recur::Recurrence::from_saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRecurrence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Day>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Day>,

    #[serde(default)]
    pub exceptions: Vec<Day>,

    #[serde(default)]
    pub rules: Vec<SavedRule>,
}

/// One rule in the saved form: its measure name and resolved unit map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRule {
    pub measure: Measure,
    pub units: UnitSet,
}

#[cfg(test)]
mod tests {
    use crate::recur::engine::Recurrence;

    use super::*;

    #[test]
    fn saved_form_serializes_to_the_documented_shape() {
        let mut recurrence = Recurrence::between("01/01/2014", "12/31/2014").expect("valid");
        recurrence.every(2).days().expect("commits");
        recurrence.except("01/05/2014").expect("valid");

        let json = serde_json::to_value(recurrence.save()).expect("serializes");
        assert_eq!(json["start"], "01/01/2014");
        assert_eq!(json["end"], "12/31/2014");
        assert_eq!(json["exceptions"][0], "01/05/2014");
        assert_eq!(json["rules"][0]["measure"], "days");
        assert_eq!(json["rules"][0]["units"]["2"], true);
    }

    #[test]
    fn unset_bounds_are_omitted() {
        let recurrence = Recurrence::new();
        let json = serde_json::to_value(recurrence.save()).expect("serializes");
        assert!(json.get("start").is_none());
        assert!(json.get("end").is_none());
        assert_eq!(json["exceptions"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn saved_form_deserializes_from_the_documented_shape() {
        let saved: SavedRecurrence = serde_json::from_str(
            r#"{
                "start": "01/01/2014",
                "end": "12/31/2014",
                "exceptions": ["01/05/2014"],
                "rules": [{ "measure": "days", "units": { "2": true } }]
            }"#,
        )
        .expect("deserializes");

        let recurrence = Recurrence::from_saved(&saved).expect("restores");
        assert!(recurrence.matches("01/03/2014").expect("valid"));
        assert!(!recurrence.matches("01/05/2014").expect("valid"));
        assert!(!recurrence.matches("01/04/2014").expect("valid"));
    }

    #[test]
    fn from_date_is_not_part_of_the_saved_form() {
        let mut recurrence = Recurrence::between("01/01/2014", "12/31/2014").expect("valid");
        recurrence.set_from_date("06/01/2014").expect("valid");
        let saved = recurrence.save();
        let restored = Recurrence::from_saved(&saved).expect("restores");
        assert_eq!(restored.from_date(), None);
    }

    #[test]
    fn restore_rejects_invalid_rule_data() {
        let missing_start: SavedRecurrence = serde_json::from_str(
            r#"{ "rules": [{ "measure": "days", "units": { "2": true } }] }"#,
        )
        .expect("deserializes");
        assert!(Recurrence::from_saved(&missing_start).is_err());

        let unpaired: SavedRecurrence = serde_json::from_str(
            r#"{ "rules": [{ "measure": "weeksOfMonthByDay", "units": { "0": true } }] }"#,
        )
        .expect("deserializes");
        assert!(Recurrence::from_saved(&unpaired).is_err());

        let out_of_range: Result<SavedRecurrence, _> = serde_json::from_str(
            r#"{ "rules": [{ "measure": "daysOfWeek", "units": { "sun": true } }] }"#,
        );
        assert!(out_of_range.is_err());
    }
}
