//! Unit inputs and the resolved unit set stored on committed rules.

use std::collections::{BTreeMap, BTreeSet};

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single staged unit: a number, or a name still to be resolved against
/// the engine's locale (day and month names only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitValue {
    Number(i64),
    Name(String),
}

impl From<i64> for UnitValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for UnitValue {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u32> for UnitValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for UnitValue {
    fn from(value: &str) -> Self {
        Self::Name(value.to_owned())
    }
}

impl From<String> for UnitValue {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

/// The unit argument accepted by [`Recurrence::every`] and the measure
/// shorthands: a single number or name, a list of either, or a
/// flag map in the saved-form shape (entries flagged `false` are dropped).
///
/// [`Recurrence::every`]: crate::recur::Recurrence::every
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Units(Vec<UnitValue>);

impl Units {
    /// The staged values, in intake order.
    #[must_use]
    pub fn values(&self) -> &[UnitValue] {
        &self.0
    }
}

impl From<i64> for Units {
    fn from(value: i64) -> Self {
        Self(vec![value.into()])
    }
}

impl From<i32> for Units {
    fn from(value: i32) -> Self {
        Self(vec![value.into()])
    }
}

impl From<u32> for Units {
    fn from(value: u32) -> Self {
        Self(vec![value.into()])
    }
}

impl From<&str> for Units {
    fn from(value: &str) -> Self {
        Self(vec![value.into()])
    }
}

impl From<String> for Units {
    fn from(value: String) -> Self {
        Self(vec![value.into()])
    }
}

impl<V: Into<UnitValue>, const N: usize> From<[V; N]> for Units {
    fn from(values: [V; N]) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<UnitValue>> From<Vec<V>> for Units {
    fn from(values: Vec<V>) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<UnitValue> + Clone> From<&[V]> for Units {
    fn from(values: &[V]) -> Self {
        Self(values.iter().cloned().map(Into::into).collect())
    }
}

impl From<BTreeMap<u32, bool>> for Units {
    fn from(flags: BTreeMap<u32, bool>) -> Self {
        Self(
            flags
                .into_iter()
                .filter_map(|(unit, flagged)| flagged.then_some(unit.into()))
                .collect(),
        )
    }
}

/// The resolved, validated unit numbers stored on a committed rule.
///
/// Serialized as the flag-map form of the saved shape:
/// `{ "1": true, "10": true }`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitSet(BTreeSet<u32>);

impl UnitSet {
    pub(crate) fn from_numbers(numbers: impl IntoIterator<Item = u32>) -> Self {
        Self(numbers.into_iter().collect())
    }

    /// Whether `unit` is present.
    #[must_use]
    pub fn contains(&self, unit: u32) -> bool {
        self.0.contains(&unit)
    }

    /// Iterates the units in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a UnitSet {
    type Item = u32;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, u32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl Serialize for UnitSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for unit in &self.0 {
            map.serialize_entry(&unit.to_string(), &true)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UnitSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, bool>::deserialize(deserializer)?;
        let mut units = BTreeSet::new();
        for (key, flagged) in entries {
            if !flagged {
                continue;
            }
            let unit: u32 = key.parse().map_err(|error| {
                serde::de::Error::custom(format!("invalid unit key {key:?}: {error}"))
            })?;
            units.insert(unit);
        }
        Ok(Self(units))
    }
}
