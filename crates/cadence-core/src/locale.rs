//! Day and month name tables.
//!
//! Name resolution is an explicit value rather than ambient process state:
//! an engine carries the [`Locale`] it resolves names against, and callers
//! who need another language supply their own tables.

/// Name tables for resolving day and month names to calendar numbers.
///
/// Matching is case-insensitive and accepts either the full name or any
/// prefix of at least three letters, so `"Sun"`, `"sunday"`, and `"SUNDAY"`
/// all resolve to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    weekday_names: [&'static str; 7],
    month_names: [&'static str; 12],
}

impl Locale {
    /// The built-in English tables.
    #[must_use]
    pub const fn english() -> Self {
        Self {
            weekday_names: [
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ],
            month_names: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
        }
    }

    /// Builds a locale from custom name tables.
    ///
    /// `weekday_names` starts at Sunday; `month_names` starts at January.
    #[must_use]
    pub const fn new(
        weekday_names: [&'static str; 7],
        month_names: [&'static str; 12],
    ) -> Self {
        Self {
            weekday_names,
            month_names,
        }
    }

    /// Resolves a weekday name to its number (Sunday = 0).
    #[must_use]
    pub fn weekday_number(&self, name: &str) -> Option<u32> {
        resolve(&self.weekday_names, name)
    }

    /// Resolves a month name to its zero-based number (January = 0).
    #[must_use]
    pub fn month_number(&self, name: &str) -> Option<u32> {
        resolve(&self.month_names, name)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

/// Finds `name` in `table`, matching the full name or a prefix of at least
/// three letters, case-insensitively.
fn resolve(table: &[&'static str], name: &str) -> Option<u32> {
    let wanted = name.to_lowercase();
    if wanted.chars().count() < 3 {
        return None;
    }
    table
        .iter()
        .position(|candidate| {
            let candidate = candidate.to_lowercase();
            let abbreviation: String = candidate.chars().take(3).collect();
            candidate == wanted || wanted.starts_with(&abbreviation)
        })?
        .try_into()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_full_weekday_names() {
        let locale = Locale::english();
        assert_eq!(locale.weekday_number("Sunday"), Some(0));
        assert_eq!(locale.weekday_number("saturday"), Some(6));
    }

    #[test]
    fn resolves_abbreviations() {
        let locale = Locale::english();
        assert_eq!(locale.weekday_number("Thu"), Some(4));
        assert_eq!(locale.month_number("feb"), Some(1));
    }

    #[test]
    fn tolerates_misspellings_that_keep_the_prefix() {
        // Anything starting with the three-letter abbreviation resolves.
        let locale = Locale::english();
        assert_eq!(locale.month_number("Februray"), Some(1));
    }

    #[test]
    fn rejects_unknown_and_too_short_names() {
        let locale = Locale::english();
        assert_eq!(locale.weekday_number("Noday"), None);
        assert_eq!(locale.month_number("Fe"), None);
    }

    #[test]
    fn custom_tables() {
        let locale = Locale::new(
            [
                "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
            ],
            [
                "janvier", "février", "mars", "avril", "mai", "juin", "juillet",
                "août", "septembre", "octobre", "novembre", "décembre",
            ],
        );
        assert_eq!(locale.weekday_number("Mardi"), Some(2));
        assert_eq!(locale.month_number("AOÛT"), Some(7));
    }
}
