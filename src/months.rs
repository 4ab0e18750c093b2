use std::borrow::Cow;

use serde::Serialize;

use crate::{FRENCH_MONTHS, Month, ParseError};

/// Ordered table of abbreviated month prefixes.
///
/// Lookup is first-match-wins: the month of the first entry whose prefix
/// starts the input is returned. The table is validated on construction so
/// that no entry is unreachable behind an earlier, shorter prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTable {
    entries: Vec<(Cow<'static, str>, Month)>,
}

/// Error type for month table construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// An empty prefix would match every input.
    #[error("Empty month prefix at position {0}")]
    EmptyPrefix(usize),

    /// A later entry can never match because an earlier prefix covers it.
    #[error("Month prefix {later:?} is shadowed by earlier prefix {earlier:?}")]
    Shadowed { earlier: String, later: String },

    /// Month number out of range.
    #[error(transparent)]
    ParseError(#[from] ParseError),
}

impl MonthTable {
    /// Builds a table from `(prefix, month number)` pairs, in lookup order.
    ///
    /// # Errors
    /// Returns `TableError::EmptyPrefix` for an empty prefix,
    /// `TableError::Shadowed` when an entry starts with the prefix of an
    /// earlier one, and `TableError::ParseError` for a month outside 1..=12.
    pub fn new<I, S>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, u8)>,
        S: Into<Cow<'static, str>>,
    {
        let mut table: Vec<(Cow<'static, str>, Month)> = Vec::new();
        for (position, (prefix, month)) in entries.into_iter().enumerate() {
            let prefix = prefix.into();
            if prefix.is_empty() {
                return Err(TableError::EmptyPrefix(position));
            }
            if let Some((earlier, _)) = table.iter().find(|(p, _)| prefix.starts_with(p.as_ref())) {
                return Err(TableError::Shadowed {
                    earlier: earlier.to_string(),
                    later: prefix.into_owned(),
                });
            }
            table.push((prefix, Month::new(month)?));
        }
        Ok(Self { entries: table })
    }

    /// The table used by the French edition of the forum software.
    pub fn french() -> Self {
        Self {
            entries: FRENCH_MONTHS
                .iter()
                .filter_map(|&(prefix, month)| Some((Cow::Borrowed(prefix), Month::new(month).ok()?)))
                .collect(),
        }
    }

    /// Resolves a (possibly abbreviated) month name.
    pub fn lookup(&self, name: &str) -> Option<Month> {
        self.entries
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix.as_ref()))
            .map(|&(_, month)| month)
    }

    /// Same as [`MonthTable::lookup`], but an unknown name is an error.
    ///
    /// # Errors
    /// Returns `ParseError::UnknownMonth` when no prefix matches.
    pub fn resolve(&self, name: &str) -> Result<Month, ParseError> {
        self.lookup(name)
            .ok_or_else(|| ParseError::UnknownMonth(name.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(prefix, month)` pairs in lookup order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Month)> {
        self.entries.iter().map(|(prefix, month)| (prefix.as_ref(), *month))
    }
}

impl Default for MonthTable {
    fn default() -> Self {
        Self::french()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_french_table_is_valid() {
        let validated = MonthTable::new(FRENCH_MONTHS).unwrap();
        assert_eq!(validated, MonthTable::french());
        assert_eq!(validated.len(), 12);
    }

    #[test]
    fn test_lookup_full_names() {
        let table = MonthTable::french();
        let names = [
            "Janvier", "Février", "Mars", "Avril", "Mai", "Juin", "Juillet", "Août", "Septembre",
            "Octobre", "Novembre", "Décembre",
        ];
        for (expected, name) in (1..=12).zip(names) {
            assert_eq!(
                table.lookup(name).map(Month::get),
                Some(expected),
                "{name} should resolve to {expected}"
            );
        }
    }

    #[test]
    fn test_lookup_abbreviations() {
        let table = MonthTable::french();
        assert_eq!(table.lookup("Mar").map(Month::get), Some(3));
        assert_eq!(table.lookup("Mai").map(Month::get), Some(5));
        assert_eq!(table.lookup("Juil").map(Month::get), Some(7));
        assert_eq!(table.lookup("Juin").map(Month::get), Some(6));
        assert_eq!(table.lookup("Sep").map(Month::get), Some(9));
    }

    #[test]
    fn test_lookup_unknown() {
        let table = MonthTable::french();
        assert_eq!(table.lookup(""), None);
        assert_eq!(table.lookup("Ma"), None);
        assert_eq!(table.lookup("Jui"), None);
        assert_eq!(table.lookup("mars"), None);
        assert!(matches!(
            table.resolve("Xyz"),
            Err(ParseError::UnknownMonth(ref name)) if name == "Xyz"
        ));
    }

    #[test]
    fn test_lookup_is_deterministic() {
        let table = MonthTable::french();
        for name in ["Mars", "Ju", "Octobre", "?"] {
            assert_eq!(table.lookup(name), table.lookup(name));
        }
    }

    #[test]
    fn test_first_match_wins() {
        let table = MonthTable::new([("Mai", 5), ("Mar", 3)]).unwrap();
        assert_eq!(table.lookup("Mars").map(Month::get), Some(3));
        assert_eq!(table.lookup("Maison").map(Month::get), Some(5));
    }

    #[test]
    fn test_shadowed_prefix_rejected() {
        let result = MonthTable::new([("M", 3), ("Mai", 5)]);
        assert_eq!(
            result,
            Err(TableError::Shadowed {
                earlier: "M".to_owned(),
                later: "Mai".to_owned()
            })
        );

        // Duplicates shadow each other too
        let result = MonthTable::new([("Ja", 1), ("Ja", 1)]);
        assert!(matches!(result, Err(TableError::Shadowed { .. })));
    }

    #[test]
    fn test_longer_prefix_first_is_allowed() {
        // The more specific entry comes first, so both stay reachable
        let table = MonthTable::new([("Mai", 5), ("M", 3)]).unwrap();
        assert_eq!(table.lookup("Mai").map(Month::get), Some(5));
        assert_eq!(table.lookup("Mars").map(Month::get), Some(3));
    }

    #[test]
    fn test_invalid_entries_rejected() {
        assert_eq!(MonthTable::new([("Ja", 1), ("", 2)]), Err(TableError::EmptyPrefix(1)));
        assert_eq!(
            MonthTable::new([("X", 13)]),
            Err(TableError::ParseError(ParseError::InvalidMonth(13)))
        );
    }

    #[test]
    fn test_owned_prefixes() {
        let table = MonthTable::new(vec![(String::from("Jan"), 1), (String::from("Feb"), 2)]).unwrap();
        assert_eq!(table.lookup("February").map(Month::get), Some(2));
        let prefixes: Vec<&str> = table.iter().map(|(prefix, _)| prefix).collect();
        assert_eq!(prefixes, ["Jan", "Feb"]);
    }

    #[test]
    fn test_error_display() {
        let err = TableError::Shadowed {
            earlier: "M".to_owned(),
            later: "Mai".to_owned(),
        };
        assert_eq!(err.to_string(), r#"Month prefix "Mai" is shadowed by earlier prefix "M""#);
    }
}
