use crate::consts::MAX_MONTH;
use crate::ParseError;
use crate::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU8;

/// Seconds since the Unix epoch of a date read from a forum page.
///
/// `Timestamp::NEVER` (0) stands for "never happened" and must not be read as
/// 1970-01-01.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The "never occurred" sentinel
    pub const NEVER: Self = Self(0);

    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Returns the number of seconds since the epoch
    #[inline]
    pub const fn as_secs(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_never(self) -> bool {
        self.0 == Self::NEVER.0
    }

    /// Converts to a UTC datetime; `None` for the sentinel or out of range values.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if self.is_never() {
            return None;
        }
        DateTime::from_timestamp(self.0, 0)
    }
}

/// Calendar month, 1 (January) through 12 (December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// # Errors
    /// `ParseError::InvalidMonth` outside `1..=MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        NonZeroU8::new(value)
            .filter(|month| month.get() <= MAX_MONTH)
            .map(Self)
            .ok_or(ParseError::InvalidMonth(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Month number as chrono takes it
    #[inline]
    pub const fn number(self) -> u32 {
        self.0.get() as u32
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_never() {
        assert!(Timestamp::NEVER.is_never());
        assert_eq!(Timestamp::NEVER.as_secs(), 0);
        assert_eq!(Timestamp::default(), Timestamp::NEVER);
        assert!(!Timestamp::from_secs(1).is_never());
    }

    #[test]
    fn test_timestamp_conversions() {
        let ts: Timestamp = 1_710_513_000.into();
        assert_eq!(ts.as_secs(), 1_710_513_000);
        let secs: i64 = ts.into();
        assert_eq!(secs, 1_710_513_000);
        assert_eq!(ts.to_string(), "1710513000");
    }

    #[test]
    fn test_timestamp_to_datetime() {
        assert_eq!(Timestamp::NEVER.to_datetime(), None);

        let dt = Timestamp::from_secs(1_710_513_000).to_datetime().unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-15T14:30:00+00:00");
    }

    #[test]
    fn test_timestamp_ordering() {
        let earlier = Timestamp::from_secs(100);
        let later = Timestamp::from_secs(200);
        assert!(earlier < later);
        assert!(Timestamp::NEVER < earlier);
    }

    #[test]
    fn test_timestamp_serde() {
        let ts = Timestamp::from_secs(1_710_513_000);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "1710513000");

        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, parsed);
    }

    #[test]
    fn test_month_new_valid() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid() {
        assert!(matches!(Month::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(ParseError::InvalidMonth(13))));
        assert!(matches!(Month::new(255), Err(ParseError::InvalidMonth(255))));
    }

    #[test]
    fn test_month_accessors() {
        let month = Month::new(8).unwrap();
        assert_eq!(month.get(), 8);
        assert_eq!(month.number(), 8);
        assert_eq!(month.to_string(), "8");
        let value: u8 = month.into();
        assert_eq!(value, 8);
    }

    #[test]
    fn test_month_try_from_u8() {
        let month: Month = 8.try_into().unwrap();
        assert_eq!(month.get(), 8);

        let result: Result<Month, _> = 13.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_month_serde() {
        let month = Month::new(8).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "8");

        let parsed: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(month, parsed);

        let result: Result<Month, _> = serde_json::from_str("13");
        assert!(result.is_err());
    }
}
