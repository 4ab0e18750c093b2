//! Wall clock used to resolve relative dates ("Aujourd'hui", "Hier").

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date as seen from `tz`
    fn today<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.now().with_timezone(tz).date_naive()
    }
}

/// The process clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_fixed_clock_today() {
        let clock = FixedClock::new(DateTime::from_timestamp(1_710_504_000, 0).unwrap());
        assert_eq!(clock.today(&Utc), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_today_depends_on_timezone() {
        // 2024-03-15 23:30 UTC is already the 16th in Paris (UTC+1)
        let clock = FixedClock::new(DateTime::from_timestamp(1_710_545_400, 0).unwrap());
        let paris = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(clock.today(&Utc), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(clock.today(&paris), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    }

    #[test]
    fn test_system_clock_advances() {
        let first = SystemClock.now();
        let second = SystemClock.now();
        assert!(first <= second);
    }
}
