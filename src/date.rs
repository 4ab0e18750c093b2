//! Normalization of the dates printed by the forum into [`Timestamp`]s.
//!
//! Three encodings show up depending on the page:
//!
//! - post dates: `"Lun 3 Mar 2023 - 11:05"`, `"Aujourd'hui à 14:30"`,
//!   `"Hier - 09:00"`, or `"Jamais"`
//! - administration panel dates: `"3 Mar 2023"`
//! - member list dates: `"15/06/2022"`
//!
//! Post dates are strict: anything unexpected is a [`ParseError`]. The two
//! other encodings are best-effort metadata and fall back to
//! [`Timestamp::NEVER`] when the input is blank, short or malformed.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use regex::Regex;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::months::MonthTable;
use crate::{
    DATE_TIME_SEPARATOR, Month, NEVER_LITERAL, ParseError, TIME_SEPARATOR, TODAY_LITERAL, Timestamp,
    USERLIST_SEPARATOR, WORD_SEPARATOR, YESTERDAY_LITERAL,
};

/// Converts forum dates to timestamps in a given timezone.
///
/// The clock and timezone are injected so that relative dates and local time
/// conversion do not depend on process-wide state:
///
/// ```
/// use chrono::{DateTime, Utc};
/// use forum_parse::{DateNormalizer, FixedClock};
///
/// let now = DateTime::from_timestamp(1_710_504_000, 0).unwrap(); // 2024-03-15 12:00 UTC
/// let normalizer = DateNormalizer::new()
///     .with_clock(FixedClock::new(now))
///     .with_timezone(Utc);
///
/// let ts = normalizer.normalize("Aujourd'hui - 14:30").unwrap();
/// assert_eq!(ts.as_secs(), 1_710_513_000);
/// ```
#[derive(Debug, Clone)]
pub struct DateNormalizer<C = SystemClock, Tz = Local> {
    clock: C,
    tz: Tz,
    months: MonthTable,
}

impl DateNormalizer {
    /// System clock, process-local timezone and the French month table.
    pub fn new() -> Self {
        Self {
            clock: SystemClock,
            tz: Local,
            months: MonthTable::french(),
        }
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, Tz: TimeZone> DateNormalizer<C, Tz> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> DateNormalizer<C2, Tz> {
        DateNormalizer {
            clock,
            tz: self.tz,
            months: self.months,
        }
    }

    pub fn with_timezone<Tz2: TimeZone>(self, tz: Tz2) -> DateNormalizer<C, Tz2> {
        DateNormalizer {
            clock: self.clock,
            tz,
            months: self.months,
        }
    }

    #[must_use]
    pub fn with_month_table(mut self, months: MonthTable) -> Self {
        self.months = months;
        self
    }

    pub const fn month_table(&self) -> &MonthTable {
        &self.months
    }

    /// Normalizes a post date.
    ///
    /// # Errors
    /// Returns a [`ParseError`] when the input matches none of the post date
    /// grammars, names an unknown month, or describes an impossible date or
    /// time.
    pub fn normalize(&self, raw: &str) -> Result<Timestamp, ParseError> {
        if raw == NEVER_LITERAL {
            return Ok(Timestamp::NEVER);
        }

        let parts: Vec<&str> = date_time_separator().split(raw).collect();
        let &[date_part, time_part] = parts.as_slice() else {
            return Err(ParseError::UnrecognizedFormat(raw.to_owned()));
        };

        let time = parse_time(time_part)?;
        let date = self.post_date(date_part)?;
        self.to_timestamp(date.and_time(time))
    }

    /// Normalizes a date of the administration panel (`"3 Mar 2023"`), at
    /// midnight.
    ///
    /// Blank input, input with fewer than three fields and malformed fields
    /// all yield [`Timestamp::NEVER`]; extra fields are ignored.
    ///
    /// # Errors
    /// Returns `ParseError::NonexistentLocalTime` when midnight of that day
    /// does not exist in the timezone.
    pub fn normalize_admin(&self, raw: &str) -> Result<Timestamp, ParseError> {
        let fields: Vec<&str> = raw.split(WORD_SEPARATOR).collect();
        let &[day, month, year, ..] = fields.as_slice() else {
            return Ok(unreadable("admin", raw, "too few fields"));
        };

        match self.months.resolve(month).and_then(|month| build_date(day, month, year)) {
            Ok(date) => self.to_timestamp(date.and_time(NaiveTime::MIN)),
            Err(err) => Ok(unreadable("admin", raw, err)),
        }
    }

    /// Normalizes a date of the member list (`"15/06/2022"`), at midnight.
    ///
    /// Same fallback as [`DateNormalizer::normalize_admin`].
    ///
    /// # Errors
    /// Returns `ParseError::NonexistentLocalTime` when midnight of that day
    /// does not exist in the timezone.
    pub fn normalize_userlist(&self, raw: &str) -> Result<Timestamp, ParseError> {
        let fields: Vec<&str> = raw.split(USERLIST_SEPARATOR).collect();
        let &[day, month, year, ..] = fields.as_slice() else {
            return Ok(unreadable("userlist", raw, "too few fields"));
        };

        let date = parse_number(month)
            .and_then(Month::new)
            .and_then(|month| build_date(day, month, year));
        match date {
            Ok(date) => self.to_timestamp(date.and_time(NaiveTime::MIN)),
            Err(err) => Ok(unreadable("userlist", raw, err)),
        }
    }

    fn post_date(&self, date_part: &str) -> Result<NaiveDate, ParseError> {
        match date_part {
            TODAY_LITERAL => Ok(self.clock.today(&self.tz)),
            YESTERDAY_LITERAL => self
                .clock
                .today(&self.tz)
                .pred_opt()
                .ok_or_else(|| ParseError::UnrecognizedFormat(date_part.to_owned())),
            _ => {
                let fields: Vec<&str> = date_part.split(WORD_SEPARATOR).collect();
                // The weekday is redundant with the date
                let &[_weekday, day, month, year] = fields.as_slice() else {
                    return Err(ParseError::UnrecognizedFormat(date_part.to_owned()));
                };
                build_date(day, self.months.resolve(month)?, year)
            }
        }
    }

    /// DST overlaps resolve to the earliest instant; gaps are errors.
    fn to_timestamp(&self, local: NaiveDateTime) -> Result<Timestamp, ParseError> {
        self.tz
            .from_local_datetime(&local)
            .earliest()
            .map(|datetime| Timestamp::from_secs(datetime.timestamp()))
            .ok_or(ParseError::NonexistentLocalTime(local))
    }
}

/// [`DateNormalizer::normalize`] with the system clock and local timezone.
///
/// # Errors
/// See [`DateNormalizer::normalize`].
pub fn normalize(raw: &str) -> Result<Timestamp, ParseError> {
    DateNormalizer::new().normalize(raw)
}

/// [`DateNormalizer::normalize_admin`] with the local timezone.
///
/// # Errors
/// See [`DateNormalizer::normalize_admin`].
pub fn normalize_admin(raw: &str) -> Result<Timestamp, ParseError> {
    DateNormalizer::new().normalize_admin(raw)
}

/// [`DateNormalizer::normalize_userlist`] with the local timezone.
///
/// # Errors
/// See [`DateNormalizer::normalize_userlist`].
pub fn normalize_userlist(raw: &str) -> Result<Timestamp, ParseError> {
    DateNormalizer::new().normalize_userlist(raw)
}

#[allow(clippy::expect_used)]
fn date_time_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DATE_TIME_SEPARATOR).expect("date/time separator is a valid pattern"))
}

/// Lenient fallback of the admin and member list dates.
fn unreadable(grammar: &'static str, raw: &str, reason: impl fmt::Display) -> Timestamp {
    debug!(
        grammar,
        input = raw,
        blank = raw.trim().is_empty(),
        %reason,
        "unreadable date, using the never sentinel"
    );
    Timestamp::NEVER
}

fn parse_number<T: FromStr>(field: &str) -> Result<T, ParseError> {
    field
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidNumber(field.to_owned()))
}

fn parse_time(s: &str) -> Result<NaiveTime, ParseError> {
    let Some((hours, minutes)) = s.split_once(TIME_SEPARATOR) else {
        return Err(ParseError::InvalidTime(s.to_owned()));
    };
    if minutes.contains(TIME_SEPARATOR) {
        return Err(ParseError::InvalidTime(s.to_owned()));
    }
    NaiveTime::from_hms_opt(parse_number(hours)?, parse_number(minutes)?, 0)
        .ok_or_else(|| ParseError::InvalidTime(s.to_owned()))
}

fn build_date(day: &str, month: Month, year: &str) -> Result<NaiveDate, ParseError> {
    let day: u32 = parse_number(day)?;
    let year: i32 = parse_number(year)?;
    NaiveDate::from_ymd_opt(year, month.number(), day).ok_or(ParseError::InvalidDate {
        year,
        month: month.number(),
        day,
    })
}
