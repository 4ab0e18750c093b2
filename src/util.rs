//! Small helpers used by the archiver around the parsers.

use std::ops::{AddAssign, SubAssign};

use rand::Rng;
use rand::distributions::Alphanumeric;
use tracing::debug;
use url::Url;

use crate::{ILLEGAL_FILENAME_CHARS, RANDOM_TOKEN_LENGTH};

/// Removes the characters `?<>|*/\":;` from a file name.
pub fn clean_filename(filename: &str) -> String {
    filename.replace(ILLEGAL_FILENAME_CHARS, "")
}

/// Drops the query string and fragment of a URL.
///
/// Absolute URLs are normalized by the `url` crate; relative ones are cut at
/// the first `?` or `#`.
pub fn clean_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.into()
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            raw.split(['?', '#']).next().unwrap_or_default().to_owned()
        }
        Err(err) => {
            debug!(%err, url = raw, "leaving unparseable url untouched");
            raw.to_owned()
        }
    }
}

/// Random alphanumeric token of `RANDOM_TOKEN_LENGTH` characters.
///
/// Not suitable for secrets.
pub fn random_string() -> String {
    random_string_with(&mut rand::thread_rng())
}

/// Same as [`random_string`] with a caller-provided generator.
pub fn random_string_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(RANDOM_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Sequential id generator with an adjustable base offset.
///
/// Ids are `value + offset`; `value` starts at 0 and moves with
/// [`Counter::new_id`], `+=` and `-=`. Share it through `&mut Counter`;
/// a copy would hand out the same ids again.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Counter {
    offset: i64,
    value: i64,
}

impl Counter {
    pub const fn new(offset: i64) -> Self {
        Self { offset, value: 0 }
    }

    pub const fn value(&self) -> i64 {
        self.value
    }

    pub const fn offset(&self) -> i64 {
        self.offset
    }

    pub const fn reset(&mut self, value: i64) {
        self.value = value;
    }

    /// Returns the next id and advances the counter
    pub const fn new_id(&mut self) -> i64 {
        let id = self.value + self.offset;
        self.value += 1;
        id
    }
}

impl AddAssign<i64> for Counter {
    fn add_assign(&mut self, rhs: i64) {
        self.value += rhs;
    }
}

impl SubAssign<i64> for Counter {
    fn sub_assign(&mut self, rhs: i64) {
        self.value -= rhs;
    }
}
