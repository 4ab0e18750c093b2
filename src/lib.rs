//! Parsing helpers for archiving legacy French forums.
//!
//! - [`DateNormalizer`] turns the dates printed by the forum ("Hier - 09:00",
//!   "Lun 3 Mar 2023 à 11:05", "15/06/2022", ...) into [`Timestamp`]s.
//! - [`page_offsets`] reads the pagination bootstrap script of a listing and
//!   yields the item offset of every page.
//! - [`util`] holds the small helpers the archiver needs around them.

mod clock;
mod consts;
mod date;
mod months;
mod pagination;
mod prelude;
mod types;
pub mod util;

pub use clock::{Clock, FixedClock, SystemClock};
pub use consts::*;
pub use date::{DateNormalizer, normalize, normalize_admin, normalize_userlist};
pub use months::{MonthTable, TableError};
pub use pagination::{
    HtmlScripts, PageOffsets, PaginationExtractor, PaginationSpec, ScriptSource, page_offsets,
    pagination_spec,
};
pub use types::{Month, Timestamp};

use crate::prelude::*;
use chrono::NaiveDateTime;

/// Reasons a forum date could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Unrecognized date format: {_0:?}")]
    UnrecognizedFormat(String),
    #[display(fmt = "Invalid time: {_0:?}")]
    InvalidTime(String),
    #[display(fmt = "Invalid number: {_0:?}")]
    InvalidNumber(String),
    #[display(fmt = "Unknown month: {_0:?}")]
    UnknownMonth(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[display(fmt = "Local time {_0} does not exist in this timezone")]
    NonexistentLocalTime(NaiveDateTime),
}

impl std::error::Error for ParseError {}
