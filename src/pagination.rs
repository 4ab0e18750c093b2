//! Discovery of the page offsets of a forum listing.
//!
//! The forum software does not expose the number of pages in the markup. It
//! does emit an inline `do_pagination_start` script that clamps the requested
//! page to the last one and multiplies it by the number of items per page;
//! both numbers are read from there.

use std::iter::FusedIterator;
use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::{DEFAULT_ITEMS_PER_PAGE, DEFAULT_PAGE_COUNT, PAGINATION_PATTERN, SCRIPT_SELECTOR};

/// Page count and page size of a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PaginationSpec {
    page_count: u32,
    items_per_page: u32,
}

impl PaginationSpec {
    /// Returns `None` for a zero page count.
    pub const fn new(page_count: u32, items_per_page: u32) -> Option<Self> {
        if page_count == 0 {
            return None;
        }
        Some(Self {
            page_count,
            items_per_page,
        })
    }

    /// Reads the pagination bootstrap out of a script body, if present.
    pub fn from_script(script: &str) -> Option<Self> {
        let captures = pagination_pattern().captures(script)?;
        let page_count = captures[1].parse().ok();
        let items_per_page = captures[2].parse().ok();

        let spec = page_count.zip(items_per_page).and_then(|(p, i)| Self::new(p, i));
        if spec.is_none() {
            warn!(
                page_count = &captures[1],
                items_per_page = &captures[2],
                "pagination bootstrap with unusable numbers"
            );
        }
        spec
    }

    pub const fn page_count(&self) -> u32 {
        self.page_count
    }

    pub const fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    /// Item offset of every page, first page first.
    pub const fn offsets(&self) -> PageOffsets {
        PageOffsets {
            items_per_page: self.items_per_page as u64,
            front: 0,
            back: self.page_count,
        }
    }
}

impl Default for PaginationSpec {
    fn default() -> Self {
        Self {
            page_count: DEFAULT_PAGE_COUNT,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl IntoIterator for PaginationSpec {
    type Item = u64;
    type IntoIter = PageOffsets;

    fn into_iter(self) -> Self::IntoIter {
        self.offsets()
    }
}

/// Lazy sequence of page offsets: `0, n, 2n, ...` for each page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOffsets {
    items_per_page: u64,
    front: u32,
    back: u32,
}

impl PageOffsets {
    const fn offset(&self, page: u32) -> u64 {
        page as u64 * self.items_per_page
    }
}

impl Iterator for PageOffsets {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.front >= self.back {
            return None;
        }
        let offset = self.offset(self.front);
        self.front += 1;
        Some(offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.back - self.front).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for PageOffsets {
    fn next_back(&mut self) -> Option<u64> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.offset(self.back))
    }
}

impl ExactSizeIterator for PageOffsets {}

impl FusedIterator for PageOffsets {}

/// Supplies the text of the inline scripts of a document, in document order.
pub trait ScriptSource {
    fn scripts(&self, document: &str) -> Vec<String>;
}

/// Lenient HTML parsing with `scraper`; malformed markup is recovered, never
/// rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlScripts;

impl ScriptSource for HtmlScripts {
    fn scripts(&self, document: &str) -> Vec<String> {
        let html = Html::parse_document(document);
        html.select(script_selector())
            .map(|script| script.text().collect())
            .collect()
    }
}

impl<F> ScriptSource for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn scripts(&self, document: &str) -> Vec<String> {
        self(document)
    }
}

/// Finds the pagination of a document through a [`ScriptSource`].
#[derive(Debug, Clone, Default)]
pub struct PaginationExtractor<S = HtmlScripts> {
    source: S,
}

impl PaginationExtractor {
    pub const fn new() -> Self {
        Self {
            source: HtmlScripts,
        }
    }
}

impl<S: ScriptSource> PaginationExtractor<S> {
    pub const fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Pagination of the first script carrying a bootstrap, or a single page.
    pub fn spec(&self, document: &str) -> PaginationSpec {
        let scripts = self.source.scripts(document);
        let found = scripts.iter().enumerate().find_map(|(index, script)| {
            trace!(index, len = script.len(), "scanning script for pagination");
            PaginationSpec::from_script(script)
        });

        if let Some(spec) = found {
            debug!(
                page_count = spec.page_count,
                items_per_page = spec.items_per_page,
                "found pagination bootstrap"
            );
            spec
        } else {
            debug!(scripts = scripts.len(), "no pagination bootstrap, assuming a single page");
            PaginationSpec::default()
        }
    }

    /// Offsets of every page of the document. Never fails.
    pub fn page_offsets(&self, document: &str) -> PageOffsets {
        self.spec(document).offsets()
    }
}

/// [`PaginationExtractor::page_offsets`] over HTML.
pub fn page_offsets(document: &str) -> PageOffsets {
    PaginationExtractor::new().page_offsets(document)
}

/// [`PaginationExtractor::spec`] over HTML.
pub fn pagination_spec(document: &str) -> PaginationSpec {
    PaginationExtractor::new().spec(document)
}

#[allow(clippy::expect_used)]
fn pagination_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PAGINATION_PATTERN).expect("pagination pattern is valid"))
}

#[allow(clippy::expect_used)]
fn script_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse(SCRIPT_SELECTOR).expect("script selector is valid"))
}
